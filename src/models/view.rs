// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pan and zoom state for an image viewport.
//!
//! The rendered image rect is `viewport.min + pan` with size
//! `fit_size * zoom`. Wheel zoom keeps the point under the cursor fixed.

use crate::models::annotation::Point;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;

/// Direction of one wheel notch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelStep {
    In,
    Out,
}

impl WheelStep {
    pub fn factor(self) -> f32 {
        match self {
            WheelStep::In => 1.1,
            WheelStep::Out => 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub zoom: f32,
    pub pan: egui::Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: egui::Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Zoom by one wheel notch, anchored at `cursor` (relative to the viewport).
    pub fn wheel(&mut self, step: WheelStep, cursor: egui::Vec2) {
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * step.factor()).clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = new_zoom / old_zoom;
        self.pan = cursor - (cursor - self.pan) * ratio;
        self.zoom = new_zoom;
    }

    /// Button zoom; the pan is left alone.
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Grab offset for a drag starting at `pointer`.
    pub fn begin_drag(&self, pointer: egui::Pos2) -> egui::Vec2 {
        pointer.to_vec2() - self.pan
    }

    pub fn drag_to(&mut self, pointer: egui::Pos2, grab: egui::Vec2) {
        self.pan = pointer.to_vec2() - grab;
    }

    /// Screen rect of the image for a viewport and the image's fitted size.
    pub fn image_rect(&self, viewport: egui::Rect, fit_size: egui::Vec2) -> egui::Rect {
        egui::Rect::from_min_size(viewport.min + self.pan, fit_size * self.zoom)
    }

    /// Reset zoom and put `point` at the middle of the viewport.
    pub fn center_on(&mut self, point: Point, fit_size: egui::Vec2, viewport_size: egui::Vec2) {
        self.zoom = 1.0;
        let target = egui::vec2(point.x as f32 * fit_size.x, point.y as f32 * fit_size.y);
        self.pan = viewport_size / 2.0 - target;
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}
