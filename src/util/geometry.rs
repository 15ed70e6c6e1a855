// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides utilities for coordinate transformations between
//! screen, pixel and normalized image coordinates.

use crate::models::annotation::{Bounds, Handle, Point};

/// Distance (normalized, per axis) within which a corner handle is hit.
pub const HANDLE_TOLERANCE: f64 = 0.02;

/// Convert normalized coordinates to pixel coordinates.
pub fn denormalize_coordinates(point: &Point, width: u32, height: u32) -> (f64, f64) {
    (point.x * width as f64, point.y * height as f64)
}

/// Map a pointer position onto the rendered image, clamped to [0, 1].
pub fn pointer_to_normalized(pointer: egui::Pos2, image_rect: egui::Rect) -> Point {
    let size = image_rect.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return Point::new(0.0, 0.0);
    }
    let x = ((pointer.x - image_rect.min.x) / size.x) as f64;
    let y = ((pointer.y - image_rect.min.y) / size.y) as f64;
    Point::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0))
}

pub fn normalized_to_screen(point: Point, image_rect: egui::Rect) -> egui::Pos2 {
    egui::pos2(
        image_rect.min.x + point.x as f32 * image_rect.width(),
        image_rect.min.y + point.y as f32 * image_rect.height(),
    )
}

pub fn bounds_to_screen(bounds: &Bounds, image_rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        normalized_to_screen(Point::new(bounds.x, bounds.y), image_rect),
        normalized_to_screen(Point::new(bounds.right(), bounds.bottom()), image_rect),
    )
}

/// First corner handle of `bounds` within tolerance of `point`, if any.
pub fn hit_handle(bounds: &Bounds, point: Point) -> Option<Handle> {
    Handle::ALL.into_iter().find(|&handle| {
        let corner = bounds.corner(handle);
        (point.x - corner.x).abs() <= HANDLE_TOLERANCE && (point.y - corner.y).abs() <= HANDLE_TOLERANCE
    })
}

/// Largest size with the image's aspect ratio that fits inside `available`.
pub fn fit_size(image_px: (u32, u32), available: egui::Vec2) -> egui::Vec2 {
    let (img_width, img_height) = image_px;
    if img_width == 0 || img_height == 0 || available.x <= 0.0 || available.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let img_aspect = img_width as f32 / img_height as f32;
    let available_aspect = available.x / available.y;

    if img_aspect > available_aspect {
        // Image is wider - fit to width
        egui::vec2(available.x, available.x / img_aspect)
    } else {
        // Image is taller - fit to height
        egui::vec2(available.y * img_aspect, available.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denormalize_coordinates() {
        let (x, y) = denormalize_coordinates(&Point::new(0.1, 0.3), 1000, 800);
        assert!((x - 100.0).abs() < 0.0001);
        assert!((y - 240.0).abs() < 0.0001);

        let (x, y) = denormalize_coordinates(&Point::new(1.0, 1.0), 1920, 1080);
        assert_eq!((x, y), (1920.0, 1080.0));
    }

    #[test]
    fn test_pointer_mapping_clamps_outside_image() {
        let rect = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(200.0, 100.0));
        let pointers = [
            egui::pos2(-1000.0, -1000.0),
            egui::pos2(5000.0, 5000.0),
            egui::pos2(100.0, 50.0),
            egui::pos2(300.0, 150.0),
            egui::pos2(150.0, 9999.0),
        ];
        for pointer in pointers {
            let p = pointer_to_normalized(pointer, rect);
            assert!((0.0..=1.0).contains(&p.x), "x out of range for {:?}", pointer);
            assert!((0.0..=1.0).contains(&p.y), "y out of range for {:?}", pointer);
        }

        let mid = pointer_to_normalized(egui::pos2(200.0, 100.0), rect);
        assert!((mid.x - 0.5).abs() < 1e-6);
        assert!((mid.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_mapping_degenerate_rect() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::Vec2::ZERO);
        assert_eq!(pointer_to_normalized(egui::pos2(12.0, 12.0), rect), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_hit_handle_tolerance() {
        let b = Bounds::new(0.2, 0.2, 0.4, 0.4);
        assert_eq!(hit_handle(&b, Point::new(0.21, 0.19)), Some(Handle::Nw));
        assert_eq!(hit_handle(&b, Point::new(0.6, 0.215)), Some(Handle::Ne));
        assert_eq!(hit_handle(&b, Point::new(0.19, 0.6)), Some(Handle::Sw));
        assert_eq!(hit_handle(&b, Point::new(0.615, 0.585)), Some(Handle::Se));
        assert_eq!(hit_handle(&b, Point::new(0.4, 0.4)), None);
        assert_eq!(hit_handle(&b, Point::new(0.23, 0.2)), None);
    }

    #[test]
    fn test_example_rectangle_in_pixels() {
        // 1000x800 image drawn at native size
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1000.0, 800.0));
        let b = Bounds::from_corners(Point::new(0.1, 0.1), Point::new(0.4, 0.3));
        let screen = bounds_to_screen(&b, rect);
        assert!((screen.min.x - 100.0).abs() < 1e-3);
        assert!((screen.min.y - 80.0).abs() < 1e-3);
        assert!((screen.max.x - 400.0).abs() < 1e-3);
        assert!((screen.max.y - 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_fit_size() {
        let wide = fit_size((2000, 1000), egui::vec2(800.0, 800.0));
        assert_eq!(wide, egui::vec2(800.0, 400.0));
        let tall = fit_size((1000, 2000), egui::vec2(800.0, 800.0));
        assert_eq!(tall, egui::vec2(400.0, 800.0));
        assert_eq!(fit_size((0, 10), egui::vec2(10.0, 10.0)), egui::Vec2::ZERO);
    }
}
