// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the normalized geometry shared by rectangles and the
//! crop box: points, bounds, corner handles and the resize/move rules that
//! keep every box inside the image.

use crate::util::geometry::denormalize_coordinates;
use serde::{Deserialize, Serialize};

/// Smallest width/height a rectangle may be committed or resized to.
pub const MIN_RECT_SIZE: f64 = 0.01;

/// Smallest width/height of the crop box.
pub const MIN_CROP_SIZE: f64 = 0.05;

/// A 2D point with normalized coordinates (0.0 to 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One of the four corner handles of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Handle {
    pub const ALL: [Handle; 4] = [Handle::Nw, Handle::Ne, Handle::Sw, Handle::Se];
}

/// An axis-aligned box in normalized image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Box spanned by two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn corner(&self, handle: Handle) -> Point {
        match handle {
            Handle::Nw => Point::new(self.x, self.y),
            Handle::Ne => Point::new(self.right(), self.y),
            Handle::Sw => Point::new(self.x, self.bottom()),
            Handle::Se => Point::new(self.right(), self.bottom()),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Drag `handle` to `pointer` while the opposite corner stays put.
    ///
    /// Moving edges are clamped to the image and kept at least `min_size`
    /// away from the fixed edges, so the result never inverts.
    pub fn resize_corner(&self, handle: Handle, pointer: Point, min_size: f64) -> Bounds {
        let (mut left, mut top, mut right, mut bottom) = (self.x, self.y, self.right(), self.bottom());
        let moves_left = matches!(handle, Handle::Nw | Handle::Sw);
        let moves_top = matches!(handle, Handle::Nw | Handle::Ne);

        if moves_left {
            left = pointer.x.clamp(0.0, (right - min_size).max(0.0));
        } else {
            right = pointer.x.clamp((left + min_size).min(1.0), 1.0);
        }
        if moves_top {
            top = pointer.y.clamp(0.0, (bottom - min_size).max(0.0));
        } else {
            bottom = pointer.y.clamp((top + min_size).min(1.0), 1.0);
        }

        Bounds::new(left, top, right - left, bottom - top)
    }

    /// Move the box so its top-left sits at `origin`, staying inside the image.
    pub fn move_to(&self, origin: Point) -> Bounds {
        Bounds {
            x: origin.x.clamp(0.0, (1.0 - self.width).max(0.0)),
            y: origin.y.clamp(0.0, (1.0 - self.height).max(0.0)),
            ..*self
        }
    }

    pub fn centered_on(&self, point: Point) -> Bounds {
        self.move_to(Point::new(point.x - self.width / 2.0, point.y - self.height / 2.0))
    }

    /// Pixel rectangle `(x, y, width, height)` for an image of the given size.
    pub fn to_pixels(&self, width_px: u32, height_px: u32) -> (f64, f64, f64, f64) {
        let (x, y) = denormalize_coordinates(&Point::new(self.x, self.y), width_px, height_px);
        let (w, h) = denormalize_coordinates(&Point::new(self.width, self.height), width_px, height_px);
        (x, y, w, h)
    }
}

/// Identifier of a rectangle, unique within an editor session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RectId(pub u64);

/// A committed rectangle annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: RectId,
    #[serde(flatten)]
    pub bounds: Bounds,
}

impl Rectangle {
    pub fn new(id: RectId, bounds: Bounds) -> Self {
        Self { id, bounds }
    }

    pub fn resize(&mut self, handle: Handle, pointer: Point) {
        self.bounds = self.bounds.resize_corner(handle, pointer, MIN_RECT_SIZE);
    }
}

/// The crop selection shown while positioning a crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox(pub Bounds);

impl Default for CropBox {
    fn default() -> Self {
        CropBox(Bounds::new(0.25, 0.3, 0.5, 0.4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_inside(b: &Bounds, min_size: f64) {
        assert!(b.width >= min_size - 1e-9, "width {} too small", b.width);
        assert!(b.height >= min_size - 1e-9, "height {} too small", b.height);
        assert!(b.x >= 0.0 && b.y >= 0.0, "origin outside: {:?}", b);
        assert!(b.right() <= 1.0 + 1e-9 && b.bottom() <= 1.0 + 1e-9, "extent outside: {:?}", b);
    }

    #[test]
    fn test_from_corners_any_order() {
        let b = Bounds::from_corners(Point::new(0.4, 0.3), Point::new(0.1, 0.1));
        assert!((b.x - 0.1).abs() < 1e-9);
        assert!((b.y - 0.1).abs() < 1e-9);
        assert!((b.width - 0.3).abs() < 1e-9);
        assert!((b.height - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_resize_every_corner_stays_inside() {
        let start = Bounds::new(0.2, 0.2, 0.4, 0.4);
        let pointers = [
            Point::new(-0.5, -0.5),
            Point::new(1.5, 1.5),
            Point::new(0.6, 0.6),
            Point::new(0.2, 0.2),
            Point::new(0.9, -0.2),
            Point::new(-0.1, 1.2),
            Point::new(0.0, 1.0),
        ];
        for handle in Handle::ALL {
            for pointer in pointers {
                let b = start.resize_corner(handle, pointer, MIN_RECT_SIZE);
                assert_inside(&b, MIN_RECT_SIZE);
            }
        }
    }

    #[test]
    fn test_resize_keeps_opposite_corner_fixed() {
        let start = Bounds::new(0.2, 0.2, 0.4, 0.4);
        let b = start.resize_corner(Handle::Nw, Point::new(0.1, 0.15), MIN_RECT_SIZE);
        assert!((b.right() - 0.6).abs() < 1e-9);
        assert!((b.bottom() - 0.6).abs() < 1e-9);
        assert!((b.x - 0.1).abs() < 1e-9);
        assert!((b.y - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_resize_past_opposite_edge_pins_min_size() {
        let start = Bounds::new(0.2, 0.2, 0.4, 0.4);
        let b = start.resize_corner(Handle::Se, Point::new(0.0, 0.0), MIN_CROP_SIZE);
        assert!((b.width - MIN_CROP_SIZE).abs() < 1e-9);
        assert!((b.height - MIN_CROP_SIZE).abs() < 1e-9);
        assert!((b.x - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_move_to_clamps() {
        let b = Bounds::new(0.0, 0.0, 0.5, 0.4);
        let moved = b.move_to(Point::new(0.9, -0.3));
        assert!((moved.x - 0.5).abs() < 1e-9);
        assert_eq!(moved.y, 0.0);
        assert_inside(&moved, 0.0);
    }

    #[test]
    fn test_centered_on() {
        let b = CropBox::default().0.centered_on(Point::new(0.5, 0.5));
        assert!((b.x - 0.25).abs() < 1e-9);
        assert!((b.y - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_to_pixels_example() {
        let b = Bounds::from_corners(Point::new(0.1, 0.1), Point::new(0.4, 0.3));
        let (x, y, w, h) = b.to_pixels(1000, 800);
        assert!((x - 100.0).abs() < 1e-6);
        assert!((y - 80.0).abs() < 1e-6);
        assert!((x + w - 400.0).abs() < 1e-6);
        assert!((y + h - 240.0).abs() < 1e-6);
    }
}
