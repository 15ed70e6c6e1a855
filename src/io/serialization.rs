// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Rectangle export.
//!
//! This module writes the editor's rectangles, in both normalized and
//! pixel coordinates, to YAML or JSON.

use crate::models::annotation::{Bounds, Rectangle};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pixel-space copy of a rectangle for the current image size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedRectangle {
    pub id: u64,
    pub normalized: Bounds,
    pub pixels: PixelRect,
}

/// Complete export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleExport {
    pub image_width: u32,
    pub image_height: u32,
    pub rectangles: Vec<ExportedRectangle>,
}

impl RectangleExport {
    pub fn new(rectangles: &[Rectangle], image_width: u32, image_height: u32) -> Self {
        let rectangles = rectangles
            .iter()
            .map(|r| {
                let (x, y, width, height) = r.bounds.to_pixels(image_width, image_height);
                ExportedRectangle {
                    id: r.id.0,
                    normalized: r.bounds,
                    pixels: PixelRect { x, y, width, height },
                }
            })
            .collect();
        Self {
            image_width,
            image_height,
            rectangles,
        }
    }
}

/// Export rectangles to YAML format.
pub fn export_yaml(data: &RectangleExport, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

/// Export rectangles to JSON format.
pub fn export_json(data: &RectangleExport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

/// Pick the format from the file extension.
pub fn export(data: &RectangleExport, path: &Path) -> Result<()> {
    let extension = path.extension().and_then(|s| s.to_str());
    match extension {
        Some("yaml") | Some("yml") => export_yaml(data, path),
        Some("json") => export_json(data, path),
        _ => bail!("Unsupported file extension: {:?}", extension),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::{Point, RectId};

    fn sample() -> RectangleExport {
        let bounds = Bounds::from_corners(Point::new(0.1, 0.1), Point::new(0.4, 0.3));
        RectangleExport::new(&[Rectangle::new(RectId(1), bounds)], 1000, 800)
    }

    #[test]
    fn test_export_pixels() {
        let export = sample();
        let px = &export.rectangles[0].pixels;
        assert!((px.x - 100.0).abs() < 1e-6);
        assert!((px.y - 80.0).abs() < 1e-6);
        assert!((px.width - 300.0).abs() < 1e-6);
        assert!((px.height - 160.0).abs() < 1e-6);
    }

    #[test]
    fn test_export_json_and_yaml_files() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("rects.json");
        export(&sample(), &json_path).unwrap();
        let back: RectangleExport = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(back.rectangles.len(), 1);
        assert_eq!(back.image_width, 1000);

        let yaml_path = dir.path().join("rects.yml");
        export(&sample(), &yaml_path).unwrap();
        let yaml = std::fs::read_to_string(&yaml_path).unwrap();
        assert!(yaml.contains("image_height: 800"));
    }

    #[test]
    fn test_export_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export(&sample(), &dir.path().join("rects.txt")).is_err());
    }
}
