// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading and rasterization.
//!
//! This module handles decoding image files, converting image files to and
//! from data URLs, and producing cropped/resized copies of an image.

use crate::models::annotation::Bounds;
use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops::FilterType, DynamicImage};
use std::path::Path;

/// A decoded image held in memory.
#[derive(Clone)]
pub struct LoadedImage {
    pub image: DynamicImage,
}

impl LoadedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// RGBA copy suitable for uploading as an egui texture.
    pub fn color_image(&self) -> egui::ColorImage {
        let rgba = self.image.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
    }
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LoadedImage({}x{})", self.width(), self.height())
    }
}

/// Load an image file from disk.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let image = image::open(path).with_context(|| format!("cannot decode {}", path.display()))?;
    Ok(LoadedImage::new(image))
}

/// Read an image file and embed it as a `data:` URL.
pub fn file_to_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    bytes_to_data_url(&bytes)
}

pub fn bytes_to_data_url(bytes: &[u8]) -> Result<String> {
    let format = image::guess_format(bytes).context("unrecognized image format")?;
    Ok(format!("data:{};base64,{}", format.to_mime_type(), STANDARD.encode(bytes)))
}

/// Decode a `data:<mime>;base64,<payload>` URL into an image.
pub fn decode_data_url(url: &str) -> Result<LoadedImage> {
    let rest = url.strip_prefix("data:").ok_or_else(|| anyhow!("not a data URL"))?;
    let (header, payload) = rest.split_once(',').ok_or_else(|| anyhow!("data URL has no payload"))?;
    if !header.ends_with(";base64") {
        bail!("data URL is not base64 encoded");
    }
    let bytes = STANDARD.decode(payload.trim()).context("invalid base64 payload")?;
    let image = image::load_from_memory(&bytes).context("cannot decode embedded image")?;
    Ok(LoadedImage::new(image))
}

/// Source-pixel rect `(x, y, width, height)` covered by a normalized crop.
///
/// The origin is kept inside the image and the rect is at least one pixel,
/// so any crop box the editor allows rasterizes on small images too.
pub fn crop_source_rect(crop: &Bounds, width: u32, height: u32) -> Result<(u32, u32, u32, u32)> {
    if width == 0 || height == 0 {
        bail!("cannot crop an empty {width}x{height} image");
    }
    let (x, y, w, h) = crop.to_pixels(width, height);
    let sx = (x.round().max(0.0) as u32).min(width - 1);
    let sy = (y.round().max(0.0) as u32).min(height - 1);
    let right = ((x + w).round().max(0.0) as u32).clamp(sx + 1, width);
    let bottom = ((y + h).round().max(0.0) as u32).clamp(sy + 1, height);
    Ok((sx, sy, right - sx, bottom - sy))
}

/// Cut the crop region out of `image`, stretched to `target` when given.
pub fn rasterize_crop(image: &DynamicImage, crop: &Bounds, target: Option<(u32, u32)>) -> Result<DynamicImage> {
    let (sx, sy, sw, sh) = crop_source_rect(crop, image.width(), image.height())?;
    let cropped = image.crop_imm(sx, sy, sw, sh);
    match target {
        Some((tw, th)) if tw == 0 || th == 0 => bail!("invalid target size {tw}x{th}"),
        Some((tw, th)) if (tw, th) != (sw, sh) => Ok(cropped.resize_exact(tw, th, FilterType::Triangle)),
        _ => Ok(cropped),
    }
}
