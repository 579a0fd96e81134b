//! I/O helpers for frames, masks, and JSON reports.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned RGB frame.
//! - `save_rgb_frame`: write an annotated frame to disk.
//! - `save_mask`: write a binary mask (edge map, ROI) as a grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::gray::Mask8;
use super::rgb::RgbFrame;
use image::{GrayImage, ImageBuffer, Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to interleaved 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbFrame, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let w = img.width() as usize;
    let h = img.height() as usize;
    Ok(RgbFrame {
        w,
        h,
        data: img.into_raw(),
    })
}

/// Save an RGB frame as a PNG/JPEG depending on the path extension.
pub fn save_rgb_frame(frame: &RgbFrame, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let buffer: RgbImage =
        ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(frame.w as u32, frame.h as u32, frame.data.clone())
            .ok_or_else(|| "Failed to create image buffer".to_string())?;
    buffer
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a binary mask as a grayscale PNG.
pub fn save_mask(mask: &Mask8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let buffer = GrayImage::from_raw(mask.w as u32, mask.h as u32, mask.data.clone())
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    buffer
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
