//! File I/O for rasters.
//!
//! - `decode_opaque` / `encode_opaque`: bridge to the `image` crate for the
//!   compressed formats (PNG, JPEG, BMP).
//! - `load_raster`: pick the PPM codec or the bridge from the file extension.
//! - `save_raster`: the save policy. PPM output is always allowed; compressed
//!   output from a PPM source is allowed; compressed-to-compressed is only
//!   allowed as an identity re-encode (same extension).
//! - `write_json_file`: pretty-print a serializable value (e.g. a histogram).
use super::{ImageView, Pixel, Raster};
use crate::error::EditError;
use crate::format::FileFormat;
use crate::ppm;
use image::RgbImage;
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Decode a PNG/JPEG/BMP file into a raster tagged with its path.
pub fn decode_opaque(path: impl AsRef<Path>) -> Result<Raster, EditError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(EditError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let img = image::open(path)
        .map_err(|e| EditError::Io {
            path: path.to_path_buf(),
            reason: format!("failed to decode: {e}"),
        })?
        .into_rgb8();
    let (width, height) = (img.width() as usize, img.height() as usize);
    let pixels = img
        .pixels()
        .map(|p| Pixel::new(p.0[0], p.0[1], p.0[2]))
        .collect();
    Raster::new(width, height, pixels, path.to_string_lossy())
}

/// Encode `raster` with the `image` crate in the given compressed format.
pub fn encode_opaque(
    raster: &Raster,
    path: impl AsRef<Path>,
    format: FileFormat,
) -> Result<(), EditError> {
    let path = path.as_ref();
    let image_format = format
        .image_format()
        .ok_or_else(|| EditError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
    ensure_parent_dir(path)?;
    let mut data = Vec::with_capacity(raster.width() * raster.height() * 3);
    for row in raster.rows() {
        for px in row {
            data.extend_from_slice(&px.channels());
        }
    }
    let img = RgbImage::from_raw(raster.width() as u32, raster.height() as u32, data).ok_or_else(
        || EditError::Io {
            path: path.to_path_buf(),
            reason: "failed to create image buffer".to_string(),
        },
    )?;
    img.save_with_format(path, image_format)
        .map_err(|e| EditError::Io {
            path: path.to_path_buf(),
            reason: format!("failed to save: {e}"),
        })
}

/// Load a raster, choosing the codec from the file extension.
pub fn load_raster(path: impl AsRef<Path>) -> Result<Raster, EditError> {
    let path = path.as_ref();
    match FileFormat::from_path(path) {
        Some(FileFormat::Ppm) => ppm::read_ppm(path),
        Some(_) => decode_opaque(path),
        None => Err(EditError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Save a raster to `path` following the conversion policy.
///
/// A source tag with no recognised extension counts as the native PPM form.
pub fn save_raster(raster: &Raster, path: impl AsRef<Path>) -> Result<(), EditError> {
    let path = path.as_ref();
    let target = FileFormat::from_path(path).ok_or_else(|| EditError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let source = FileFormat::from_path(raster.source()).unwrap_or(FileFormat::Ppm);
    debug!(
        "save_raster {} ({source}) -> {} ({target})",
        raster.source(),
        path.display()
    );
    if target.is_ppm() {
        return ppm::write_ppm(raster, path);
    }
    // Table entries compare equal regardless of extension case.
    if !source.is_ppm() && source != target {
        return Err(EditError::UnsupportedConversion {
            from: source.to_string(),
            to: target.to_string(),
        });
    }
    encode_opaque(raster, path, target)
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), EditError> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| EditError::Io {
        path: path.to_path_buf(),
        reason: format!("failed to serialize JSON: {e}"),
    })?;
    fs::write(path, json).map_err(|e| EditError::Io {
        path: path.to_path_buf(),
        reason: format!("failed to write JSON: {e}"),
    })
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), EditError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| EditError::Io {
                path: parent.to_path_buf(),
                reason: format!("failed to create directory: {e}"),
            })?;
        }
    }
    Ok(())
}
