//! Strict plain-text PPM (`P3`) reader and writer.
//!
//! Reading
//! - Every line whose first character is `#` is dropped before tokenizing, so
//!   comments may sit anywhere, including between pixel values.
//! - The remaining text is split on whitespace: `P3`, width, height, max value,
//!   then `height · width` RGB triples in row-major order.
//! - Width, height, and max value must be positive; each channel must lie in
//!   `[0, max value]`. Anything else is a `Format` error.
//!
//! Writing
//! - `P3`, `width height`, `255`, then one channel value per line (R, G, B for
//!   each pixel, row-major). No comments are emitted, so a write followed by a
//!   read reproduces the raster exactly.
use crate::error::EditError;
use crate::image::{ImageView, Pixel, Raster};
use log::debug;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const MAGIC: &str = "P3";
const PREALLOC_LIMIT: usize = 1 << 20;

/// Parse PPM text. `source` becomes the raster's source tag.
pub fn decode_str(text: &str, source: &str) -> Result<Raster, EditError> {
    let mut tokens = text
        .lines()
        .filter(|line| !line.starts_with('#'))
        .flat_map(str::split_whitespace);

    match tokens.next() {
        Some(MAGIC) => {}
        Some(other) => {
            return Err(EditError::format(format!(
                "plain RAW file should begin with P3, found '{other}'"
            )))
        }
        None => return Err(EditError::format("file is empty")),
    }

    let width = next_positive(&mut tokens, "width")?;
    let height = next_positive(&mut tokens, "height")?;
    let max_value = next_positive(&mut tokens, "maximum value")?;

    let count = width
        .checked_mul(height)
        .ok_or_else(|| EditError::format(format!("{width}x{height} is too large")))?;
    // The header is untrusted; grow with the body instead of reserving up front.
    let mut pixels = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for index in 0..count {
        let mut channel = || next_channel(&mut tokens, max_value, index);
        let r = channel()?;
        let g = channel()?;
        let b = channel()?;
        pixels.push(Pixel::new(r, g, b));
    }

    debug!("ppm::decode_str {source}: {width}x{height}, max value {max_value}");
    Raster::new(width, height, pixels, source)
}

/// Read a PPM file. The path becomes the raster's source tag.
pub fn read_ppm(path: impl AsRef<Path>) -> Result<Raster, EditError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|_| EditError::NotFound {
        path: path.to_path_buf(),
    })?;
    let text = String::from_utf8(bytes)
        .map_err(|e| EditError::format(format!("{} is not text: {e}", path.display())))?;
    decode_str(&text, &path.to_string_lossy())
}

/// Serialize to PPM text.
pub fn encode_string(raster: &Raster) -> String {
    let mut out = String::with_capacity(16 + raster.width() * raster.height() * 12);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{MAGIC}");
    let _ = writeln!(out, "{} {}", raster.width(), raster.height());
    let _ = writeln!(out, "{}", raster.max_value());
    for row in raster.rows() {
        for px in row {
            for c in px.channels() {
                let _ = writeln!(out, "{c}");
            }
        }
    }
    out
}

/// Write a PPM file, creating parent directories as needed.
pub fn write_ppm(raster: &Raster, path: impl AsRef<Path>) -> Result<(), EditError> {
    let path = path.as_ref();
    crate::image::io::ensure_parent_dir(path)?;
    fs::write(path, encode_string(raster)).map_err(|e| EditError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn next_int<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<i64, EditError> {
    let token = tokens
        .next()
        .ok_or_else(|| EditError::format(format!("missing {what}")))?;
    token
        .parse::<i64>()
        .map_err(|_| EditError::format(format!("{what} '{token}' is not an integer")))
}

fn next_positive<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<usize, EditError> {
    let v = next_int(tokens, what)?;
    if v <= 0 {
        return Err(EditError::format(format!(
            "provided {what} is a non-positive integer"
        )));
    }
    usize::try_from(v).map_err(|_| EditError::format(format!("{what} {v} is too large")))
}

fn next_channel<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    max_value: usize,
    index: usize,
) -> Result<u8, EditError> {
    let token = tokens
        .next()
        .ok_or_else(|| EditError::format(format!("missing channel of pixel {index}")))?;
    let v: i64 = token.parse().map_err(|_| {
        EditError::format(format!("channel '{token}' of pixel {index} is not an integer"))
    })?;
    if v < 0 || v as u64 > max_value as u64 {
        return Err(EditError::format(format!(
            "invalid component value {v}, either negative or higher than the maximum value {max_value}"
        )));
    }
    u8::try_from(v).map_err(|_| {
        EditError::format(format!("component value {v} does not fit in 8 bits"))
    })
}
