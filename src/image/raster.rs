//! Owned, immutable RGB raster in row-major layout.
//!
//! A `Raster` never changes after construction. Operations read it through
//! `get`/`row` and allocate a new raster for their output, carrying the
//! source tag over unchanged.
use super::pixel::{Pixel, MAX_VALUE};
use super::traits::ImageView;
use crate::error::EditError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
    /// Where the raster came from (usually the loaded path). Selects the
    /// output encoding on save; never affects pixel semantics.
    source: String,
}

impl Raster {
    /// Wrap a row-major pixel buffer. Both dimensions must be positive and the
    /// buffer must hold exactly `width * height` pixels.
    pub fn new(
        width: usize,
        height: usize,
        pixels: Vec<Pixel>,
        source: impl Into<String>,
    ) -> Result<Self, EditError> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(EditError::Dimension {
                expected: (width, height),
                found: (
                    if height == 0 { 0 } else { pixels.len() / height },
                    height,
                ),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            source: source.into(),
        })
    }

    /// Build from nested rows; every row must have the length of the first.
    pub fn from_rows(rows: Vec<Vec<Pixel>>, source: impl Into<String>) -> Result<Self, EditError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(EditError::Dimension {
                expected: (width, height),
                found: (bad.len(), height),
            });
        }
        Self::new(width, height, rows.into_iter().flatten().collect(), source)
    }

    /// Evaluate `f(row, col)` for every position of a `width × height` grid.
    ///
    /// Callers guarantee positive dimensions.
    pub(crate) fn from_fn(
        width: usize,
        height: usize,
        source: &str,
        mut f: impl FnMut(usize, usize) -> Pixel,
    ) -> Self {
        debug_assert!(width > 0 && height > 0);
        let mut pixels = Vec::with_capacity(width * height);
        for i in 0..height {
            for j in 0..width {
                pixels.push(f(i, j));
            }
        }
        Self {
            width,
            height,
            pixels,
            source: source.to_owned(),
        }
    }

    /// Same size and source as `self`, each pixel replaced by `f(pixel)`.
    pub fn map_pixels(&self, f: impl Fn(Pixel) -> Pixel) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
            source: self.source.clone(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn max_value(&self) -> u8 {
        MAX_VALUE
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Row-major pixel buffer.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Bounds-checked pixel lookup.
    pub fn pixel_at(&self, row: usize, col: usize) -> Result<Pixel, EditError> {
        if row >= self.height || col >= self.width {
            return Err(EditError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.get(row, col))
    }

    /// Pixel at `(row, col)`; panics when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Pixel {
        self.pixels[row * self.width + col]
    }

    pub fn same_dimensions(&self, other: &Raster) -> bool {
        self.width == other.width && self.height == other.height
    }
}

impl ImageView for Raster {
    type Pixel = Pixel;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn row(&self, y: usize) -> &[Pixel] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[Pixel]> {
        Some(&self.pixels)
    }
}
