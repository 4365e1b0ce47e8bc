//! Linear-combination transforms: 3×3 color matrices and convolution kernels.
//!
//! Both accumulate real-valued RGB vectors and finish through
//! [`Pixel::from_linear`] (truncate toward zero, then clamp to `[0, 255]`).
//!
//! Convolution omits kernel taps whose source pixel falls outside the raster;
//! it neither zero-pads nor replicates the border, so the weights of the
//! remaining taps are not renormalised.
use crate::error::EditError;
use crate::image::{Pixel, Raster};
use nalgebra::{Matrix3, Vector3};

const GREYSCALE: [[f64; 3]; 3] = [
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
];

const SEPIA: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

const BLUR_3X3: [[f64; 3]; 3] = [
    [0.0625, 0.125, 0.0625],
    [0.125, 0.25, 0.125],
    [0.0625, 0.125, 0.0625],
];

const SHARPEN_5X5: [[f64; 5]; 5] = [
    [-0.125, -0.125, -0.125, -0.125, -0.125],
    [-0.125, 0.25, 0.25, 0.25, -0.125],
    [-0.125, 0.25, 1.0, 0.25, -0.125],
    [-0.125, 0.25, 0.25, 0.25, -0.125],
    [-0.125, -0.125, -0.125, -0.125, -0.125],
];

/// Row `c` of the matrix gives output channel `c` as a combination of the
/// input R, G, B.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMatrix(Matrix3<f64>);

impl ColorMatrix {
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self(Matrix3::from_fn(|r, c| rows[r][c]))
    }

    pub fn greyscale() -> Self {
        Self::from_rows(GREYSCALE)
    }

    pub fn sepia() -> Self {
        Self::from_rows(SEPIA)
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.0
    }

    #[inline]
    pub fn transform(&self, px: Pixel) -> Pixel {
        Pixel::from_linear(&(self.0 * px.to_vector()))
    }
}

/// Odd-sized square convolution kernel, stored row-major.
///
/// `weight(a, b)` multiplies the source pixel `a - radius` rows and
/// `b - radius` columns away from the output position.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    pub fn new(size: usize, weights: Vec<f64>) -> Result<Self, EditError> {
        if size == 0 || size % 2 == 0 {
            return Err(EditError::parameter(format!(
                "kernel size must be odd and positive, got {size}"
            )));
        }
        if weights.len() != size * size {
            return Err(EditError::parameter(format!(
                "a {size}x{size} kernel needs {} weights, got {}",
                size * size,
                weights.len()
            )));
        }
        Ok(Self { size, weights })
    }

    fn from_array<const N: usize>(rows: [[f64; N]; N]) -> Self {
        Self {
            size: N,
            weights: rows.iter().flatten().copied().collect(),
        }
    }

    /// 3×3 blur: center 1/4, edge neighbours 1/8, corners 1/16.
    pub fn blur() -> Self {
        Self::from_array(BLUR_3X3)
    }

    /// 5×5 sharpen: center 1, inner ring 1/4, outer ring −1/8.
    pub fn sharpen() -> Self {
        Self::from_array(SHARPEN_5X5)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    #[inline]
    pub fn weight(&self, a: usize, b: usize) -> f64 {
        self.weights[a * self.size + b]
    }
}

pub fn color_transform(raster: &Raster, matrix: &ColorMatrix) -> Raster {
    raster.map_pixels(|p| matrix.transform(p))
}

pub fn convolve(raster: &Raster, kernel: &Kernel) -> Raster {
    let (w, h) = (raster.width(), raster.height());
    let r = kernel.radius();
    Raster::from_fn(w, h, raster.source(), |i, j| {
        let mut acc = Vector3::zeros();
        // Source rows/cols i + a - r, restricted to the raster.
        let rows = r.saturating_sub(i)..kernel.size().min(h + r - i);
        let cols = r.saturating_sub(j)..kernel.size().min(w + r - j);
        for a in rows {
            let si = i + a - r;
            for b in cols.clone() {
                let sj = j + b - r;
                acc += kernel.weight(a, b) * raster.get(si, sj).to_vector();
            }
        }
        Pixel::from_linear(&acc)
    })
}
