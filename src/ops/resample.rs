//! Bilinear downsizing.
//!
//! Target pixel `(i, j)` samples the source at `x = i·H/h'`, `y = j·W/w'`
//! and blends the four neighbours at `floor` and `floor + 1` on each axis by
//! the fractional offsets, truncating the result. When `floor + 1` would fall
//! off the raster (only possible when an axis keeps its size), both indices
//! step back by one, so the last row/column is reproduced exactly.
use crate::error::EditError;
use crate::image::{Pixel, Raster};

pub(crate) const RANGE_MESSAGE: &str =
    "Width and height numbers must be greater than 0 and less than the current dimensions";

pub fn downsize(raster: &Raster, width: usize, height: usize) -> Result<Raster, EditError> {
    let (src_w, src_h) = (raster.width(), raster.height());
    if width == 0 || width > src_w || height == 0 || height > src_h {
        return Err(EditError::parameter(format!(
            "{RANGE_MESSAGE} ({src_w}x{src_h}, requested {width}x{height})"
        )));
    }
    let row_ratio = src_h as f64 / height as f64;
    let col_ratio = src_w as f64 / width as f64;
    Ok(Raster::from_fn(width, height, raster.source(), |i, j| {
        sample(raster, i as f64 * row_ratio, j as f64 * col_ratio)
    }))
}

/// Bracketing indices and the weight of the upper one along an axis of `len`.
#[inline]
fn bracket(pos: f64, len: usize) -> (usize, usize, f64) {
    let lo = pos as usize;
    if lo + 1 < len {
        return (lo, lo + 1, pos - lo as f64);
    }
    if len == 1 {
        return (0, 0, 0.0);
    }
    let lo = len - 2;
    (lo, lo + 1, pos - lo as f64)
}

fn sample(raster: &Raster, x: f64, y: f64) -> Pixel {
    let (x0, x1, tx) = bracket(x, raster.height());
    let (y0, y1, ty) = bracket(y, raster.width());

    let a = raster.get(x0, y0).to_vector();
    let b = raster.get(x1, y0).to_vector();
    let c = raster.get(x0, y1).to_vector();
    let d = raster.get(x1, y1).to_vector();

    let m = b * tx + a * (1.0 - tx);
    let n = d * tx + c * (1.0 - tx);
    Pixel::from_linear(&(n * ty + m * (1.0 - ty)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: usize, h: usize) -> Raster {
        let pixels = (0..w * h)
            .map(|k| Pixel::new((k % w * 10) as u8, (k / w * 10) as u8, 7))
            .collect();
        Raster::new(w, h, pixels, "ramp.ppm").unwrap()
    }

    #[test]
    fn same_size_is_identity() {
        let r = ramp(5, 4);
        assert_eq!(downsize(&r, 5, 4).unwrap(), r);
    }

    #[test]
    fn halving_interpolates_between_neighbours() {
        let r = ramp(4, 4);
        let out = downsize(&r, 2, 2).unwrap();
        assert_eq!((out.width(), out.height()), (2, 2));
        assert_eq!(out.get(0, 0), r.get(0, 0));
        // x = y = 2 hit source samples exactly.
        assert_eq!(out.get(1, 1), r.get(2, 2));
    }

    #[test]
    fn fractional_positions_blend() {
        let r = ramp(3, 1);
        let out = downsize(&r, 2, 1).unwrap();
        // y = 1.5 between columns 1 and 2: red 10 and 20 -> 15.
        assert_eq!(out.get(0, 1), Pixel::new(15, 0, 7));
    }

    #[test]
    fn single_row_source_keeps_full_weight() {
        let r = ramp(4, 1);
        let out = downsize(&r, 4, 1).unwrap();
        assert_eq!(out, r);
    }

    #[test]
    fn out_of_range_sizes_are_parameter_errors() {
        let r = ramp(4, 4);
        for (w, h) in [(0, 2), (2, 0), (5, 2), (2, 5)] {
            assert!(matches!(
                downsize(&r, w, h),
                Err(EditError::Parameter { .. })
            ));
        }
    }
}
