//! Partial application of an operation through a greyscale stencil.
use super::Operation;
use crate::error::EditError;
use crate::image::{Pixel, Raster};
use rand::Rng;

/// Stencil channels strictly below this value select the transformed pixel.
pub const MASK_THRESHOLD: u8 = 127;

/// An operation restricted to the dark region of a stencil.
#[derive(Clone, Debug, PartialEq)]
pub struct Masked {
    op: Operation,
    stencil: Raster,
}

impl Masked {
    /// Derive the stencil as the greyscale transform of `mask_source`.
    pub fn new(op: Operation, mask_source: &Raster) -> Self {
        let stencil = super::linear::color_transform(
            mask_source,
            &super::linear::ColorMatrix::greyscale(),
        );
        Self { op, stencil }
    }

    /// Use `stencil` as-is.
    pub fn with_stencil(op: Operation, stencil: Raster) -> Self {
        Self { op, stencil }
    }

    pub fn operation(&self) -> &Operation {
        &self.op
    }

    pub fn stencil(&self) -> &Raster {
        &self.stencil
    }

    pub fn apply(&self, target: &Raster) -> Result<Raster, EditError> {
        self.apply_with_rng(target, &mut rand::rng())
    }

    /// Run the wrapped operation on `target`, then keep its output only where
    /// the stencil is dark.
    pub fn apply_with_rng<R: Rng + ?Sized>(
        &self,
        target: &Raster,
        rng: &mut R,
    ) -> Result<Raster, EditError> {
        if !self.stencil.same_dimensions(target) {
            return Err(EditError::Dimension {
                expected: (target.width(), target.height()),
                found: (self.stencil.width(), self.stencil.height()),
            });
        }
        let modified = self.op.apply_with_rng(target, rng)?;
        if !modified.same_dimensions(target) {
            // Size-changing operations cannot be blended pixel by pixel.
            return Err(EditError::Dimension {
                expected: (target.width(), target.height()),
                found: (modified.width(), modified.height()),
            });
        }
        Ok(Raster::from_fn(
            target.width(),
            target.height(),
            target.source(),
            |i, j| {
                if is_dark(self.stencil.get(i, j)) {
                    modified.get(i, j)
                } else {
                    target.get(i, j)
                }
            },
        ))
    }
}

/// `true` when all three channels are below [`MASK_THRESHOLD`].
#[inline]
pub fn is_dark(px: Pixel) -> bool {
    px.r < MASK_THRESHOLD && px.g < MASK_THRESHOLD && px.b < MASK_THRESHOLD
}
