#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod format;
pub mod histogram;
pub mod image;
pub mod message;
pub mod ops;
pub mod ppm;
pub mod session;
pub mod store;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{EditError, TransmissionError};
pub use crate::format::FileFormat;
pub use crate::histogram::{Histogram, HistogramChannel};
pub use crate::image::{Pixel, Raster};
pub use crate::ops::{ColorMatrix, ComponentKind, Kernel, Masked, Operation};
pub use crate::session::Session;
pub use crate::store::RasterStore;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use raster_edit::prelude::*;
///
/// # fn main() -> Result<(), EditError> {
/// let raster = raster_edit::ppm::decode_str("P3 1 1 255 200 240 10", "mem.ppm")?;
/// let brighter = Operation::Brightness(50).apply(&raster)?;
/// assert_eq!(brighter.get(0, 0), Pixel::new(250, 255, 60));
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageView;
    pub use crate::{
        ColorMatrix, ComponentKind, EditError, Kernel, Masked, Operation, Pixel, Raster,
    };
}
