//! Raster transforms.
//!
//! Every transform is a variant of the closed [`Operation`] enum. Parameters
//! (brightness amount, component kind, color matrix, convolution kernel,
//! target size, seed count) are resolved once when the operation is built;
//! applying it never re-dispatches on names.
//!
//! `apply` always returns a new raster with the same source tag as the input.
//! Only [`Operation::Mosaic`] consumes randomness; `apply_with_rng` lets the
//! caller supply the source.

pub mod linear;
pub mod mask;
pub mod mosaic;
pub mod pointwise;
pub mod resample;

pub use self::linear::{ColorMatrix, Kernel};
pub use self::mask::Masked;
pub use self::pointwise::ComponentKind;

use crate::error::EditError;
use crate::image::Raster;
use log::debug;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    FlipHorizontal,
    FlipVertical,
    /// Add a signed amount to every channel (negative darkens).
    Brightness(i32),
    /// Replace every channel by one scalar readout of the pixel.
    Component(ComponentKind),
    ColorTransform(ColorMatrix),
    /// Convolution with an odd, square kernel.
    Filter(Kernel),
    /// Bilinear resample to a size no larger than the source.
    Downsize { width: usize, height: usize },
    /// Repaint nearest-seed clusters with their mean color.
    Mosaic { seeds: usize },
}

impl Operation {
    /// Greyscale color transform, also used to derive mask stencils.
    pub fn greyscale() -> Self {
        Operation::ColorTransform(ColorMatrix::greyscale())
    }

    pub fn sepia() -> Self {
        Operation::ColorTransform(ColorMatrix::sepia())
    }

    pub fn blur() -> Self {
        Operation::Filter(Kernel::blur())
    }

    pub fn sharpen() -> Self {
        Operation::Filter(Kernel::sharpen())
    }

    /// Build an operation from a command name and its textual arguments.
    ///
    /// Recognised names: `horizontal-flip`, `vertical-flip`, `brighten <n>`,
    /// `darken <n>`, `{red,green,blue,luma,value,intensity}-component`,
    /// `greyscale`, `sepia`, `blur`, `sharpen`, `mosaic <seeds>`,
    /// `downsize <width> <height>`.
    pub fn parse<S: AsRef<str>>(name: &str, args: &[S]) -> Result<Self, EditError> {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref().trim()).collect();
        let op = match name {
            "horizontal-flip" => expect_args(name, &args, 0).map(|_| Operation::FlipHorizontal)?,
            "vertical-flip" => expect_args(name, &args, 0).map(|_| Operation::FlipVertical)?,
            "brighten" | "darken" => {
                expect_args(name, &args, 1)?;
                let amount: i32 = args[0]
                    .parse()
                    .map_err(|_| EditError::parameter("Specified value must be an integer"))?;
                if name == "darken" {
                    Operation::Brightness(amount.checked_neg().ok_or_else(|| {
                        EditError::parameter("Specified value is out of range")
                    })?)
                } else {
                    Operation::Brightness(amount)
                }
            }
            "greyscale" => expect_args(name, &args, 0).map(|_| Operation::greyscale())?,
            "sepia" => expect_args(name, &args, 0).map(|_| Operation::sepia())?,
            "blur" => expect_args(name, &args, 0).map(|_| Operation::blur())?,
            "sharpen" => expect_args(name, &args, 0).map(|_| Operation::sharpen())?,
            "mosaic" => {
                expect_args(name, &args, 1)?;
                let seeds: i64 = args[0]
                    .parse()
                    .map_err(|_| EditError::parameter("Specified value must be an integer"))?;
                if seeds <= 0 {
                    return Err(EditError::parameter(
                        "Number of seeds must be a positive integer",
                    ));
                }
                Operation::Mosaic {
                    seeds: usize::try_from(seeds).map_err(|_| {
                        EditError::parameter("Number of seeds is out of range")
                    })?,
                }
            }
            "downsize" => {
                if args.len() != 2 {
                    return Err(EditError::parameter(
                        "Must enter both width and height values",
                    ));
                }
                let parse = |s: &str| {
                    s.parse::<i64>()
                        .map_err(|_| EditError::parameter("Specified values must be integers"))
                        .and_then(|v| {
                            usize::try_from(v)
                                .ok()
                                .filter(|&v| v > 0)
                                .ok_or_else(|| EditError::parameter(resample::RANGE_MESSAGE))
                        })
                };
                Operation::Downsize {
                    width: parse(args[0])?,
                    height: parse(args[1])?,
                }
            }
            other => match other
                .strip_suffix("-component")
                .and_then(ComponentKind::from_name)
            {
                Some(kind) => {
                    expect_args(name, &args, 0)?;
                    Operation::Component(kind)
                }
                None => {
                    return Err(EditError::UnknownOperation {
                        name: other.to_string(),
                    })
                }
            },
        };
        Ok(op)
    }

    /// Short human-readable name, used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::FlipHorizontal => "horizontal-flip",
            Operation::FlipVertical => "vertical-flip",
            Operation::Brightness(v) if *v < 0 => "darken",
            Operation::Brightness(_) => "brighten",
            Operation::Component(kind) => kind.command_name(),
            Operation::ColorTransform(_) => "color-transform",
            Operation::Filter(_) => "filter",
            Operation::Downsize { .. } => "downsize",
            Operation::Mosaic { .. } => "mosaic",
        }
    }

    /// Apply with the thread-local random source.
    pub fn apply(&self, raster: &Raster) -> Result<Raster, EditError> {
        self.apply_with_rng(raster, &mut rand::rng())
    }

    /// Apply, drawing any randomness from `rng`.
    pub fn apply_with_rng<R: Rng + ?Sized>(
        &self,
        raster: &Raster,
        rng: &mut R,
    ) -> Result<Raster, EditError> {
        debug!(
            "Operation::apply {} on {}x{} ({})",
            self.name(),
            raster.width(),
            raster.height(),
            raster.source()
        );
        match self {
            Operation::FlipHorizontal => Ok(pointwise::flip_horizontal(raster)),
            Operation::FlipVertical => Ok(pointwise::flip_vertical(raster)),
            Operation::Brightness(amount) => Ok(pointwise::brighten(raster, *amount)),
            Operation::Component(kind) => Ok(pointwise::extract_component(raster, *kind)),
            Operation::ColorTransform(matrix) => Ok(linear::color_transform(raster, matrix)),
            Operation::Filter(kernel) => Ok(linear::convolve(raster, kernel)),
            Operation::Downsize { width, height } => resample::downsize(raster, *width, *height),
            Operation::Mosaic { seeds } => mosaic::mosaic(raster, *seeds, rng),
        }
    }
}

fn expect_args(name: &str, args: &[&str], count: usize) -> Result<(), EditError> {
    if args.len() != count {
        return Err(EditError::parameter(format!(
            "{name} expects {count} argument(s), got {}",
            args.len()
        )));
    }
    Ok(())
}
