pub mod io;
pub mod pixel;
pub mod raster;
pub mod traits;

pub use self::pixel::{Pixel, MAX_VALUE};
pub use self::raster::Raster;
pub use self::traits::{ImageView, Rows};
