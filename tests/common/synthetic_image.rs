use raster_edit::{Pixel, Raster};
use tempfile::TempDir;

/// Generates a two-colour checkerboard raster.
#[allow(dead_code)]
pub fn checkerboard(width: usize, height: usize, cell: usize, dark: Pixel, light: Pixel) -> Raster {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            pixels.push(if sum & 1 == 0 { dark } else { light });
        }
    }
    Raster::new(width, height, pixels, "checkerboard.ppm").expect("valid checkerboard")
}

/// Raster whose channels vary with position, so every pixel is distinct
/// enough to catch index mix-ups.
#[allow(dead_code)]
pub fn gradient(width: usize, height: usize) -> Raster {
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            pixels.push(Pixel::new(
                ((x * 37 + y * 11) % 256) as u8,
                ((x * 5 + y * 53) % 256) as u8,
                ((x * y * 7 + 13) % 256) as u8,
            ));
        }
    }
    Raster::new(width, height, pixels, "gradient.ppm").expect("valid gradient")
}

/// Fresh scratch directory, removed when the returned guard drops.
#[allow(dead_code)]
pub fn scratch_dir(test: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("raster-edit-{test}-"))
        .tempdir()
        .expect("create scratch dir")
}
