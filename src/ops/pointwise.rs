//! Per-pixel and mirror transforms: flips, brightness, component extraction.
use crate::image::{Pixel, Raster};

/// Scalar readout used by component extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Red,
    Green,
    Blue,
    Luma,
    Value,
    Intensity,
}

impl ComponentKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "red" => Some(ComponentKind::Red),
            "green" => Some(ComponentKind::Green),
            "blue" => Some(ComponentKind::Blue),
            "luma" => Some(ComponentKind::Luma),
            "value" => Some(ComponentKind::Value),
            "intensity" => Some(ComponentKind::Intensity),
            _ => None,
        }
    }

    pub(crate) fn command_name(self) -> &'static str {
        match self {
            ComponentKind::Red => "red-component",
            ComponentKind::Green => "green-component",
            ComponentKind::Blue => "blue-component",
            ComponentKind::Luma => "luma-component",
            ComponentKind::Value => "value-component",
            ComponentKind::Intensity => "intensity-component",
        }
    }

    #[inline]
    pub fn extract(self, px: Pixel) -> u8 {
        match self {
            ComponentKind::Red => px.r,
            ComponentKind::Green => px.g,
            ComponentKind::Blue => px.b,
            ComponentKind::Luma => px.luma(),
            ComponentKind::Value => px.value(),
            ComponentKind::Intensity => px.intensity(),
        }
    }
}

/// `out[i][j] = in[i][W-1-j]`
pub fn flip_horizontal(raster: &Raster) -> Raster {
    let w = raster.width();
    Raster::from_fn(w, raster.height(), raster.source(), |i, j| {
        raster.get(i, w - 1 - j)
    })
}

/// `out[i][j] = in[H-1-i][j]`
pub fn flip_vertical(raster: &Raster) -> Raster {
    let h = raster.height();
    Raster::from_fn(raster.width(), h, raster.source(), |i, j| {
        raster.get(h - 1 - i, j)
    })
}

/// Add `amount` to every channel, clamping into `[0, 255]`.
pub fn brighten(raster: &Raster, amount: i32) -> Raster {
    let v = i64::from(amount);
    raster.map_pixels(|p| {
        Pixel::from_clamped(i64::from(p.r) + v, i64::from(p.g) + v, i64::from(p.b) + v)
    })
}

/// Greyscale image of one scalar readout.
pub fn extract_component(raster: &Raster, kind: ComponentKind) -> Raster {
    raster.map_pixels(|p| Pixel::grey(kind.extract(p)))
}
