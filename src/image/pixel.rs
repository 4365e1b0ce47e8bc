//! 8-bit RGB pixel value with derived scalar readouts.
use nalgebra::Vector3;

/// Maximum channel value of every in-core pixel.
pub const MAX_VALUE: u8 = 255;

/// Immutable RGB triple. Channels are `u8`, so they always lie in `[0, 255]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);
    pub const WHITE: Pixel = Pixel::new(MAX_VALUE, MAX_VALUE, MAX_VALUE);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Grey pixel with all three channels set to `v`.
    #[inline]
    pub const fn grey(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Build a pixel from wide integer channels, clamping each to `[0, 255]`.
    #[inline]
    pub fn from_clamped(r: i64, g: i64, b: i64) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    #[inline]
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// `⌊0.2126 R + 0.7152 G + 0.0722 B⌋`
    pub fn luma(&self) -> u8 {
        let v = 0.2126 * f64::from(self.r)
            + 0.7152 * f64::from(self.g)
            + 0.0722 * f64::from(self.b);
        clamp_channel(v as i64)
    }

    /// Largest of the three channels.
    pub fn value(&self) -> u8 {
        self.r.max(self.g).max(self.b)
    }

    /// `⌊(R + G + B) / 3⌋`
    pub fn intensity(&self) -> u8 {
        let sum = u16::from(self.r) + u16::from(self.g) + u16::from(self.b);
        (sum / 3) as u8
    }

    /// Channels as a real-valued column vector, for linear combinations.
    #[inline]
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(f64::from(self.r), f64::from(self.g), f64::from(self.b))
    }

    /// Truncate each component toward zero, then clamp it into `[0, 255]`.
    #[inline]
    pub fn from_linear(v: &Vector3<f64>) -> Self {
        Self::from_clamped(v.x as i64, v.y as i64, v.z as i64)
    }
}

#[inline]
pub fn clamp_channel(v: i64) -> u8 {
    v.clamp(0, i64::from(MAX_VALUE)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readouts_follow_channel_formulas() {
        let p = Pixel::new(10, 20, 30);
        assert_eq!(p.value(), 30);
        assert_eq!(p.intensity(), 20);
        // 2.126 + 14.304 + 2.166 = 18.596
        assert_eq!(p.luma(), 18);
        // Floor of the whole sum, not of each term: 21 + 35 + 1 would give 57.
        assert_eq!(Pixel::new(100, 50, 20).luma(), 58);

        let q = Pixel::new(100, 0, 1);
        assert_eq!(q.intensity(), 33);
        assert_eq!(q.value(), 100);
    }

    #[test]
    fn from_linear_truncates_then_clamps() {
        let p = Pixel::from_linear(&Vector3::new(-3.7, 12.9, 400.2));
        assert_eq!(p, Pixel::new(0, 12, 255));
    }

    #[test]
    fn equality_is_by_channels() {
        assert_eq!(Pixel::new(1, 2, 3), Pixel::new(1, 2, 3));
        assert_ne!(Pixel::new(1, 2, 3), Pixel::new(3, 2, 1));
        assert_eq!(Pixel::grey(7), Pixel::new(7, 7, 7));
    }
}
