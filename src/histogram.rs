//! Per-channel value histograms.
//!
//! Counts, for every value `0..=255`, how many pixels carry it in the red,
//! green, and blue channels and in the intensity readout. Each channel's
//! counts sum to `W·H`.
use crate::image::{ImageView, Raster};
use serde::Serialize;

pub const BINS: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistogramChannel {
    Red,
    Green,
    Blue,
    Intensity,
}

impl HistogramChannel {
    pub const ALL: [HistogramChannel; 4] = [
        HistogramChannel::Red,
        HistogramChannel::Green,
        HistogramChannel::Blue,
        HistogramChannel::Intensity,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    red: Vec<u32>,
    green: Vec<u32>,
    blue: Vec<u32>,
    intensity: Vec<u32>,
    pixel_count: usize,
}

impl Histogram {
    pub fn from_raster(raster: &Raster) -> Self {
        let mut red = vec![0u32; BINS];
        let mut green = vec![0u32; BINS];
        let mut blue = vec![0u32; BINS];
        let mut intensity = vec![0u32; BINS];
        for row in raster.rows() {
            for px in row {
                red[usize::from(px.r)] += 1;
                green[usize::from(px.g)] += 1;
                blue[usize::from(px.b)] += 1;
                intensity[usize::from(px.intensity())] += 1;
            }
        }
        Self {
            red,
            green,
            blue,
            intensity,
            pixel_count: raster.width() * raster.height(),
        }
    }

    pub fn bins(&self, channel: HistogramChannel) -> &[u32] {
        match channel {
            HistogramChannel::Red => &self.red,
            HistogramChannel::Green => &self.green,
            HistogramChannel::Blue => &self.blue,
            HistogramChannel::Intensity => &self.intensity,
        }
    }

    /// Number of pixels whose `channel` equals `value`.
    pub fn frequency(&self, value: u8, channel: HistogramChannel) -> u32 {
        self.bins(channel)[usize::from(value)]
    }

    /// Tallest bin over all channels; the natural vertical scale for a plot.
    pub fn max_frequency(&self) -> u32 {
        HistogramChannel::ALL
            .iter()
            .flat_map(|&c| self.bins(c).iter().copied())
            .max()
            .unwrap_or(0)
    }

    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }
}
