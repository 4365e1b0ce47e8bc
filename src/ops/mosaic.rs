//! Mosaic: nearest-seed clustering with mean-color repaint.
//!
//! 1. Pick `n` distinct pixel positions uniformly at random (the seeds).
//! 2. Assign each pixel to the seed at the smallest Euclidean distance; ties
//!    go to the seed that was picked first.
//! 3. Repaint every pixel with the truncated mean color of its cluster.
//!
//! `n` is capped at `W·H`, where every pixel becomes its own seed. Seeds are
//! sampled without replacement, so selection always terminates.
//!
//! Complexity: O(W·H·n) distance evaluations.
use crate::error::EditError;
use crate::image::{Pixel, Raster};
use log::{debug, warn};
use rand::seq::index;
use rand::Rng;

pub fn mosaic<R: Rng + ?Sized>(
    raster: &Raster,
    seeds: usize,
    rng: &mut R,
) -> Result<Raster, EditError> {
    if seeds == 0 {
        return Err(EditError::parameter(
            "Number of seeds must be a positive integer",
        ));
    }
    let (w, h) = (raster.width(), raster.height());
    let total = w * h;
    let n = if seeds > total {
        warn!("mosaic: {seeds} seeds requested for {total} pixels, using {total}");
        total
    } else {
        seeds
    };

    let positions = pick_seeds(w, h, n, rng);
    let clusters = Clusters::assign(raster, &positions);
    debug!("mosaic: {n} clusters over {w}x{h}");

    let means = clusters.means();
    Ok(Raster::from_fn(w, h, raster.source(), |i, j| {
        means[clusters.owner[i * w + j]]
    }))
}

/// `n` distinct `(row, col)` positions, in draw order.
pub fn pick_seeds<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    n: usize,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    index::sample(rng, width * height, n)
        .iter()
        .map(|k| (k / width, k % width))
        .collect()
}

struct Clusters {
    /// Seed index owning each pixel, row-major.
    owner: Vec<usize>,
    sums: Vec<[u64; 3]>,
    counts: Vec<u64>,
}

impl Clusters {
    fn assign(raster: &Raster, seeds: &[(usize, usize)]) -> Self {
        let (w, h) = (raster.width(), raster.height());
        let mut owner = Vec::with_capacity(w * h);
        let mut sums = vec![[0u64; 3]; seeds.len()];
        let mut counts = vec![0u64; seeds.len()];
        for i in 0..h {
            for j in 0..w {
                let k = nearest_seed(seeds, i, j);
                let px = raster.get(i, j);
                for (sum, c) in sums[k].iter_mut().zip(px.channels()) {
                    *sum += u64::from(c);
                }
                counts[k] += 1;
                owner.push(k);
            }
        }
        Self {
            owner,
            sums,
            counts,
        }
    }

    fn means(&self) -> Vec<Pixel> {
        self.sums
            .iter()
            .zip(&self.counts)
            .map(|(sum, &count)| {
                // Every seed owns at least its own position.
                let count = count.max(1);
                Pixel::new(
                    (sum[0] / count) as u8,
                    (sum[1] / count) as u8,
                    (sum[2] / count) as u8,
                )
            })
            .collect()
    }
}

/// Index of the seed closest to `(i, j)`, compared by squared distance.
fn nearest_seed(seeds: &[(usize, usize)], i: usize, j: usize) -> usize {
    let mut best = 0;
    let mut best_d = usize::MAX;
    for (k, &(si, sj)) in seeds.iter().enumerate() {
        let di = si.abs_diff(i);
        let dj = sj.abs_diff(j);
        let d = di * di + dj * dj;
        if d < best_d {
            best_d = d;
            best = k;
        }
    }
    best
}
