//! Seamless multi-octave value noise
//!
//! Each octave is a coarse grid of uniform random values, upsampled to the
//! full output resolution with periodic cubic interpolation. The grid period
//! spans the whole output, so every octave (and therefore the sum) tiles
//! seamlessly in both directions.

use super::TextureBuffer;
use crate::MarbleError;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Number of octaves summed into a noise field
pub const OCTAVES: u32 = 6;

/// Octave `o` is seeded with `OCTAVE_SEED_BASE + o`
const OCTAVE_SEED_BASE: u64 = 42;

/// Extra grid cells added to each octave's row and column count
const GRID_PADDING: usize = 2;

/// Spread below which a field is considered flat
const FLAT_EPSILON: f64 = 1e-12;

/// Scalar noise field with values in `0.0..=1.0`
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseField {
    /// Width in samples
    pub width: u32,
    /// Height in samples
    pub height: u32,
    /// Row-major samples
    pub values: Vec<f32>,
}

impl NoiseField {
    /// Get the sample at (x, y)
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[y as usize * self.width as usize + x as usize]
    }

    /// Smallest and largest sample, or `None` for an empty field
    pub fn range(&self) -> Option<(f32, f32)> {
        let first = *self.values.first()?;
        Some(
            self.values
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Render the field as a grey-scale texture (useful for inspection)
    pub fn to_texture(&self) -> TextureBuffer {
        let mut buffer = TextureBuffer::new(self.width, self.height);
        for (pixel, &v) in buffer.pixels.chunks_exact_mut(3).zip(&self.values) {
            pixel.fill(v);
        }
        buffer
    }
}

/// Synthesize a seamless noise field of `width` x `height` samples.
///
/// Octave grids are seeded purely from the octave index, so identical
/// arguments always produce bit-identical fields. `scale` is validated and
/// carried by recipes but does not change the sampling.
pub fn synthesize(width: u32, height: u32, scale: f64) -> Result<NoiseField, MarbleError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(MarbleError::InvalidNoiseScale(scale));
    }

    let (w, h) = (width as usize, height as usize);
    let mut sum = vec![0.0f64; w * h];
    if sum.is_empty() {
        return Ok(NoiseField {
            width,
            height,
            values: Vec::new(),
        });
    }

    for octave in 0..OCTAVES {
        let freq = 1usize << octave;
        let amplitude = 1.0 / freq as f64;
        let rows = h / freq + GRID_PADDING;
        let cols = w / freq + GRID_PADDING;

        tracing::debug!(octave, rows, cols, amplitude, "Sampling noise octave");

        let grid = octave_grid(octave, rows, cols);
        let layer = upsample_wrapped(&grid, rows, cols, w, h);
        for (acc, v) in sum.iter_mut().zip(layer) {
            *acc += v * amplitude;
        }
    }

    Ok(NoiseField {
        width,
        height,
        values: normalize(&sum),
    })
}

/// Uniform random grid for one octave, seeded from the octave index alone
fn octave_grid(octave: u32, rows: usize, cols: usize) -> Vec<f64> {
    let mut rng = Pcg64::seed_from_u64(OCTAVE_SEED_BASE + octave as u64);
    (0..rows * cols).map(|_| rng.random::<f64>()).collect()
}

/// Separable periodic upsampling of a `rows` x `cols` grid to `width` x `height`
fn upsample_wrapped(grid: &[f64], rows: usize, cols: usize, width: usize, height: usize) -> Vec<f64> {
    // Horizontal pass: rows x width
    let mut horizontal = Vec::with_capacity(rows * width);
    for row in grid.chunks_exact(cols) {
        for x in 0..width {
            horizontal.push(sample_wrapped(row, grid_coordinate(x, cols, width)));
        }
    }

    // Vertical pass: height x width
    let mut out = vec![0.0; width * height];
    for y in 0..height {
        let v = grid_coordinate(y, rows, height);
        let out_row = &mut out[y * width..(y + 1) * width];
        for (x, dst) in out_row.iter_mut().enumerate() {
            *dst = cubic_wrapped(rows, v, |r| horizontal[r * width + x]);
        }
    }
    out
}

/// Grid position of output sample `i` when `grid_len` cells span `out_len` samples
///
/// `i = out_len` lands on `grid_len`, one full period, so the upsampled
/// octave continues seamlessly past its last sample back into its first.
#[inline]
fn grid_coordinate(i: usize, grid_len: usize, out_len: usize) -> f64 {
    i as f64 * grid_len as f64 / out_len as f64
}

/// Catmull-Rom sample of a periodic sequence at fractional position `u`.
///
/// Indices wrap modulo `samples.len()`, so `sample_wrapped(s, u)` equals
/// `sample_wrapped(s, u + s.len() as f64)`.
pub fn sample_wrapped(samples: &[f64], u: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    cubic_wrapped(samples.len(), u, |i| samples[i])
}

fn cubic_wrapped(len: usize, u: f64, fetch: impl Fn(usize) -> f64) -> f64 {
    let n = len as i64;
    let base = u.floor();
    let t = u - base;
    let i = base as i64;
    let at = |offset: i64| fetch((i + offset).rem_euclid(n) as usize);
    catmull_rom(at(-1), at(0), at(1), at(2), t)
}

#[inline]
fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

/// Rescale so the minimum maps to 0 and the maximum to 1.
///
/// A flat input has no spread to rescale and becomes a uniform 0.5 field.
fn normalize(values: &[f64]) -> Vec<f32> {
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let spread = hi - lo;

    if spread <= FLAT_EPSILON {
        return vec![0.5; values.len()];
    }
    values.iter().map(|&v| ((v - lo) / spread) as f32).collect()
}
