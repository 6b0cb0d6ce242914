//! Mineral vein strokes
//!
//! Veins are random walks that drift left to right with a slowly wandering
//! heading, drawn as thick alpha-blended polylines. Walks may start up to a
//! quarter width before the left edge and continue a quarter width past the
//! right edge, so vein ends rarely land inside the tile. Vertical seams are
//! not handled.

use super::TextureBuffer;
use rand::Rng;

/// Default opacity range (out of 255) for vein strokes
pub const DEFAULT_OPACITY: (u8, u8) = (30, 120);

/// Maximum heading change per step, in radians
const HEADING_JITTER: f64 = 0.15;
/// Initial heading range, in radians
const INITIAL_HEADING: f64 = 0.5;
/// Horizontal advance per step
const STEP_X: (f64, f64) = (15.0, 35.0);
/// Vertical advance per step, scaled by `sin(heading)`
const STEP_Y: (f64, f64) = (10.0, 30.0);

/// One layer of veins sharing a color and stroke ranges
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VeinLayer {
    /// Stroke color
    pub color: [u8; 3],
    /// Number of veins to attempt
    pub count: u32,
    /// Inclusive stroke width range in pixels
    pub thickness: (u32, u32),
    /// Inclusive stroke opacity range (out of 255)
    pub opacity: (u8, u8),
}

impl VeinLayer {
    /// Create a vein layer with the default opacity range
    pub const fn new(color: [u8; 3], count: u32, thickness: (u32, u32)) -> Self {
        Self {
            color,
            count,
            thickness,
            opacity: DEFAULT_OPACITY,
        }
    }
}

/// Points of a single vein stroke
///
/// Holds either no points or at least two; a walk that produced a single
/// point is discarded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VeinPath {
    points: Vec<(i32, i32)>,
}

impl VeinPath {
    /// Stroke points in walk order
    pub fn points(&self) -> &[(i32, i32)] {
        &self.points
    }

    /// Number of points in the stroke
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the walk was discarded
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Walk a single vein across a `width` x `height` canvas.
pub fn trace_vein<R: Rng + ?Sized>(rng: &mut R, width: u32, height: u32) -> VeinPath {
    let w = width as i64;
    let h = height as f64;
    let overrun = w / 4;
    let right_bound = (w + overrun) as f64;

    let mut x = rng.random_range(-overrun..=w + overrun) as f64;
    let mut y = rng.random_range(0..=height) as f64;
    let mut heading = rng.random_range(-INITIAL_HEADING..=INITIAL_HEADING);

    let mut points = Vec::new();
    while x < right_bound && (0.0..h).contains(&y) {
        points.push((x as i32, y as i32));

        heading += rng.random_range(-HEADING_JITTER..=HEADING_JITTER);
        x += rng.random_range(STEP_X.0..=STEP_X.1);
        y += heading.sin() * rng.random_range(STEP_Y.0..=STEP_Y.1);
    }

    if points.len() < 2 {
        points.clear();
    }
    VeinPath { points }
}

/// Paint `layer.count` veins onto the buffer.
///
/// Each vein picks one thickness and one opacity for its whole length.
pub fn paint_veins<R: Rng + ?Sized>(buffer: &mut TextureBuffer, layer: &VeinLayer, rng: &mut R) {
    if layer.count == 0 {
        return;
    }

    let color = layer.color.map(|c| c as f32 / 255.0);
    let (t_lo, t_hi) = ordered(layer.thickness);
    let (o_lo, o_hi) = ordered(layer.opacity);
    let mut mask = CoverageMask::new(buffer.width, buffer.height);
    let mut drawn = 0u32;

    for _ in 0..layer.count {
        let path = trace_vein(rng, buffer.width, buffer.height);
        if path.is_empty() {
            continue;
        }

        let thickness = rng.random_range(t_lo..=t_hi);
        let alpha = rng.random_range(o_lo..=o_hi) as f32 / 255.0;
        draw_polyline(buffer, &mut mask, path.points(), thickness, color, alpha);
        drawn += 1;
    }

    tracing::debug!(
        color = ?layer.color,
        requested = layer.count,
        drawn,
        "Painted vein layer"
    );
}

fn ordered<T: PartialOrd>((a, b): (T, T)) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Pixels covered by the stroke currently being drawn
struct CoverageMask {
    width: u32,
    height: u32,
    covered: Vec<bool>,
    touched: Vec<usize>,
}

impl CoverageMask {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            covered: vec![false; width as usize * height as usize],
            touched: Vec::new(),
        }
    }

    #[inline]
    fn mark(&mut self, x: u32, y: u32) {
        let idx = y as usize * self.width as usize + x as usize;
        if !self.covered[idx] {
            self.covered[idx] = true;
            self.touched.push(idx);
        }
    }

    /// Cover every pixel whose center lies within `radius` of segment `a`-`b`
    fn cover_segment(&mut self, a: (i32, i32), b: (i32, i32), radius: f32) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let reach = radius.ceil() as i64;
        let (x_hi, y_hi) = (self.width as i64 - 1, self.height as i64 - 1);

        let min_x = a.0.min(b.0) as i64 - reach;
        let max_x = a.0.max(b.0) as i64 + reach;
        let min_y = a.1.min(b.1) as i64 - reach;
        let max_y = a.1.max(b.1) as i64 + reach;
        if max_x < 0 || max_y < 0 || min_x > x_hi || min_y > y_hi {
            return;
        }
        let (x_range, y_range) = (min_x.max(0)..=max_x.min(x_hi), min_y.max(0)..=max_y.min(y_hi));

        let (ax, ay) = (a.0 as f32, a.1 as f32);
        let (dx, dy) = ((b.0 - a.0) as f32, (b.1 - a.1) as f32);
        let len_sq = dx * dx + dy * dy;
        let radius_sq = radius * radius;

        for py in y_range {
            for px in x_range.clone() {
                let (rx, ry) = (px as f32 - ax, py as f32 - ay);
                let t = if len_sq > 0.0 {
                    ((rx * dx + ry * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (ex, ey) = (rx - t * dx, ry - t * dy);
                if ex * ex + ey * ey <= radius_sq {
                    self.mark(px as u32, py as u32);
                }
            }
        }
    }

    /// Drain covered pixel indices, resetting the mask for the next stroke
    fn drain(&mut self) -> impl Iterator<Item = usize> + '_ {
        for &idx in &self.touched {
            self.covered[idx] = false;
        }
        self.touched.drain(..)
    }
}

/// Blend a thick polyline onto the buffer; each pixel is blended once
fn draw_polyline(
    buffer: &mut TextureBuffer,
    mask: &mut CoverageMask,
    points: &[(i32, i32)],
    thickness: u32,
    color: [f32; 3],
    alpha: f32,
) {
    let radius = (thickness as f32 / 2.0).max(0.5);
    for segment in points.windows(2) {
        mask.cover_segment(segment[0], segment[1], radius);
    }

    for idx in mask.drain() {
        let pixel = &mut buffer.pixels[idx * 3..idx * 3 + 3];
        for (channel, &vein) in pixel.iter_mut().zip(&color) {
            *channel = *channel * (1.0 - alpha) + vein * alpha;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_vein_path_never_single_point() {
        let mut rng = Pcg64::seed_from_u64(9);
        for _ in 0..500 {
            let path = trace_vein(&mut rng, 128, 96);
            assert!(path.len() != 1, "single-point vein escaped");
        }
    }

    #[test]
    fn test_vein_path_stays_in_bounds() {
        let mut rng = Pcg64::seed_from_u64(3);
        for _ in 0..200 {
            let path = trace_vein(&mut rng, 200, 100);
            for &(x, y) in path.points() {
                assert!((-50..250).contains(&x), "x out of walk bounds: {x}");
                assert!((0..100).contains(&y), "y out of canvas: {y}");
            }
        }
    }

    #[test]
    fn test_vein_path_advances_left_to_right() {
        let mut rng = Pcg64::seed_from_u64(11);
        let path = (0..100)
            .map(|_| trace_vein(&mut rng, 256, 256))
            .find(|p| p.len() >= 3)
            .expect("no multi-step vein in 100 attempts");
        for pair in path.points().windows(2) {
            assert!(pair[1].0 > pair[0].0);
        }
    }

    #[test]
    fn test_trace_vein_empty_canvas() {
        let mut rng = Pcg64::seed_from_u64(1);
        assert!(trace_vein(&mut rng, 0, 0).is_empty());
    }

    #[test]
    fn test_paint_zero_veins_is_noop() {
        let original = TextureBuffer::filled(32, 32, [0.9, 0.8, 0.7]);
        let mut tex = original.clone();
        let mut rng = Pcg64::seed_from_u64(5);
        paint_veins(&mut tex, &VeinLayer::new([0, 0, 0], 0, (2, 4)), &mut rng);
        assert_eq!(tex, original);
    }

    #[test]
    fn test_paint_veins_darkens() {
        let original = TextureBuffer::filled(128, 128, [1.0, 1.0, 1.0]);
        let mut tex = original.clone();
        let mut rng = Pcg64::seed_from_u64(21);
        let count = 30;
        paint_veins(&mut tex, &VeinLayer::new([0, 0, 0], count, (3, 6)), &mut rng);

        assert_ne!(tex, original);
        // Separate veins stack, so the floor is one stroke's floor per vein
        let stroke_keep = 1.0 - DEFAULT_OPACITY.1 as f32 / 255.0;
        let min_keep = stroke_keep.powi(count as i32);
        let darkest = tex.pixels.iter().copied().fold(f32::INFINITY, f32::min);
        assert!(darkest < 1.0);
        for &v in &tex.pixels {
            assert!(v <= 1.0);
            assert!(v >= min_keep - 1e-6);
        }
    }

    #[test]
    fn test_single_vein_never_fully_opaque() {
        let mut rng = Pcg64::seed_from_u64(21);
        let layer = VeinLayer::new([0, 0, 0], 1, (3, 6));
        let tex = (0..50)
            .map(|_| {
                let mut tex = TextureBuffer::filled(128, 128, [1.0, 1.0, 1.0]);
                paint_veins(&mut tex, &layer, &mut rng);
                tex
            })
            .find(|tex| tex.pixels.iter().any(|&v| v < 1.0))
            .expect("no vein drawn in 50 attempts");

        // A stroke blends each pixel once, at no more than the top opacity
        let min_keep = 1.0 - DEFAULT_OPACITY.1 as f32 / 255.0;
        for &v in &tex.pixels {
            assert!(v >= min_keep - 1e-6);
        }
    }

    #[test]
    fn test_paint_veins_seeded_reproducible() {
        let layer = VeinLayer::new([100, 100, 105], 12, (1, 5));
        let mut a = TextureBuffer::filled(64, 64, [0.75, 0.74, 0.73]);
        let mut b = a.clone();
        paint_veins(&mut a, &layer, &mut Pcg64::seed_from_u64(77));
        paint_veins(&mut b, &layer, &mut Pcg64::seed_from_u64(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_polyline_blends_each_pixel_once() {
        // A path that doubles back over itself must not darken overlaps twice
        let mut tex = TextureBuffer::filled(16, 4, [1.0, 1.0, 1.0]);
        let mut mask = CoverageMask::new(16, 4);
        let points = [(1, 2), (14, 2), (1, 2)];
        draw_polyline(&mut tex, &mut mask, &points, 1, [0.0, 0.0, 0.0], 0.5);

        for x in 1..=14 {
            assert_eq!(tex.get_pixel(x, 2), [0.5, 0.5, 0.5]);
        }
        assert_eq!(tex.get_pixel(0, 0), [1.0, 1.0, 1.0]);
        assert!(mask.touched.is_empty());
        assert!(mask.covered.iter().all(|&c| !c));
    }

    #[test]
    fn test_polyline_thickness() {
        let mut tex = TextureBuffer::filled(20, 20, [1.0, 1.0, 1.0]);
        let mut mask = CoverageMask::new(20, 20);
        draw_polyline(&mut tex, &mut mask, &[(2, 10), (17, 10)], 4, [0.0, 0.0, 0.0], 1.0);

        for y in 8..=12 {
            assert_eq!(tex.get_pixel(10, y), [0.0, 0.0, 0.0]);
        }
        assert_eq!(tex.get_pixel(10, 7), [1.0, 1.0, 1.0]);
        assert_eq!(tex.get_pixel(10, 13), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_polyline_clips_offscreen_points() {
        let mut tex = TextureBuffer::filled(8, 8, [1.0, 1.0, 1.0]);
        let mut mask = CoverageMask::new(8, 8);
        draw_polyline(&mut tex, &mut mask, &[(-20, 4), (30, 4)], 1, [0.0, 0.0, 0.0], 1.0);
        for x in 0..8 {
            assert_eq!(tex.get_pixel(x, 4), [0.0, 0.0, 0.0]);
            assert_eq!(tex.get_pixel(x, 3), [1.0, 1.0, 1.0]);
        }
    }

    #[test]
    fn test_cover_segment_clamps_to_canvas() {
        let mut mask = CoverageMask::new(10, 6);
        mask.cover_segment((-5, -5), (4, 4), 0.5);
        mask.cover_segment((8, 2), (40, 2), 1.0);
        mask.cover_segment((20, 20), (30, 30), 2.0);

        assert!(mask.covered[0]);
        assert!(mask.covered[4 * 10 + 4]);
        assert!(mask.covered[2 * 10 + 9]);
        assert!(mask.covered[3 * 10 + 9]);
        assert!(!mask.covered[5 * 10]);
        assert_eq!(mask.touched.len(), mask.covered.iter().filter(|&&c| c).count());

        let drained: Vec<usize> = mask.drain().collect();
        assert!(!drained.is_empty());
        assert!(mask.covered.iter().all(|&c| !c));
    }

    #[test]
    fn test_reversed_ranges_do_not_panic() {
        let layer = VeinLayer {
            color: [10, 20, 30],
            count: 5,
            thickness: (6, 2),
            opacity: (120, 30),
        };
        let mut tex = TextureBuffer::filled(64, 64, [0.5, 0.5, 0.5]);
        paint_veins(&mut tex, &layer, &mut Pcg64::seed_from_u64(2));
    }
}
