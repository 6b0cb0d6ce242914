//! Texture modifiers for post-processing
//!
//! A trait-based system for applying passes to a [`TextureBuffer`] in
//! sequence, e.g. `tex.apply(AddNoise { .. }).apply(GaussianBlur { .. })`.

use super::TextureBuffer;
use super::noise::NoiseField;
use image::{ImageBuffer, Rgb};

/// Trait for texture modifiers
pub trait TextureModifier {
    /// Apply the modification to the texture buffer
    fn apply(&self, buffer: &mut TextureBuffer);
}

/// Extension trait for fluent modifier application
pub trait TextureApply {
    /// Apply a modifier and return self for chaining
    fn apply<M: TextureModifier>(&mut self, modifier: M) -> &mut Self;
}

impl TextureApply for TextureBuffer {
    fn apply<M: TextureModifier>(&mut self, modifier: M) -> &mut Self {
        modifier.apply(self);
        self
    }
}

/// Add a grey-scale noise perturbation to all three channels equally
pub struct AddNoise<'a> {
    /// Noise field matching the buffer dimensions
    pub field: &'a NoiseField,
    /// Multiplier applied to each noise sample
    pub amplitude: f32,
}

impl TextureModifier for AddNoise<'_> {
    fn apply(&self, buffer: &mut TextureBuffer) {
        let width = buffer.width.min(self.field.width);
        let height = buffer.height.min(self.field.height);
        for y in 0..height {
            for x in 0..width {
                let offset = self.field.get(x, y) * self.amplitude;
                for channel in buffer.pixel_mut(x, y) {
                    *channel += offset;
                }
            }
        }
    }
}

/// Gaussian blur with the given radius (standard deviation, in pixels)
///
/// A radius of zero or less leaves the texture untouched. Channels are
/// clamped to `0.0..=1.0` by the blur.
pub struct GaussianBlur {
    pub radius: f32,
}

impl TextureModifier for GaussianBlur {
    fn apply(&self, buffer: &mut TextureBuffer) {
        if self.radius <= 0.0 || buffer.pixels.is_empty() {
            return;
        }
        let Some(view) =
            ImageBuffer::<Rgb<f32>, &[f32]>::from_raw(buffer.width, buffer.height, &buffer.pixels)
        else {
            return;
        };
        let blurred = image::imageops::blur(&view, self.radius);
        buffer.pixels = blurred.into_raw();
    }
}
