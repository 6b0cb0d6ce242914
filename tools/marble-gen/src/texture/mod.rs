//! Procedural texture generation
//!
//! This module provides the building blocks of a marble texture: the float
//! RGB canvas, seamless noise synthesis, vein painting, post-processing
//! modifiers, and PNG export.
//!
//! # Example
//! ```no_run
//! use marble_gen::texture::*;
//! use rand::SeedableRng;
//! use rand_pcg::Pcg64;
//!
//! let mut tex = TextureBuffer::filled(256, 256, [0.97, 0.97, 0.98]);
//! let noise = synthesize(256, 256, 300.0)?;
//! tex.apply(AddNoise { field: &noise, amplitude: 0.02 });
//!
//! let mut rng = Pcg64::seed_from_u64(1);
//! paint_veins(&mut tex, &VeinLayer::new([140, 140, 145], 18, (3, 9)), &mut rng);
//! tex.apply(GaussianBlur { radius: 0.5 });
//!
//! write_png(&tex.to_rgb8(), std::path::Path::new("output.png"))?;
//! # Ok::<(), marble_gen::MarbleError>(())
//! ```

mod export;
mod modifiers;
mod noise;
mod veins;

// Core types
pub use self::buffer::{RgbTexture, TextureBuffer};

// Noise synthesis
pub use noise::{sample_wrapped, synthesize, NoiseField, OCTAVES};

// Vein painting
pub use veins::{paint_veins, trace_vein, VeinLayer, VeinPath, DEFAULT_OPACITY};

// Modifiers
pub use modifiers::{AddNoise, GaussianBlur, TextureApply, TextureModifier};

// Export
pub use export::write_png;

mod buffer {
    /// RGB float canvas for marble composition
    ///
    /// Channels are nominally in `0.0..=1.0` but intermediate passes may push
    /// them outside that range; [`TextureBuffer::to_rgb8`] clamps.
    #[derive(Clone, Debug, PartialEq)]
    pub struct TextureBuffer {
        /// Width in pixels
        pub width: u32,
        /// Height in pixels
        pub height: u32,
        /// RGB channel data (3 floats per pixel, row-major order)
        pub pixels: Vec<f32>,
    }

    impl TextureBuffer {
        /// Create a new texture buffer initialized to black
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                pixels: vec![0.0; width as usize * height as usize * 3],
            }
        }

        /// Create a texture buffer filled with a solid color
        pub fn filled(width: u32, height: u32, color: [f32; 3]) -> Self {
            let mut buffer = Self::new(width, height);
            for chunk in buffer.pixels.chunks_exact_mut(3) {
                chunk.copy_from_slice(&color);
            }
            buffer
        }

        #[inline]
        fn index(&self, x: u32, y: u32) -> usize {
            (y as usize * self.width as usize + x as usize) * 3
        }

        /// Get pixel at (x, y)
        #[inline]
        pub fn get_pixel(&self, x: u32, y: u32) -> [f32; 3] {
            let idx = self.index(x, y);
            [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
        }

        /// Set pixel at (x, y)
        #[inline]
        pub fn set_pixel(&mut self, x: u32, y: u32, color: [f32; 3]) {
            let idx = self.index(x, y);
            self.pixels[idx..idx + 3].copy_from_slice(&color);
        }

        /// Get mutable slice of channel data at (x, y)
        #[inline]
        pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [f32] {
            let idx = self.index(x, y);
            &mut self.pixels[idx..idx + 3]
        }

        /// Clamp every channel to `0.0..=1.0` and quantize to 8 bits
        pub fn to_rgb8(&self) -> RgbTexture {
            RgbTexture {
                width: self.width,
                height: self.height,
                pixels: self
                    .pixels
                    .iter()
                    .map(|&v| (v.clamp(0.0, 1.0) * 255.0) as u8)
                    .collect(),
            }
        }
    }

    /// Quantized 8-bit RGB texture, ready for export
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct RgbTexture {
        /// Width in pixels
        pub width: u32,
        /// Height in pixels
        pub height: u32,
        /// RGB pixel data (3 bytes per pixel, row-major order)
        pub pixels: Vec<u8>,
    }

    impl RgbTexture {
        /// Get pixel at (x, y)
        #[inline]
        pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
            let idx = (y as usize * self.width as usize + x as usize) * 3;
            [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
        }

        /// Mean value of each channel, in 0..=255
        pub fn channel_means(&self) -> [f64; 3] {
            let mut sums = [0u64; 3];
            for pixel in self.pixels.chunks_exact(3) {
                for (sum, &v) in sums.iter_mut().zip(pixel) {
                    *sum += v as u64;
                }
            }
            let count = (self.pixels.len() / 3).max(1) as f64;
            sums.map(|s| s as f64 / count)
        }
    }
}
