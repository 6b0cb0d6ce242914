//! Procedural marble texture generation
//!
//! This library synthesizes seamless marble textures for use as web assets.
//! A texture is built from a flat base color, a tileable multi-octave noise
//! field, and layers of randomly walked vein strokes, then softened with a
//! Gaussian blur and quantized to 8-bit RGB.
//!
//! # Texture Example
//! ```no_run
//! use marble_gen::presets::find_preset;
//! use marble_gen::texture::write_png;
//! use rand::SeedableRng;
//! use rand_pcg::Pcg64;
//! use std::path::Path;
//!
//! let recipe = find_preset("statuario").unwrap();
//! let mut rng = Pcg64::seed_from_u64(7);
//! let marble = recipe.generate(512, &mut rng)?;
//! write_png(&marble.to_rgb8(), Path::new("statuario.png"))?;
//! # Ok::<(), marble_gen::MarbleError>(())
//! ```
//!
//! # Batch Example
//! ```no_run
//! use marble_gen::batch::{run_batch, BatchConfig};
//!
//! let config = BatchConfig {
//!     size: 1024,
//!     seed: Some(42),
//!     ..BatchConfig::new("out/marble")
//! };
//! let written = run_batch(&config)?;
//! assert_eq!(written.len(), 5);
//! # Ok::<(), marble_gen::MarbleError>(())
//! ```

pub mod batch;
mod error;
pub mod presets;
pub mod texture;

pub use error::MarbleError;
