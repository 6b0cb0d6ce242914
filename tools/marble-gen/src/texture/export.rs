//! PNG export for quantized textures

use super::RgbTexture;
use crate::MarbleError;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write an RgbTexture to a PNG file
///
/// Output is 8-bit RGB without alpha, encoded with the best compression level
/// and adaptive row filtering.
///
/// # Example
/// ```no_run
/// use marble_gen::texture::{write_png, TextureBuffer};
/// use std::path::Path;
///
/// let tex = TextureBuffer::filled(64, 64, [0.97, 0.97, 0.98]);
/// write_png(&tex.to_rgb8(), Path::new("white.png")).unwrap();
/// ```
pub fn write_png(texture: &RgbTexture, path: &Path) -> Result<(), MarbleError> {
    let file = File::create(path)?;
    let w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, texture.width, texture.height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Best);
    encoder.set_adaptive_filter(png::AdaptiveFilterType::Adaptive);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&texture.pixels)?;
    writer.finish()?;

    Ok(())
}
