//! Built-in marble recipes
//!
//! Each recipe is pure data: a base color, one grey-scale noise layer, one to
//! three vein layers, and a final blur radius.

use crate::texture::{
    paint_veins, synthesize, AddNoise, GaussianBlur, TextureApply, TextureBuffer, VeinLayer,
};
use crate::MarbleError;
use rand::Rng;

/// Grey-scale noise perturbation added to the base color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseLayer {
    /// Noise scale, validated by [`synthesize`]
    pub scale: f64,
    /// Multiplier applied to the 0..1 noise before adding it to each channel
    pub amplitude: f32,
}

/// Named marble look - single source of truth for one output texture
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarbleRecipe {
    /// Display name
    pub name: &'static str,
    /// Output file name
    pub file_name: &'static str,
    /// Base fill color (linear 0..1)
    pub base_color: [f32; 3],
    /// Grey-scale noise added over the base color
    pub noise: NoiseLayer,
    /// Vein layers, painted in order
    pub veins: &'static [VeinLayer],
    /// Gaussian blur radius applied after compositing
    pub blur_radius: f32,
}

/// All built-in marble presets
pub const PRESETS: &[MarbleRecipe] = &[
    // Warm cream with subtle gold veining
    MarbleRecipe {
        name: "White Carrara",
        file_name: "white-carrara-uhd.png",
        base_color: [0.98, 0.96, 0.92],
        noise: NoiseLayer { scale: 200.0, amplitude: 0.05 },
        veins: &[
            VeinLayer::new([180, 170, 150], 25, (1, 4)),
            VeinLayer::new([210, 200, 180], 15, (2, 6)),
        ],
        blur_radius: 0.5,
    },
    // White with bold gold veins and grey accents
    MarbleRecipe {
        name: "Calacatta Gold",
        file_name: "calacatta-gold-uhd.png",
        base_color: [0.99, 0.98, 0.96],
        noise: NoiseLayer { scale: 250.0, amplitude: 0.03 },
        veins: &[
            VeinLayer::new([200, 170, 110], 12, (4, 12)),
            VeinLayer::new([180, 160, 120], 8, (6, 15)),
            VeinLayer::new([160, 160, 165], 10, (2, 5)),
        ],
        blur_radius: 0.7,
    },
    // Sophisticated grey with dark and light veining
    MarbleRecipe {
        name: "Grey Emperador",
        file_name: "grey-emperador-uhd.png",
        base_color: [0.75, 0.74, 0.73],
        noise: NoiseLayer { scale: 180.0, amplitude: 0.08 },
        veins: &[
            VeinLayer::new([100, 100, 105], 20, (2, 7)),
            VeinLayer::new([200, 198, 195], 15, (1, 4)),
        ],
        blur_radius: 0.6,
    },
    // Cool premium white with grey veining
    MarbleRecipe {
        name: "Statuario",
        file_name: "statuario-uhd.png",
        base_color: [0.97, 0.97, 0.98],
        noise: NoiseLayer { scale: 300.0, amplitude: 0.02 },
        veins: &[
            VeinLayer::new([140, 140, 145], 18, (3, 9)),
            VeinLayer::new([170, 170, 175], 12, (1, 5)),
        ],
        blur_radius: 0.5,
    },
    // Warm beige with gold veins and pearl shimmer
    MarbleRecipe {
        name: "Champagne Pearl",
        file_name: "champagne-pearl-uhd.png",
        base_color: [0.92, 0.88, 0.82],
        noise: NoiseLayer { scale: 150.0, amplitude: 0.06 },
        veins: &[
            VeinLayer::new([180, 160, 130], 22, (2, 6)),
            VeinLayer::new([220, 210, 195], 18, (1, 3)),
        ],
        blur_radius: 0.6,
    },
];

impl MarbleRecipe {
    /// File name without extension, e.g. `statuario-uhd`
    pub fn stem(&self) -> &'static str {
        self.file_name.strip_suffix(".png").unwrap_or(self.file_name)
    }

    /// Composite this recipe into a `size` x `size` float buffer.
    ///
    /// The result is blurred but not yet quantized; call
    /// [`TextureBuffer::to_rgb8`] before export.
    pub fn generate<R: Rng + ?Sized>(&self, size: u32, rng: &mut R) -> Result<TextureBuffer, MarbleError> {
        if size == 0 {
            return Err(MarbleError::InvalidSize(size));
        }

        let mut tex = TextureBuffer::filled(size, size, self.base_color);

        let noise = synthesize(size, size, self.noise.scale)?;
        tex.apply(AddNoise {
            field: &noise,
            amplitude: self.noise.amplitude,
        });

        for layer in self.veins {
            paint_veins(&mut tex, layer, rng);
        }

        tex.apply(GaussianBlur {
            radius: self.blur_radius,
        });
        Ok(tex)
    }
}

/// Look up a preset by display name or file stem, ignoring case
///
/// `"Grey Emperador"`, `"grey-emperador"` and `"grey-emperador-uhd"` all match.
pub fn find_preset(query: &str) -> Option<&'static MarbleRecipe> {
    let query = query.trim();
    PRESETS.iter().find(|recipe| {
        recipe.name.eq_ignore_ascii_case(query)
            || recipe.stem().eq_ignore_ascii_case(query)
            || recipe.file_name.eq_ignore_ascii_case(query)
            || recipe
                .stem()
                .strip_suffix("-uhd")
                .is_some_and(|short| short.eq_ignore_ascii_case(query))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn render(name: &str, size: u32, seed: u64) -> crate::texture::RgbTexture {
        let recipe = find_preset(name).unwrap();
        let mut rng = Pcg64::seed_from_u64(seed);
        recipe.generate(size, &mut rng).unwrap().to_rgb8()
    }

    #[test]
    fn test_presets_well_formed() {
        assert_eq!(PRESETS.len(), 5);
        for recipe in PRESETS {
            assert!(recipe.file_name.ends_with("-uhd.png"), "{}", recipe.file_name);
            assert!((1..=3).contains(&recipe.veins.len()), "{}", recipe.name);
            assert!(recipe.noise.scale > 0.0);
            assert!(recipe.blur_radius > 0.0);
            for layer in recipe.veins {
                assert!(layer.thickness.0 <= layer.thickness.1);
                assert_eq!(layer.opacity, (30, 120));
            }
        }
    }

    #[test]
    fn test_find_preset() {
        assert_eq!(find_preset("Statuario").unwrap().file_name, "statuario-uhd.png");
        assert_eq!(find_preset("grey emperador").unwrap().name, "Grey Emperador");
        assert_eq!(find_preset("calacatta-gold").unwrap().name, "Calacatta Gold");
        assert_eq!(find_preset("white-carrara-uhd").unwrap().name, "White Carrara");
        assert_eq!(find_preset("champagne-pearl-uhd.png").unwrap().name, "Champagne Pearl");
        assert!(find_preset("onyx").is_none());
    }

    #[test]
    fn test_generate_dimensions() {
        for recipe in PRESETS {
            let mut rng = Pcg64::seed_from_u64(1);
            let tex = recipe.generate(64, &mut rng).unwrap();
            assert_eq!((tex.width, tex.height), (64, 64));
            assert_eq!(tex.to_rgb8().pixels.len(), 64 * 64 * 3);
        }
    }

    #[test]
    fn test_generate_rejects_zero_size() {
        let mut rng = Pcg64::seed_from_u64(1);
        assert!(matches!(
            PRESETS[0].generate(0, &mut rng),
            Err(MarbleError::InvalidSize(0))
        ));
    }

    #[test]
    fn test_generate_seeded_reproducible() {
        assert_eq!(render("Calacatta Gold", 96, 5), render("Calacatta Gold", 96, 5));
    }

    #[test]
    fn test_statuario_brighter_than_grey_emperador() {
        let statuario = render("Statuario", 256, 42).channel_means();
        let emperador = render("Grey Emperador", 256, 42).channel_means();

        for channel in 0..3 {
            assert!(
                statuario[channel] > 200.0,
                "statuario channel {channel} mean {}",
                statuario[channel]
            );
            assert!(
                emperador[channel] < statuario[channel] - 20.0,
                "emperador channel {channel} mean {} vs statuario {}",
                emperador[channel],
                statuario[channel]
            );
        }
    }
}
