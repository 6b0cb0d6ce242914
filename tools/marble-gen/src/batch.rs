//! Batch generation of preset textures
//!
//! Renders each selected preset at a fixed square resolution and writes it
//! as a PNG into one output directory. The first failure aborts the batch;
//! files written before it stay on disk.

use crate::presets::{find_preset, MarbleRecipe, PRESETS};
use crate::texture::write_png;
use crate::MarbleError;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Default output resolution (square)
pub const DEFAULT_SIZE: u32 = 2048;

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "client/public/assets/marble-textures";

/// Batch run settings
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Directory receiving the PNG files (created if missing)
    pub output_dir: PathBuf,
    /// Width and height of every texture
    pub size: u32,
    /// Base seed for vein placement; `None` draws one from OS entropy
    pub seed: Option<u64>,
    /// Preset names to render; empty renders all presets
    pub presets: Vec<String>,
    /// Render presets concurrently on the rayon pool
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl BatchConfig {
    /// All presets at the default size into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            size: DEFAULT_SIZE,
            seed: None,
            presets: Vec::new(),
            parallel: false,
        }
    }
}

/// Render every selected preset and return the written paths, in preset order.
pub fn run_batch(config: &BatchConfig) -> Result<Vec<PathBuf>, MarbleError> {
    if config.size == 0 {
        return Err(MarbleError::InvalidSize(config.size));
    }
    let selected = select_presets(&config.presets)?;

    fs::create_dir_all(&config.output_dir).map_err(|source| MarbleError::CreateOutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(
        presets = selected.len(),
        size = config.size,
        seed,
        parallel = config.parallel,
        "Starting marble texture batch"
    );

    let render = |&(index, recipe): &(usize, &'static MarbleRecipe)| {
        render_preset(recipe, config.size, preset_seed(seed, index), &config.output_dir)
    };
    let written = if config.parallel {
        selected.par_iter().map(render).collect::<Result<Vec<_>, _>>()?
    } else {
        selected.iter().map(render).collect::<Result<Vec<_>, _>>()?
    };

    tracing::info!(
        count = written.len(),
        dir = %config.output_dir.display(),
        "All marble textures generated"
    );
    Ok(written)
}

/// Vein RNG seed for the preset at `index` in [`PRESETS`]
///
/// Keyed on the preset's table position so a seeded run gives the same file
/// whether presets run alone, in sequence, or in parallel.
pub fn preset_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add(index as u64)
}

/// Resolve preset names to `(table index, recipe)` pairs, in table order
fn select_presets(names: &[String]) -> Result<Vec<(usize, &'static MarbleRecipe)>, MarbleError> {
    if names.is_empty() {
        return Ok(PRESETS.iter().enumerate().collect());
    }

    let mut indices = Vec::with_capacity(names.len());
    for name in names {
        let recipe = find_preset(name).ok_or_else(|| MarbleError::UnknownPreset(name.clone()))?;
        let index = PRESETS
            .iter()
            .position(|p| p.name == recipe.name)
            .ok_or_else(|| MarbleError::UnknownPreset(name.clone()))?;
        indices.push(index);
    }
    indices.sort_unstable();
    indices.dedup();

    Ok(indices.into_iter().map(|i| (i, &PRESETS[i])).collect())
}

fn render_preset(
    recipe: &MarbleRecipe,
    size: u32,
    seed: u64,
    output_dir: &Path,
) -> Result<PathBuf, MarbleError> {
    let started = Instant::now();
    tracing::info!(preset = recipe.name, file = recipe.file_name, "Generating marble");

    let mut rng = Pcg64::seed_from_u64(seed);
    let texture = recipe.generate(size, &mut rng)?.to_rgb8();

    let path = output_dir.join(recipe.file_name);
    write_png(&texture, &path)?;

    let [r, g, b] = texture.channel_means();
    tracing::debug!(preset = recipe.name, mean_r = r, mean_g = g, mean_b = b, "Channel means");
    tracing::info!(
        path = %path.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Saved marble texture"
    );
    Ok(path)
}
