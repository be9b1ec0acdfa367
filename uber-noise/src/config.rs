//! Run configuration files.
//!
//! A run file is JSON5 with two optional sections:
//!
//! ```json5
//! {
//!   noise: { seed: "terrain", octaves: 5, warp: 0.4 },
//!   grid: { width: 64, height: 32, step: 0.05 },
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use uber_noise_core::{GridSpec, NoiseOptions};

/// Engine options plus the grid to sample.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Options for the root engine.
    pub noise: NoiseOptions,
    /// Grid to sample.
    pub grid: GridSpec,
}

impl RunConfig {
    /// Reads and parses a JSON5 run file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid run file {}", path.display()))
    }

    /// Parses a JSON5 run document.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json5::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use uber_noise_core::Seed;

    use super::*;

    #[test]
    fn parses_json5_with_comments_and_trailing_commas() {
        let config = RunConfig::parse(
            r"{
                // the root engine
                noise: { seed: 12345, octaves: 3, tileX: true, },
                grid: { width: 8, originY: -2.5 },
            }",
        )
        .expect("valid run file");

        assert_eq!(config.noise.seed.as_ref().map(Seed::as_str), Some("12345"));
        assert_eq!(config.noise.octaves, Some(3));
        assert_eq!(config.noise.tile_x, Some(true));
        assert_eq!(config.grid.width, 8);
        assert_eq!(config.grid.height, 20);
        assert!((config.grid.origin_y + 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = RunConfig::parse("{}").expect("valid run file");
        assert!(config.noise.seed.is_none());
        assert_eq!(config.grid, GridSpec::default());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RunConfig::load(Path::new("/nonexistent/run.json5")).expect_err("missing file");
        assert!(format!("{err:#}").contains("/nonexistent/run.json5"));
    }
}
