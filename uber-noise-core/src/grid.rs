//! Parallel sampling of rectangular grids.

use rayon::prelude::*;
use serde::Deserialize;

use crate::engine::UberNoise;
use crate::position::Position;

/// A regular grid of sample positions in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridSpec {
    /// Number of columns (X samples).
    pub width: usize,
    /// Number of rows (Y samples).
    pub height: usize,
    /// X of the first column.
    pub origin_x: f64,
    /// Y of the first row.
    pub origin_y: f64,
    /// Distance between neighbouring samples.
    pub step: f64,
    /// Fixed Z for a 3D slice; `None` samples in 2D.
    pub z: Option<f64>,
    /// Skip the `[min, max]` mapping.
    pub normalized: bool,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            origin_x: 0.0,
            origin_y: 0.0,
            step: 1.0,
            z: None,
            normalized: false,
        }
    }
}

impl GridSpec {
    /// Position of the sample at `(column, row)`.
    #[must_use]
    pub fn position(&self, column: usize, row: usize) -> Position {
        let at = Position::new(
            self.origin_x + column as f64 * self.step,
            self.origin_y + row as f64 * self.step,
        );
        match self.z {
            Some(z) => at.with_z(z),
            None => at,
        }
    }
}

/// Samples `noise` over `spec`, one row per Y, rows computed in parallel.
///
/// The result is indexed `[row][column]`.
#[must_use]
pub fn sample_grid(noise: &UberNoise, spec: &GridSpec) -> Vec<Vec<f64>> {
    log::debug!(
        "sampling {}x{} grid from ({}, {}) step {}",
        spec.width,
        spec.height,
        spec.origin_x,
        spec.origin_y,
        spec.step
    );
    (0..spec.height)
        .into_par_iter()
        .map(|row| {
            (0..spec.width)
                .map(|column| {
                    let at = spec.position(column, row);
                    if spec.normalized {
                        noise.evaluate_normalized(at)
                    } else {
                        noise.evaluate(at)
                    }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NoiseOptions;

    #[test]
    #[allow(clippy::float_cmp)]
    fn grid_matches_serial_evaluation() {
        let noise = UberNoise::new(NoiseOptions {
            seed: Some("grid".into()),
            octaves: Some(3),
            ..NoiseOptions::default()
        });
        let spec = GridSpec {
            width: 7,
            height: 5,
            origin_x: -1.5,
            origin_y: 2.0,
            step: 0.25,
            z: Some(0.5),
            normalized: false,
        };

        let grid = sample_grid(&noise, &spec);
        assert_eq!(grid.len(), 5);
        for (row, values) in grid.iter().enumerate() {
            assert_eq!(values.len(), 7);
            for (column, &value) in values.iter().enumerate() {
                assert_eq!(value, noise.evaluate(spec.position(column, row)));
            }
        }
    }

    #[test]
    fn grid_deserializes_with_defaults() {
        let spec: GridSpec = serde_json::from_str(r#"{ "width": 4, "originX": 10 }"#)
            .expect("valid grid spec");
        assert_eq!(spec.width, 4);
        assert_eq!(spec.height, 20);
        assert!((spec.origin_x - 10.0).abs() < f64::EPSILON);
        assert_eq!(spec.z, None);
    }
}
