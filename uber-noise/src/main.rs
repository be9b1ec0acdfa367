//! Command line front end: builds an engine from a run file and prints a
//! sampled grid.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use uber_noise_core::{GridSpec, Seed, UberNoise, sample_grid};

use crate::config::RunConfig;

mod config;
mod logging;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Samples configurable procedural noise over a grid.
#[derive(Parser)]
#[command(name = "uber-noise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON5 run file with `noise` and `grid` sections.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the root engine, overriding the run file.
    #[arg(short, long)]
    seed: Option<String>,

    /// Number of columns.
    #[arg(long)]
    width: Option<usize>,

    /// Number of rows.
    #[arg(long)]
    height: Option<usize>,

    /// X of the first column.
    #[arg(long, allow_hyphen_values = true)]
    origin_x: Option<f64>,

    /// Y of the first row.
    #[arg(long, allow_hyphen_values = true)]
    origin_y: Option<f64>,

    /// Distance between neighbouring samples.
    #[arg(long)]
    step: Option<f64>,

    /// Sample a 3D slice at this Z.
    #[arg(long, allow_hyphen_values = true)]
    z: Option<f64>,

    /// Print values before the `[min, max]` mapping.
    #[arg(long)]
    normalized: bool,

    /// Output layout.
    #[arg(short, long, default_value = "grid")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One line per row, values separated by spaces.
    Grid,
    /// `x,y,value` per sample with a header line.
    Csv,
}

impl Cli {
    fn apply_to(&self, grid: &mut GridSpec) {
        if let Some(width) = self.width {
            grid.width = width;
        }
        if let Some(height) = self.height {
            grid.height = height;
        }
        if let Some(origin_x) = self.origin_x {
            grid.origin_x = origin_x;
        }
        if let Some(origin_y) = self.origin_y {
            grid.origin_y = origin_y;
        }
        if let Some(step) = self.step {
            grid.step = step;
        }
        if self.z.is_some() {
            grid.z = self.z;
        }
        grid.normalized |= self.normalized;
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init().context("failed to initialise logging")?;

    let mut run = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(seed) = &cli.seed {
        run.noise.seed = Some(Seed::from(seed.as_str()));
    }
    cli.apply_to(&mut run.grid);

    let started = Instant::now();
    let noise = UberNoise::new(run.noise);
    tracing::info!(seed = %noise.seed(), octaves = noise.octaves(), "engine built");

    let values = sample_grid(&noise, &run.grid);
    tracing::info!(
        width = run.grid.width,
        height = run.grid.height,
        elapsed = ?started.elapsed(),
        "grid sampled"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_values(&mut out, &values, &run.grid, cli.format).context("failed to write output")?;
    out.flush().context("failed to flush output")?;
    Ok(())
}

fn write_values(
    out: &mut impl Write,
    values: &[Vec<f64>],
    grid: &GridSpec,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Grid => {
            for row in values {
                let line: Vec<String> = row.iter().map(|v| format!("{v:.6}")).collect();
                writeln!(out, "{}", line.join(" "))?;
            }
        }
        OutputFormat::Csv => {
            writeln!(out, "x,y,value")?;
            for (row, row_values) in values.iter().enumerate() {
                for (column, value) in row_values.iter().enumerate() {
                    let at = grid.position(column, row);
                    writeln!(out, "{},{},{value}", at.x, at.y)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn flags_override_run_file_grid() {
        let cli = Cli::parse_from([
            "uber-noise",
            "--width",
            "3",
            "--origin-x",
            "-4.5",
            "--z",
            "2",
            "--normalized",
        ]);
        let mut grid = GridSpec {
            height: 7,
            ..GridSpec::default()
        };
        cli.apply_to(&mut grid);

        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 7);
        assert_eq!(grid.z, Some(2.0));
        assert!(grid.normalized);
        assert!((grid.origin_x + 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn csv_lists_every_sample() {
        let grid = GridSpec {
            width: 2,
            height: 2,
            step: 0.5,
            ..GridSpec::default()
        };
        let values = vec![vec![0.0, 0.25], vec![-0.5, 1.0]];
        let mut out = Vec::new();
        write_values(&mut out, &values, &grid, OutputFormat::Csv).expect("in-memory write");

        let text = String::from_utf8(out).expect("utf-8 output");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, ["x,y,value", "0,0,0", "0.5,0,0.25", "0,0.5,-0.5", "0.5,0.5,1"]);
    }

    #[test]
    fn grid_prints_one_line_per_row() {
        let values = vec![vec![0.5, -0.125], vec![1.0, 0.0]];
        let mut out = Vec::new();
        write_values(&mut out, &values, &GridSpec::default(), OutputFormat::Grid)
            .expect("in-memory write");
        let text = String::from_utf8(out).expect("utf-8 output");
        assert_eq!(text, "0.500000 -0.125000\n1.000000 0.000000\n");
    }
}
