//! Bodies of the `forecast` subcommands, kept apart from argument parsing.

use anyhow::{Context, Result};
use forecast_model::LinearModel;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::input::{format_row, read_rows};
use crate::{Forecaster, ModelArtifact};

/// Load the model at `model`, then read samples from the reader returned by
/// `open_input` and write one prediction line per sample to `out`.
///
/// The input is only opened once the model has loaded. Returns the number of
/// rows predicted.
pub fn predict<R, F, W>(model: &Path, open_input: F, mut out: W) -> Result<usize>
where
    R: BufRead,
    F: FnOnce() -> Result<R>,
    W: Write,
{
    let forecaster = Forecaster::load(model)
        .with_context(|| format!("failed to load model {}", model.display()))?;
    let rows = read_rows(open_input()?)?;
    let predictions = forecaster.predict_from_input(&rows)?;
    for row in &predictions {
        writeln!(out, "{}", format_row(row))?;
    }
    Ok(predictions.len())
}

/// Write a randomly initialised linear model to `path`, creating parent
/// directories as needed.
pub fn demo(path: &Path, features: usize, targets: usize) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let model = LinearModel::random(features, targets)?;
    ModelArtifact::new(model).save(path)?;
    Ok(())
}

pub fn info<W: Write>(model: &Path, mut out: W) -> Result<()> {
    let forecaster = Forecaster::load(model)
        .with_context(|| format!("failed to load model {}", model.display()))?;
    writeln!(out, "model:    {}", model.display())?;
    writeln!(out, "features: {}", forecaster.n_features())?;
    writeln!(out, "targets:  {}", forecaster.n_targets())?;
    Ok(())
}
