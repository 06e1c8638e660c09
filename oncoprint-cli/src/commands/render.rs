//! Render command implementation - records in, figure JSON out

use anyhow::{Context, Result};
use oncoprint_core::OncoPrintConfig;
use std::io::Write;
use std::path::PathBuf;

use super::{build_component, load_records};
use crate::PlotOverrides;

pub fn execute(
    config: OncoPrintConfig,
    overrides: &PlotOverrides,
    data: PathBuf,
    out: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let json = render_json(config, overrides, &data, pretty)?;

    match out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write figure: {}", path.display()))?;
            log::info!("Figure written to: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    Ok(())
}

pub(crate) fn render_json(
    config: OncoPrintConfig,
    overrides: &PlotOverrides,
    data: &std::path::Path,
    pretty: bool,
) -> Result<String> {
    let oncoprint = build_component(config, overrides)?;
    let records = load_records(data)?;

    let figure = oncoprint.figure(&records);
    log::info!("Built figure with {} alteration layers", figure.data.len().saturating_sub(1));

    let json = if pretty { figure.to_json_pretty() } else { figure.to_json() };
    json.context("Failed to serialize figure")
}
