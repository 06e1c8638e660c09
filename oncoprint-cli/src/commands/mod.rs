//! Command implementations for the OncoPrint CLI

pub mod config;
pub mod render;
pub mod replay;

use anyhow::Result;
use oncoprint_core::{AlterationRecord, OncoPrint, OncoPrintConfig};
use std::path::Path;

use crate::error::CliError;
use crate::PlotOverrides;

/// Apply command-line overrides and build the component.
pub(crate) fn build_component(mut config: OncoPrintConfig, overrides: &PlotOverrides) -> Result<OncoPrint> {
    overrides.apply(&mut config);
    Ok(OncoPrint::new(config).map_err(CliError::from)?)
}

pub(crate) fn load_records(path: &Path) -> Result<Vec<AlterationRecord>> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()).into());
    }

    let records = AlterationRecord::load_json_list(path).map_err(|e| {
        CliError::parse(path.display().to_string(), e.to_string())
    })?;
    log::info!("Loaded {} alteration records from {}", records.len(), path.display());
    Ok(records)
}
