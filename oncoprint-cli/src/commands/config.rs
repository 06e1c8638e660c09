//! Config command implementation

use anyhow::Result;
use oncoprint_core::OncoPrintConfig;

use crate::error::CliError;

pub fn execute(config: &OncoPrintConfig, example: bool) -> Result<()> {
    let content = if example {
        OncoPrintConfig::example_toml()
    } else {
        config.to_toml()
    }
    .map_err(CliError::from)?;

    print!("{}", content);
    Ok(())
}
