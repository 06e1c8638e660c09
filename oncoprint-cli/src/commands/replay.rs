//! Replay command implementation - raw chart events through the normalizer

use anyhow::{Context, Result};
use oncoprint_core::{OncoPrintConfig, RawEvent};
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::build_component;
use crate::error::CliError;
use crate::PlotOverrides;

pub fn execute(config: OncoPrintConfig, overrides: &PlotOverrides, events: PathBuf) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    replay(config, overrides, &events, &mut out)
}

/// Writes one normalized event per line, then the resulting layout.
pub(crate) fn replay<W: Write>(
    config: OncoPrintConfig,
    overrides: &PlotOverrides,
    events: &Path,
    out: &mut W,
) -> Result<()> {
    let mut oncoprint = build_component(config, overrides)?;

    if !events.exists() {
        return Err(CliError::file_not_found(events.to_path_buf()).into());
    }
    let file = std::fs::File::open(events)
        .with_context(|| format!("Failed to open event log: {}", events.display()))?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let raw = RawEvent::parse(line).map_err(|e| {
            CliError::parse(format!("{}:{}", events.display(), index + 1), e.to_string())
        })?;
        let event = oncoprint.handle_event(&raw);
        *counts.entry(event.event_type().to_string()).or_insert(0) += 1;

        writeln!(out, "{}", serde_json::to_string(&event)?)?;
    }

    log::info!(
        "Replayed events: {}",
        counts
            .iter()
            .map(|(kind, n)| format!("{}={}", kind, n))
            .collect::<Vec<_>>()
            .join(", ")
    );

    writeln!(out, "{}", serde_json::to_string(&oncoprint.layout())?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn temp_with(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().expect("create temp file");
        write!(f, "{}", content).unwrap();
        f
    }

    #[test]
    fn test_replay_outputs_events_then_layout() {
        let events = temp_with(concat!(
            "{\"points\": [{\"data\": {\"name\": \"Missense Mutation\"}, \"text\": \"S1<br>G12D\", \"x\": 0.9, \"y\": \"KRAS (100%)\"}], \"event\": {\"type\": \"mousemove\"}}\n",
            "\n",
            "{\"xaxis.range[0]\": 0.2, \"xaxis.range[1]\": 0.8}\n",
            "{\"dragmode\": \"zoom\"}\n",
        ));

        let mut out = Vec::new();
        replay(OncoPrintConfig::default(), &PlotOverrides::default(), events.path(), &mut out).unwrap();

        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["eventType"], "Hover");
        assert_eq!(lines[1]["eventType"], "Zoom");
        assert_eq!(lines[2], serde_json::json!({"dragmode": "zoom"}));
        assert_eq!(lines[3]["xaxis"]["autorange"], false);
        assert_eq!(lines[3]["xaxis"]["range"], serde_json::json!([0.2, 0.8]));
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let events = temp_with("{\"xaxis.autorange\": true}\nnot json\n");

        let mut out = Vec::new();
        let err = replay(OncoPrintConfig::default(), &PlotOverrides::default(), events.path(), &mut out).unwrap_err();
        assert!(err.to_string().contains(":2"));
    }
}
