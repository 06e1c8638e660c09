use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use oncoprint_core::{OncoPrintConfig, SampleOrder};
use std::path::PathBuf;

mod commands;
mod error;

use error::{format_error_with_suggestions, CliError};

#[derive(Parser)]
#[command(name = "oncoprint")]
#[command(about = "OncoPrint - genomic alteration matrix builder")]
#[command(version)]
#[command(long_about = "
Builds plotly-compatible OncoPrint figures from alteration records and
replays chart interaction events through the event normalizer.

Examples:
  oncoprint render --data alterations.json --out figure.json --pretty
  oncoprint replay --events relayout.jsonl
  oncoprint config --example > oncoprint.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (defaults to ./oncoprint.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the figure JSON (traces + layout) for a record file
    Render {
        /// Alteration records (JSON array)
        #[arg(short, long)]
        data: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        overrides: PlotOverrides,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Feed raw chart events (one JSON object per line) through the normalizer
    Replay {
        /// Raw event log, JSON lines
        #[arg(short, long)]
        events: PathBuf,

        #[command(flatten)]
        overrides: PlotOverrides,
    },

    /// Configuration helpers
    Config {
        /// Print an example configuration file
        #[arg(long)]
        example: bool,
    },
}

/// Command-line values that take precedence over the configuration file
#[derive(clap::Args, Debug, Default, Clone)]
pub struct PlotOverrides {
    /// Bar-gap padding, strictly between 0 and 0.5
    #[arg(long)]
    pub padding: Option<f64>,

    /// Background grid color
    #[arg(long)]
    pub background: Option<String>,

    /// Sample column ordering
    #[arg(long)]
    pub sample_order: Option<SampleOrderArg>,

    /// X-axis title
    #[arg(long)]
    pub xlabel: Option<String>,

    /// Y-axis title
    #[arg(long)]
    pub ylabel: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SampleOrderArg {
    FirstSeen,
    Lexical,
    Alteration,
}

impl From<SampleOrderArg> for SampleOrder {
    fn from(arg: SampleOrderArg) -> Self {
        match arg {
            SampleOrderArg::FirstSeen => SampleOrder::FirstSeen,
            SampleOrderArg::Lexical => SampleOrder::Lexical,
            SampleOrderArg::Alteration => SampleOrder::Alteration,
        }
    }
}

impl PlotOverrides {
    pub fn apply(&self, config: &mut OncoPrintConfig) {
        if let Some(padding) = self.padding {
            config.plot.padding = padding;
        }
        if let Some(background) = &self.background {
            config.plot.background_color = background.as_str().into();
        }
        if let Some(order) = self.sample_order {
            config.plot.sample_order = order.into();
        }
        if let Some(xlabel) = &self.xlabel {
            config.axes.xlabel = Some(xlabel.clone());
        }
        if let Some(ylabel) = &self.ylabel {
            config.axes.ylabel = Some(ylabel.clone());
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = OncoPrintConfig::load(cli.config.as_deref()).map_err(CliError::from)?;

    match cli.command {
        Commands::Render { data, out, overrides, pretty } => {
            commands::render::execute(config, &overrides, data, out, pretty)?;
        }

        Commands::Replay { events, overrides } => {
            commands::replay::execute(config, &overrides, events)?;
        }

        Commands::Config { example } => {
            commands::config::execute(&config, example)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => eprintln!("Error: {}", format_error_with_suggestions(cli_err)),
            None => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_take_precedence() {
        let cli = Cli::try_parse_from([
            "oncoprint",
            "render",
            "--data",
            "records.json",
            "--padding",
            "0.1",
            "--sample-order",
            "alteration",
            "--ylabel",
            "Genes",
        ])
        .unwrap();

        let Commands::Render { overrides, .. } = cli.command else {
            panic!("expected render command");
        };
        let mut config = OncoPrintConfig::default();
        overrides.apply(&mut config);

        assert_eq!(config.plot.padding, 0.1);
        assert_eq!(config.plot.sample_order, SampleOrder::Alteration);
        assert_eq!(config.axes.ylabel.as_deref(), Some("Genes"));
        assert_eq!(config.axes.xlabel, None);
    }

    #[test]
    fn test_replay_needs_only_events() {
        let cli = Cli::try_parse_from(["oncoprint", "replay", "--events", "events.jsonl"]).unwrap();
        assert!(matches!(cli.command, Commands::Replay { .. }));
        assert!(Cli::try_parse_from(["oncoprint", "replay", "--data", "records.json", "--events", "e.jsonl"]).is_err());
    }
}
