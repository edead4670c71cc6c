//! Load and validate a media configuration file, then print the resolved state.
//!
//! ```bash
//! media-config --config config/media_config.conf
//! media-config --config config/media_config.toml --output toml --strict
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use media_config::config::{MediaConfig, SourceFormat, DEFAULT_CONFIG_PATH};
use media_config::logging;
use tracing::Level;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// `name=value` lines
    Options,
    /// TOML with MEDIA_ environment overrides
    Toml,
}

impl From<Format> for SourceFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Options => SourceFormat::Options,
            Format::Toml => SourceFormat::Toml,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    Json,
    Toml,
}

#[derive(Debug, Parser)]
#[command(name = "media-config", version, about = "Load and validate a media configuration")]
struct Cli {
    /// Configuration file to load
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Source format (default: by file extension)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// How to print the resolved configuration
    #[arg(short, long, value_enum, default_value_t = Output::Json)]
    output: Output,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Exit with an error if any value had to be corrected
    #[arg(long)]
    strict: bool,
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let format = cli
        .format
        .map(SourceFormat::from)
        .unwrap_or_else(|| SourceFormat::from_path(&cli.config));

    let (config, issues) = MediaConfig::load_with_format(&cli.config, format)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let rendered = match cli.output {
        Output::Json => serde_json::to_string_pretty(&config)?,
        Output::Toml => toml::to_string_pretty(&config)?,
    };
    println!("{}", rendered);

    for issue in &issues {
        eprintln!("corrected: {}", issue);
    }

    if cli.strict && !issues.is_empty() {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level, cli.json_logs);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
