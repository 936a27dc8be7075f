use crate::config::toml_config::TomlConfig;
use crate::config::{
    Settings, DEFAULT_DELIMITER, DEFAULT_ENDPOINT, DEFAULT_INPUT_PATH, DEFAULT_MODEL,
    DEFAULT_OUTPUT_PATH,
};
use crate::utils::error::Result;
use clap::{Args, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Inference endpoint flags shared by both binaries.
#[derive(Debug, Clone, Args)]
pub struct EndpointArgs {
    /// Ollama model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// URL of the Ollama generate endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "ledger-classifier")]
#[command(about = "Classifies ledger transactions into accounting categories with a local LLM")]
pub struct CliConfig {
    /// TOML configuration file; when given it replaces the flags below
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Field separator for both input and output files
    #[arg(long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,

    #[command(flatten)]
    pub endpoint: EndpointArgs,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn settings(&self) -> Result<Settings> {
        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            return TomlConfig::from_file(path)?.into_settings();
        }

        Ok(Settings {
            input_path: self.input.clone(),
            output_path: self.output.clone(),
            model: self.endpoint.model.clone(),
            endpoint: self.endpoint.endpoint.clone(),
            delimiter: self.delimiter,
            timeout: self.endpoint.timeout_seconds.map(Duration::from_secs),
        })
    }
}
