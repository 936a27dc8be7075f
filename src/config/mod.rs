#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_INPUT_PATH: &str = "financial_transactions.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "final_classification.csv";
pub const DEFAULT_MODEL: &str = "qwen2.5-coder:7b";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_DELIMITER: char = ';';

/// Run configuration, assembled once at start-up and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub model: String,
    pub endpoint: String,
    pub delimiter: char,
    /// `None` keeps the HTTP client's default, i.e. no request timeout.
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            delimiter: DEFAULT_DELIMITER,
            timeout: None,
        }
    }
}

impl Settings {
    pub fn delimiter_byte(&self) -> Result<u8> {
        validation::validate_delimiter("delimiter", self.delimiter)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_path", &self.input_path.to_string_lossy())?;
        validation::validate_path("output_path", &self.output_path.to_string_lossy())?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_url("endpoint", &self.endpoint)?;
        self.delimiter_byte()?;

        if let Some(timeout) = self.timeout {
            validation::validate_positive_number("timeout_seconds", timeout.as_secs(), 1)?;
        }

        Ok(())
    }
}
