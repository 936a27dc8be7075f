pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::csv_io::{RowSink, RowSource};
pub use crate::adapters::ollama::OllamaClassifier;
pub use crate::config::Settings;
pub use crate::core::engine::{ClassificationEngine, RunSummary};
pub use crate::domain::model::{Category, TransactionRow};
pub use crate::domain::rules::RuleBook;
pub use crate::utils::error::{ClassifierError, InferenceError, Result};
