use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Input file '{}' not found", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClassifierError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 找不到輸入檔：印出訊息後正常結束，不產生輸出檔
            ClassifierError::InputNotFound { .. } => ErrorSeverity::Low,
            ClassifierError::ConfigError { .. }
            | ClassifierError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ClassifierError::HttpClient(_) => ErrorSeverity::Medium,
            ClassifierError::CsvError(_) | ClassifierError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 進程退出碼：缺少輸入檔為 0，設定問題為 1，執行中的 I/O 失敗為 3
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClassifierError::InputNotFound { path } => {
                format!("[ERROR] File '{}' not found.", path.display())
            }
            ClassifierError::CsvError(e) => format!("Could not read or write CSV data: {}", e),
            ClassifierError::IoError(e) => format!("File system error: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ClassifierError::InputNotFound { .. } => {
                "Please create a CSV file with the format: ACCOUNT;COST_CENTER"
            }
            ClassifierError::HttpClient(_) => "Check the TLS/proxy settings of this machine",
            ClassifierError::CsvError(_) => {
                "Check the delimiter setting and that the input file is valid UTF-8"
            }
            ClassifierError::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
            ClassifierError::ConfigError { .. }
            | ClassifierError::InvalidConfigValueError { .. } => {
                "Review the command-line flags or the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Per-row inference failure. Its `Display` output is the marker written to the
/// classification column in place of a category.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("API ERROR: {0}")]
    Status(u16),

    #[error("CONNECTION ERROR: {0}. Check that Ollama is running.")]
    Transport(String),
}

impl From<reqwest::Error> for InferenceError {
    fn from(e: reqwest::Error) -> Self {
        InferenceError::Transport(e.to_string())
    }
}
