use crate::config::{
    Settings, DEFAULT_DELIMITER, DEFAULT_ENDPOINT, DEFAULT_INPUT_PATH, DEFAULT_MODEL,
    DEFAULT_OUTPUT_PATH,
};
use crate::utils::error::{ClassifierError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File form of [`Settings`]. Every section and key is optional; missing
/// values fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| ClassifierError::ConfigError {
            message: format!(
                "cannot read config file '{}': {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClassifierError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OLLAMA_HOST})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClassifierError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn into_settings(self) -> Result<Settings> {
        let delimiter = match self.input.delimiter {
            Some(text) => single_char("input.delimiter", &text)?,
            None => DEFAULT_DELIMITER,
        };

        Ok(Settings {
            input_path: PathBuf::from(self.input.path.as_deref().unwrap_or(DEFAULT_INPUT_PATH)),
            output_path: PathBuf::from(self.output.path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)),
            model: self.model.name.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: self
                .model
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            delimiter,
            timeout: self.model.timeout_seconds.map(Duration::from_secs),
        })
    }
}

fn single_char(field: &str, text: &str) -> Result<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ClassifierError::InvalidConfigValueError {
            field: field.to_string(),
            value: text.to_string(),
            reason: "Expected exactly one character".to_string(),
        }),
    }
}
