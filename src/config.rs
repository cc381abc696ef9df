//! Report configuration loaded from a JSON file.
//!
//! Every field is optional in the file; missing fields fall back to the
//! defaults (INR amounts, en-GB style dates, the stock report title).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::DEFAULT_REPORT_TITLE;
use crate::format::{FormatConfig, MAX_FRACTION_DIGITS, is_valid_date_pattern};
use crate::io::{DEFAULT_FILE_NAME, DEFAULT_WORKSHEET_NAME, ExportOptions};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("fraction_digits must be between 0 and 2, got {0}")]
    FractionDigits(u32),

    #[error("Invalid date pattern: {0}")]
    DatePattern(String),

    #[error("file_name cannot be empty")]
    EmptyFileName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Initial report title for new sessions
    pub title: String,
    /// Worksheet name hint embedded in the exported workbook
    pub worksheet_name: String,
    /// Default output file name for exports
    pub file_name: String,
    pub format: FormatConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
            worksheet_name: DEFAULT_WORKSHEET_NAME.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            format: FormatConfig::default(),
        }
    }
}

impl ReportConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.format.fraction_digits > MAX_FRACTION_DIGITS {
            return Err(ConfigError::FractionDigits(self.format.fraction_digits));
        }
        if !is_valid_date_pattern(&self.format.date_pattern) {
            return Err(ConfigError::DatePattern(self.format.date_pattern.clone()));
        }
        if self.file_name.trim().is_empty() {
            return Err(ConfigError::EmptyFileName);
        }
        Ok(())
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            worksheet_name: self.worksheet_name.clone(),
            file_name: self.file_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::format::DigitGrouping;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = ReportConfig::from_json("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.format.currency_symbol, "₹");
    }

    #[test]
    fn test_partial_override() {
        let config = ReportConfig::from_json(
            r#"{"title": "Block B upkeep", "format": {"currency_symbol": "$", "grouping": "western"}}"#,
        )
        .unwrap();

        assert_eq!(config.title, "Block B upkeep");
        assert_eq!(config.format.currency_symbol, "$");
        assert_eq!(config.format.grouping, DigitGrouping::Western);
        assert_eq!(config.format.fraction_digits, 0);
        assert_eq!(config.file_name, DEFAULT_FILE_NAME);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            ReportConfig::from_json(r#"{"format": {"fraction_digits": 3}}"#),
            Err(ConfigError::FractionDigits(3))
        ));
        assert!(matches!(
            ReportConfig::from_json(r#"{"format": {"date_pattern": "%Q"}}"#),
            Err(ConfigError::DatePattern(_))
        ));
        assert!(matches!(
            ReportConfig::from_json(r#"{"file_name": " "}"#),
            Err(ConfigError::EmptyFileName)
        ));
        assert!(matches!(
            ReportConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"worksheet_name": "Tower A"}}"#).unwrap();

        let config = ReportConfig::load(file.path()).unwrap();
        assert_eq!(config.worksheet_name, "Tower A");
    }

    #[test]
    fn test_load_missing_file() {
        let result = ReportConfig::load("/nonexistent/maintenance.json");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
