use crate::core::{ConfigProvider, IpConfiguration, RecordFormat};
use crate::core::range::AddressRange;
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::{validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub filter: IpConfiguration,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    #[serde(default)]
    pub format: RecordFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default)]
    pub format: RecordFormat,
}

impl AnalyzerConfig {
    /// Loads configuration from a TOML file, expanding `${VAR}` references first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnalyzerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AnalyzerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AnalyzerError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("input.path", &self.input.path)?;
        validate_path("output.path", &self.output.path)?;

        if let Some((start, mask)) = self.filter.address_filter() {
            AddressRange::parse(start, mask)?;
        }

        if self.filter.time_start > self.filter.time_end {
            tracing::warn!(
                "filter.time_start ({}) is after filter.time_end ({})",
                self.filter.time_start,
                self.filter.time_end
            );
        }

        Ok(())
    }
}

impl ConfigProvider for AnalyzerConfig {
    fn filter(&self) -> &IpConfiguration {
        &self.filter
    }

    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn input_format(&self) -> RecordFormat {
        self.input.format
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_format(&self) -> RecordFormat {
        self.output.format
    }
}

impl Validate for AnalyzerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[filter]
time_start = "2024-03-01T10:00:00Z"
time_end = "2024-03-01T10:10:00Z"
address_start = "192.168.0.0"
address_mask = "255.255.255.0"

[input]
path = "records.csv"

[output]
path = "result.json"
format = "json"
"#;

        let config = AnalyzerConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.filter.time_start, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
        assert_eq!(config.filter.address_filter(), Some(("192.168.0.0", "255.255.255.0")));
        assert_eq!(config.input_format(), RecordFormat::Csv);
        assert_eq!(config.output_format(), RecordFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_address_filter_is_optional() {
        let toml_content = r#"
[filter]
time_start = "2024-03-01T10:00:00Z"
time_end = "2024-03-01T10:10:00Z"

[input]
path = "records.csv"

[output]
path = "result.csv"
"#;

        let config = AnalyzerConfig::from_toml_str(toml_content).unwrap();
        assert!(config.filter.address_filter().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("IP_LOG_ANALYZER_TEST_MASK", "255.255.0.0");

        let toml_content = r#"
[filter]
time_start = "2024-03-01T10:00:00Z"
time_end = "2024-03-01T10:10:00Z"
address_start = "10.1.0.0"
address_mask = "${IP_LOG_ANALYZER_TEST_MASK}"

[input]
path = "records.csv"

[output]
path = "${IP_LOG_ANALYZER_UNSET_VAR}"
"#;

        let config = AnalyzerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.filter.address_mask.as_deref(), Some("255.255.0.0"));
        assert_eq!(config.output.path, "${IP_LOG_ANALYZER_UNSET_VAR}");

        std::env::remove_var("IP_LOG_ANALYZER_TEST_MASK");
    }

    #[test]
    fn test_config_validation_rejects_bad_mask() {
        let toml_content = r#"
[filter]
time_start = "2024-03-01T10:00:00Z"
time_end = "2024-03-01T10:10:00Z"
address_start = "10.0.0.0"
address_mask = "255.0.0"

[input]
path = "records.csv"

[output]
path = "result.csv"
"#;

        let config = AnalyzerConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(AnalyzerError::AddressFormatError { .. })
        ));
    }

    #[test]
    fn test_unknown_format_is_a_parse_error() {
        let toml_content = r#"
[filter]
time_start = "2024-03-01T10:00:00Z"
time_end = "2024-03-01T10:10:00Z"

[input]
path = "records.csv"

[output]
path = "result.xml"
format = "xml"
"#;

        assert!(AnalyzerConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[filter]
time_start = "2024-03-01T00:00:00Z"
time_end = "2024-03-02T00:00:00Z"

[input]
path = "in.json"
format = "json"

[output]
path = "out.csv"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AnalyzerConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.input_path(), "in.json");
        assert_eq!(config.input_format(), RecordFormat::Json);
    }
}
