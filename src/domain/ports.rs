use crate::domain::model::{IpConfiguration, LogRecord};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Filtering service contract; hosts depend on this rather than the concrete service.
pub trait LogFilter {
    fn filter_and_aggregate(&self, records: &mut Vec<LogRecord>) -> Result<Vec<LogRecord>>;
}

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    #[default]
    Csv,
    Json,
}

pub trait ConfigProvider {
    fn filter(&self) -> &IpConfiguration;
    fn input_path(&self) -> &str;
    fn input_format(&self) -> RecordFormat;
    fn output_path(&self) -> &str;
    fn output_format(&self) -> RecordFormat;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<LogRecord>>;
    fn transform(&self, records: Vec<LogRecord>) -> Result<Vec<LogRecord>>;
    fn load(&self, records: Vec<LogRecord>) -> Result<String>;
}
