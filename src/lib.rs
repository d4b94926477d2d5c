pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{AnalyzerConfig, LocalStorage};

pub use crate::core::{
    engine::AnalysisEngine, filter::LogFilterService, pipeline::FilePipeline, range::AddressRange,
};
pub use domain::model::{IpConfiguration, LogRecord};
pub use domain::ports::{LogFilter, RecordFormat};
pub use utils::error::{AnalyzerError, Result};
