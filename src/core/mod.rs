pub mod engine;
pub mod filter;
pub mod pipeline;
pub mod range;

pub use crate::domain::model::{IpConfiguration, LogRecord};
pub use crate::domain::ports::{ConfigProvider, LogFilter, Pipeline, RecordFormat, Storage};
pub use crate::utils::error::Result;
