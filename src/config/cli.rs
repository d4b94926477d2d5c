use crate::config::toml_config::{AnalyzerConfig, InputConfig, OutputConfig};
use crate::core::{IpConfiguration, RecordFormat};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use chrono::{DateTime, Utc};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ip-log-analyzer")]
#[command(about = "Aggregate request counts per client address over a time window")]
pub struct CliConfig {
    /// TOML configuration file; command-line values override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Parsed log records to analyse
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(long, value_enum)]
    pub input_format: Option<RecordFormat>,

    /// Where to write the aggregated records
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, value_enum)]
    pub output_format: Option<RecordFormat>,

    /// Window start, RFC 3339 (e.g. 2024-03-01T10:00:00Z)
    #[arg(long)]
    pub time_start: Option<DateTime<Utc>>,

    /// Window end, inclusive
    #[arg(long)]
    pub time_end: Option<DateTime<Utc>>,

    #[arg(long)]
    pub address_start: Option<String>,

    #[arg(long)]
    pub address_mask: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Validate configuration and exit without reading records")]
    pub dry_run: bool,
}

impl CliConfig {
    /// Merges the optional config file with command-line overrides.
    pub fn resolve(&self) -> Result<AnalyzerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                AnalyzerConfig::from_file(path)?
            }
            None => AnalyzerConfig {
                filter: IpConfiguration::new(
                    *validate_required_field("time_start", &self.time_start)?,
                    *validate_required_field("time_end", &self.time_end)?,
                ),
                input: InputConfig {
                    path: validate_required_field("input", &self.input)?.clone(),
                    format: RecordFormat::default(),
                },
                output: OutputConfig {
                    path: validate_required_field("output", &self.output)?.clone(),
                    format: RecordFormat::default(),
                },
            },
        };

        if let Some(time_start) = self.time_start {
            config.filter.time_start = time_start;
        }
        if let Some(time_end) = self.time_end {
            config.filter.time_end = time_end;
        }
        if let Some(address_start) = &self.address_start {
            config.filter.address_start = Some(address_start.clone());
        }
        if let Some(address_mask) = &self.address_mask {
            config.filter.address_mask = Some(address_mask.clone());
        }
        if let Some(input) = &self.input {
            config.input.path = input.clone();
        }
        if let Some(format) = self.input_format {
            config.input.format = format;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(format) = self.output_format {
            config.output.format = format;
        }

        Ok(config)
    }
}
