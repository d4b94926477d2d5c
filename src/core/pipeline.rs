use crate::core::filter::LogFilterService;
use crate::core::{ConfigProvider, LogRecord, Pipeline, RecordFormat, Storage};
use crate::utils::error::{AnalyzerError, Result};

/// Reads parsed records from storage, filters them, and writes the aggregate back out.
pub struct FilePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    service: LogFilterService,
}

impl<S: Storage, C: ConfigProvider> FilePipeline<S, C> {
    /// Builds the filter service up front so bad addresses surface before any I/O.
    pub fn new(storage: S, config: C) -> Result<Self> {
        let service = LogFilterService::new(config.filter())?;
        Ok(Self {
            storage,
            config,
            service,
        })
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

pub fn decode_records(data: &[u8], format: RecordFormat) -> Result<Vec<LogRecord>> {
    match format {
        RecordFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(data);
            let mut records = Vec::new();
            for row in reader.deserialize() {
                let record: LogRecord = row?;
                records.push(record);
            }
            Ok(records)
        }
        RecordFormat::Json => Ok(serde_json::from_slice(data)?),
    }
}

pub fn encode_records(records: &[LogRecord], format: RecordFormat) -> Result<Vec<u8>> {
    match format {
        RecordFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for record in records {
                writer.serialize(record)?;
            }
            writer.into_inner().map_err(|e| AnalyzerError::ProcessingError {
                message: format!("failed to flush CSV output: {}", e.error()),
            })
        }
        RecordFormat::Json => Ok(serde_json::to_vec_pretty(records)?),
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for FilePipeline<S, C> {
    fn extract(&self) -> Result<Vec<LogRecord>> {
        tracing::debug!("Reading records from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path())?;
        decode_records(&data, self.config.input_format())
    }

    fn transform(&self, mut records: Vec<LogRecord>) -> Result<Vec<LogRecord>> {
        self.service.filter_and_aggregate(&mut records)
    }

    fn load(&self, records: Vec<LogRecord>) -> Result<String> {
        let data = encode_records(&records, self.config.output_format())?;
        tracing::debug!(
            "Writing {} records ({} bytes) to storage",
            records.len(),
            data.len()
        );
        self.storage.write_file(self.config.output_path(), &data)?;
        Ok(self.config.output_path().to_string())
    }
}
