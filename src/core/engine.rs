use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<String> {
        tracing::info!("Starting log analysis...");

        let records = self.pipeline.extract()?;
        tracing::info!("Extracted {} records", records.len());

        let filtered = self.pipeline.transform(records)?;
        tracing::info!("Filtered down to {} client addresses", filtered.len());

        let output_path = self.pipeline.load(filtered)?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogRecord;
    use crate::utils::error::AnalyzerError;
    use std::cell::RefCell;

    struct RecordingPipeline {
        stages: RefCell<Vec<&'static str>>,
        fail_transform: bool,
    }

    impl Pipeline for RecordingPipeline {
        fn extract(&self) -> Result<Vec<LogRecord>> {
            self.stages.borrow_mut().push("extract");
            Ok(Vec::new())
        }

        fn transform(&self, records: Vec<LogRecord>) -> Result<Vec<LogRecord>> {
            self.stages.borrow_mut().push("transform");
            if self.fail_transform {
                return Err(AnalyzerError::ProcessingError {
                    message: "boom".to_string(),
                });
            }
            Ok(records)
        }

        fn load(&self, _records: Vec<LogRecord>) -> Result<String> {
            self.stages.borrow_mut().push("load");
            Ok("out.csv".to_string())
        }
    }

    #[test]
    fn test_runs_stages_in_order() {
        let engine = AnalysisEngine::new(RecordingPipeline {
            stages: RefCell::new(Vec::new()),
            fail_transform: false,
        });

        assert_eq!(engine.run().unwrap(), "out.csv");
        assert_eq!(*engine.pipeline.stages.borrow(), vec!["extract", "transform", "load"]);
    }

    #[test]
    fn test_stops_at_first_failure() {
        let engine = AnalysisEngine::new(RecordingPipeline {
            stages: RefCell::new(Vec::new()),
            fail_transform: true,
        });

        assert!(engine.run().is_err());
        assert_eq!(*engine.pipeline.stages.borrow(), vec!["extract", "transform"]);
    }
}
