use crate::core::range::AddressRange;
use crate::domain::model::{IpConfiguration, LogRecord};
use crate::domain::ports::LogFilter;
use crate::utils::error::{AnalyzerError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::net::IpAddr;

/// Time-window, per-address aggregation and address-range filtering over log records.
#[derive(Debug, Clone)]
pub struct LogFilterService {
    time_start: DateTime<Utc>,
    time_end: DateTime<Utc>,
    address_range: Option<AddressRange>,
}

impl LogFilterService {
    /// Fails if the configured start address or mask is not a valid IP address.
    pub fn new(config: &IpConfiguration) -> Result<Self> {
        let address_range = match config.address_filter() {
            Some((start, mask)) => Some(AddressRange::parse(start, mask)?),
            None => None,
        };

        if config.time_start > config.time_end {
            tracing::warn!(
                "Time window start {} is after end {}; every record will be filtered out",
                config.time_start,
                config.time_end
            );
        }

        Ok(Self {
            time_start: config.time_start,
            time_end: config.time_end,
            address_range,
        })
    }

    pub fn address_range(&self) -> Option<&AddressRange> {
        self.address_range.as_ref()
    }

    /// Sorts `records` in place, then applies the time window, aggregation and address range.
    pub fn filter_and_aggregate(&self, records: &mut Vec<LogRecord>) -> Result<Vec<LogRecord>> {
        records.sort();

        let in_window = Self::in_time_interval(records, self.time_start, self.time_end);
        tracing::debug!(
            "{} of {} records fall within [{}, {}]",
            in_window.len(),
            records.len(),
            self.time_start,
            self.time_end
        );

        let aggregated = Self::aggregate_by_address(&in_window)?;
        tracing::debug!("Aggregated into {} distinct client addresses", aggregated.len());

        match &self.address_range {
            Some(range) => {
                let filtered = Self::in_address_range(&aggregated, range);
                tracing::debug!(
                    "{} addresses within start {} mask {}",
                    filtered.len(),
                    range.start(),
                    range.mask()
                );
                Ok(filtered)
            }
            None => Ok(aggregated),
        }
    }

    /// Records whose timestamp lies in `[start, end]`, in input order.
    pub fn in_time_interval(
        records: &[LogRecord],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<LogRecord> {
        records
            .iter()
            .filter(|r| r.time_request >= start && r.time_request <= end)
            .cloned()
            .collect()
    }

    /// One record per client address, in order of first appearance.
    ///
    /// The request counts are summed; every other field comes from the first
    /// record seen for that address.
    pub fn aggregate_by_address(records: &[LogRecord]) -> Result<Vec<LogRecord>> {
        let mut index: HashMap<IpAddr, usize> = HashMap::new();
        let mut aggregated: Vec<LogRecord> = Vec::new();

        for record in records {
            match index.get(&record.client_ip_address) {
                Some(&position) => {
                    let first = &mut aggregated[position];
                    if first.resource != record.resource
                        || first.path != record.path
                        || first.method != record.method
                        || first.response != record.response
                    {
                        tracing::trace!(
                            "Dropping differing fields of {} {} {} for {}",
                            record.method,
                            record.path,
                            record.response,
                            record.client_ip_address
                        );
                    }
                    first.request_count = first
                        .request_count
                        .checked_add(record.request_count)
                        .ok_or_else(|| AnalyzerError::ProcessingError {
                            message: format!(
                                "request count overflow while aggregating {}",
                                record.client_ip_address
                            ),
                        })?;
                }
                None => {
                    index.insert(record.client_ip_address, aggregated.len());
                    aggregated.push(record.clone());
                }
            }
        }

        Ok(aggregated)
    }

    pub fn in_address_range(records: &[LogRecord], range: &AddressRange) -> Vec<LogRecord> {
        records
            .iter()
            .filter(|r| range.contains(&r.client_ip_address))
            .cloned()
            .collect()
    }
}

impl LogFilter for LogFilterService {
    fn filter_and_aggregate(&self, records: &mut Vec<LogRecord>) -> Result<Vec<LogRecord>> {
        LogFilterService::filter_and_aggregate(self, records)
    }
}
