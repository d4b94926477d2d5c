use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::net::IpAddr;

/// One raw or aggregated access-log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub client_ip_address: IpAddr,
    pub time_request: DateTime<Utc>,
    pub request_count: u64,
    pub resource: String,
    pub path: String,
    pub method: String,
    pub response: u16,
}

impl LogRecord {
    pub fn new(
        client_ip_address: IpAddr,
        time_request: DateTime<Utc>,
        request_count: u64,
        resource: impl Into<String>,
        path: impl Into<String>,
        method: impl Into<String>,
        response: u16,
    ) -> Self {
        Self {
            client_ip_address,
            time_request,
            request_count,
            resource: resource.into(),
            path: path.into(),
            method: method.into(),
            response,
        }
    }
}

// Timestamp first, then the remaining fields for a total order.
impl Ord for LogRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time_request
            .cmp(&other.time_request)
            .then_with(|| self.client_ip_address.cmp(&other.client_ip_address))
            .then_with(|| self.request_count.cmp(&other.request_count))
            .then_with(|| self.resource.cmp(&other.resource))
            .then_with(|| self.path.cmp(&other.path))
            .then_with(|| self.method.cmp(&other.method))
            .then_with(|| self.response.cmp(&other.response))
    }
}

impl PartialOrd for LogRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Filter parameters: an inclusive time window and an optional address/mask pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpConfiguration {
    pub time_start: DateTime<Utc>,
    pub time_end: DateTime<Utc>,
    #[serde(default)]
    pub address_start: Option<String>,
    #[serde(default)]
    pub address_mask: Option<String>,
}

impl IpConfiguration {
    pub fn new(time_start: DateTime<Utc>, time_end: DateTime<Utc>) -> Self {
        Self {
            time_start,
            time_end,
            address_start: None,
            address_mask: None,
        }
    }

    pub fn with_address_range(mut self, start: impl Into<String>, mask: impl Into<String>) -> Self {
        self.address_start = Some(start.into());
        self.address_mask = Some(mask.into());
        self
    }

    /// Both address and mask present and non-empty.
    pub fn address_filter(&self) -> Option<(&str, &str)> {
        match (self.address_start.as_deref(), self.address_mask.as_deref()) {
            (Some(start), Some(mask)) if !start.is_empty() && !mask.is_empty() => {
                Some((start, mask))
            }
            _ => None,
        }
    }
}
