//! Tunables for a [`SchemaConsole`](crate::SchemaConsole)

use serde::Deserialize;
use std::time::Duration;

/// Wall-clock limit for ad-hoc statements
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_PAGE_SIZE: u64 = 25;

/// Console options
///
/// The export row cap is not an option; it is fixed at
/// [`MAX_EXPORT_ROWS`](crate::export::MAX_EXPORT_ROWS).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsoleOptions {
    /// Ad-hoc statement timeout, in milliseconds
    pub query_timeout_milliseconds: u64,

    /// Page size used when a caller does not ask for one
    pub default_page_size: u64,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            query_timeout_milliseconds: DEFAULT_QUERY_TIMEOUT.as_millis() as u64,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ConsoleOptions {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_milliseconds)
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout_milliseconds = timeout.as_millis() as u64;
        self
    }
}
