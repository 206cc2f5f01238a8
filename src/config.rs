//! Connection parameters for a clamd endpoint.

use std::time::Duration;

/// Immutable connection parameters, constructed once per client.
///
/// Defaults match a stock local clamd install listening on TCP 3310.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Timeout for establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Timeout for every read on an established connection.
    pub read_timeout: Duration,
    /// Size of the reads taken from a scan item's byte source; each read
    /// becomes one length-prefixed INSTREAM record.
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3310,
            connect_timeout: Duration::from_millis(3000),
            read_timeout: Duration::from_millis(30_000),
            chunk_size: 2048,
        }
    }
}
