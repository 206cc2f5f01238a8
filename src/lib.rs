//! Synchronous client for the ClamAV daemon (clamd) wire protocol.
//!
//! Each operation ([`ClamdClient::scan`], [`ClamdClient::ping`],
//! [`ClamdClient::version`]) opens its own connection, runs the command
//! protocol, and closes the connection before returning. Scanning uploads
//! file content with the INSTREAM length-prefixed chunk framing and maps the
//! daemon's one-reply-per-item verdict lines back onto the inputs in order.
//!
//! ```no_run
//! use clamd_client::{ClamdClient, Config, ScanItem};
//!
//! # fn main() -> Result<(), clamd_client::ClamdError> {
//! let client = ClamdClient::new(Config::default());
//! let report = client.scan([ScanItem::from_bytes("test.pdf", b"%PDF".to_vec())])?;
//! if report.malware_found() {
//!     eprintln!("malware detected by {:?}", report.scanner_version);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
mod protocol;
pub mod report;
pub mod transport;

pub use client::ClamdClient;
pub use config::Config;
pub use error::{ClamdError, Result};
pub use report::{ScanItem, ScanItemResult, ScanReport};
pub use transport::{Connection, Connector, tcp_connector};
