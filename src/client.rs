//! Session engine: one connection per operation, strict command ordering.

use std::io::{self};

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{ClamdError, Result};
use crate::protocol::{
    self, CMD_END, CMD_IDSESSION, CMD_INSTREAM, CMD_PING, CMD_VERSION, RPL_FOUND, RPL_PONG,
};
use crate::report::{ScanItem, ScanItemResult, ScanReport};
use crate::transport::{Connection, Connector, tcp_connector};

/// Client for a clamd endpoint.
///
/// Holds only immutable configuration; every operation opens its own
/// connection and closes it before returning, so one client may be used from
/// several threads at once.
pub struct ClamdClient {
    config: Config,
    connector: Connector,
}

impl ClamdClient {
    /// A client using the default TCP connector.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_connector(config, tcp_connector())
    }

    /// A client with an injected connector, chiefly for deterministic tests
    /// without a live daemon.
    #[must_use]
    pub fn with_connector(config: Config, connector: Connector) -> Self {
        Self { config, connector }
    }

    /// Scan items over one session, strictly in the order given.
    ///
    /// The session issues `IDSESSION`, queries the scanner version, uploads
    /// each item via `INSTREAM` chunk framing and reads its verdict line,
    /// then issues `END`. Replies carry no item identifiers; the one-reply-
    /// per-upload ordering is what maps verdicts back to items.
    ///
    /// All-or-nothing: any I/O failure, or a missing verdict line, aborts
    /// the whole scan and no report is produced.
    ///
    /// # Errors
    ///
    /// Returns [`ClamdError::Io`] on connect/read/write failure and
    /// [`ClamdError::MissingReply`] if the daemon closes the connection
    /// before an item's verdict line arrives.
    pub fn scan(&self, items: impl IntoIterator<Item = ScanItem>) -> Result<ScanReport> {
        let mut conn = self.connect()?;

        send(&mut *conn, CMD_IDSESSION)?;

        send(&mut *conn, CMD_VERSION)?;
        let reply = protocol::read_reply(&mut *conn)?;
        trace!(?reply, "VERSION reply");
        let scanner_version = reply
            .as_deref()
            .and_then(|r| protocol::field_at(r, 1))
            .map(str::to_owned);

        let mut results = Vec::new();
        for mut item in items {
            send(&mut *conn, CMD_INSTREAM)?;
            protocol::write_chunks(&mut *item.content, &mut *conn, self.config.chunk_size)?;

            let reply = protocol::read_reply(&mut *conn)?
                .ok_or(ClamdError::MissingReply { command: "INSTREAM" })?;
            trace!(%reply, filename = ?item.filename, "INSTREAM reply");
            results.push(ScanItemResult {
                filename: item.filename,
                malware_found: reply.ends_with(RPL_FOUND),
                verdict: protocol::field_at(&reply, 2).map(str::to_owned),
            });
        }

        send(&mut *conn, CMD_END)?;

        Ok(ScanReport {
            scanner_version,
            results,
        })
    }

    /// Liveness check: succeeds iff the daemon replies with the exact
    /// literal `PONG`.
    ///
    /// # Errors
    ///
    /// Returns [`ClamdError::UnexpectedReply`] for any other reply and
    /// [`ClamdError::MissingReply`] if the stream ends without one.
    pub fn ping(&self) -> Result<()> {
        let mut conn = self.connect()?;
        send(&mut *conn, CMD_PING)?;
        let reply = protocol::read_reply(&mut *conn)?;
        trace!(?reply, "PING reply");
        match reply {
            Some(r) if r == RPL_PONG => Ok(()),
            Some(reply) => Err(ClamdError::UnexpectedReply {
                command: "PING",
                reply,
            }),
            None => Err(ClamdError::MissingReply { command: "PING" }),
        }
    }

    /// Query the daemon version, returning the reply line verbatim.
    ///
    /// Outside a session the reply is already just the version string, so no
    /// field extraction is applied.
    ///
    /// # Errors
    ///
    /// Returns [`ClamdError::MissingReply`] if the stream ends without a
    /// reply.
    pub fn version(&self) -> Result<String> {
        let mut conn = self.connect()?;
        send(&mut *conn, CMD_VERSION)?;
        let reply = protocol::read_reply(&mut *conn)?;
        trace!(?reply, "VERSION reply");
        reply.ok_or(ClamdError::MissingReply { command: "VERSION" })
    }

    fn connect(&self) -> Result<Box<dyn Connection>> {
        debug!(
            host = %self.config.host,
            port = self.config.port,
            timeout = ?self.config.connect_timeout,
            "connecting to clamd"
        );
        let mut conn = (self.connector)(
            &self.config.host,
            self.config.port,
            self.config.connect_timeout,
        )?;
        conn.set_read_timeout(self.config.read_timeout)?;
        Ok(conn)
    }
}

fn send(conn: &mut dyn Connection, command: &str) -> io::Result<()> {
    conn.write_all(command.as_bytes())?;
    conn.flush()
}
