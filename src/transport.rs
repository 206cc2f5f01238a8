//! Transport layer: the duplex-connection abstraction and its TCP default.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// A connected duplex byte stream to the daemon.
///
/// Exclusively owned by the single operation that acquired it; dropping the
/// handle closes the connection.
pub trait Connection: Read + Write + Send {
    /// Set the timeout applied to every subsequent read.
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()>;
}

/// Factory producing a freshly connected handle for the given host, port and
/// connect timeout.
///
/// Must be safe to invoke repeatedly and concurrently; every invocation
/// yields an independent connection. The default is [`tcp_connector`]; tests
/// substitute an in-memory implementation.
pub type Connector =
    Box<dyn Fn(&str, u16, Duration) -> io::Result<Box<dyn Connection>> + Send + Sync>;

impl Connection for TcpStream {
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        TcpStream::set_read_timeout(self, Some(timeout))
    }
}

/// The default connector: resolve the host and connect over TCP.
#[must_use]
pub fn tcp_connector() -> Connector {
    Box::new(|host, port, timeout| {
        let stream = tcp_connect(host, port, timeout)?;
        Ok(Box::new(stream) as Box<dyn Connection>)
    })
}

fn tcp_connect(host: &str, port: u16, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")
    }))
}
