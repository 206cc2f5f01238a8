/// Errors surfaced by client operations.
///
/// Transport failures (connect, read, write, timeout) abort the whole
/// operation and are never retried. Protocol violations carry the offending
/// reply, or name its absence, for diagnosis.
#[derive(Debug, thiserror::Error)]
pub enum ClamdError {
    #[error("clamd IO: {0}")]
    Io(#[from] std::io::Error),
    /// The daemon sent a reply that does not match the protocol.
    #[error("unexpected reply to {command}: {reply:?}")]
    UnexpectedReply {
        command: &'static str,
        reply: String,
    },
    /// The daemon closed the connection where a reply line was required.
    #[error("connection closed before a reply to {command} arrived")]
    MissingReply { command: &'static str },
}

pub type Result<T> = std::result::Result<T, ClamdError>;
