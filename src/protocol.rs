//! Wire protocol for clamd.
//!
//! Commands are textual, `\n`-terminated, and prefixed with `n` to select
//! newline-delimited replies. Replies are single text lines. File content is
//! transmitted after `INSTREAM` as repeated `{4-byte big-endian length,
//! payload}` records, terminated by a zero-length record.

use std::io::{self, Read, Write};

use bytes::{BufMut, BytesMut};

pub(crate) const CMD_IDSESSION: &str = "nIDSESSION\n";
pub(crate) const CMD_VERSION: &str = "nVERSION\n";
pub(crate) const CMD_INSTREAM: &str = "nINSTREAM\n";
pub(crate) const CMD_PING: &str = "nPING\n";
pub(crate) const CMD_END: &str = "nEND\n";

pub(crate) const RPL_PONG: &str = "PONG";
pub(crate) const RPL_FOUND: &str = "FOUND";

// ─── Reply lines ─────────────────────────────────────────────────────────────

/// Read one `\n`-terminated reply line, without the terminator.
///
/// Returns `Ok(None)` when the stream ends before any byte arrives; a final
/// unterminated fragment still counts as a line. Reads are byte-sized because
/// the connection carries interleaved binary framing and buffering ahead
/// would swallow it.
///
/// # Errors
///
/// Returns an error if reading fails or the line is not valid UTF-8.
pub(crate) fn read_reply(r: &mut dyn Read) -> io::Result<Option<String>> {
    let mut line = Vec::new();
    let mut byte = [0u8; 1];
    let mut saw_any = false;
    loop {
        if r.read(&mut byte)? == 0 {
            break;
        }
        saw_any = true;
        if byte[0] == b'\n' {
            break;
        }
        line.push(byte[0]);
    }
    if !saw_any {
        return Ok(None);
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    String::from_utf8(line)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Extract the field at `index` from a reply line.
///
/// The line is split on runs of whitespace and/or `:` into at most
/// `index + 1` fields, so the returned field keeps any embedded separators
/// (e.g. `Malware123 FOUND`). Returns `None` when the line has fewer fields;
/// clamd is not expected to produce such lines, but a short reply must not
/// fail the whole operation.
pub(crate) fn field_at(line: &str, index: usize) -> Option<&str> {
    let mut rest = line;
    for _ in 0..index {
        let sep = rest.find(is_separator)?;
        rest = rest[sep..].trim_start_matches(is_separator);
    }
    if rest.is_empty() { None } else { Some(rest) }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ':'
}

// ─── INSTREAM chunk framing ──────────────────────────────────────────────────

/// Stream `source` to `out` as length-prefixed INSTREAM records.
///
/// Each non-empty read of up to `chunk_size` bytes becomes one record; the
/// zero-length terminator is written after the source is exhausted, then the
/// output is flushed. The daemon does not reply until the terminator.
///
/// # Errors
///
/// Returns an error if reading the source or writing the connection fails.
pub(crate) fn write_chunks(
    source: &mut dyn Read,
    out: &mut dyn Write,
    chunk_size: usize,
) -> io::Result<()> {
    let mut chunk = vec![0u8; chunk_size];
    let mut record = BytesMut::with_capacity(4 + chunk_size);
    loop {
        let read = source.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        let len = u32::try_from(read)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "chunk exceeds u32 range"))?;
        record.clear();
        record.put_u32(len);
        record.put_slice(&chunk[..read]);
        out.write_all(&record)?;
    }
    record.clear();
    record.put_u32(0);
    out.write_all(&record)?;
    out.flush()
}
