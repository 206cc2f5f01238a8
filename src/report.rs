//! Scan inputs and the structured results built from daemon replies.

use std::io::{Cursor, Read};

/// A suspicious item to submit for scanning.
///
/// One-shot: the byte source is read sequentially to exhaustion during a
/// single upload and released afterwards.
pub struct ScanItem {
    pub(crate) filename: Option<String>,
    pub(crate) content: Box<dyn Read + Send>,
}

impl ScanItem {
    /// An item with a display name, read from any byte source.
    pub fn named(filename: impl Into<String>, content: impl Read + Send + 'static) -> Self {
        Self {
            filename: Some(filename.into()),
            content: Box::new(content),
        }
    }

    /// An item with no display name.
    pub fn unnamed(content: impl Read + Send + 'static) -> Self {
        Self {
            filename: None,
            content: Box::new(content),
        }
    }

    /// Convenience for in-memory content.
    pub fn from_bytes(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::named(filename, Cursor::new(bytes.into()))
    }

    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}

impl std::fmt::Debug for ScanItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanItem")
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

/// The daemon's verdict on one scanned item. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanItemResult {
    /// Display name copied from the submitted item.
    pub filename: Option<String>,
    /// True iff the reply line ended with the literal `FOUND` marker.
    pub malware_found: bool,
    /// Verdict text from the reply (e.g. `OK` or `Malware123 FOUND`).
    /// Absent when the reply carried fewer fields than expected.
    pub verdict: Option<String>,
}

/// Outcome of one `scan` call: the daemon's version plus one result per
/// submitted item, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Scanner version reported at session start; absent when the version
    /// reply was missing or malformed.
    pub scanner_version: Option<String>,
    pub results: Vec<ScanItemResult>,
}

impl ScanReport {
    /// True iff any item's verdict flagged malware.
    #[must_use]
    pub fn malware_found(&self) -> bool {
        self.results.iter().any(|r| r.malware_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(malware_found: bool) -> ScanItemResult {
        ScanItemResult {
            filename: None,
            malware_found,
            verdict: None,
        }
    }

    #[test]
    fn report_malware_found_is_or_over_results() {
        let clean = ScanReport {
            scanner_version: None,
            results: vec![result(false), result(false)],
        };
        assert!(!clean.malware_found());

        let dirty = ScanReport {
            scanner_version: None,
            results: vec![result(false), result(true)],
        };
        assert!(dirty.malware_found());
    }

    #[test]
    fn empty_report_is_clean() {
        let report = ScanReport {
            scanner_version: Some("ClamAV/x.y.z".to_string()),
            results: Vec::new(),
        };
        assert!(!report.malware_found());
    }

    #[test]
    fn from_bytes_carries_name_and_content() {
        let mut item = ScanItem::from_bytes("test.pdf", b"%PDF".to_vec());
        assert_eq!(item.filename(), Some("test.pdf"));
        let mut content = Vec::new();
        item.content.read_to_end(&mut content).unwrap();
        assert_eq!(content, b"%PDF");
    }
}
