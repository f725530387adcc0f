//! Integrity verification against the checksum ledger.
//!
//! The ledger is the source of truth for what must match. Payload entries
//! the ledger does not list are reported as `unlisted_payload` but are never
//! discrepancies.

use super::read::ContainerReader;
use crate::checksum::{hash_reader, parse_ledger};
use crate::error::ContainerResult;
use crate::paths::is_payload_path;
use std::collections::HashSet;
use std::io::{Read, Seek};
use zip::result::ZipError;

/// One integrity problem found during verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discrepancy {
    /// Listed in the ledger, absent from the archive.
    MissingPayloadFile { path: String },
    HashMismatch {
        path: String,
        expected: String,
        actual: String,
    },
    /// Present, but its stored data cannot be read back (e.g. CRC failure).
    UnreadablePayloadFile { path: String, reason: String },
}

impl Discrepancy {
    pub fn path(&self) -> &str {
        match self {
            Self::MissingPayloadFile { path }
            | Self::HashMismatch { path, .. }
            | Self::UnreadablePayloadFile { path, .. } => path,
        }
    }
}

impl std::fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPayloadFile { path } => write!(f, "Missing payload file: {path}"),
            Self::HashMismatch {
                path,
                expected,
                actual,
            } => write!(
                f,
                "Hash mismatch: {path}\n  expected: {expected}\n  actual:   {actual}"
            ),
            Self::UnreadablePayloadFile { path, reason } => {
                write!(f, "Unreadable payload file: {path} ({reason})")
            }
        }
    }
}

/// Outcome of a verification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Ledger entries examined.
    pub entries_checked: usize,
    /// 1-based ledger line numbers that were skipped as malformed.
    pub skipped_lines: Vec<usize>,
    /// Every problem found, in ledger order.
    pub discrepancies: Vec<Discrepancy>,
    /// Payload entries present in the archive but not listed in the ledger.
    /// Informational only.
    pub unlisted_payload: Vec<String>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

impl<R: Read + Seek> ContainerReader<R> {
    /// Check every ledger entry against the archive.
    ///
    /// Never stops at the first problem. Errors are reserved for failures
    /// that are not integrity findings.
    pub fn verify(&mut self) -> ContainerResult<VerifyReport> {
        let parsed = parse_ledger(&self.ledger_text);
        let mut report = VerifyReport {
            entries_checked: parsed.entries.len(),
            skipped_lines: parsed.skipped_lines,
            ..VerifyReport::default()
        };

        for entry in &parsed.entries {
            let discrepancy = match self.archive.by_name(&entry.path) {
                Err(ZipError::FileNotFound) => Some(Discrepancy::MissingPayloadFile {
                    path: entry.path.clone(),
                }),
                Err(e) => Some(Discrepancy::UnreadablePayloadFile {
                    path: entry.path.clone(),
                    reason: e.to_string(),
                }),
                Ok(file) => match hash_reader(file) {
                    Ok(actual) if entry.matches(&actual) => None,
                    Ok(actual) => Some(Discrepancy::HashMismatch {
                        path: entry.path.clone(),
                        expected: entry.digest.clone(),
                        actual,
                    }),
                    Err(e) => Some(Discrepancy::UnreadablePayloadFile {
                        path: entry.path.clone(),
                        reason: e.to_string(),
                    }),
                },
            };
            match discrepancy {
                Some(d) => {
                    tracing::debug!(path = %entry.path, "integrity check failed");
                    report.discrepancies.push(d);
                }
                None => tracing::debug!(path = %entry.path, "integrity check passed"),
            }
        }

        let listed: HashSet<&str> = parsed.entries.iter().map(|e| e.path.as_str()).collect();
        report.unlisted_payload = self
            .archive
            .file_names()
            .filter(|name| is_payload_path(name) && !name.ends_with('/'))
            .filter(|name| !listed.contains(name))
            .map(str::to_string)
            .collect();
        report.unlisted_payload.sort();

        tracing::info!(
            checked = report.entries_checked,
            discrepancies = report.discrepancies.len(),
            skipped_lines = report.skipped_lines.len(),
            "verification complete"
        );
        Ok(report)
    }
}
