//! Read limits for metadata entries loaded into memory.
//!
//! Payload entries are streamed through the hasher and are never limited.

use serde::Deserialize;
use std::io::Read;

const MIB: u64 = 1024 * 1024;

/// Maximum bytes read into memory per metadata entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    pub max_manifest_bytes: u64,
    pub max_ledger_bytes: u64,
    /// Persona, declaration, lyrics and prompt text.
    pub max_text_bytes: u64,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_manifest_bytes: 10 * MIB,
            max_ledger_bytes: 10 * MIB,
            max_text_bytes: 10 * MIB,
        }
    }
}

/// Partial overrides for `ReadLimits`, as found in config files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadLimitsOverrides {
    pub max_manifest_bytes: Option<u64>,
    pub max_ledger_bytes: Option<u64>,
    pub max_text_bytes: Option<u64>,
}

impl ReadLimits {
    /// Apply overrides onto these limits. Only `Some` values override.
    pub fn apply(self, overrides: ReadLimitsOverrides) -> Self {
        Self {
            max_manifest_bytes: overrides
                .max_manifest_bytes
                .unwrap_or(self.max_manifest_bytes),
            max_ledger_bytes: overrides.max_ledger_bytes.unwrap_or(self.max_ledger_bytes),
            max_text_bytes: overrides.max_text_bytes.unwrap_or(self.max_text_bytes),
        }
    }
}

/// Outcome of a bounded read.
#[derive(Debug)]
pub(crate) enum Bounded {
    Complete(Vec<u8>),
    /// More than `limit` bytes were available.
    Exceeded,
}

/// Read at most `limit` bytes, reporting whether the source had more.
pub(crate) fn read_bounded<R: Read>(reader: R, limit: u64) -> std::io::Result<Bounded> {
    let mut buf = Vec::new();
    // One extra byte distinguishes "exactly at the limit" from "over it".
    reader.take(limit.saturating_add(1)).read_to_end(&mut buf)?;
    if buf.len() as u64 > limit {
        Ok(Bounded::Exceeded)
    } else {
        Ok(Bounded::Complete(buf))
    }
}
