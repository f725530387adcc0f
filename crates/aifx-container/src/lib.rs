//! AIFX container (`.aifm`) writer, reader and integrity verifier.
//!
//! A container is a ZIP archive holding the primary audio, optional stems,
//! an authoritative JSON manifest, optional text assets, a SHA-256 ledger
//! over the payload and a generated README.

pub mod checksum;
pub mod container;
pub mod error;
pub mod manifest;
pub mod options;
pub mod paths;

// Convenience re-exports
pub use checksum::{LedgerEntry, ParsedLedger};
pub use container::{
    convert, ContainerReader, ContainerWriter, ConvertReport, Discrepancy, ReadLimits,
    ReadLimitsOverrides, VerifyReport,
};
pub use error::{ContainerError, ContainerResult, ErrorClass, InputKind};
pub use manifest::{build_manifest, CreationMode, Manifest, Tier};
pub use options::ConvertOptions;
