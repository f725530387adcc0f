//! Container reader.
//!
//! Opening checks structural validity only: a readable ZIP with the three
//! mandatory entries and a manifest that is valid JSON. Whether the manifest
//! also fits the typed schema is reported by `manifest()` and never blocks
//! integrity verification. Integrity is a separate, explicit step (see
//! `verify`).

use super::limits::{read_bounded, Bounded, ReadLimits};
use crate::error::{ContainerError, ContainerResult, InputKind};
use crate::manifest::Manifest;
use crate::paths::layout;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// An opened `.aifm` container.
///
/// # Example
///
/// ```no_run
/// use aifx_container::ContainerReader;
///
/// let mut reader = ContainerReader::open_path("song.aifm").unwrap();
/// println!("Title: {}", reader.manifest().unwrap().title);
///
/// let report = reader.verify().unwrap();
/// for d in &report.discrepancies {
///     println!("  {d}");
/// }
/// ```
pub struct ContainerReader<R> {
    pub(super) archive: ZipArchive<R>,
    pub(super) limits: ReadLimits,
    manifest: Result<Manifest, String>,
    raw_manifest: Value,
    pub(super) ledger_text: String,
}

impl ContainerReader<BufReader<File>> {
    /// Open a container file from disk with default limits.
    pub fn open_path(path: impl AsRef<Path>) -> ContainerResult<Self> {
        Self::open_path_with_limits(path, ReadLimits::default())
    }

    pub fn open_path_with_limits(path: impl AsRef<Path>, limits: ReadLimits) -> ContainerResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ContainerError::MissingInput {
                    input: InputKind::Container,
                    path: path.to_path_buf(),
                }
            } else {
                ContainerError::io(path.display(), e)
            }
        })?;
        tracing::debug!(path = %path.display(), "opening container");
        Self::open_with_limits(BufReader::new(file), limits)
    }
}

impl<R: Read + Seek> ContainerReader<R> {
    pub fn open(reader: R) -> ContainerResult<Self> {
        Self::open_with_limits(reader, ReadLimits::default())
    }

    /// Open with custom read limits for metadata entries.
    pub fn open_with_limits(reader: R, limits: ReadLimits) -> ContainerResult<Self> {
        let mut archive = ZipArchive::new(reader).map_err(ContainerError::NotAContainer)?;

        for required in layout::REQUIRED_ENTRIES {
            if archive.index_for_name(required).is_none() {
                return Err(ContainerError::MissingEntry {
                    path: (*required).to_string(),
                });
            }
        }

        let manifest_bytes =
            read_entry(&mut archive, layout::MANIFEST, limits.max_manifest_bytes)?.ok_or_else(
                || ContainerError::MissingEntry {
                    path: layout::MANIFEST.to_string(),
                },
            )?;
        let raw_manifest: Value =
            serde_json::from_slice(&manifest_bytes).map_err(|source| {
                ContainerError::InvalidManifest {
                    path: layout::MANIFEST.to_string(),
                    source,
                }
            })?;
        let manifest = Manifest::deserialize(&raw_manifest).map_err(|e| {
            tracing::warn!(error = %e, "manifest does not match the AIFM schema");
            e.to_string()
        });

        let ledger_bytes = read_entry(&mut archive, layout::CHECKSUMS, limits.max_ledger_bytes)?
            .ok_or_else(|| ContainerError::MissingEntry {
                path: layout::CHECKSUMS.to_string(),
            })?;
        let ledger_text = String::from_utf8_lossy(&ledger_bytes).into_owned();

        Ok(Self {
            archive,
            limits,
            manifest,
            raw_manifest,
            ledger_text,
        })
    }

    /// The typed manifest, or `ManifestSchema` when the JSON does not fit it.
    pub fn manifest(&self) -> ContainerResult<&Manifest> {
        self.manifest
            .as_ref()
            .map_err(|reason| ContainerError::ManifestSchema {
                path: layout::MANIFEST.to_string(),
                reason: reason.clone(),
            })
    }

    /// The manifest exactly as parsed, including keys this version does not model.
    pub fn raw_manifest(&self) -> &Value {
        &self.raw_manifest
    }

    /// String URLs under `public_attestation.urls`; read from the raw manifest
    /// so they are available even when the typed schema does not fit.
    pub fn public_attestation_urls(&self) -> Vec<String> {
        self.raw_manifest
            .pointer("/public_attestation/urls")
            .and_then(Value::as_array)
            .map(|urls| {
                urls.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Persona text, or an empty string when the container has none.
    pub fn persona(&mut self) -> ContainerResult<String> {
        self.optional_text(layout::PERSONA)
    }

    /// Declaration text, or an empty string when the container has none.
    pub fn declaration(&mut self) -> ContainerResult<String> {
        self.optional_text(layout::DECLARATION)
    }

    /// Lossily decoded text of an optional entry; empty when absent.
    pub fn optional_text(&mut self, path: &str) -> ContainerResult<String> {
        let bytes = read_entry(&mut self.archive, path, self.limits.max_text_bytes)?;
        Ok(bytes
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default())
    }

    /// Entry names in archive order.
    pub fn entry_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    pub fn into_inner(self) -> R {
        self.archive.into_inner()
    }
}

/// Read a whole metadata entry under `limit`. `Ok(None)` when absent.
fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
    limit: u64,
) -> ContainerResult<Option<Vec<u8>>> {
    let entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(ContainerError::archive(name, e)),
    };
    match read_bounded(entry, limit).map_err(|e| ContainerError::io(name, e))? {
        Bounded::Complete(bytes) => Ok(Some(bytes)),
        Bounded::Exceeded => Err(ContainerError::LimitExceeded {
            path: name.to_string(),
            limit,
        }),
    }
}
