//! Archive writer: validated inputs in, one `.aifm` container out.
//!
//! Entry order is fixed: primary audio, stems (sorted), manifest, optional
//! text assets, checksum ledger, README. Together with the fixed entry
//! metadata this makes the archive byte-for-byte reproducible when
//! `created_at` is pinned.

use super::plan::WritePlan;
use super::readme::render_readme;
use super::zip_write::{write_entry_bytes, write_entry_file};
use crate::checksum::{ledger_for_files, render_ledger, LedgerEntry};
use crate::error::{ContainerError, ContainerResult};
use crate::manifest::{build_manifest, Manifest};
use crate::options::ConvertOptions;
use crate::paths::layout;
use chrono::Utc;
use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::PathBuf;
use zip::ZipWriter;

/// What a conversion produced.
#[derive(Debug, Clone)]
pub struct ConvertReport {
    /// Final output path, after extension fixing.
    pub out_path: PathBuf,
    pub audio_path: String,
    pub stem_paths: Vec<String>,
    /// Archive paths of the optional text assets that were written.
    pub text_assets: Vec<&'static str>,
    pub ledger: Vec<LedgerEntry>,
    pub manifest: Manifest,
}

impl ConvertReport {
    pub fn wrote_text_asset(&self, archive_path: &str) -> bool {
        self.text_assets.contains(&archive_path)
    }
}

/// Writes containers for one set of options.
pub struct ContainerWriter<'a> {
    opts: &'a ConvertOptions,
    plan: WritePlan<'a>,
}

impl<'a> ContainerWriter<'a> {
    /// Validate all inputs. No file is created when this fails.
    pub fn new(opts: &'a ConvertOptions) -> ContainerResult<Self> {
        let plan = WritePlan::resolve(opts)?;
        Ok(Self { opts, plan })
    }

    /// Write the container to the resolved output path, creating parent
    /// directories as needed. A failed write removes the partial file.
    pub fn write_file(&self) -> ContainerResult<ConvertReport> {
        let out_path = self.opts.resolved_out_path();
        if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ContainerError::io(parent.display(), e))?;
        }

        let file = File::create(&out_path).map_err(|e| ContainerError::io(out_path.display(), e))?;
        let result = self
            .write_to(BufWriter::new(file))
            .and_then(|(mut sink, report)| {
                sink.flush()
                    .map_err(|e| ContainerError::io(out_path.display(), e))?;
                Ok(report)
            });

        match result {
            Ok(report) => {
                tracing::info!(
                    out = %report.out_path.display(),
                    payload_files = report.ledger.len(),
                    "container written"
                );
                Ok(report)
            }
            Err(err) => {
                if let Err(e) = fs::remove_file(&out_path) {
                    tracing::warn!(out = %out_path.display(), error = %e, "failed to remove partial container");
                }
                Err(err)
            }
        }
    }

    /// Write the container into any seekable sink and hand the sink back.
    ///
    /// `report.out_path` is the resolved output path from the options even
    /// though nothing is written there.
    pub fn write_to<W: Write + Seek>(&self, sink: W) -> ContainerResult<(W, ConvertReport)> {
        let created_at = self.opts.created_at.unwrap_or_else(Utc::now);
        let manifest = build_manifest(self.opts, created_at);
        let ledger = ledger_for_files(
            self.plan
                .payload()
                .map(|p| (p.archive_path.as_str(), p.source.as_path())),
        )?;

        let mut zip = ZipWriter::new(sink);

        for payload in self.plan.payload() {
            write_entry_file(&mut zip, &payload.archive_path, &payload.source)?;
        }

        let manifest_json = manifest
            .to_pretty_json()
            .map_err(|e| ContainerError::io(layout::MANIFEST, e.into()))?;
        write_entry_bytes(&mut zip, layout::MANIFEST, &manifest_json)?;

        for asset in &self.plan.text_assets {
            write_entry_file(&mut zip, asset.archive_path, asset.source)?;
        }

        write_entry_bytes(&mut zip, layout::CHECKSUMS, render_ledger(&ledger).as_bytes())?;
        write_entry_bytes(&mut zip, layout::README, render_readme(&manifest).as_bytes())?;

        let sink = zip
            .finish()
            .map_err(|e| ContainerError::archive("finalize", e))?;

        let report = ConvertReport {
            out_path: self.opts.resolved_out_path(),
            audio_path: self.plan.audio.archive_path.clone(),
            stem_paths: self
                .plan
                .stems
                .iter()
                .map(|s| s.archive_path.clone())
                .collect(),
            text_assets: self
                .plan
                .text_assets
                .iter()
                .map(|a| a.archive_path)
                .collect(),
            ledger,
            manifest,
        };
        Ok((sink, report))
    }
}

/// Validate inputs and write the container in one step.
pub fn convert(opts: &ConvertOptions) -> ContainerResult<ConvertReport> {
    ContainerWriter::new(opts)?.write_file()
}
