//! Deterministic ZIP entry writing.
//!
//! Every entry gets the same timestamp, permissions and compression method,
//! so identical inputs yield byte-identical archives.

use crate::error::{ContainerError, ContainerResult};
use std::fs::File;
use std::io::{self, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Entries above this size need ZIP64 headers.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// Options for one entry. The timestamp is the DOS epoch (1980-01-01 00:00:00).
pub(crate) fn entry_options(size: u64) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644)
        .large_file(size > ZIP64_THRESHOLD)
}

pub(crate) fn write_entry_bytes<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    data: &[u8],
) -> ContainerResult<()> {
    zip.start_file(name, entry_options(data.len() as u64))
        .map_err(|e| ContainerError::archive(name, e))?;
    zip.write_all(data).map_err(|e| ContainerError::io(name, e))?;
    tracing::debug!(entry = name, bytes = data.len(), "wrote entry");
    Ok(())
}

/// Stream a file from disk into a new entry.
pub(crate) fn write_entry_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    source: &Path,
) -> ContainerResult<u64> {
    let mut file = File::open(source).map_err(|e| ContainerError::io(source.display(), e))?;
    let size = file
        .metadata()
        .map_err(|e| ContainerError::io(source.display(), e))?
        .len();

    zip.start_file(name, entry_options(size))
        .map_err(|e| ContainerError::archive(name, e))?;
    let copied = io::copy(&mut file, zip).map_err(|e| ContainerError::io(name, e))?;
    tracing::debug!(entry = name, source = %source.display(), bytes = copied, "wrote entry");
    Ok(copied)
}
