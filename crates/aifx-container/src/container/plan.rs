//! Input validation and payload layout, resolved before any byte is written.

use crate::error::{ContainerError, ContainerResult, InputKind};
use crate::options::{ConvertOptions, TextAsset};
use crate::paths::{audio_archive_path, stem_archive_path};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A payload file: where it comes from and where it lands in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFile {
    pub archive_path: String,
    pub source: PathBuf,
}

/// Everything the writer needs, validated.
#[derive(Debug, Clone)]
pub struct WritePlan<'a> {
    pub audio: PayloadFile,
    /// Sorted by archive path.
    pub stems: Vec<PayloadFile>,
    pub text_assets: Vec<TextAsset<'a>>,
}

impl<'a> WritePlan<'a> {
    /// Validate every supplied input and resolve archive paths.
    ///
    /// Fails on the first unusable input; nothing is created on disk.
    pub fn resolve(opts: &'a ConvertOptions) -> ContainerResult<Self> {
        require_file(InputKind::Audio, &opts.audio_path)?;
        let audio = PayloadFile {
            archive_path: audio_archive_path(&opts.audio_path),
            source: opts.audio_path.clone(),
        };

        let stems = match &opts.stems_dir {
            Some(dir) => {
                require_dir(InputKind::Stems, dir)?;
                collect_stems(dir)?
            }
            None => Vec::new(),
        };

        let text_assets = opts.text_assets();
        for asset in &text_assets {
            require_file(asset.input, asset.source)?;
        }

        Ok(Self {
            audio,
            stems,
            text_assets,
        })
    }

    /// Audio first, then stems in sorted order.
    pub fn payload(&self) -> impl Iterator<Item = &PayloadFile> {
        std::iter::once(&self.audio).chain(self.stems.iter())
    }
}

fn require_file(input: InputKind, path: &Path) -> ContainerResult<()> {
    if !path.exists() {
        return Err(ContainerError::MissingInput {
            input,
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(ContainerError::InvalidInput {
            input,
            path: path.to_path_buf(),
            expected: "file",
        });
    }
    Ok(())
}

fn require_dir(input: InputKind, path: &Path) -> ContainerResult<()> {
    if !path.exists() {
        return Err(ContainerError::MissingInput {
            input,
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ContainerError::InvalidInput {
            input,
            path: path.to_path_buf(),
            expected: "directory",
        });
    }
    Ok(())
}

/// Every regular file under `dir`, recursively, keyed by its relative path.
fn collect_stems(dir: &Path) -> ContainerResult<Vec<PayloadFile>> {
    let mut stems = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| {
            let context = e
                .path()
                .map_or_else(|| dir.display().to_string(), |p| p.display().to_string());
            ContainerError::io(context, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| ContainerError::io(entry.path().display(), std::io::Error::other(e)))?;
        stems.push(PayloadFile {
            archive_path: stem_archive_path(relative),
            source: entry.path().to_path_buf(),
        });
    }
    stems.sort_by(|a, b| a.archive_path.as_bytes().cmp(b.archive_path.as_bytes()));
    tracing::debug!(dir = %dir.display(), count = stems.len(), "collected stems");
    Ok(stems)
}
