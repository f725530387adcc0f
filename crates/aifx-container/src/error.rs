//! Error types for container conversion and inspection.
//!
//! Integrity findings are not errors: they are reported as
//! [`Discrepancy`](crate::container::Discrepancy) values by `verify()`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for container operations.
pub type ContainerResult<T> = Result<T, ContainerError>;

/// Error classification, stable across variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A required or explicitly supplied input path is unusable (write path).
    Precondition,
    /// Not a ZIP archive, or a mandatory entry is missing (read path).
    Structure,
    /// Manifest JSON is malformed or does not match the schema.
    Parse,
    /// A metadata entry exceeded its read limit.
    Limits,
    /// Filesystem or archive I/O failure.
    Io,
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Which input path a precondition failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Audio,
    Stems,
    Prompt,
    NegativePrompt,
    Lyrics,
    Persona,
    Declaration,
    /// The `.aifm` file being opened.
    Container,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Audio => "Audio file",
            Self::Stems => "Stems directory",
            Self::Prompt => "Prompt file",
            Self::NegativePrompt => "Negative prompt file",
            Self::Lyrics => "Lyrics file",
            Self::Persona => "Persona file",
            Self::Declaration => "Declaration file",
            Self::Container => "Container file",
        };
        f.write_str(label)
    }
}

/// Errors raised while converting or opening a container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// A supplied input path does not exist.
    #[error("{input} not found: {}", path.display())]
    MissingInput { input: InputKind, path: PathBuf },

    /// A supplied input path exists but is the wrong kind (file vs directory).
    #[error("{input} is not a {expected}: {}", path.display())]
    InvalidInput {
        input: InputKind,
        path: PathBuf,
        expected: &'static str,
    },

    /// The file is not a readable ZIP archive.
    #[error("invalid ZIP container (not a valid .aifm): {0}")]
    NotAContainer(#[source] zip::result::ZipError),

    /// A mandatory entry is absent from the archive.
    #[error("missing required file: {path}")]
    MissingEntry { path: String },

    /// Manifest is not valid JSON.
    #[error("invalid manifest {path}: {source}")]
    InvalidManifest {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Manifest is valid JSON but does not fit the AIFM manifest schema.
    #[error("manifest {path} does not match the AIFM schema: {reason}")]
    ManifestSchema { path: String, reason: String },

    /// A metadata entry is larger than the configured read limit.
    #[error("entry {path} exceeds read limit of {limit} bytes")]
    LimitExceeded { path: String, limit: u64 },

    /// Archive-level failure while writing or reading entries.
    #[error("archive error at {context}: {source}")]
    Archive {
        context: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// I/O failure with the path or entry it happened on.
    #[error("I/O error at {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ContainerError {
    pub fn io(context: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::Io {
            context: context.to_string(),
            source,
        }
    }

    pub fn archive(context: impl std::fmt::Display, source: zip::result::ZipError) -> Self {
        Self::Archive {
            context: context.to_string(),
            source,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MissingInput { .. } | Self::InvalidInput { .. } => ErrorClass::Precondition,
            Self::NotAContainer(_) | Self::MissingEntry { .. } => ErrorClass::Structure,
            Self::InvalidManifest { .. } | Self::ManifestSchema { .. } => ErrorClass::Parse,
            Self::LimitExceeded { .. } => ErrorClass::Limits,
            Self::Archive { .. } | Self::Io { .. } => ErrorClass::Io,
        }
    }

    /// Returns true for errors caused by the supplied inputs rather than I/O.
    pub fn is_precondition(&self) -> bool {
        self.class() == ErrorClass::Precondition
    }

    /// Returns true when the archive is not a structurally valid container.
    pub fn is_structural(&self) -> bool {
        self.class() == ErrorClass::Structure
    }
}
