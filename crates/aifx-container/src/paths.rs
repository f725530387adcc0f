//! Archive-internal path normalization and the canonical AIFM layout.
//!
//! All paths inside a container use POSIX forward slashes, are relative to the
//! archive root and never contain `.` or `..` segments.

use std::path::{Component, Path};

/// Canonical paths inside the container (POSIX, relative to root).
pub mod layout {
    /// Root for every file covered by the checksum ledger.
    pub const PAYLOAD_ROOT: &str = "payload";
    /// Directory of the primary audio asset.
    pub const AUDIO_DIR: &str = "payload/audio";
    /// Directory of the optional stems.
    pub const STEMS_DIR: &str = "payload/stems";
    /// Stem of the primary audio file name (`main.<ext>`).
    pub const AUDIO_STEM: &str = "main";
    /// Extension used when the source audio has none.
    pub const DEFAULT_AUDIO_EXT: &str = "wav";

    pub const MANIFEST: &str = "metadata/manifest.json";
    pub const PROMPT: &str = "metadata/prompt/prompt.txt";
    pub const NEGATIVE_PROMPT: &str = "metadata/prompt/negative_prompt.txt";
    pub const LYRICS: &str = "metadata/lyrics.txt";
    pub const PERSONA: &str = "metadata/persona.txt";
    pub const DECLARATION: &str = "metadata/declaration.txt";

    /// Checksum ledger (payload only).
    pub const CHECKSUMS: &str = "verification/checksums.sha256";
    /// Generated, non-authoritative summary.
    pub const README: &str = "README.txt";

    /// Entries every valid container must carry.
    pub const REQUIRED_ENTRIES: &[&str] = &[MANIFEST, CHECKSUMS, README];
}

/// Join and lexically normalize path segments into an archive-internal path.
///
/// Segments may themselves contain `/` or the platform separator. Empty and
/// `.` segments are dropped, `..` pops the previous segment and is discarded
/// at the root, so the result never escapes the archive root.
///
/// # Panics
///
/// Panics if the segments normalize to the archive root itself. Callers only
/// ever pass fixed layout prefixes plus a file name, so this is a programming
/// error rather than an input error.
pub fn normalize_archive_path<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parts: Vec<String> = Vec::new();
    for segment in segments {
        for piece in segment
            .as_ref()
            .split(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        {
            match piece {
                "" | "." => {}
                ".." => {
                    parts.pop();
                }
                other => parts.push(other.to_string()),
            }
        }
    }
    assert!(
        !parts.is_empty(),
        "archive path normalized to the container root"
    );
    parts.join("/")
}

/// Convert a relative filesystem path into archive segments.
///
/// Uses the platform's own component parsing, so native separators are
/// handled without string rewriting. Root and prefix components are dropped.
pub fn relative_segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect()
}

/// Archive path of the primary audio asset for a given source file.
///
/// `payload/audio/main.<ext>` with the lowercased source extension, or
/// `wav` when the source has none.
pub fn audio_archive_path(source: &Path) -> String {
    let ext = source
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| layout::DEFAULT_AUDIO_EXT.to_string());
    normalize_archive_path([
        layout::AUDIO_DIR,
        &format!("{}.{}", layout::AUDIO_STEM, ext),
    ])
}

/// Archive path of a stem, given its path relative to the stems directory.
pub fn stem_archive_path(relative: &Path) -> String {
    let mut segments = vec![layout::STEMS_DIR.to_string()];
    segments.extend(relative_segments(relative));
    normalize_archive_path(segments)
}

/// True when `path` lives under the payload root.
pub fn is_payload_path(path: &str) -> bool {
    path.strip_prefix(layout::PAYLOAD_ROOT)
        .is_some_and(|rest| rest.starts_with('/'))
}
