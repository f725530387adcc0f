//! Packaging options: everything the write path needs to build a container.

use crate::error::InputKind;
use crate::manifest::{CreationMode, Tier};
use crate::paths::layout;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Container file extension (without dot).
pub const CONTAINER_EXTENSION: &str = "aifm";

/// Inputs to a single conversion.
///
/// Optional source paths are `Some` only when the caller supplied them; a
/// supplied path must exist or the conversion fails before writing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub audio_path: PathBuf,
    pub out_path: PathBuf,
    pub title: String,
    pub description: String,
    pub creation_mode: CreationMode,
    pub tier: Tier,
    pub author: String,
    pub contact: String,
    pub ownership_claim: bool,
    pub ai_systems: Vec<String>,
    pub apps: Vec<String>,
    pub toolchain_notes: String,
    pub prompt_path: Option<PathBuf>,
    pub negative_prompt_path: Option<PathBuf>,
    pub lyrics_path: Option<PathBuf>,
    pub stems_dir: Option<PathBuf>,
    pub persona_path: Option<PathBuf>,
    pub declaration_path: Option<PathBuf>,
    pub urls: Vec<String>,
    /// Fixed creation instant; `None` means "now" at conversion time.
    pub created_at: Option<DateTime<Utc>>,
}

/// An optional text asset copied verbatim into `metadata/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAsset<'a> {
    pub input: InputKind,
    pub archive_path: &'static str,
    pub source: &'a Path,
}

impl ConvertOptions {
    pub fn new(audio_path: impl Into<PathBuf>, out_path: impl Into<PathBuf>) -> Self {
        Self {
            audio_path: audio_path.into(),
            out_path: out_path.into(),
            title: String::new(),
            description: String::new(),
            creation_mode: CreationMode::default(),
            tier: Tier::default(),
            author: String::new(),
            contact: String::new(),
            ownership_claim: true,
            ai_systems: Vec::new(),
            apps: Vec::new(),
            toolchain_notes: String::new(),
            prompt_path: None,
            negative_prompt_path: None,
            lyrics_path: None,
            stems_dir: None,
            persona_path: None,
            declaration_path: None,
            urls: Vec::new(),
            created_at: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_creation_mode(mut self, mode: CreationMode) -> Self {
        self.creation_mode = mode;
        self
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>, contact: impl Into<String>) -> Self {
        self.author = author.into();
        self.contact = contact.into();
        self
    }

    pub fn with_ownership_claim(mut self, claim: bool) -> Self {
        self.ownership_claim = claim;
        self
    }

    pub fn with_ai_system(mut self, name: impl Into<String>) -> Self {
        self.ai_systems.push(name.into());
        self
    }

    pub fn with_app(mut self, name: impl Into<String>) -> Self {
        self.apps.push(name.into());
        self
    }

    pub fn with_toolchain_notes(mut self, notes: impl Into<String>) -> Self {
        self.toolchain_notes = notes.into();
        self
    }

    pub fn with_prompt(mut self, path: impl Into<PathBuf>) -> Self {
        self.prompt_path = Some(path.into());
        self
    }

    pub fn with_negative_prompt(mut self, path: impl Into<PathBuf>) -> Self {
        self.negative_prompt_path = Some(path.into());
        self
    }

    pub fn with_lyrics(mut self, path: impl Into<PathBuf>) -> Self {
        self.lyrics_path = Some(path.into());
        self
    }

    pub fn with_stems_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.stems_dir = Some(path.into());
        self
    }

    pub fn with_persona(mut self, path: impl Into<PathBuf>) -> Self {
        self.persona_path = Some(path.into());
        self
    }

    pub fn with_declaration(mut self, path: impl Into<PathBuf>) -> Self {
        self.declaration_path = Some(path.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.urls.push(url.into());
        self
    }

    /// Pin the creation timestamp (reproducible output).
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn prompts_included(&self) -> bool {
        self.prompt_path.is_some() || self.negative_prompt_path.is_some()
    }

    /// Supplied text assets in archive write order.
    pub fn text_assets(&self) -> Vec<TextAsset<'_>> {
        [
            (InputKind::Prompt, layout::PROMPT, &self.prompt_path),
            (
                InputKind::NegativePrompt,
                layout::NEGATIVE_PROMPT,
                &self.negative_prompt_path,
            ),
            (InputKind::Lyrics, layout::LYRICS, &self.lyrics_path),
            (InputKind::Persona, layout::PERSONA, &self.persona_path),
            (
                InputKind::Declaration,
                layout::DECLARATION,
                &self.declaration_path,
            ),
        ]
        .into_iter()
        .filter_map(|(input, archive_path, source)| {
            source.as_deref().map(|source| TextAsset {
                input,
                archive_path,
                source,
            })
        })
        .collect()
    }

    /// Output path with the container extension appended when missing.
    pub fn resolved_out_path(&self) -> PathBuf {
        with_container_extension(&self.out_path)
    }
}

/// Append `.aifm` unless the path already ends with it (case-insensitive).
pub fn with_container_extension(path: &Path) -> PathBuf {
    let has_ext = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CONTAINER_EXTENSION));
    if has_ext {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(CONTAINER_EXTENSION);
    PathBuf::from(name)
}
