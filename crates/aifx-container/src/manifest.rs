//! Provenance manifest (`metadata/manifest.json`) and its builder.
//!
//! Optional fields are `Option`s skipped on serialization, so a field only
//! appears when the asset backing it was supplied. Top-level keys are stable
//! identifiers for format version 1.0.

use crate::checksum::HASH_ALG;
use crate::options::ConvertOptions;
use crate::paths::layout;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Container/manifest format version.
pub const AIFX_FORMAT_VERSION: &str = "1.0";
/// AIFX specification version the container follows.
pub const AIFX_SPEC_VERSION: &str = "0.1";
pub const FORMAT_NAME: &str = "AIFM";
pub const DEFAULT_TITLE: &str = "Untitled";
pub const HUMAN_ROLE: &str = "AI Content Director";
pub const AI_SYSTEM_ROLE: &str = "generation";
pub const SIGNING_NONE: &str = "none";
pub const DECLARATION_TYPE: &str = "Creator-Declared";

/// Verification trust tier declared by the packager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tier {
    /// Self-declared attestation.
    #[default]
    #[serde(rename = "SDA")]
    Sda,
    #[serde(rename = "VC")]
    Vc,
    #[serde(rename = "PVA")]
    Pva,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Sda, Tier::Vc, Tier::Pva];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sda => "SDA",
            Self::Vc => "VC",
            Self::Pva => "PVA",
        }
    }

    /// `self-declared` for SDA, `declared` for every other tier.
    pub fn verification_method(self) -> &'static str {
        match self {
            Self::Sda => "self-declared",
            Self::Vc | Self::Pva => "declared",
        }
    }
}

/// How the work was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreationMode {
    #[default]
    HumanDirectedAi,
    AiAssistedHuman,
    AutonomousAi,
}

impl CreationMode {
    pub const ALL: [CreationMode; 3] = [
        CreationMode::HumanDirectedAi,
        CreationMode::AiAssistedHuman,
        CreationMode::AutonomousAi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HumanDirectedAi => "human-directed-ai",
            Self::AiAssistedHuman => "ai-assisted-human",
            Self::AutonomousAi => "autonomous-ai",
        }
    }
}

/// Unknown enumeration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: String,
}

impl FromStr for Tier {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "tier",
                value: s.to_string(),
                expected: Self::ALL.map(Self::as_str).join(", "),
            })
    }
}

impl FromStr for CreationMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "creation mode",
                value: s.to_string(),
                expected: Self::ALL.map(Self::as_str).join(", "),
            })
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for CreationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    pub aifx_format_version: String,
    pub aifx_spec_version: String,
    /// Always `AIFM`.
    pub format: String,
    /// UTC, second precision, `Z` suffix.
    pub created_at: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub creation_mode: CreationMode,
    pub human_authorship: HumanAuthorship,
    #[serde(default)]
    pub ai_systems: Vec<AiSystem>,
    pub toolchain: Toolchain,
    pub inputs: InputsDisclosure,
    pub verification: Verification,
    pub integrity: Integrity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration: Option<Declaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_refs: Option<PromptRefs>,

    /// True when a stems directory was supplied, even if it was empty.
    #[serde(default)]
    pub stems_included: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_attestation: Option<PublicAttestation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HumanAuthorship {
    pub name: String,
    pub role: String,
    pub ownership_claim: bool,
    pub contact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiSystem {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Toolchain {
    #[serde(default)]
    pub apps: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

/// Which generation inputs ship in the container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputsDisclosure {
    pub prompts_included: bool,
    /// Always false for format 1.0.
    pub seeds_included: bool,
    /// Always false for format 1.0.
    pub source_assets_included: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verification {
    pub tier: Tier,
    /// Derived from `tier`, never user supplied.
    pub method: String,
    pub signing: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Integrity {
    pub hash_alg: String,
    pub checksums_ref: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Declaration {
    #[serde(rename = "type")]
    pub kind: String,
    pub text_ref: String,
}

/// References to prompt files; each member is present only when supplied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptRefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicAttestation {
    pub urls: Vec<String>,
    /// Reserved; always empty for now.
    #[serde(default)]
    pub notes: String,
}

impl Manifest {
    /// Pretty JSON (2-space indent, UTF-8, non-ASCII kept verbatim).
    pub fn to_pretty_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }

    pub fn public_attestation_urls(&self) -> &[String] {
        self.public_attestation
            .as_ref()
            .map(|p| p.urls.as_slice())
            .unwrap_or_default()
    }
}

/// Format an instant as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_created_at(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Build the manifest for a conversion. Pure: no I/O, no clock access.
pub fn build_manifest(opts: &ConvertOptions, created_at: DateTime<Utc>) -> Manifest {
    let title = if opts.title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        opts.title.clone()
    };

    let prompt_refs = opts.prompts_included().then(|| PromptRefs {
        prompt: opts.prompt_path.as_ref().map(|_| layout::PROMPT.to_string()),
        negative_prompt: opts
            .negative_prompt_path
            .as_ref()
            .map(|_| layout::NEGATIVE_PROMPT.to_string()),
    });

    let public_attestation = (!opts.urls.is_empty()).then(|| PublicAttestation {
        urls: opts.urls.clone(),
        notes: String::new(),
    });

    Manifest {
        aifx_format_version: AIFX_FORMAT_VERSION.to_string(),
        aifx_spec_version: AIFX_SPEC_VERSION.to_string(),
        format: FORMAT_NAME.to_string(),
        created_at: format_created_at(created_at),
        title,
        description: opts.description.clone(),
        creation_mode: opts.creation_mode,
        human_authorship: HumanAuthorship {
            name: opts.author.clone(),
            role: HUMAN_ROLE.to_string(),
            ownership_claim: opts.ownership_claim,
            contact: opts.contact.clone(),
        },
        ai_systems: opts
            .ai_systems
            .iter()
            .map(|name| AiSystem {
                name: name.clone(),
                role: AI_SYSTEM_ROLE.to_string(),
            })
            .collect(),
        toolchain: Toolchain {
            apps: opts.apps.clone(),
            notes: opts.toolchain_notes.clone(),
        },
        inputs: InputsDisclosure {
            prompts_included: opts.prompts_included(),
            seeds_included: false,
            source_assets_included: false,
        },
        verification: Verification {
            tier: opts.tier,
            method: opts.tier.verification_method().to_string(),
            signing: SIGNING_NONE.to_string(),
        },
        integrity: Integrity {
            hash_alg: HASH_ALG.to_string(),
            checksums_ref: layout::CHECKSUMS.to_string(),
        },
        persona_ref: opts
            .persona_path
            .as_ref()
            .map(|_| layout::PERSONA.to_string()),
        declaration: opts.declaration_path.as_ref().map(|_| Declaration {
            kind: DECLARATION_TYPE.to_string(),
            text_ref: layout::DECLARATION.to_string(),
        }),
        lyrics_ref: opts
            .lyrics_path
            .as_ref()
            .map(|_| layout::LYRICS.to_string()),
        prompt_refs,
        stems_included: opts.stems_dir.is_some(),
        public_attestation,
    }
}
