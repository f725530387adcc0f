//! Container command arguments.

use aifx_container::{CreationMode, Tier};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Primary audio file (wav, flac, mp3, ...)
    #[arg(value_name = "AUDIO")]
    pub audio: PathBuf,

    /// Output container path (".aifm" is appended when missing)
    #[arg(long, short = 'o')]
    pub out: PathBuf,

    #[arg(long)]
    pub title: Option<String>,

    /// Free-form description
    #[arg(long = "desc")]
    pub description: Option<String>,

    /// Creation mode: human-directed-ai, ai-assisted-human or autonomous-ai
    #[arg(long)]
    pub mode: Option<CreationMode>,

    /// Verification tier: SDA, VC or PVA
    #[arg(long)]
    pub tier: Option<Tier>,

    /// Human author name
    #[arg(long, env = "AIFX_AUTHOR")]
    pub author: Option<String>,

    /// Author contact (email or URL)
    #[arg(long, env = "AIFX_CONTACT")]
    pub contact: Option<String>,

    /// Do not assert ownership of the work
    #[arg(long)]
    pub no_ownership_claim: bool,

    /// AI system used for generation (repeatable)
    #[arg(long = "ai-system", value_name = "NAME")]
    pub ai_systems: Vec<String>,

    /// Application in the toolchain (repeatable)
    #[arg(long = "app", value_name = "NAME")]
    pub apps: Vec<String>,

    #[arg(long)]
    pub toolchain_notes: Option<String>,

    /// Prompt text file
    #[arg(long)]
    pub prompt: Option<PathBuf>,

    /// Negative prompt text file
    #[arg(long)]
    pub negative_prompt: Option<PathBuf>,

    /// Lyrics text file
    #[arg(long)]
    pub lyrics: Option<PathBuf>,

    /// Directory of stems, packaged recursively
    #[arg(long)]
    pub stems: Option<PathBuf>,

    /// Persona text file
    #[arg(long)]
    pub persona: Option<PathBuf>,

    /// Creator declaration text file
    #[arg(long)]
    pub declaration: Option<PathBuf>,

    /// Public attestation URL (repeatable)
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Fixed creation time (RFC 3339) for reproducible output
    #[arg(long, value_name = "RFC3339")]
    pub created_at: Option<String>,

    /// YAML defaults file
    #[arg(long, env = "AIFX_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Container path
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print only the manifest JSON
    #[arg(long)]
    pub json: bool,

    /// YAML defaults file (read limits)
    #[arg(long, env = "AIFX_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Container path
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// YAML defaults file (read limits)
    #[arg(long, env = "AIFX_CONFIG")]
    pub config: Option<PathBuf>,
}
