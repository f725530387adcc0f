use crate::cli::args::ConvertArgs;
use crate::config::{load_config, AifxConfig};
use crate::exit_codes;
use aifx_container::paths::layout;
use aifx_container::{convert, ConvertOptions, ConvertReport};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

pub fn run(args: ConvertArgs) -> Result<i32> {
    let config = load_config(args.config.as_deref())?;
    let opts = build_options(args, &config)?;

    match convert(&opts) {
        Ok(report) => {
            print_summary(&report);
            Ok(exit_codes::SUCCESS)
        }
        Err(e) => {
            eprintln!("❌ {e}");
            Ok(exit_codes::for_error(&e))
        }
    }
}

/// Merge flags over config defaults. Flags win; repeatable flags replace the
/// config list rather than extending it.
pub fn build_options(args: ConvertArgs, config: &AifxConfig) -> Result<ConvertOptions> {
    let defaults = &config.defaults;

    let mut opts = ConvertOptions::new(args.audio, args.out)
        .with_title(args.title.unwrap_or_default())
        .with_description(args.description.unwrap_or_default())
        .with_creation_mode(args.mode.or(defaults.creation_mode).unwrap_or_default())
        .with_tier(args.tier.or(defaults.tier).unwrap_or_default())
        .with_author(
            args.author
                .or_else(|| defaults.author.clone())
                .unwrap_or_default(),
            args.contact
                .or_else(|| defaults.contact.clone())
                .unwrap_or_default(),
        )
        .with_ownership_claim(!args.no_ownership_claim)
        .with_toolchain_notes(
            args.toolchain_notes
                .or_else(|| defaults.toolchain_notes.clone())
                .unwrap_or_default(),
        );

    opts.ai_systems = if args.ai_systems.is_empty() {
        defaults.ai_systems.clone()
    } else {
        args.ai_systems
    };
    opts.apps = if args.apps.is_empty() {
        defaults.apps.clone()
    } else {
        args.apps
    };
    opts.urls = args.urls;

    opts.prompt_path = args.prompt;
    opts.negative_prompt_path = args.negative_prompt;
    opts.lyrics_path = args.lyrics;
    opts.stems_dir = args.stems;
    opts.persona_path = args.persona;
    opts.declaration_path = args.declaration;

    if let Some(raw) = args.created_at {
        let at = DateTime::parse_from_rfc3339(&raw)
            .with_context(|| format!("invalid --created-at '{raw}' (expected RFC 3339)"))?;
        opts.created_at = Some(at.with_timezone(&Utc));
    }

    Ok(opts)
}

fn print_summary(report: &ConvertReport) {
    let manifest = &report.manifest;
    eprintln!("✅ Created: {}", report.out_path.display());
    eprintln!("   - Primary audio: {}", report.audio_path);
    if manifest.stems_included {
        eprintln!("   - Stems: {} file(s)", report.stem_paths.len());
    }
    if manifest.persona_ref.is_some() {
        eprintln!("   - Persona: {}", layout::PERSONA);
    }
    if manifest.declaration.is_some() {
        eprintln!("   - Declaration: {}", layout::DECLARATION);
    }
    if manifest.lyrics_ref.is_some() {
        eprintln!("   - Lyrics: {}", layout::LYRICS);
    }
    if manifest.inputs.prompts_included {
        eprintln!("   - Prompt(s): metadata/prompt/");
    }
    let urls = manifest.public_attestation_urls();
    if !urls.is_empty() {
        eprintln!("   - URL(s): {}", urls.len());
    }
    eprintln!("   - Manifest: {}", layout::MANIFEST);
    eprintln!("   - Checksums: {}", layout::CHECKSUMS);
}
