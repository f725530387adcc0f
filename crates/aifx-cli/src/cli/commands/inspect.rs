use crate::cli::args::InspectArgs;
use crate::config::load_config;
use crate::exit_codes;
use aifx_container::paths::layout;
use aifx_container::ContainerReader;
use anyhow::{Context, Result};

pub fn run(args: InspectArgs) -> Result<i32> {
    let limits = load_config(args.config.as_deref())?.read_limits();

    let mut reader = match ContainerReader::open_path_with_limits(&args.file, limits) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("❌ {e}");
            return Ok(exit_codes::for_error(&e));
        }
    };

    let manifest_json = serde_json::to_string_pretty(reader.raw_manifest())
        .context("failed to render manifest")?;

    if args.json {
        println!("{manifest_json}");
        return Ok(exit_codes::SUCCESS);
    }

    println!("✅ Manifest (authoritative):");
    println!("{manifest_json}");

    let urls = reader.public_attestation_urls();
    if !urls.is_empty() {
        println!("\n🔗 Public Attestation URLs (manifest):");
        for url in urls {
            println!("- {url}");
        }
    }

    for (label, path) in [
        ("🎭 Persona", layout::PERSONA),
        ("📜 Declaration", layout::DECLARATION),
    ] {
        let text = match reader.optional_text(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(exit_codes::for_error(&e));
            }
        };
        if !text.is_empty() {
            println!("\n{label} ({path}, non-authoritative):");
            println!("{}", text.trim());
        }
    }

    println!("\n🔎 Verifying payload integrity (SHA-256)...");
    super::verify::report_integrity(&mut reader, false)
}
