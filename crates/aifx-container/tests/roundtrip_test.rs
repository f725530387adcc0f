//! Write-then-read tests for complete containers.

mod common;

use aifx_container::checksum::{hash_bytes, parse_ledger};
use aifx_container::paths::layout;
use aifx_container::{convert, ContainerReader, ConvertOptions, CreationMode, Tier};
use common::*;

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_single_audio_file_container() {
    let dir = tempfile::tempdir().unwrap();
    let audio_data = audio_bytes(4096, 7);
    let audio = write_file(dir.path(), "song.wav", &audio_data);

    let opts = ConvertOptions::new(&audio, dir.path().join("out/song"))
        .with_title("Test")
        .with_tier(Tier::Sda)
        .with_created_at(fixed_time());
    let report = convert(&opts).unwrap();

    assert_eq!(report.out_path, dir.path().join("out/song.aifm"));
    let bytes = std::fs::read(&report.out_path).unwrap();

    assert_eq!(
        read_entry(&bytes, "payload/audio/main.wav").unwrap(),
        audio_data
    );

    let manifest = manifest_json(&bytes);
    assert_eq!(manifest["stems_included"], false);
    assert_eq!(manifest["verification"]["tier"], "SDA");
    assert_eq!(manifest["verification"]["method"], "self-declared");
    assert_eq!(manifest["title"], "Test");
    assert_eq!(manifest["created_at"], "2023-11-14T22:13:20Z");

    let ledger = String::from_utf8(read_entry(&bytes, layout::CHECKSUMS).unwrap()).unwrap();
    assert_eq!(
        ledger,
        format!("{}  payload/audio/main.wav\n", hash_bytes(&audio_data))
    );
}

#[test]
fn test_stems_are_listed_sorted_with_primary_audio() {
    let dir = tempfile::tempdir().unwrap();
    let audio = write_file(dir.path(), "mix.wav", &audio_bytes(512, 1));
    write_file(dir.path(), "stems/vocals.wav", &audio_bytes(256, 2));
    write_file(dir.path(), "stems/drums.wav", &audio_bytes(256, 3));

    let opts = ConvertOptions::new(&audio, dir.path().join("mix.aifm"))
        .with_stems_dir(dir.path().join("stems"))
        .with_created_at(fixed_time());
    let report = convert(&opts).unwrap();
    let bytes = std::fs::read(&report.out_path).unwrap();

    let ledger = String::from_utf8(read_entry(&bytes, layout::CHECKSUMS).unwrap()).unwrap();
    let paths: Vec<String> = parse_ledger(&ledger)
        .entries
        .into_iter()
        .map(|e| e.path)
        .collect();
    assert_eq!(
        paths,
        [
            "payload/audio/main.wav",
            "payload/stems/drums.wav",
            "payload/stems/vocals.wav",
        ]
    );
    assert_eq!(manifest_json(&bytes)["stems_included"], true);
    assert_eq!(
        report.stem_paths,
        ["payload/stems/drums.wav", "payload/stems/vocals.wav"]
    );
}

#[test]
fn test_empty_stems_dir_still_sets_stems_included() {
    let dir = tempfile::tempdir().unwrap();
    let audio = write_file(dir.path(), "a.wav", b"RIFF");
    std::fs::create_dir_all(dir.path().join("stems")).unwrap();

    let opts = ConvertOptions::new(&audio, dir.path().join("a"))
        .with_stems_dir(dir.path().join("stems"));
    let report = convert(&opts).unwrap();

    assert!(report.manifest.stems_included);
    assert!(report.stem_paths.is_empty());
    assert_eq!(report.ledger.len(), 1);
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_full_container_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let audio = write_file(dir.path(), "Track.FLAC", &audio_bytes(70_000, 9));
    write_file(dir.path(), "stems/bass.flac", &audio_bytes(1000, 4));
    write_file(dir.path(), "stems/keys/pad.flac", &audio_bytes(1000, 5));
    let prompt = write_file(dir.path(), "p.txt", b"dreamy synthwave");
    let negative = write_file(dir.path(), "n.txt", b"no vocals");
    let lyrics = write_file(dir.path(), "l.txt", "la la la\n".as_bytes());
    let persona = write_file(dir.path(), "persona.md", "Neon Fox, synth persona ♪".as_bytes());
    let declaration = write_file(dir.path(), "decl.txt", b"I directed this work.");

    let opts = ConvertOptions::new(&audio, dir.path().join("release/track"))
        .with_title("Track")
        .with_description("A test track")
        .with_creation_mode(CreationMode::AiAssistedHuman)
        .with_tier(Tier::Pva)
        .with_author("Ada", "ada@example.com")
        .with_ai_system("Suno")
        .with_app("Ableton Live")
        .with_toolchain_notes("mastered by hand")
        .with_prompt(&prompt)
        .with_negative_prompt(&negative)
        .with_lyrics(&lyrics)
        .with_stems_dir(dir.path().join("stems"))
        .with_persona(&persona)
        .with_declaration(&declaration)
        .with_url("https://example.com/track")
        .with_url("https://example.org/mirror");
    let report = convert(&opts).unwrap();

    let mut reader = ContainerReader::open_path(&report.out_path).unwrap();
    let verify = reader.verify().unwrap();
    assert!(verify.is_ok(), "{:?}", verify.discrepancies);
    assert_eq!(verify.entries_checked, 3);
    assert!(verify.unlisted_payload.is_empty());

    let manifest = reader.manifest().unwrap().clone();
    assert_eq!(manifest, report.manifest);
    assert_eq!(manifest.verification.method, "declared");
    assert_eq!(manifest.human_authorship.contact, "ada@example.com");
    assert_eq!(
        reader.public_attestation_urls(),
        ["https://example.com/track", "https://example.org/mirror"]
    );
    assert_eq!(reader.persona().unwrap(), "Neon Fox, synth persona ♪");
    assert_eq!(reader.declaration().unwrap(), "I directed this work.");
    assert_eq!(
        reader.optional_text(layout::NEGATIVE_PROMPT).unwrap(),
        "no vocals"
    );

    let names = reader.entry_names();
    assert!(names.contains(&"payload/audio/main.flac".to_string()));
    assert!(names.contains(&"payload/stems/keys/pad.flac".to_string()));
    assert!(names.contains(&layout::README.to_string()));
}

#[test]
fn test_stem_names_with_edge_whitespace_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let audio = write_file(dir.path(), "mix.wav", &audio_bytes(512, 4));
    write_file(dir.path(), "stems/take 1.wav ", &audio_bytes(128, 5));
    write_file(dir.path(), "stems/double  space.wav", &audio_bytes(128, 6));

    let opts = ConvertOptions::new(&audio, dir.path().join("mix"))
        .with_stems_dir(dir.path().join("stems"))
        .with_created_at(fixed_time());
    let report = convert(&opts).unwrap();
    assert!(report
        .stem_paths
        .iter()
        .any(|p| p == "payload/stems/take 1.wav "));

    let mut reader = ContainerReader::open_path(&report.out_path).unwrap();
    let verify = reader.verify().unwrap();
    assert!(verify.is_ok(), "{:?}", verify.discrepancies);
    assert_eq!(verify.entries_checked, 3);
    assert!(verify.unlisted_payload.is_empty());
}

#[test]
fn test_ledger_covers_payload_only() {
    let dir = tempfile::tempdir().unwrap();
    let audio = write_file(dir.path(), "a.mp3", b"ID3");
    let persona = write_file(dir.path(), "persona.txt", b"persona");
    let lyrics = write_file(dir.path(), "lyrics.txt", b"words");

    let opts = ConvertOptions::new(&audio, dir.path().join("a"))
        .with_persona(&persona)
        .with_lyrics(&lyrics);
    let report = convert(&opts).unwrap();

    for entry in &report.ledger {
        assert!(entry.path.starts_with("payload/"), "{}", entry.path);
        assert!(!entry.path.starts_with("metadata/"));
        assert_ne!(entry.path, layout::README);
    }
}

// ============================================================================
// Optional-field presence
// ============================================================================

#[test]
fn test_manifest_omits_fields_for_absent_assets() {
    let dir = tempfile::tempdir().unwrap();
    let audio = write_file(dir.path(), "a.wav", b"RIFF");
    let report = convert(&ConvertOptions::new(&audio, dir.path().join("a"))).unwrap();
    let manifest = manifest_json(&std::fs::read(&report.out_path).unwrap());

    for key in [
        "persona_ref",
        "declaration",
        "prompt_refs",
        "lyrics_ref",
        "public_attestation",
    ] {
        assert!(manifest.get(key).is_none(), "unexpected key {key}");
    }
    assert_eq!(manifest["stems_included"], false);
    assert_eq!(manifest["inputs"]["prompts_included"], false);
}

#[test]
fn test_prompt_refs_only_list_supplied_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let audio = write_file(dir.path(), "a.wav", b"RIFF");
    let prompt = write_file(dir.path(), "p.txt", b"prompt");

    let report =
        convert(&ConvertOptions::new(&audio, dir.path().join("a")).with_prompt(&prompt)).unwrap();
    let manifest = manifest_json(&std::fs::read(&report.out_path).unwrap());

    assert_eq!(
        manifest["prompt_refs"],
        serde_json::json!({"prompt": "metadata/prompt/prompt.txt"})
    );
    assert_eq!(manifest["inputs"]["prompts_included"], true);
}
