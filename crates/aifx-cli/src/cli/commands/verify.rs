use crate::cli::args::VerifyArgs;
use crate::config::load_config;
use crate::exit_codes;
use aifx_container::ContainerReader;
use anyhow::Result;
use std::io::{Read, Seek};

pub fn run(args: VerifyArgs) -> Result<i32> {
    let limits = load_config(args.config.as_deref())?.read_limits();

    let mut reader = match ContainerReader::open_path_with_limits(&args.file, limits) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("❌ {e}");
            return Ok(exit_codes::for_error(&e));
        }
    };
    report_integrity(&mut reader, true)
}

/// Run verification and print the outcome. `summary` adds the checked count.
pub(crate) fn report_integrity<R: Read + Seek>(
    reader: &mut ContainerReader<R>,
    summary: bool,
) -> Result<i32> {
    let report = match reader.verify() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("❌ {e}");
            return Ok(exit_codes::for_error(&e));
        }
    };

    for line in &report.skipped_lines {
        eprintln!("⚠️  skipped malformed checksum line {line}");
    }
    for path in &report.unlisted_payload {
        eprintln!("ℹ️  payload file not covered by checksums: {path}");
    }

    if !report.is_ok() {
        println!("❌ Integrity check FAILED:");
        for d in &report.discrepancies {
            println!("- {d}");
        }
        return Ok(exit_codes::INTEGRITY_FAILED);
    }

    if summary {
        println!(
            "✅ Payload integrity OK ({} file(s) checked)",
            report.entries_checked
        );
    } else {
        println!("✅ Payload integrity OK");
    }
    Ok(exit_codes::SUCCESS)
}
