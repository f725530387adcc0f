#![no_main]

use aifx_container::{ContainerReader, ReadLimits};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let limits = ReadLimits {
        max_manifest_bytes: 64 * 1024,
        max_ledger_bytes: 64 * 1024,
        max_text_bytes: 64 * 1024,
    };
    // Must never panic, whatever the bytes.
    if let Ok(mut reader) = ContainerReader::open_with_limits(Cursor::new(data), limits) {
        let _ = reader.persona();
        let _ = reader.verify();
    }
});
