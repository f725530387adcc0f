#![no_main]

use aifx_container::checksum::{parse_ledger, render_ledger};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let parsed = parse_ledger(&text);

    // Re-rendering parsed entries must parse back to the same entries.
    let mut sorted = parsed.entries.clone();
    sorted.sort_by(|a, b| a.path.as_bytes().cmp(b.path.as_bytes()));
    let reparsed = parse_ledger(&render_ledger(&parsed.entries));
    assert_eq!(reparsed.entries, sorted);
    assert!(reparsed.skipped_lines.is_empty());
});
