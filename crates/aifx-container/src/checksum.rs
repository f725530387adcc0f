//! SHA-256 checksum engine and the `checksums.sha256` ledger format.
//!
//! Ledger lines follow `sha256sum` output: `<64 lowercase hex>  <path>\n`,
//! sorted by archive path (byte-wise), one line per payload file.

use crate::error::{ContainerError, ContainerResult};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read buffer size for streaming hashes.
pub const HASH_CHUNK_BYTES: usize = 1024 * 1024;

/// Hash algorithm name recorded in the manifest integrity block.
pub const HASH_ALG: &str = "SHA-256";

/// One ledger line: digest and archive-internal path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Lowercase hex SHA-256 (as written; the reader does not re-case it).
    pub digest: String,
    /// Archive-internal path the digest covers.
    pub path: String,
}

impl LedgerEntry {
    pub fn new(digest: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
            path: path.into(),
        }
    }

    /// Case-insensitive digest comparison.
    pub fn matches(&self, actual: &str) -> bool {
        self.digest.eq_ignore_ascii_case(actual)
    }
}

/// Result of a tolerant ledger parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLedger {
    pub entries: Vec<LedgerEntry>,
    /// 1-based numbers of non-blank lines that could not be parsed.
    pub skipped_lines: Vec<usize>,
}

/// Stream any reader through SHA-256 in fixed-size chunks.
pub fn hash_reader<R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; HASH_CHUNK_BYTES];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Hash a file on disk without loading it into memory.
pub fn hash_file(path: &Path) -> ContainerResult<String> {
    let file = File::open(path).map_err(|e| ContainerError::io(path.display(), e))?;
    hash_reader(file).map_err(|e| ContainerError::io(path.display(), e))
}

/// Hash in-memory content.
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Render ledger text. Entries are sorted by path; the text always ends with
/// exactly one newline.
pub fn render_ledger(entries: &[LedgerEntry]) -> String {
    let mut sorted: Vec<&LedgerEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.path.as_bytes().cmp(b.path.as_bytes()));

    let lines: Vec<String> = sorted
        .iter()
        .map(|e| format!("{}  {}", e.digest, e.path))
        .collect();
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// How a single ledger line was understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineParse {
    /// Blank or whitespace-only.
    Blank,
    /// Split on the first run of two or more whitespace characters.
    Canonical(LedgerEntry),
    /// Fallback: first two whitespace-separated tokens.
    Tokens(LedgerEntry),
    /// Fewer than two tokens.
    Malformed,
}

/// Parse one line: separator-run split first, then whitespace tokens.
///
/// Only carriage returns and leading whitespace are stripped. Everything after
/// the separator run is the path, trailing spaces included.
pub fn parse_ledger_line(line: &str) -> LineParse {
    let line = line.trim_end_matches('\r').trim_start();
    if line.trim_end().is_empty() {
        return LineParse::Blank;
    }

    if let Some((digest, path)) = split_on_separator_run(line) {
        if !digest.is_empty() && !path.is_empty() {
            return LineParse::Canonical(LedgerEntry::new(digest, path));
        }
    }

    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(digest), Some(path)) => LineParse::Tokens(LedgerEntry::new(digest, path)),
        _ => LineParse::Malformed,
    }
}

/// Split at the first run of two or more whitespace characters, dropping the run.
fn split_on_separator_run(line: &str) -> Option<(&str, &str)> {
    let mut chars = line.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if c.is_whitespace() && chars.peek().is_some_and(|&(_, next)| next.is_whitespace()) {
            return Some((&line[..idx], line[idx..].trim_start()));
        }
    }
    None
}

/// Tolerant ledger parser. Blank lines are ignored, malformed lines are
/// recorded in `skipped_lines` and never abort the parse.
pub fn parse_ledger(text: &str) -> ParsedLedger {
    let mut parsed = ParsedLedger::default();
    for (idx, line) in text.lines().enumerate() {
        match parse_ledger_line(line) {
            LineParse::Blank => {}
            LineParse::Canonical(entry) | LineParse::Tokens(entry) => parsed.entries.push(entry),
            LineParse::Malformed => {
                tracing::warn!(line = idx + 1, "skipping malformed checksum ledger line");
                parsed.skipped_lines.push(idx + 1);
            }
        }
    }
    parsed
}

/// Hash every `(archive path, source file)` pair into sorted ledger entries.
pub fn ledger_for_files<'a, I>(files: I) -> ContainerResult<Vec<LedgerEntry>>
where
    I: IntoIterator<Item = (&'a str, &'a Path)>,
{
    let mut entries = Vec::new();
    for (archive_path, source) in files {
        let digest = hash_file(source)?;
        tracing::debug!(path = archive_path, digest = %digest, "hashed payload file");
        entries.push(LedgerEntry::new(digest, archive_path));
    }
    entries.sort_by(|a, b| a.path.as_bytes().cmp(b.path.as_bytes()));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn hash_bytes_known_vectors() {
        assert_eq!(hash_bytes(b""), EMPTY_SHA256);
        assert_eq!(hash_bytes(b"abc"), ABC_SHA256);
    }

    #[test]
    fn hash_file_streams_across_chunks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let data: Vec<u8> = (0..(HASH_CHUNK_BYTES * 2 + 17))
            .map(|i| (i % 251) as u8)
            .collect();
        file.write_all(&data).unwrap();
        file.flush().unwrap();

        assert_eq!(hash_file(file.path()).unwrap(), hash_bytes(&data));
    }

    #[test]
    fn render_sorts_and_terminates_with_single_newline() {
        let text = render_ledger(&[
            LedgerEntry::new(ABC_SHA256, "payload/stems/vocals.wav"),
            LedgerEntry::new(EMPTY_SHA256, "payload/audio/main.wav"),
        ]);
        assert_eq!(
            text,
            format!(
                "{EMPTY_SHA256}  payload/audio/main.wav\n{ABC_SHA256}  payload/stems/vocals.wav\n"
            )
        );
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn render_sort_is_bytewise() {
        let text = render_ledger(&[
            LedgerEntry::new("aa", "payload/stems/a.wav"),
            LedgerEntry::new("bb", "payload/stems/B.wav"),
        ]);
        let paths: Vec<&str> = text.lines().map(|l| l.split_once("  ").unwrap().1).collect();
        assert_eq!(paths, vec!["payload/stems/B.wav", "payload/stems/a.wav"]);
    }

    #[test]
    fn parse_canonical_line_keeps_spaces_in_path() {
        let parsed = parse_ledger(&format!("{ABC_SHA256}  payload/stems/my take.wav\n"));
        assert_eq!(
            parsed.entries,
            vec![LedgerEntry::new(ABC_SHA256, "payload/stems/my take.wav")]
        );
    }

    #[test]
    fn parse_accepts_any_whitespace_run_as_separator() {
        for sep in ["\t\t", " \t", "   "] {
            assert_eq!(
                parse_ledger_line(&format!("{ABC_SHA256}{sep}payload/stems/my take.wav")),
                LineParse::Canonical(LedgerEntry::new(ABC_SHA256, "payload/stems/my take.wav")),
                "separator {sep:?}"
            );
        }
    }

    #[test]
    fn parse_keeps_trailing_whitespace_in_path() {
        let parsed = parse_ledger(&format!(
            "{ABC_SHA256}  payload/stems/take 1.wav \r\n{EMPTY_SHA256}  payload/audio/main.wav\n"
        ));
        assert_eq!(
            parsed.entries,
            vec![
                LedgerEntry::new(ABC_SHA256, "payload/stems/take 1.wav "),
                LedgerEntry::new(EMPTY_SHA256, "payload/audio/main.wav"),
            ]
        );
    }

    #[test]
    fn digest_with_trailing_spaces_only_is_malformed() {
        assert_eq!(parse_ledger_line(&format!("{ABC_SHA256}   ")), LineParse::Malformed);
    }

    #[test]
    fn parse_falls_back_to_whitespace_tokens() {
        assert_eq!(
            parse_ledger_line(&format!("{ABC_SHA256} payload/audio/main.wav")),
            LineParse::Tokens(LedgerEntry::new(ABC_SHA256, "payload/audio/main.wav"))
        );
        assert_eq!(
            parse_ledger_line(&format!("{ABC_SHA256}\tpayload/audio/main.wav")),
            LineParse::Tokens(LedgerEntry::new(ABC_SHA256, "payload/audio/main.wav"))
        );
    }

    #[test]
    fn parse_skips_blank_and_malformed_lines() {
        let text = format!("\n   \nnot-a-line\n{ABC_SHA256}  payload/audio/main.wav\r\n");
        let parsed = parse_ledger(&text);
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].path, "payload/audio/main.wav");
        assert_eq!(parsed.skipped_lines, vec![3]);
    }

    #[test]
    fn rendered_ledger_parses_back() {
        let entries = vec![
            LedgerEntry::new(EMPTY_SHA256, "payload/audio/main.flac"),
            LedgerEntry::new(ABC_SHA256, "payload/stems/drums.wav"),
        ];
        assert_eq!(parse_ledger(&render_ledger(&entries)).entries, entries);
    }

    #[test]
    fn digest_match_is_case_insensitive() {
        let entry = LedgerEntry::new(ABC_SHA256.to_uppercase(), "payload/audio/main.wav");
        assert!(entry.matches(ABC_SHA256));
    }
}
