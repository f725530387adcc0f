//! Shared fixtures for container integration tests.
#![allow(dead_code)]

use aifx_container::paths::layout;
use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Fixed instant: 2023-11-14T22:13:20Z (Unix 1700000000).
pub fn fixed_time() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

pub fn write_file(dir: &Path, rel: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, data).unwrap();
    path
}

/// Deterministic pseudo-audio bytes.
pub fn audio_bytes(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}

/// All entries of a ZIP archive, in archive order.
pub fn read_entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).unwrap();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            (entry.name().to_string(), data)
        })
        .collect()
}

pub fn read_entry(bytes: &[u8], name: &str) -> Option<Vec<u8>> {
    read_entries(bytes)
        .into_iter()
        .find(|(n, _)| n == name)
        .map(|(_, data)| data)
}

/// Build a new ZIP from `entries`, as a tampering tool would.
pub fn rebuild_zip(entries: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        zip.start_file(name.as_str(), SimpleFileOptions::default())
            .unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

pub fn manifest_json(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(&read_entry(bytes, layout::MANIFEST).unwrap()).unwrap()
}
