use anyhow::Context;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const MANIFEST_ENTRY: &str = "manifest.json";
const ENTRIES_ENTRY: &str = "journal/entries.json";
const CHECKSUMS_ENTRY: &str = "meta/checksums.json";
pub const BUNDLE_FORMAT_V1: &str = "dthub-journal-v1";

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub entry_count: usize,
    pub bundle_format: Option<String>,
}

/// Writes the review export as a plain downloadable JSON file.
pub fn write_journal_export(
    out_path: &Path,
    payload: &serde_json::Value,
) -> anyhow::Result<ExportSummary> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.to_string_lossy()))?;
    }
    let text =
        serde_json::to_string_pretty(payload).context("failed to serialize journal export")?;
    std::fs::write(out_path, text).with_context(|| {
        format!(
            "failed to write export file {}",
            out_path.to_string_lossy()
        )
    })?;
    Ok(ExportSummary {
        entry_count: payload_entry_count(payload),
        bundle_format: None,
    })
}

/// Writes the review export as a zip bundle: a manifest, the entries
/// document, and a SHA-256 checksum manifest over the entries document.
pub fn write_journal_bundle(
    out_path: &Path,
    payload: &serde_json::Value,
) -> anyhow::Result<ExportSummary> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.to_string_lossy()))?;
    }

    let out_file = File::create(out_path).with_context(|| {
        format!(
            "failed to create output file {}",
            out_path.to_string_lossy()
        )
    })?;
    let mut zip = ZipWriter::new(out_file);
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let entries_text =
        serde_json::to_string_pretty(payload).context("failed to serialize journal export")?;

    let manifest = json!({
        "format": BUNDLE_FORMAT_V1,
        "version": 1,
        "appVersion": env!("CARGO_PKG_VERSION"),
        "exportDate": payload.get("exportDate").cloned().unwrap_or_default(),
        "totalEntries": payload_entry_count(payload),
    });
    zip.start_file(MANIFEST_ENTRY, opts)
        .context("failed to start manifest entry")?;
    zip.write_all(
        serde_json::to_string_pretty(&manifest)
            .context("failed to serialize manifest")?
            .as_bytes(),
    )
    .context("failed to write manifest entry")?;

    zip.start_file(ENTRIES_ENTRY, opts)
        .context("failed to start entries entry")?;
    zip.write_all(entries_text.as_bytes())
        .context("failed to write entries entry")?;

    let checksums = json!({
        ENTRIES_ENTRY: sha256_hex(entries_text.as_bytes()),
    });
    zip.start_file(CHECKSUMS_ENTRY, opts)
        .context("failed to start checksum entry")?;
    zip.write_all(
        serde_json::to_string_pretty(&checksums)
            .context("failed to serialize checksums")?
            .as_bytes(),
    )
    .context("failed to write checksum entry")?;

    zip.finish().context("failed to finalize zip bundle")?;

    Ok(ExportSummary {
        entry_count: payload_entry_count(payload),
        bundle_format: Some(BUNDLE_FORMAT_V1.to_string()),
    })
}

fn payload_entry_count(payload: &serde_json::Value) -> usize {
    payload
        .get("entries")
        .and_then(|v| v.as_array())
        .map(|a| a.len())
        .unwrap_or(0)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
