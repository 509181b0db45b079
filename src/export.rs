//! JSON and CSV output for parsed batches.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use cvsift_core::{BatchParseResult, ParsedResume, TabularRow};
use serde::Serialize;

pub const COMBINED_CSV: &str = "combined_parsed.csv";
pub const MANIFEST: &str = "manifest.json";

#[derive(Debug, Serialize)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub documents: Vec<ExportedDocument>,
    pub failures: Vec<ExportFailure>,
}

#[derive(Debug, Serialize)]
pub struct ExportedDocument {
    pub source_path: String,
    pub json: String,
    pub csv: String,
}

#[derive(Debug, Serialize)]
pub struct ExportFailure {
    pub source_path: String,
    pub error: String,
}

pub fn to_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, compact: bool) -> Result<()> {
    let json = to_json(value, compact)?;
    fs::write(path, json + "\n").with_context(|| format!("failed to write {}", path.display()))
}

/// Write rows with a header line, even when there are no rows. Absent
/// optional fields become empty cells.
pub fn write_rows(path: &Path, rows: &[TabularRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    if rows.is_empty() {
        writer.write_record(TabularRow::COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one JSON and one CSV file per record (numbered from 1), a combined
/// CSV of every row, and a manifest describing the run.
pub fn export_batch(out_dir: &Path, batch: &BatchParseResult, compact: bool) -> Result<Manifest> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut documents = Vec::with_capacity(batch.success_count());
    let mut rows = Vec::with_capacity(batch.success_count());

    for (i, record) in batch.successful.iter().enumerate() {
        let (json, csv, row) = export_record(out_dir, i + 1, record, compact)?;
        documents.push(ExportedDocument {
            source_path: record.source_path.clone(),
            json,
            csv,
        });
        rows.push(row);
    }

    write_rows(&out_dir.join(COMBINED_CSV), &rows)?;

    let manifest = Manifest {
        generated_at: Utc::now(),
        documents,
        failures: batch
            .failed
            .iter()
            .map(|(path, e)| ExportFailure {
                source_path: path.clone(),
                error: e.to_string(),
            })
            .collect(),
    };
    write_json(&out_dir.join(MANIFEST), &manifest, false)?;
    tracing::debug!(dir = %out_dir.display(), documents = manifest.documents.len(), "export complete");

    Ok(manifest)
}

fn export_record(
    out_dir: &Path,
    index: usize,
    record: &ParsedResume,
    compact: bool,
) -> Result<(String, String, TabularRow)> {
    let json_name = format!("parsed_resume_{index}.json");
    let csv_name = format!("parsed_resume_{index}.csv");
    let row = record.to_row();

    write_json(&out_dir.join(&json_name), record, compact)?;
    write_rows(&out_dir.join(&csv_name), std::slice::from_ref(&row))?;

    Ok((json_name, csv_name, row))
}

/// Files written for a manifest, relative paths resolved against `out_dir`.
pub fn written_files(out_dir: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = manifest
        .documents
        .iter()
        .flat_map(|d| [out_dir.join(&d.json), out_dir.join(&d.csv)])
        .collect();
    files.push(out_dir.join(COMBINED_CSV));
    files.push(out_dir.join(MANIFEST));
    files
}
