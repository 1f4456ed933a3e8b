use chrono::NaiveDateTime;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

use super::options::{CsvOptions, ExportReport};
use super::sinks::CsvSink;
use crate::dataset::Dataset;
use crate::errors::GenError;
use crate::types::EntityKind;

/// Prefix of in-flight export files; see [`remove_stale_temp_files`].
pub const TEMP_PREFIX: &str = ".bulkseed-";

/// `<ENTITY>_DUMMY_DATA_<count>_<YYYY-MM-DD_HH-MM-SS>.csv`
#[must_use]
pub fn output_filename(entity: EntityKind, count: usize, at: NaiveDateTime) -> String {
    format!("{}_DUMMY_DATA_{}_{}.csv", entity.file_stem(), count, at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Write `ds` into `dir` under its standard file name, with the entity's CSV options.
///
/// # Errors
/// See [`write_dataset`].
pub fn export_dataset(ds: &Dataset, dir: &Path, at: NaiveDateTime) -> Result<ExportReport, GenError> {
    let path = dir.join(output_filename(ds.entity, ds.record_count, at));
    write_dataset(ds, &path, &CsvOptions::for_entity(ds.entity))
}

/// Write a dataset to `dest` atomically via a temp file + persist.
///
/// # Errors
/// Returns an error if the destination cannot be created or the write/persist fails.
pub fn write_dataset(ds: &Dataset, dest: &Path, opts: &CsvOptions) -> Result<ExportReport, GenError> {
    log::info!("export: entity={}, rows={}, path={}", ds.entity, ds.len(), dest.display());
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        std::fs::create_dir_all(parent)?;
    }
    // same directory as the destination so persist is a rename
    let mut tmp = Builder::new().prefix(TEMP_PREFIX).suffix(".csv").tempfile_in(parent)?;
    let rows = write_to_writer(ds, &mut tmp, opts)?;
    persist_with_retry(tmp, dest)?;
    Ok(ExportReport { path: dest.to_path_buf(), rows })
}

/// Stream `ds` as CSV into `writer`; returns the number of data rows.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_to_writer<W: Write>(ds: &Dataset, writer: W, opts: &CsvOptions) -> io::Result<usize> {
    let header = ds.header();
    let guarded = header.iter().map(|c| opts.guard_dates && ds.is_date_column(c)).collect();
    let mut sink = CsvSink::new(writer, opts.delimiter, opts.quote_all, header, guarded);
    sink.write_header()?;
    for row in &ds.rows {
        sink.write_row(row)?;
    }
    sink.finish()?;
    Ok(ds.len())
}

/// Delete half-written export files left in `dir` by an interrupted run.
/// Returns how many were removed.
///
/// # Errors
/// Returns an error if `dir` exists but cannot be listed.
pub fn remove_stale_temp_files(dir: &Path) -> io::Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let stale = entry.file_name().to_str().is_some_and(|n| n.starts_with(TEMP_PREFIX));
        if stale && entry.file_type()?.is_file() {
            match std::fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => log::warn!("could not remove {}: {e}", entry.path().display()),
            }
        }
    }
    Ok(removed)
}

fn persist_with_retry(mut tmp: NamedTempFile, dest: &Path) -> io::Result<PathBuf> {
    let mut last_err: Option<io::Error> = None;
    for attempt in 0..5u64 {
        if dest.exists()
            && let Err(e) = std::fs::remove_file(dest)
        {
            last_err = Some(e);
            std::thread::sleep(std::time::Duration::from_millis(10 + attempt * 5));
            continue;
        }
        match tmp.persist(dest) {
            Ok(_file) => return Ok(dest.to_path_buf()),
            Err(pe) => {
                last_err = Some(pe.error);
                tmp = pe.file;
                std::thread::sleep(std::time::Duration::from_millis(10 + attempt * 5));
            }
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::other("failed to persist export file")))
}
