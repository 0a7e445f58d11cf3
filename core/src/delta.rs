//! New-entry detection between consecutive runs.
//!
//! Each run writes its full result to `new.csv`. Rows whose rendered record
//! already appeared in the previous run's `old.csv` are not new. Once the
//! run has been delivered, `new.csv` replaces `old.csv`.

use crate::{error::ReportResult, report::ReportRow};
use csv::ReaderBuilder;
use std::{collections::HashSet, fs, io::ErrorKind, path::Path};

pub const CURRENT_FILE: &str = "new.csv";
pub const PREVIOUS_FILE: &str = "old.csv";

/// Records of the previous run. A missing file means nothing was seen yet.
pub fn read_previous(path: &Path) -> ReportResult<HashSet<Vec<String>>> {
    let file = match fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("delta: no previous snapshot at {}, every row is new", path.display());
            return Ok(HashSet::new());
        }
        Err(e) => return Err(e.into()),
    };
    let mut rdr = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(file);
    let mut seen = HashSet::new();
    for rec in rdr.records() {
        let rec = rec?;
        seen.insert(rec.iter().map(str::to_string).collect());
    }
    Ok(seen)
}

/// Rows not present in `previous`, in their original order.
pub fn new_entries(rows: &[ReportRow], previous: &HashSet<Vec<String>>) -> Vec<ReportRow> {
    let fresh: Vec<ReportRow> = rows
        .iter()
        .filter(|r| !previous.contains(&r.to_record()))
        .cloned()
        .collect();
    log::info!("delta: {} of {} rows are new", fresh.len(), rows.len());
    fresh
}

/// Drop `old.csv` and promote `new.csv` in its place.
pub fn rotate_snapshot(dir: &Path) -> ReportResult<()> {
    let previous = dir.join(PREVIOUS_FILE);
    let current = dir.join(CURRENT_FILE);
    if previous.exists() {
        fs::remove_file(&previous)?;
    }
    if current.exists() {
        fs::rename(&current, &previous)?;
    }
    Ok(())
}
