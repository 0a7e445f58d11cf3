//! Turns one report run into the files handed to each sales department.
//!
//! Order matters: `new.csv` is written first, compared against `old.csv`,
//! sections are written from the new rows only, and `new.csv` is promoted
//! to `old.csv` last so a failed run is retried against the same baseline.
//! Section files left by an earlier run are removed before the new ones are
//! written, so the directory only ever holds this run's sale types.

use crate::{
    config::ReportConfig,
    delta::{new_entries, read_previous, rotate_snapshot, CURRENT_FILE, PREVIOUS_FILE},
    error::ReportResult,
    export::write_csv_file,
    report::ReportRow,
    subtotal::{master_section, split_by_sale_type, with_subtotals, SectionLine},
};
use std::path::{Path, PathBuf};

pub const MASTER_FILE: &str = "all_payments.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct DeliverySummary {
    pub rows_total: usize,
    pub rows_new: usize,
    /// (sale type, file written)
    pub sections: Vec<(String, PathBuf)>,
    pub master: PathBuf,
}

const SECTION_SUFFIX: &str = "_payments.csv";

pub fn section_file(sale_type: &str) -> String {
    format!("{sale_type}{SECTION_SUFFIX}")
}

fn is_section_file(name: &str) -> bool {
    name != MASTER_FILE && name.len() > SECTION_SUFFIX.len() && name.ends_with(SECTION_SUFFIX)
}

/// Remove every sale-type section file in `out_dir`. The master file stays.
fn clear_sections(out_dir: &Path) -> ReportResult<()> {
    for entry in std::fs::read_dir(out_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if is_section_file(name) && entry.file_type()?.is_file() {
            std::fs::remove_file(entry.path())?;
            log::info!("delivery: removed earlier section {name}");
        }
    }
    Ok(())
}

pub fn deliver(
    out_dir: &Path,
    rows: &[ReportRow],
    config: &ReportConfig,
) -> ReportResult<DeliverySummary> {
    std::fs::create_dir_all(out_dir)?;

    let current: Vec<Vec<String>> = rows.iter().map(ReportRow::to_record).collect();
    write_csv_file(&out_dir.join(CURRENT_FILE), &current)?;

    let previous = read_previous(&out_dir.join(PREVIOUS_FILE))?;
    let fresh = new_entries(rows, &previous);

    clear_sections(out_dir)?;

    let mut sections: Vec<(String, Vec<SectionLine>)> = Vec::new();
    let mut written = Vec::new();
    for (sale_type, section_rows) in split_by_sale_type(&fresh, config.sale_type_prefix_len) {
        let lines = with_subtotals(&section_rows);
        let path = out_dir.join(section_file(&sale_type));
        write_lines(&path, &lines)?;
        written.push((sale_type.clone(), path));
        sections.push((sale_type, lines));
    }

    let master = out_dir.join(MASTER_FILE);
    write_lines(&master, &master_section(&sections))?;

    rotate_snapshot(out_dir)?;

    Ok(DeliverySummary {
        rows_total: rows.len(),
        rows_new: fresh.len(),
        sections: written,
        master,
    })
}

fn write_lines(path: &Path, lines: &[SectionLine]) -> ReportResult<()> {
    let records: Vec<Vec<String>> = lines.iter().map(SectionLine::to_record).collect();
    write_csv_file(path, &records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_files_exclude_master_and_others() {
        assert!(is_section_file("CV_payments.csv"));
        assert!(is_section_file(&section_file("PM")));
        assert!(!is_section_file(MASTER_FILE));
        assert!(!is_section_file(CURRENT_FILE));
        assert!(!is_section_file(PREVIOUS_FILE));
        assert!(!is_section_file("_payments.csv"));
        assert!(!is_section_file("CV_payments.txt"));
    }
}
