//! CSV output.

use crate::{
    error::ReportResult,
    report::{ReportRow, REPORT_HEADERS},
};
use csv::WriterBuilder;
use std::{fs::File, io::Write, path::Path};

/// Header row, then one line per record.
pub fn write_csv<W: Write, R: AsRef<[String]>>(
    w: W,
    headers: &[&str],
    records: &[R],
) -> ReportResult<()> {
    let mut wrt = WriterBuilder::new().from_writer(w);
    wrt.write_record(headers)?;
    for record in records {
        wrt.write_record(record.as_ref())?;
    }
    wrt.flush()?;
    Ok(())
}

pub fn write_rows_csv<W: Write>(w: W, rows: &[ReportRow]) -> ReportResult<()> {
    let records: Vec<Vec<String>> = rows.iter().map(ReportRow::to_record).collect();
    write_csv(w, &REPORT_HEADERS, &records)
}

/// Create or overwrite `path` with the report headers and `records`.
pub fn write_csv_file<R: AsRef<[String]>>(path: &Path, records: &[R]) -> ReportResult<()> {
    let file = File::create(path)?;
    write_csv(file, &REPORT_HEADERS, records)?;
    log::info!("export: wrote {} lines to {}", records.len(), path.display());
    Ok(())
}
