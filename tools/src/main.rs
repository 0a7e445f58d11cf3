//! payment-report: headless runner for the vendor payment report.
//!
//! Usage:
//!   payment-report --db upstream.db --out-dir ./out
//!   payment-report --db upstream.db --cutoff 01/01/2024 --today 30/06/2024
//!
//! Without --cutoff, statements dated within the configured lookback
//! (180 days by default) of today are considered.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::{env, path::Path};
use vendor_payments_core::{
    config::ReportConfig,
    date::{default_cutoff, parse_cutoff},
    delivery::deliver,
    report::run_report,
    store::ReportStore,
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = arg_value(&args, "--db").unwrap_or("upstream.db");
    let data_dir = arg_value(&args, "--data-dir").unwrap_or("./data");
    let out_dir = arg_value(&args, "--out-dir").unwrap_or(".");

    let config = ReportConfig::load(data_dir)?;

    let today: NaiveDate = match arg_value(&args, "--today") {
        Some(s) => parse_cutoff(s)?,
        None => Local::now().date_naive(),
    };
    let cutoff = match arg_value(&args, "--cutoff") {
        Some(s) => parse_cutoff(s)?,
        None => default_cutoff(today, config.lookback_days),
    };

    println!("Vendor payment report");
    println!("  db:        {db}");
    println!("  data_dir:  {data_dir}");
    println!("  out_dir:   {out_dir}");
    println!("  today:     {today}");
    println!("  cutoff:    {cutoff}");
    println!();

    let result = run(db, out_dir, cutoff, today, &config);
    match &result {
        Ok(()) => log::info!("payment-report: run completed"),
        Err(e) => log::error!("payment-report: run failed: {e}"),
    }
    result
}

fn run(
    db: &str,
    out_dir: &str,
    cutoff: NaiveDate,
    today: NaiveDate,
    config: &ReportConfig,
) -> Result<()> {
    let store = ReportStore::open(db)?;
    store.migrate()?;
    let snapshot = store.load_snapshot()?;

    let rows = run_report(&snapshot, cutoff, today, config);
    let summary = deliver(Path::new(out_dir), &rows, config)?;

    println!("=== RUN SUMMARY ===");
    println!("  rows reported:  {}", summary.rows_total);
    println!("  new rows:       {}", summary.rows_new);
    for (sale_type, path) in &summary.sections {
        println!("  {sale_type:<14}  {}", path.display());
    }
    println!("  all sale types: {}", summary.master.display());
    Ok(())
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
