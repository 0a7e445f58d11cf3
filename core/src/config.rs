use crate::date::DEFAULT_DMY_FORMATS;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Business constants for the vendor payment report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Sale numbers always reported, whatever their actual date.
    pub legacy_sale_numbers: Vec<String>,
    /// Statement lines at or below this hammer were not really invoiced.
    /// Written as a string in the JSON file so it parses exactly.
    pub hammer_threshold: Decimal,
    pub cheque_types: Vec<String>,
    /// Write-off codes; `xko` behaves exactly like `contra`.
    pub contra_types: Vec<String>,
    /// Default cutoff distance from today when none is given.
    pub lookback_days: i64,
    /// Leading characters of the sale number that name the sale type.
    pub sale_type_prefix_len: usize,
    /// Day-first layouts tried, in order, on statement dates.
    #[serde(default = "default_statement_date_formats")]
    pub statement_date_formats: Vec<String>,
}

fn default_statement_date_formats() -> Vec<String> {
    DEFAULT_DMY_FORMATS.iter().map(|f| f.to_string()).collect()
}

impl ReportConfig {
    /// Load from the data/ directory.
    /// In tests, use ReportConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/report_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ReportConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        if config.sale_type_prefix_len == 0 {
            anyhow::bail!("{path}: sale_type_prefix_len must be at least 1");
        }
        Ok(config)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            legacy_sale_numbers: vec!["TO010100".into(), "PM281299".into()],
            hammer_threshold: Decimal::new(5, 3),
            cheque_types: vec!["cheque".into()],
            contra_types: vec!["contra".into(), "xko".into()],
            lookback_days: 180,
            sale_type_prefix_len: 2,
            statement_date_formats: default_statement_date_formats(),
        }
    }

    pub fn is_legacy_sale(&self, sale_number: &str) -> bool {
        self.legacy_sale_numbers.iter().any(|s| s == sale_number)
    }
}
