//! Lot detail aggregation: one summary per statement.
//!
//! A statement line contributes only when
//!   - its charged hammer is strictly above the invoicing threshold, and
//!   - a lot detail exists for (statement's sale, line's lot number).
//!
//! Commission is split on the lot's VAT rate: separated when the rate's
//! flag is set, not separated otherwise. A lot whose rate is unknown
//! counts as not separated, so the two buckets always cover every lot.

use crate::{
    config::ReportConfig,
    model::{LotDetail, Snapshot},
    types::{SaleId, StatementNo},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct LotSummary {
    pub goods: Decimal,
    pub goods_vat: Decimal,
    pub hammer_liable: Decimal,
    pub hammer_not_liable: Decimal,
    pub commission_vat_separated: Decimal,
    pub commission_vat_separated_vat: Decimal,
    pub commission_vat_not_separated: Decimal,
    pub commission_vat_not_separated_vat: Decimal,
}

impl LotSummary {
    fn add(&mut self, lot: &LotDetail, vat_separated: bool) {
        self.goods += lot.hammer_ex_vat;
        self.goods_vat += lot.hammer_vat;

        if !lot.hammer_vat.is_zero() {
            self.hammer_liable += lot.hammer_ex_vat;
        } else {
            self.hammer_not_liable += lot.hammer_ex_vat;
        }

        if vat_separated {
            self.commission_vat_separated += lot.commission_ex_vat;
            self.commission_vat_separated_vat += lot.commission_vat;
        } else {
            self.commission_vat_not_separated += lot.commission_ex_vat;
            self.commission_vat_not_separated_vat += lot.commission_vat;
        }
    }
}

/// Aggregate every statement's lots. Statements with no qualifying lot are
/// absent from the map; callers read that as an all-zero summary.
pub fn aggregate_lots(
    snapshot: &Snapshot,
    config: &ReportConfig,
) -> BTreeMap<StatementNo, LotSummary> {
    let sale_of: HashMap<StatementNo, SaleId> = snapshot
        .statements
        .iter()
        .filter_map(|s| s.sale_id.map(|sale| (s.statement_no, sale)))
        .collect();

    let mut details: HashMap<(SaleId, &str), Vec<&LotDetail>> = HashMap::new();
    for d in &snapshot.lot_details {
        details.entry((d.sale_id, d.lot_no.as_str())).or_default().push(d);
    }

    let separated: HashSet<&str> = snapshot
        .vat_rates
        .iter()
        .filter(|v| v.vat_separated)
        .map(|v| v.vat_rate_id.as_str())
        .collect();

    let mut summaries: BTreeMap<StatementNo, LotSummary> = BTreeMap::new();
    let mut below_threshold = 0usize;
    let mut unmatched = 0usize;

    for line in &snapshot.statement_lines {
        if line.hammer <= config.hammer_threshold {
            below_threshold += 1;
            continue;
        }
        let Some(&sale_id) = sale_of.get(&line.statement_no) else {
            unmatched += 1;
            continue;
        };
        let Some(lots) = details.get(&(sale_id, line.lot_no.as_str())) else {
            unmatched += 1;
            continue;
        };
        let summary = summaries.entry(line.statement_no).or_default();
        for lot in lots {
            let vat_separated = lot
                .vat_rate_id
                .as_deref()
                .is_some_and(|id| separated.contains(id));
            summary.add(lot, vat_separated);
        }
    }

    log::debug!(
        "lots: {} statement summaries, {below_threshold} lines at/below threshold, {unmatched} lines without lot detail",
        summaries.len()
    );
    summaries
}
