//! Shared primitive types used across the report.

/// Statement number, the key every aggregate is grouped by.
pub type StatementNo = i64;

/// Upstream sale identifier (internal, not the human-readable sale number).
pub type SaleId = i64;

/// Lot number within a sale. Lots can carry suffixes ("12A"), so this is text.
pub type LotNo = String;
