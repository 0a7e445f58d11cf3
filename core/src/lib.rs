//! Vendor payment report: statement, sale, client, payment and lot-detail
//! records in, one row per paid statement out.
//!
//! Pipeline:
//!   1. store       : load a snapshot of the upstream tables
//!   2. payments    : per (statement, pay date) cheque/contra/other sums
//!   3. lots        : per statement goods/VAT/commission sums
//!   4. report      : join, derive, filter, sort
//!   5. delivery    : new-entry diff, sale-type sections, CSV files

pub mod config;
pub mod date;
pub mod delta;
pub mod delivery;
pub mod error;
pub mod export;
pub mod lots;
pub mod model;
pub mod money;
pub mod payments;
pub mod report;
pub mod store;
pub mod subtotal;
pub mod types;
