//! Export records, the flat-file writer and per-run product deduplication.
//!
//! [`ExportOrderRow`] and [`ExportProductRow`] are the output contract with
//! the accounting import tool; [`ExportWriter`] serializes them as quoted
//! semicolon-delimited rows; [`ProductLedger`] guarantees at-most-once
//! product export per run.

mod ledger;
mod order_row;
mod product_row;
mod writer;

pub use ledger::ProductLedger;
pub use order_row::ExportOrderRow;
pub use product_row::ExportProductRow;
pub use writer::ExportWriter;
