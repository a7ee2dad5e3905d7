//! The order transformer and the run orchestration around it.
//!
//! [`OrderTransformer`] is the core algorithm: it joins an order, its two
//! addresses and the mapping tables into write-once export rows.
//! [`Connector`] sequences a whole run and [`RunReport`] summarizes it.

pub mod importer;
mod report;
mod runner;
mod transform;

pub use report::RunReport;
pub use runner::Connector;
pub use transform::{LineExport, OrderTransformer, TransformedOrder};
