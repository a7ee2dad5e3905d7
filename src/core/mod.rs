//! Core domain types and the error taxonomy.
//!
//! [`Order`], [`OrderLine`], [`Address`] and [`Product`] mirror the
//! storefront's records; [`ConnectorError`] covers fatal run-level
//! failures and [`InvalidOrder`] the per-order skip reasons.

mod error;
mod types;

pub use error::*;
pub use types::*;
