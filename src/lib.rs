//! # bordereau
//!
//! Batch pipeline exporting storefront orders and products into the two
//! flat files an accounting package imports. Each order's payment method
//! and delivery country are joined against a payment-method table and a
//! VAT table, monetary fields are computed VAT-adjusted, and one quoted
//! semicolon-delimited row is written per product and per order line.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point. The run is a single-threaded, synchronous batch pass: no
//! retries, no concurrency, no persistence between runs.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`core`] | Domain types ([`Order`], [`Address`], [`Product`]) and the error taxonomy |
//! | [`mapping`] | Payment-method and VAT mapping tables, consistency check |
//! | [`export`] | Export records, flat-file writer, product deduplication |
//! | [`webservice`] | The [`webservice::Storefront`] seam and the blocking REST client |
//! | [`connector`] | The order transformer and the run orchestrator |
//! | [`config`] | TOML run configuration |
//!
//! ## Quick start
//!
//! ```no_run
//! use bordereau::config::ConnectorConfig;
//! use bordereau::connector::Connector;
//! use bordereau::webservice::WebserviceClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConnectorConfig::load("bordereau.toml")?;
//! let client = WebserviceClient::new(&config.webservice.url, &config.webservice.api_key)?;
//! let report = Connector::new(config, client).run()?;
//! println!("{} orders exported", report.total_exported());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connector;
pub mod core;
pub mod export;
pub mod mapping;
pub mod webservice;

// Re-export core types at crate root for convenience
pub use crate::core::*;
