//! Storefront webservice access.
//!
//! [`Storefront`] is the seam between the pipeline and the remote shop:
//! the run orchestrator and the transformer only ever see the trait, so
//! tests can swap in an offline implementation. [`WebserviceClient`] is
//! the real thing — a blocking JSON client over the shop's REST API.

mod client;
mod error;
mod payload;

pub use client::WebserviceClient;
pub use error::WebserviceError;

use std::collections::HashMap;

use crate::core::{Address, Order, Product};

/// Blocking access to the storefront's REST API.
///
/// All calls are synchronous; the pipeline is a single-threaded batch
/// pass with no retries anywhere.
pub trait Storefront {
    /// Lightweight credential probe, run once before any other work.
    fn check_authentication(&self) -> Result<bool, WebserviceError>;

    /// One page of ids of regular orders awaiting export, filtered by
    /// state. An empty page ends the phase.
    fn orders_awaiting_export(
        &self,
        states: &[String],
        offset: usize,
    ) -> Result<Vec<u64>, WebserviceError>;

    /// One page of ids of already-exported orders awaiting refund export.
    fn refunds_awaiting_export(
        &self,
        states: &[String],
        offset: usize,
    ) -> Result<Vec<u64>, WebserviceError>;

    /// Full order detail, order lines included.
    fn order(&self, order_id: u64) -> Result<Order, WebserviceError>;

    /// Address detail, fetched independently for delivery and invoice.
    fn address(&self, address_id: u64) -> Result<Address, WebserviceError>;

    /// Product detail, fetched once per run when first referenced.
    fn product(&self, product_id: u64) -> Result<Product, WebserviceError>;

    /// Active countries as an id → ISO-code table.
    fn countries_iso_codes(&self) -> Result<HashMap<i64, String>, WebserviceError>;

    /// Active currencies as an id → ISO-code table.
    fn currencies_iso_codes(&self) -> Result<HashMap<u64, String>, WebserviceError>;

    /// Mark an order's printed-status record as exported.
    fn mark_exported(&self, order_id: u64) -> Result<(), WebserviceError>;

    /// Mark an order's printed-status record as refunded.
    fn mark_refunded(&self, order_id: u64) -> Result<(), WebserviceError>;
}
