//! Per-run product deduplication.

use std::collections::HashSet;
use std::io::Write;

use tracing::debug;

use crate::core::OrderFailure;
use crate::webservice::Storefront;

use super::product_row::ExportProductRow;
use super::writer::ExportWriter;

/// Tracks which products have already been exported during this run.
///
/// Must be consulted before the corresponding order-line row is written so
/// the two export files stay consistent: every product a written line
/// references has a product row, exactly one per run.
#[derive(Debug, Default)]
pub struct ProductLedger {
    exported: HashSet<u64>,
}

impl ProductLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Export a product at most once.
    ///
    /// A no-op when the id was already exported this run. Otherwise the
    /// product is fetched, serialized and the id recorded. On a fetch or
    /// write failure the id is not recorded, so a later order referencing
    /// the same product retries the export.
    ///
    /// Returns whether a row was written.
    pub fn export_product<W: Write>(
        &mut self,
        product_id: u64,
        storefront: &dyn Storefront,
        writer: &mut ExportWriter<W>,
    ) -> Result<bool, OrderFailure> {
        if self.exported.contains(&product_id) {
            return Ok(false);
        }

        let product = storefront.product(product_id)?;
        writer.write_product_row(&ExportProductRow::from(&product))?;
        self.exported.insert(product_id);
        debug!(product_id, "product exported");
        Ok(true)
    }

    /// Number of distinct products exported so far.
    pub fn exported_count(&self) -> usize {
        self.exported.len()
    }
}
