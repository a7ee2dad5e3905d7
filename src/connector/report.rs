//! End-of-run summary.

/// Counters accumulated over one run.
///
/// The binary logs this as the run summary; [`RunReport::has_errors`] is
/// the signal an operator (or a notification hook) watches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Regular orders fully exported and marked remotely.
    pub orders_exported: u64,
    /// Refund orders fully exported and marked remotely.
    pub refunds_exported: u64,
    /// Distinct products written to the product file.
    pub products_exported: u64,
    /// Orders rejected by the transformer and skipped.
    pub invalid_orders: u64,
    /// Orders whose rows were written but whose remote state update or a
    /// later write failed. The rows are not rolled back.
    pub update_failures: u64,
    /// Whether the accounting tool's own import logs reported an error,
    /// or the tool exited non-zero.
    pub importer_reported_errors: bool,
}

impl RunReport {
    /// Whether anything during the run needs operator attention.
    pub fn has_errors(&self) -> bool {
        self.invalid_orders > 0 || self.update_failures > 0 || self.importer_reported_errors
    }

    /// Total orders exported, both phases.
    pub fn total_exported(&self) -> u64 {
        self.orders_exported + self.refunds_exported
    }
}
