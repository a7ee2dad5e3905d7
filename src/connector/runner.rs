//! Run orchestration: mapping load, consistency check, authentication,
//! the two export phases, importer invocation and the run report.

use std::fs::File;
use std::io::{BufWriter, Write};

use tracing::{error, info, warn};

use crate::config::ConnectorConfig;
use crate::core::{ConnectorError, OrderFailure};
use crate::export::{ExportWriter, ProductLedger};
use crate::mapping::{self, PaymentMethodMap, VatMap};
use crate::webservice::Storefront;

use super::importer;
use super::report::RunReport;
use super::transform::OrderTransformer;

/// Safety stop for the pagination loops.
const MAX_CALLS: usize = 1000;

/// The run orchestrator. One instance per batch invocation.
///
/// Generic over the [`Storefront`] seam so tests can drive a full run
/// against an offline shop.
#[derive(Debug)]
pub struct Connector<S: Storefront> {
    config: ConnectorConfig,
    storefront: S,
}

/// Which export phase a pagination pass belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Orders,
    Refunds,
}

impl<S: Storefront> Connector<S> {
    pub fn new(config: ConnectorConfig, storefront: S) -> Self {
        Self { config, storefront }
    }

    /// The storefront this connector runs against.
    pub fn storefront(&self) -> &S {
        &self.storefront
    }

    /// Execute one full batch pass.
    ///
    /// Sequence: mapping load, consistency check, authentication probe,
    /// ISO tables, regular-order phase, refund phase, flush, importer
    /// invocation, import-log scan. Per-order failures are logged and
    /// skipped; anything returned as `Err` aborted the run.
    pub fn run(&self) -> Result<RunReport, ConnectorError> {
        let payment_methods = PaymentMethodMap::load(&self.config.mappings.payment_methods)?;
        let vat = VatMap::load(&self.config.mappings.vat)?;
        mapping::check_consistency(&payment_methods, &vat)?;
        info!(
            payment_methods = payment_methods.len(),
            vat_entries = vat.len(),
            "mapping tables loaded"
        );

        if !self.storefront.check_authentication()? {
            return Err(ConnectorError::AuthenticationFailed);
        }

        let countries = self.storefront.countries_iso_codes()?;
        let currencies = self.storefront.currencies_iso_codes()?;
        let transformer = OrderTransformer::new(&payment_methods, &vat, &countries, &currencies);

        let mut product_writer = ExportWriter::new(BufWriter::new(File::create(
            &self.config.export.products_file,
        )?));
        let mut order_writer = ExportWriter::new(BufWriter::new(File::create(
            &self.config.export.orders_file,
        )?));

        let mut ledger = ProductLedger::new();
        let mut report = RunReport::default();

        let stopped = self.export_phase(
            Phase::Orders,
            &transformer,
            &mut ledger,
            &mut product_writer,
            &mut order_writer,
            &mut report,
        )?;
        if !stopped {
            self.export_phase(
                Phase::Refunds,
                &transformer,
                &mut ledger,
                &mut product_writer,
                &mut order_writer,
                &mut report,
            )?;
        }

        report.products_exported = ledger.exported_count() as u64;
        product_writer.flush()?;
        order_writer.flush()?;

        self.run_importer(&mut report)?;

        info!(
            orders = report.orders_exported,
            refunds = report.refunds_exported,
            products = report.products_exported,
            invalid = report.invalid_orders,
            update_failures = report.update_failures,
            "run finished"
        );
        Ok(report)
    }

    /// One paginated export phase. Returns whether the order limit stopped
    /// the run.
    ///
    /// The phase error counter doubles as the pagination offset: orders
    /// that fail stay in the filtered listing, so the offset skips exactly
    /// them on the next page.
    fn export_phase<W1: Write, W2: Write>(
        &self,
        phase: Phase,
        transformer: &OrderTransformer<'_>,
        ledger: &mut ProductLedger,
        product_writer: &mut ExportWriter<W1>,
        order_writer: &mut ExportWriter<W2>,
        report: &mut RunReport,
    ) -> Result<bool, ConnectorError> {
        let states = match phase {
            Phase::Orders => &self.config.run.valid_order_states,
            Phase::Refunds => &self.config.run.refund_order_states,
        };
        let mut error_offset = 0usize;

        for _ in 0..MAX_CALLS {
            let page = match phase {
                Phase::Orders => self
                    .storefront
                    .orders_awaiting_export(states, error_offset)?,
                Phase::Refunds => self
                    .storefront
                    .refunds_awaiting_export(states, error_offset)?,
            };
            if page.is_empty() {
                return Ok(false);
            }

            for order_id in page {
                if let Some(limit) = self.config.run.order_limit {
                    if report.total_exported() >= limit {
                        info!(limit, "order limit reached, stopping");
                        return Ok(true);
                    }
                }

                match self.process_order(
                    order_id,
                    phase,
                    transformer,
                    ledger,
                    product_writer,
                    order_writer,
                ) {
                    Ok(()) => match phase {
                        Phase::Orders => report.orders_exported += 1,
                        Phase::Refunds => report.refunds_exported += 1,
                    },
                    Err(OrderFailure::Invalid(reason)) => {
                        warn!(order_id, %reason, "order skipped");
                        report.invalid_orders += 1;
                        error_offset += 1;
                    }
                    Err(failure) => {
                        error!(order_id, %failure, "order processing failed");
                        report.update_failures += 1;
                        error_offset += 1;
                    }
                }
            }
        }

        Ok(false)
    }

    /// Process one order end to end: detail fetch, transform, per-line
    /// product dedup and row write, remote state update.
    ///
    /// The state update comes last, after the rows are written; a failure
    /// there leaves the rows in place (no rollback) and surfaces in the
    /// report as an update failure.
    fn process_order<W1: Write, W2: Write>(
        &self,
        order_id: u64,
        phase: Phase,
        transformer: &OrderTransformer<'_>,
        ledger: &mut ProductLedger,
        product_writer: &mut ExportWriter<W1>,
        order_writer: &mut ExportWriter<W2>,
    ) -> Result<(), OrderFailure> {
        let mut order = self.storefront.order(order_id)?;
        order.is_refund = phase == Phase::Refunds;

        let transformed = transformer.transform(&self.storefront, &order)?;

        for line in &transformed.lines {
            ledger.export_product(line.product_id, &self.storefront, product_writer)?;
            order_writer.write_order_row(&line.row)?;
        }

        match phase {
            Phase::Orders => self.storefront.mark_exported(order_id)?,
            Phase::Refunds => self.storefront.mark_refunded(order_id)?,
        }
        Ok(())
    }

    /// Invoke the accounting tool on both export files and scan its logs.
    /// Skipped when no importer is configured or nothing was written.
    fn run_importer(&self, report: &mut RunReport) -> Result<(), ConnectorError> {
        let Some(importer_config) = &self.config.importer else {
            return Ok(());
        };
        if report.total_exported() == 0 && report.products_exported == 0 {
            return Ok(());
        }

        let all_ok = importer::run_imports(
            importer_config,
            &[
                &self.config.export.products_file,
                &self.config.export.orders_file,
            ],
        )?;

        let products_log = importer::log_reports_errors(&importer_config.products_log)?;
        let orders_log = importer::log_reports_errors(&importer_config.orders_log)?;
        report.importer_reported_errors = !all_ok || products_log || orders_log;
        if report.importer_reported_errors {
            error!("accounting import reported errors");
        }
        Ok(())
    }
}
