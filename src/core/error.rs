use thiserror::Error;

use crate::webservice::WebserviceError;

/// Fatal errors that abort a run before or between orders.
///
/// Everything here is a startup precondition or a run-level failure;
/// per-order problems are [`InvalidOrder`] instead and never abort the run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConnectorError {
    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A mapping-table row with the wrong number of columns.
    #[error("mapping file {file}, line {line}: expected {expected} columns, found {found}")]
    MalformedMappingRow {
        /// Source file the row came from.
        file: String,
        /// 1-based line number; the header is line 1.
        line: usize,
        /// Allowed column count(s), e.g. "12" or "5 or 6".
        expected: String,
        found: usize,
    },

    /// A mapping-table cell that failed to parse.
    #[error("mapping file {file}, line {line}: {detail}")]
    MalformedMappingValue {
        file: String,
        /// 1-based line number; the header is line 1.
        line: usize,
        detail: String,
    },

    /// A territoriality referenced by the payment-method map has no entry
    /// in the VAT map. Configuration mismatch between the two files.
    #[error("territoriality '{territoriality}' from the payment-method map has no VAT map entry")]
    InconsistentMappings { territoriality: String },

    /// The startup authentication probe was rejected.
    #[error("webservice authentication failed")]
    AuthenticationFailed,

    /// Webservice failure outside per-order scope (listing pages, ISO
    /// tables, the authentication probe itself).
    #[error("webservice error: {0}")]
    Webservice(#[from] WebserviceError),

    /// I/O failure on an export file or a mapping file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The accounting import tool could not be started.
    #[error("importer error: {0}")]
    Importer(String),
}

/// Why a single order was rejected and skipped.
///
/// Produced by the order transformer; the run orchestrator logs the reason
/// and moves on to the next order.
#[derive(Debug, Error)]
pub enum InvalidOrder {
    /// No payment-method mapping for this (label, VAT-applied) pair.
    #[error("no payment-method mapping for '{payment}' (VAT applied: {vat_applied})")]
    UnmappedPaymentMethod { payment: String, vat_applied: bool },

    /// The delivery or invoice address could not be fetched.
    #[error("address {address_id} could not be fetched")]
    AddressUnresolved {
        address_id: u64,
        source: WebserviceError,
    },

    /// The address country id is absent from the countries ISO table.
    #[error("no ISO code for country {country_id}")]
    UnknownCountry { country_id: i64 },

    /// No VAT map entry for the resolved territoriality and country.
    #[error(
        "no VAT entry for territoriality '{territoriality}', country {country_id} (VAT applied: {vat_applied})"
    )]
    VatRateUnresolved {
        territoriality: String,
        country_id: i64,
        vat_applied: bool,
    },

    /// The order currency id is absent from the currencies ISO table.
    #[error("no ISO code for currency {currency_id}")]
    UnknownCurrency { currency_id: u64 },

    /// The order carries no order lines.
    #[error("order has no exportable lines")]
    NoExportableLines,

    /// An order line failed validation.
    #[error("order line {index}: {detail}")]
    MalformedLine { index: usize, detail: String },

    /// The order itself failed validation.
    #[error("{0}")]
    MalformedOrder(String),
}

/// Anything that can go wrong while processing a single order.
///
/// Caught at the per-order boundary: the orchestrator logs it, bumps the
/// phase error counter and continues with the next order.
#[derive(Debug, Error)]
pub enum OrderFailure {
    /// The transformer rejected the order.
    #[error("{0}")]
    Invalid(#[from] InvalidOrder),

    /// A per-order webservice call failed (detail fetch, product fetch,
    /// the exported/refunded state update).
    #[error("webservice call failed: {0}")]
    Webservice(#[from] WebserviceError),

    /// Writing to an export file failed.
    #[error("export write failed: {0}")]
    Io(#[from] std::io::Error),
}
