//! The two mapping tables bridging the storefront to the accounting tool,
//! and the cross-table consistency check.
//!
//! [`PaymentMethodMap`] resolves a (payment label, VAT applied) pair to the
//! accounting client and territoriality; [`VatMap`] resolves a
//! (territoriality, country) pair to the VAT rate and accounting VAT id.
//! Both are loaded once at run start and immutable thereafter.

mod payment;
mod vat;

pub use payment::{PaymentMethodEntry, PaymentMethodMap};
pub use vat::{EXONERATED_COUNTRY, VatEntry, VatMap};

use crate::core::ConnectorError;

/// Verify that every territoriality referenced by the payment-method map
/// exists in the VAT map.
///
/// A miss indicates a configuration mismatch between the two mapping files
/// and fails the run before any order is processed. No partial-success
/// mode.
pub fn check_consistency(
    payment_methods: &PaymentMethodMap,
    vat: &VatMap,
) -> Result<(), ConnectorError> {
    for territoriality in payment_methods.territorialities() {
        if !vat.has_territoriality(territoriality) {
            return Err(ConnectorError::InconsistentMappings {
                territoriality: territoriality.to_string(),
            });
        }
    }
    Ok(())
}
