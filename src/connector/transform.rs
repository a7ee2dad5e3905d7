//! The order transformer — joins one order, its two addresses and the two
//! mapping tables into denormalized export rows.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::core::{Address, InvalidOrder, Order};
use crate::export::ExportOrderRow;
use crate::mapping::{PaymentMethodMap, VatMap};
use crate::webservice::Storefront;

/// Literal appended to the document number and suffix of refund rows.
const REFUND_SUFFIX: &str = "11";

/// A fully transformed order, ready for the writer.
#[derive(Debug, Clone)]
pub struct TransformedOrder {
    pub order_id: u64,
    pub is_refund: bool,
    /// One export row per order line, in storefront line order.
    pub lines: Vec<LineExport>,
}

/// One export row plus the product it references, so the orchestrator can
/// deduplicate-export the product before writing the line.
#[derive(Debug, Clone)]
pub struct LineExport {
    pub product_id: u64,
    pub row: ExportOrderRow,
}

/// Converts raw orders into export rows.
///
/// Holds references to the immutable per-run context: both mapping tables
/// and the country/currency ISO tables. Address fetches go through the
/// [`Storefront`] seam at transform time.
#[derive(Debug)]
pub struct OrderTransformer<'a> {
    payment_methods: &'a PaymentMethodMap,
    vat: &'a VatMap,
    countries: &'a HashMap<i64, String>,
    currencies: &'a HashMap<u64, String>,
}

impl<'a> OrderTransformer<'a> {
    pub fn new(
        payment_methods: &'a PaymentMethodMap,
        vat: &'a VatMap,
        countries: &'a HashMap<i64, String>,
        currencies: &'a HashMap<u64, String>,
    ) -> Self {
        Self {
            payment_methods,
            vat,
            countries,
            currencies,
        }
    }

    /// Transform one order or reject it with the reason.
    ///
    /// Resolution order: VAT detection, payment method, delivery then
    /// invoice address, country ISO codes, VAT rate, currency ISO, line
    /// validation. The first failure wins; the orchestrator logs the
    /// reason and skips the order.
    pub fn transform(
        &self,
        storefront: &dyn Storefront,
        order: &Order,
    ) -> Result<TransformedOrder, InvalidOrder> {
        // Derived from the totals, never from the order's own flags.
        let vat_applied = order.vat_applied();

        let payment = self
            .payment_methods
            .resolve(&order.payment, vat_applied)
            .ok_or_else(|| InvalidOrder::UnmappedPaymentMethod {
                payment: order.payment.clone(),
                vat_applied,
            })?;

        let delivery = self.fetch_address(storefront, order.id_address_delivery)?;
        let invoice = self.fetch_address(storefront, order.id_address_invoice)?;

        let delivery_iso = self.country_iso(delivery.id_country)?;
        let invoice_iso = self.country_iso(invoice.id_country)?;

        let vat = self
            .vat
            .resolve(&payment.territoriality, delivery.id_country, vat_applied)
            .ok_or_else(|| InvalidOrder::VatRateUnresolved {
                territoriality: payment.territoriality.clone(),
                country_id: delivery.id_country,
                vat_applied,
            })?;

        let converted = order.conversion_rate != Decimal::ONE;
        let currency_iso = if converted {
            Some(
                self.currencies
                    .get(&order.id_currency)
                    .cloned()
                    .ok_or(InvalidOrder::UnknownCurrency {
                        currency_id: order.id_currency,
                    })?,
            )
        } else {
            None
        };

        if order.conversion_rate <= Decimal::ZERO {
            return Err(InvalidOrder::MalformedOrder(format!(
                "conversion rate {} is not positive",
                order.conversion_rate
            )));
        }
        if order.lines.is_empty() {
            return Err(InvalidOrder::NoExportableLines);
        }
        for (index, line) in order.lines.iter().enumerate() {
            if line.product_id == 0 {
                return Err(InvalidOrder::MalformedLine {
                    index,
                    detail: "product id is zero".into(),
                });
            }
        }

        // Document-level amounts, shared by every line of the order.
        let rate = order.conversion_rate;
        let vat_divisor = Decimal::ONE + vat.rate;
        if vat_divisor <= Decimal::ZERO {
            return Err(InvalidOrder::MalformedOrder(format!(
                "VAT rate {} leaves no positive divisor",
                vat.rate
            )));
        }
        let vat_pct = fmt6(vat.rate * Decimal::ONE_HUNDRED);
        let discount_base = order.total_products_wt + order.total_shipping;
        let discount_pct = if discount_base.is_zero() {
            Decimal::ZERO
        } else {
            (order.total_discounts / discount_base) / rate
        };
        let shipping_notax_shop = order.total_shipping / vat_divisor;
        let shipping_notax = shipping_notax_shop / rate;
        let document_total = order.total_products_wt + order.total_shipping / rate;
        let document_date = format_document_date(&order.invoice_date);

        let mut lines = Vec::with_capacity(order.lines.len());
        for line in &order.lines {
            let mut row = ExportOrderRow {
                document_use_original_number: "1".into(),
                document_number: order.id.to_string(),
                document_date: document_date.clone(),
                document_client_code: payment.client_code.clone(),
                document_client_name: invoice.display_name(),
                document_territoriality: payment.territoriality.clone(),
                document_vat_number: invoice.vat_number.clone(),
                document_discount_pct: fmt6(discount_pct),
                document_shipping_cost_notax: fmt6(shipping_notax),
                document_shipping_cost_vat_rate: vat_pct.clone(),
                document_shipping_tva_code: vat.accounting_id.clone(),
                document_total: fmt6(document_total),
                document_payment_method: payment.accounting_label.clone(),
                document_name_delivery_address: delivery.display_name(),
                document_client_order_number: order.reference.clone(),

                document_invoice_address_1: invoice.address1.clone(),
                document_invoice_address_2: invoice.address2.clone(),
                document_invoice_zip_code: invoice.postcode.clone(),
                document_invoice_city: invoice.city.clone(),
                document_invoice_country_iso_code: invoice_iso.clone(),
                document_invoice_lastname: invoice.lastname.clone(),
                document_invoice_firstname: invoice.firstname.clone(),
                document_invoice_phone: invoice.phone.clone(),
                document_invoice_mobile_phone: invoice.phone_mobile.clone(),

                document_delivery_address_1: delivery.address1.clone(),
                document_delivery_address_2: delivery.address2.clone(),
                document_delivery_zip_code: delivery.postcode.clone(),
                document_delivery_city: delivery.city.clone(),
                document_delivery_country_iso_code: delivery_iso.clone(),
                document_delivery_lastname: delivery.lastname.clone(),
                document_delivery_firstname: delivery.firstname.clone(),
                document_delivery_phone: delivery.phone.clone(),
                document_delivery_mobile_phone: delivery.phone_mobile.clone(),

                line_product_code: line.product_code(),
                line_description: line.product_name.clone(),
                line_quantity: line.quantity.to_string(),
                line_vat_rate: vat_pct.clone(),
                line_vat_code: vat.accounting_id.clone(),
                line_unit_price_notax: fmt6(line.unit_price_tax_excl / rate),
                line_unit_price: fmt6(line.unit_price_tax_incl / rate),

                document_currency_used: "0".into(),
                ..ExportOrderRow::default()
            };

            if let Some(iso) = &currency_iso {
                row.document_currency_rate = fmt6(rate);
                row.document_currency_iso_code = iso.clone();
                row.document_currency_amount =
                    fmt6(order.total_products_wt + order.total_shipping);
                row.document_currency_amount_notax =
                    fmt6(order.total_products + order.total_shipping_tax_excl);
                row.document_currency_amount_shipping_notax = fmt6(shipping_notax_shop);
                row.line_currency_unit_price_notax = fmt6(line.unit_price_tax_excl);
                row.line_currency_total_notax =
                    fmt6(line.unit_price_tax_excl * Decimal::from(line.quantity));
                row.document_currency_used = "1".into();
            }

            if order.is_refund {
                apply_refund_adjustment(&mut row);
            }

            lines.push(LineExport {
                product_id: line.product_id,
                row,
            });
        }

        Ok(TransformedOrder {
            order_id: order.id,
            is_refund: order.is_refund,
            lines,
        })
    }

    fn fetch_address(
        &self,
        storefront: &dyn Storefront,
        address_id: u64,
    ) -> Result<Address, InvalidOrder> {
        storefront
            .address(address_id)
            .map_err(|source| InvalidOrder::AddressUnresolved { address_id, source })
    }

    fn country_iso(&self, country_id: i64) -> Result<String, InvalidOrder> {
        self.countries
            .get(&country_id)
            .cloned()
            .ok_or(InvalidOrder::UnknownCountry { country_id })
    }
}

/// Flip the signs and tag the document number. Applied exactly once, after
/// the row is otherwise fully populated.
fn apply_refund_adjustment(row: &mut ExportOrderRow) {
    negate_amount(&mut row.document_total);
    negate_amount(&mut row.document_shipping_cost_notax);
    negate_amount(&mut row.document_currency_amount_shipping_notax);
    negate_integer(&mut row.line_quantity);
    row.document_number.push_str(REFUND_SUFFIX);
    row.document_number_suffix.push_str(REFUND_SUFFIX);
}

fn negate_amount(field: &mut String) {
    if let Ok(value) = field.parse::<Decimal>() {
        *field = fmt6(-value);
    }
}

fn negate_integer(field: &mut String) {
    if let Ok(value) = field.parse::<i64>() {
        *field = (-value).to_string();
    }
}

/// Round to 6 decimals and render with a fixed 6-decimal scale.
fn fmt6(value: Decimal) -> String {
    format!("{:.6}", value.round_dp(6))
}

/// Reformat the webservice invoice date (`YYYY-MM-DD HH:MM:SS`) to the
/// accounting tool's `DD/MM/YYYY`. Absent or unparseable dates render
/// empty, zero dates included.
fn format_document_date(invoice_date: &str) -> String {
    let raw = invoice_date.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%d/%m/%Y").to_string();
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn fmt6_pads_and_rounds() {
        assert_eq!(fmt6(dec!(20)), "20.000000");
        assert_eq!(fmt6(dec!(0.1234567)), "0.123457");
        assert_eq!(fmt6(dec!(-7.08)), "-7.080000");
    }

    #[test]
    fn document_date_reformats_webservice_timestamps() {
        assert_eq!(format_document_date("2024-07-05 19:40:27"), "05/07/2024");
        assert_eq!(format_document_date("2024-07-05"), "05/07/2024");
    }

    #[test]
    fn document_date_is_empty_for_bad_input() {
        assert_eq!(format_document_date(""), "");
        assert_eq!(format_document_date("0000-00-00 00:00:00"), "");
        assert_eq!(format_document_date("05/07/2024"), "");
    }

    #[test]
    fn refund_adjustment_leaves_blank_currency_fields_alone() {
        let mut row = ExportOrderRow {
            document_number: "123456".into(),
            document_total: "43.500000".into(),
            document_shipping_cost_notax: "6.250000".into(),
            line_quantity: "1".into(),
            ..ExportOrderRow::default()
        };
        apply_refund_adjustment(&mut row);
        assert_eq!(row.document_number, "12345611");
        assert_eq!(row.document_number_suffix, "11");
        assert_eq!(row.document_total, "-43.500000");
        assert_eq!(row.document_shipping_cost_notax, "-6.250000");
        assert_eq!(row.line_quantity, "-1");
        assert_eq!(row.document_currency_amount_shipping_notax, "");
    }
}
