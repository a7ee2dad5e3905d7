//! Order-transformer tests: field computation, VAT resolution, refund
//! adjustment and the per-order rejection reasons.

mod common;

use std::collections::HashMap;

use rust_decimal_macros::dec;

use bordereau::connector::OrderTransformer;
use bordereau::core::{InvalidOrder, Order, OrderLine};
use bordereau::mapping::{PaymentMethodMap, VatMap};

use common::{address_fr, export_order, FakeStorefront, PAYMENT_METHODS_CSV, VAT_CSV};

struct Context {
    payment_methods: PaymentMethodMap,
    vat: VatMap,
    countries: HashMap<i64, String>,
    currencies: HashMap<u64, String>,
    storefront: FakeStorefront,
}

fn context() -> Context {
    Context {
        payment_methods: PaymentMethodMap::parse("pm.csv", PAYMENT_METHODS_CSV).unwrap(),
        vat: VatMap::parse("vat.csv", VAT_CSV).unwrap(),
        countries: HashMap::from([(8, "FR".to_string())]),
        currencies: HashMap::from([(1, "EUR".to_string())]),
        storefront: FakeStorefront::new().with_address(address_fr(100)),
    }
}

impl Context {
    fn transformer(&self) -> OrderTransformer<'_> {
        OrderTransformer::new(
            &self.payment_methods,
            &self.vat,
            &self.countries,
            &self.currencies,
        )
    }

    fn transform(&self, order: &Order) -> Result<bordereau::connector::TransformedOrder, InvalidOrder> {
        self.transformer().transform(&self.storefront, order)
    }
}

/// Domestic one-line order, VAT applied at 20%.
fn domestic_order() -> Order {
    Order {
        id: 549085,
        id_address_delivery: 100,
        id_address_invoice: 100,
        id_currency: 1,
        conversion_rate: dec!(1),
        payment: "Amazon - FR".into(),
        reference: "FMHGOYBGK".into(),
        invoice_date: "2024-07-05 19:40:27".into(),
        total_paid: dec!(20.23),
        total_products: dec!(9.78),
        total_products_wt: dec!(11.73),
        total_shipping: dec!(8.50),
        total_shipping_tax_excl: dec!(7.08),
        lines: vec![OrderLine {
            product_id: 52695,
            quantity: 1,
            product_name: "Porte Clé".into(),
            product_ean13: "4589504961513".into(),
            unit_price_tax_incl: dec!(11.73),
            unit_price_tax_excl: dec!(9.775),
        }],
        ..Order::default()
    }
}

#[test]
fn domestic_order_resolves_the_country_vat_rate() {
    let ctx = context();
    let transformed = ctx.transform(&domestic_order()).unwrap();
    assert_eq!(transformed.lines.len(), 1);

    let row = &transformed.lines[0].row;
    assert_eq!(row.document_use_original_number, "1");
    assert_eq!(row.document_number, "549085");
    assert_eq!(row.document_date, "05/07/2024");
    assert_eq!(row.document_client_code, "CAMAZFR");
    assert_eq!(row.document_territoriality, "FRANCE");
    assert_eq!(row.document_payment_method, "CB AMAZON");
    assert_eq!(row.document_client_order_number, "FMHGOYBGK");
    assert_eq!(row.line_vat_code, "TVA20");
    assert_eq!(row.line_vat_rate, "20.000000");
    assert_eq!(row.document_shipping_cost_vat_rate, "20.000000");
    assert_eq!(row.document_shipping_tva_code, "TVA20");
}

#[test]
fn monetary_fields_round_to_six_decimals() {
    let ctx = context();
    let transformed = ctx.transform(&domestic_order()).unwrap();
    let row = &transformed.lines[0].row;

    // shipping 8.50 at 20% VAT: 8.50 / 1.2
    assert_eq!(row.document_shipping_cost_notax, "7.083333");
    // products incl. tax + shipping / rate
    assert_eq!(row.document_total, "20.230000");
    assert_eq!(row.document_discount_pct, "0.000000");
    assert_eq!(row.line_unit_price, "11.730000");
    assert_eq!(row.line_unit_price_notax, "9.775000");
    assert_eq!(row.line_quantity, "1");
}

#[test]
fn discount_percentage_uses_gross_products_plus_shipping() {
    let ctx = context();
    let mut order = domestic_order();
    order.total_discounts = dec!(2.00);
    order.total_products_wt = dec!(30.00);
    order.total_products = dec!(25.00);
    order.total_shipping = dec!(7.50);
    let transformed = ctx.transform(&order).unwrap();
    // 2 / (30 + 7.5) = 0.0533333...
    assert_eq!(transformed.lines[0].row.document_discount_pct, "0.053333");
}

#[test]
fn address_blocks_come_from_both_addresses() {
    let ctx = context();
    let transformed = ctx.transform(&domestic_order()).unwrap();
    let row = &transformed.lines[0].row;
    assert_eq!(row.document_client_name, "Dupont Jean");
    assert_eq!(row.document_name_delivery_address, "Dupont Jean");
    assert_eq!(row.document_invoice_address_1, "12 rue de la Paix");
    assert_eq!(row.document_invoice_zip_code, "75002");
    assert_eq!(row.document_invoice_city, "Paris");
    assert_eq!(row.document_invoice_country_iso_code, "FR");
    assert_eq!(row.document_delivery_country_iso_code, "FR");
    assert_eq!(row.document_invoice_phone, "0102030405");
}

#[test]
fn currency_fields_stay_blank_at_rate_one() {
    let ctx = context();
    let transformed = ctx.transform(&domestic_order()).unwrap();
    let row = &transformed.lines[0].row;
    assert_eq!(row.document_currency_used, "0");
    assert_eq!(row.document_currency_rate, "");
    assert_eq!(row.document_currency_iso_code, "");
    assert_eq!(row.document_currency_amount, "");
    assert_eq!(row.line_currency_total_notax, "");
}

#[test]
fn converted_order_populates_the_currency_block() {
    let ctx = context();
    let mut order = domestic_order();
    order.conversion_rate = dec!(1.25);
    order.total_products = dec!(30.00);
    order.total_products_wt = dec!(36.00);
    order.total_shipping = dec!(7.50);
    order.total_shipping_tax_excl = dec!(6.25);
    order.lines[0].unit_price_tax_incl = dec!(36.00);
    order.lines[0].unit_price_tax_excl = dec!(30.00);

    let transformed = ctx.transform(&order).unwrap();
    let row = &transformed.lines[0].row;
    assert_eq!(row.document_currency_used, "1");
    assert_eq!(row.document_currency_rate, "1.250000");
    assert_eq!(row.document_currency_iso_code, "EUR");
    // shop-currency amounts, before conversion
    assert_eq!(row.document_currency_amount, "43.500000");
    assert_eq!(row.document_currency_amount_notax, "36.250000");
    assert_eq!(row.document_currency_amount_shipping_notax, "6.250000");
    assert_eq!(row.line_currency_unit_price_notax, "30.000000");
    assert_eq!(row.line_currency_total_notax, "30.000000");
    // converted amounts
    assert_eq!(row.document_total, "42.000000");
    assert_eq!(row.document_shipping_cost_notax, "5.000000");
    assert_eq!(row.line_unit_price, "28.800000");
    assert_eq!(row.line_unit_price_notax, "24.000000");
}

#[test]
fn equal_totals_resolve_through_the_exoneration_entry() {
    let ctx = context();
    let transformed = ctx.transform(&export_order(123456)).unwrap();
    let row = &transformed.lines[0].row;
    // 30.00 incl == 30.00 excl: VAT not applied, EXPORT territoriality,
    // sentinel country entry.
    assert_eq!(row.document_client_code, "CAMAZEX");
    assert_eq!(row.document_territoriality, "EXPORT");
    assert_eq!(row.line_vat_code, "EXO");
    assert_eq!(row.line_vat_rate, "0.000000");
    assert_eq!(row.document_shipping_cost_notax, "7.500000");
}

#[test]
fn refund_negates_totals_and_tags_the_document_number() {
    let ctx = context();
    let mut order = domestic_order();
    order.id = 123456;
    order.total_products = dec!(30.00);
    order.total_products_wt = dec!(36.00);
    order.total_shipping = dec!(7.50);

    let regular = ctx.transform(&order).unwrap();
    order.is_refund = true;
    let refund = ctx.transform(&order).unwrap();

    let regular_row = &regular.lines[0].row;
    let refund_row = &refund.lines[0].row;
    assert_eq!(regular_row.document_total, "43.500000");
    assert_eq!(refund_row.document_total, "-43.500000");
    assert_eq!(refund_row.document_shipping_cost_notax, "-6.250000");
    assert_eq!(refund_row.line_quantity, "-1");
    assert_eq!(regular_row.document_number, "123456");
    assert_eq!(refund_row.document_number, "12345611");
    assert_eq!(regular_row.document_number_suffix, "");
    assert_eq!(refund_row.document_number_suffix, "11");
}

#[test]
fn line_product_code_prefers_the_ean() {
    let ctx = context();
    let mut order = domestic_order();
    order.lines[0].product_ean13 = String::new();
    let transformed = ctx.transform(&order).unwrap();
    assert_eq!(transformed.lines[0].row.line_product_code, "52695");
}

#[test]
fn unmapped_payment_method_is_rejected() {
    let ctx = context();
    let mut order = domestic_order();
    order.payment = "FOO".into();
    let err = ctx.transform(&order).unwrap_err();
    assert!(matches!(err, InvalidOrder::UnmappedPaymentMethod { .. }));
}

#[test]
fn payment_lookup_uses_the_derived_vat_flag() {
    // "FNAC Marketplace - FR" is only mapped with VAT; an order with equal
    // totals derives vat_applied = false and must miss.
    let ctx = context();
    let mut order = export_order(1);
    order.payment = "FNAC Marketplace - FR".into();
    let err = ctx.transform(&order).unwrap_err();
    assert!(matches!(
        err,
        InvalidOrder::UnmappedPaymentMethod { vat_applied: false, .. }
    ));
}

#[test]
fn unresolvable_address_is_rejected() {
    let ctx = context();
    let mut order = domestic_order();
    order.id_address_delivery = 999;
    let err = ctx.transform(&order).unwrap_err();
    assert!(matches!(
        err,
        InvalidOrder::AddressUnresolved { address_id: 999, .. }
    ));
}

#[test]
fn unknown_country_is_rejected() {
    let mut ctx = context();
    ctx.countries.clear();
    let err = ctx.transform(&domestic_order()).unwrap_err();
    assert!(matches!(err, InvalidOrder::UnknownCountry { country_id: 8 }));
}

#[test]
fn missing_vat_entry_for_the_country_is_rejected() {
    let mut ctx = context();
    // FRANCE only maps country 8; a Belgian delivery address has no entry.
    ctx.countries.insert(3, "BE".to_string());
    let mut address = address_fr(200);
    address.id_country = 3;
    ctx.storefront.addresses.insert(200, address);
    let mut order = domestic_order();
    order.id_address_delivery = 200;
    let err = ctx.transform(&order).unwrap_err();
    assert!(matches!(
        err,
        InvalidOrder::VatRateUnresolved { country_id: 3, vat_applied: true, .. }
    ));
}

#[test]
fn unknown_currency_is_rejected_only_when_converted() {
    let mut ctx = context();
    ctx.currencies.clear();
    // Rate 1: the currency table is not consulted.
    assert!(ctx.transform(&domestic_order()).is_ok());

    let mut order = domestic_order();
    order.conversion_rate = dec!(1.25);
    let err = ctx.transform(&order).unwrap_err();
    assert!(matches!(err, InvalidOrder::UnknownCurrency { currency_id: 1 }));
}

#[test]
fn order_without_lines_is_rejected() {
    let ctx = context();
    let mut order = domestic_order();
    order.lines.clear();
    assert!(matches!(
        ctx.transform(&order).unwrap_err(),
        InvalidOrder::NoExportableLines
    ));
}

#[test]
fn zero_product_id_is_rejected_with_its_index() {
    let ctx = context();
    let mut order = domestic_order();
    order.lines.push(OrderLine::default());
    assert!(matches!(
        ctx.transform(&order).unwrap_err(),
        InvalidOrder::MalformedLine { index: 1, .. }
    ));
}

#[test]
fn non_positive_conversion_rate_is_rejected() {
    let ctx = context();
    let mut order = domestic_order();
    order.conversion_rate = dec!(0);
    // Rate 0 counts as converted; give it a known currency so the check
    // under test is the rate guard.
    assert!(matches!(
        ctx.transform(&order).unwrap_err(),
        InvalidOrder::MalformedOrder(_)
    ));
}

#[test]
fn multi_line_order_yields_one_row_per_line() {
    let ctx = context();
    let mut order = domestic_order();
    order.lines.push(OrderLine {
        product_id: 60000,
        quantity: 2,
        product_name: "Maquette".into(),
        product_ean13: "4573102616029".into(),
        unit_price_tax_incl: dec!(29.00),
        unit_price_tax_excl: dec!(24.166667),
    });
    let transformed = ctx.transform(&order).unwrap();
    assert_eq!(transformed.lines.len(), 2);
    assert_eq!(transformed.lines[0].product_id, 52695);
    assert_eq!(transformed.lines[1].product_id, 60000);
    assert_eq!(transformed.lines[1].row.line_quantity, "2");
    // Document-level fields repeat on every line.
    assert_eq!(
        transformed.lines[0].row.document_total,
        transformed.lines[1].row.document_total
    );
}
