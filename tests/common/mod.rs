#![allow(dead_code)]

//! Offline storefront and fixture data shared by the integration tests.

use std::cell::RefCell;
use std::collections::HashMap;

use rust_decimal_macros::dec;

use bordereau::core::{Address, Order, OrderLine, Product};
use bordereau::webservice::{Storefront, WebserviceError};

const PAGE_SIZE: usize = 10;

/// An in-memory storefront. Orders listed as pending disappear from the
/// listing once marked exported/refunded, like the real shop's filter.
#[derive(Debug, Default)]
pub struct FakeStorefront {
    pub orders: HashMap<u64, Order>,
    pub addresses: HashMap<u64, Address>,
    pub products: HashMap<u64, Product>,
    pub countries: HashMap<i64, String>,
    pub currencies: HashMap<u64, String>,
    pub pending_orders: Vec<u64>,
    pub pending_refunds: Vec<u64>,
    pub auth_ok: bool,
    /// When set, the exported/refunded state updates fail with an HTTP 500.
    pub fail_marks: bool,
    pub exported: RefCell<Vec<u64>>,
    pub refunded: RefCell<Vec<u64>>,
}

impl FakeStorefront {
    pub fn new() -> Self {
        Self {
            countries: HashMap::from([(8, "FR".to_string())]),
            currencies: HashMap::from([(1, "EUR".to_string())]),
            auth_ok: true,
            ..Self::default()
        }
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.pending_orders.push(order.id);
        self.orders.insert(order.id, order);
        self
    }

    pub fn with_refund(mut self, order: Order) -> Self {
        self.pending_refunds.push(order.id);
        self.orders.insert(order.id, order);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.addresses.insert(address.id, address);
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.id, product);
        self
    }

    fn page(&self, pending: &[u64], done: &[u64], offset: usize) -> Vec<u64> {
        pending
            .iter()
            .filter(|id| !done.contains(id))
            .skip(offset)
            .take(PAGE_SIZE)
            .copied()
            .collect()
    }
}

impl Storefront for FakeStorefront {
    fn check_authentication(&self) -> Result<bool, WebserviceError> {
        Ok(self.auth_ok)
    }

    fn orders_awaiting_export(
        &self,
        _states: &[String],
        offset: usize,
    ) -> Result<Vec<u64>, WebserviceError> {
        Ok(self.page(&self.pending_orders, &self.exported.borrow(), offset))
    }

    fn refunds_awaiting_export(
        &self,
        _states: &[String],
        offset: usize,
    ) -> Result<Vec<u64>, WebserviceError> {
        Ok(self.page(&self.pending_refunds, &self.refunded.borrow(), offset))
    }

    fn order(&self, order_id: u64) -> Result<Order, WebserviceError> {
        self.orders
            .get(&order_id)
            .cloned()
            .ok_or(WebserviceError::MissingRecord {
                resource: "orders",
                order_id,
            })
    }

    fn address(&self, address_id: u64) -> Result<Address, WebserviceError> {
        self.addresses
            .get(&address_id)
            .cloned()
            .ok_or(WebserviceError::MissingRecord {
                resource: "addresses",
                order_id: address_id,
            })
    }

    fn product(&self, product_id: u64) -> Result<Product, WebserviceError> {
        self.products
            .get(&product_id)
            .cloned()
            .ok_or(WebserviceError::MissingRecord {
                resource: "products",
                order_id: product_id,
            })
    }

    fn countries_iso_codes(&self) -> Result<HashMap<i64, String>, WebserviceError> {
        Ok(self.countries.clone())
    }

    fn currencies_iso_codes(&self) -> Result<HashMap<u64, String>, WebserviceError> {
        Ok(self.currencies.clone())
    }

    fn mark_exported(&self, order_id: u64) -> Result<(), WebserviceError> {
        if self.fail_marks {
            return Err(mark_failure(order_id));
        }
        self.exported.borrow_mut().push(order_id);
        Ok(())
    }

    fn mark_refunded(&self, order_id: u64) -> Result<(), WebserviceError> {
        if self.fail_marks {
            return Err(mark_failure(order_id));
        }
        self.refunded.borrow_mut().push(order_id);
        Ok(())
    }
}

fn mark_failure(order_id: u64) -> WebserviceError {
    WebserviceError::BadStatus {
        method: "PATCH",
        url: format!("https://shop.example.com/api/orders_printed/{order_id}"),
        status: 500,
        body: String::new(),
    }
}

/// A French delivery/invoice address.
pub fn address_fr(id: u64) -> Address {
    Address {
        id,
        id_country: 8,
        lastname: "Dupont".into(),
        firstname: "Jean".into(),
        address1: "12 rue de la Paix".into(),
        postcode: "75002".into(),
        city: "Paris".into(),
        phone: "0102030405".into(),
        ..Address::default()
    }
}

pub fn product(id: u64, ean: &str, name: &str) -> Product {
    Product {
        id,
        ean13: ean.into(),
        name: name.into(),
        price: dec!(32.500000),
        wholesale_price: dec!(20.700000),
    }
}

/// One-line order paid through an export (no-VAT) channel: equal
/// tax-inclusive and tax-exclusive totals, conversion rate 1.
pub fn export_order(id: u64) -> Order {
    Order {
        id,
        id_address_delivery: 100,
        id_address_invoice: 100,
        id_currency: 1,
        conversion_rate: dec!(1),
        payment: "Amazon - FR".into(),
        reference: "FMHGOYBGK".into(),
        invoice_date: "2024-07-05 19:40:27".into(),
        total_paid: dec!(37.50),
        total_products: dec!(30.00),
        total_products_wt: dec!(30.00),
        total_shipping: dec!(7.50),
        total_shipping_tax_excl: dec!(7.50),
        lines: vec![OrderLine {
            product_id: 1,
            quantity: 1,
            product_name: "Product 1".into(),
            product_ean13: "1111111111111".into(),
            unit_price_tax_incl: dec!(30.00),
            unit_price_tax_excl: dec!(30.00),
        }],
        ..Order::default()
    }
}

/// Payment-method mapping covering the fixtures: the domestic channel with
/// VAT, the export channel without.
pub const PAYMENT_METHODS_CSV: &str = "\
Moyen de paiement;Mode;Code client;Devise;Territorialite;Moyen de paiement EBP
Amazon - FR;TTC;CAMAZFR;EUR;FRANCE;CB AMAZON
Amazon - FR;HT;CAMAZEX;EUR;EXPORT;CB AMAZON
FNAC Marketplace - FR;TTC;CFNACFR;EUR;FRANCE;CB FNAC
";

/// VAT mapping covering the fixtures, exoneration sentinels included.
pub const VAT_CSV: &str = "\
Territorialite;Pays;Taux;Code TVA;c5;c6;c7;c8;c9;c10;c11;c12
FRANCE;8;20,0;TVA20;;;;;;;;
FRANCE;-1;0,0;FREXO;;;;;;;;
EXPORT;-1;0,0;EXO;;;;;;;;
";
