//! Serde payloads for the storefront's JSON responses.
//!
//! The webservice serializes nearly every scalar as a string
//! (`"total_products": "9.780000"`, `"id_country": "8"`), but numbers do
//! slip through on some installations, so every field here goes through a
//! lenient string-or-number deserializer. Missing fields default.

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;

use crate::core::{Address, Order, OrderLine, Product};

#[derive(Debug, Deserialize)]
pub(crate) struct OrderEnvelope {
    pub order: OrderPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddressEnvelope {
    pub address: AddressPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductEnvelope {
    pub product: ProductPayload,
}

/// Entry of an id-only listing page (`orders`, `orders_printed`).
#[derive(Debug, Deserialize)]
pub(crate) struct IdEntry {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
}

/// Entry of the countries/currencies ISO-code tables.
#[derive(Debug, Deserialize)]
pub(crate) struct IsoEntry {
    #[serde(deserialize_with = "de_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "de_string")]
    pub iso_code: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderPayload {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_u64")]
    pub id_address_delivery: u64,
    #[serde(default, deserialize_with = "de_u64")]
    pub id_address_invoice: u64,
    #[serde(default, deserialize_with = "de_u64")]
    pub id_currency: u64,
    #[serde(default, deserialize_with = "de_u64")]
    pub id_lang: u64,
    #[serde(default = "decimal_one", deserialize_with = "de_decimal")]
    pub conversion_rate: Decimal,
    #[serde(default, deserialize_with = "de_string")]
    pub payment: String,
    #[serde(default, deserialize_with = "de_string")]
    pub reference: String,
    #[serde(default, deserialize_with = "de_string")]
    pub invoice_date: String,
    #[serde(default, deserialize_with = "de_decimal")]
    pub total_discounts: Decimal,
    #[serde(default, deserialize_with = "de_decimal")]
    pub total_paid: Decimal,
    #[serde(default, deserialize_with = "de_decimal")]
    pub total_products: Decimal,
    #[serde(default, deserialize_with = "de_decimal")]
    pub total_products_wt: Decimal,
    #[serde(default, deserialize_with = "de_decimal")]
    pub total_shipping: Decimal,
    #[serde(default, deserialize_with = "de_decimal")]
    pub total_shipping_tax_excl: Decimal,
    #[serde(default)]
    pub associations: Associations,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Associations {
    #[serde(default)]
    pub order_rows: Vec<OrderRowPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderRowPayload {
    #[serde(default, deserialize_with = "de_u64")]
    pub product_id: u64,
    #[serde(default, deserialize_with = "de_i64")]
    pub product_quantity: i64,
    #[serde(default, deserialize_with = "de_string")]
    pub product_name: String,
    #[serde(default, deserialize_with = "de_string")]
    pub product_ean13: String,
    #[serde(default, deserialize_with = "de_decimal")]
    pub unit_price_tax_incl: Decimal,
    #[serde(default, deserialize_with = "de_decimal")]
    pub unit_price_tax_excl: Decimal,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddressPayload {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_i64")]
    pub id_country: i64,
    #[serde(default, deserialize_with = "de_string")]
    pub company: String,
    #[serde(default, deserialize_with = "de_string")]
    pub lastname: String,
    #[serde(default, deserialize_with = "de_string")]
    pub firstname: String,
    #[serde(default, deserialize_with = "de_string")]
    pub vat_number: String,
    #[serde(default, deserialize_with = "de_string")]
    pub address1: String,
    #[serde(default, deserialize_with = "de_string")]
    pub address2: String,
    #[serde(default, deserialize_with = "de_string")]
    pub postcode: String,
    #[serde(default, deserialize_with = "de_string")]
    pub city: String,
    #[serde(default, deserialize_with = "de_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "de_string")]
    pub phone_mobile: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductPayload {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_string")]
    pub ean13: String,
    #[serde(default)]
    pub name: LocalizedText,
    #[serde(default, deserialize_with = "de_decimal")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "de_decimal")]
    pub wholesale_price: Decimal,
}

/// A text field that is either plain or a per-language list
/// (`[{"id": 1, "value": "..."}]`). The first non-null value wins.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LocalizedText {
    Plain(String),
    Localized(Vec<LocalizedValue>),
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocalizedValue {
    #[serde(default)]
    pub value: Option<String>,
}

impl Default for LocalizedText {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl LocalizedText {
    fn into_string(self) -> String {
        match self {
            Self::Plain(s) => s,
            Self::Localized(values) => values
                .into_iter()
                .find_map(|v| v.value)
                .unwrap_or_default(),
        }
    }
}

impl From<OrderPayload> for Order {
    fn from(payload: OrderPayload) -> Self {
        Self {
            id: payload.id,
            id_address_delivery: payload.id_address_delivery,
            id_address_invoice: payload.id_address_invoice,
            id_currency: payload.id_currency,
            id_lang: payload.id_lang,
            conversion_rate: payload.conversion_rate,
            payment: payload.payment,
            reference: payload.reference,
            invoice_date: payload.invoice_date,
            total_discounts: payload.total_discounts,
            total_paid: payload.total_paid,
            total_products: payload.total_products,
            total_products_wt: payload.total_products_wt,
            total_shipping: payload.total_shipping,
            total_shipping_tax_excl: payload.total_shipping_tax_excl,
            is_refund: false,
            lines: payload
                .associations
                .order_rows
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<OrderRowPayload> for OrderLine {
    fn from(payload: OrderRowPayload) -> Self {
        Self {
            product_id: payload.product_id,
            quantity: payload.product_quantity,
            product_name: payload.product_name,
            product_ean13: payload.product_ean13,
            unit_price_tax_incl: payload.unit_price_tax_incl,
            unit_price_tax_excl: payload.unit_price_tax_excl,
        }
    }
}

impl From<AddressPayload> for Address {
    fn from(payload: AddressPayload) -> Self {
        Self {
            id: payload.id,
            id_country: payload.id_country,
            company: payload.company,
            lastname: payload.lastname,
            firstname: payload.firstname,
            vat_number: payload.vat_number,
            address1: payload.address1,
            address2: payload.address2,
            postcode: payload.postcode,
            city: payload.city,
            phone: payload.phone,
            phone_mobile: payload.phone_mobile,
        }
    }
}

impl From<ProductPayload> for Product {
    fn from(payload: ProductPayload) -> Self {
        Self {
            id: payload.id,
            ean13: payload.ean13,
            name: payload.name.into_string(),
            price: payload.price,
            wholesale_price: payload.wholesale_price,
        }
    }
}

fn decimal_one() -> Decimal {
    Decimal::ONE
}

/// Decimal from a JSON string or number. Empty strings parse as zero.
pub(crate) fn de_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    struct DecimalVisitor;

    impl Visitor<'_> for DecimalVisitor {
        type Value = Decimal;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a decimal number or a string holding one")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(Decimal::ZERO);
            }
            v.parse().map_err(E::custom)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
            Decimal::try_from(v).map_err(E::custom)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }
    }

    deserializer.deserialize_any(DecimalVisitor)
}

/// u64 from a JSON number or string. Empty strings parse as zero.
pub(crate) fn de_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    struct U64Visitor;

    impl Visitor<'_> for U64Visitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an unsigned integer or a string holding one")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(0);
            }
            v.parse().map_err(E::custom)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U64Visitor)
}

/// i64 from a JSON number or string. Empty strings parse as zero.
pub(crate) fn de_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    struct I64Visitor;

    impl Visitor<'_> for I64Visitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer or a string holding one")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(0);
            }
            v.parse().map_err(E::custom)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

/// String from a JSON string or number (some installations send numeric
/// invoice numbers, VAT numbers, EANs).
pub(crate) fn de_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    struct StringVisitor;

    impl Visitor<'_> for StringVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringVisitor)
}
