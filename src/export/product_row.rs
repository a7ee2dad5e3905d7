//! The product export record.

use rust_decimal::Decimal;

use crate::core::Product;

/// Goods type literal expected by the accounting import profile.
const PRODUCT_TYPE: &str = "BIEN";

/// One row of the product export file.
///
/// Columns: code, name, the fixed type literal `BIEN`, sale price,
/// wholesale price, EAN. Write-once, built from a fetched [`Product`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportProductRow {
    pub code: String,
    pub name: String,
    pub price: String,
    pub wholesale_price: String,
    pub ean13: String,
}

impl ExportProductRow {
    /// Number of columns in the product export file.
    pub const FIELD_COUNT: usize = 6;

    /// All fields in declaration order, the type literal included.
    pub fn fields(&self) -> [&str; Self::FIELD_COUNT] {
        [
            &self.code,
            &self.name,
            PRODUCT_TYPE,
            &self.price,
            &self.wholesale_price,
            &self.ean13,
        ]
    }
}

impl From<&Product> for ExportProductRow {
    fn from(product: &Product) -> Self {
        Self {
            code: product.export_code(),
            name: product.name.clone(),
            price: format_price(product.price),
            wholesale_price: format_price(product.wholesale_price),
            ean13: product.ean13.clone(),
        }
    }
}

fn format_price(d: Decimal) -> String {
    format!("{:.6}", d.round_dp(6))
}
