use rust_decimal::Decimal;

/// A storefront order, as fetched from the remote webservice.
///
/// Monetary totals use [`rust_decimal::Decimal`] — never floating point.
/// `total_products` is tax-exclusive, `total_products_wt` tax-inclusive;
/// the difference between the two is what decides whether VAT applies
/// (see [`Order::vat_applied`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Storefront order id.
    pub id: u64,
    /// Delivery address id, resolved separately per order.
    pub id_address_delivery: u64,
    /// Invoice address id, resolved separately per order.
    pub id_address_invoice: u64,
    /// Storefront currency id (ISO code resolved via the currencies table).
    pub id_currency: u64,
    /// Storefront language id.
    pub id_lang: u64,
    /// Currency conversion rate. `1` means the shop currency was used.
    pub conversion_rate: Decimal,
    /// Payment method label, e.g. "Amazon - FR". Lookup key into the
    /// payment-method mapping together with the VAT-applied flag.
    pub payment: String,
    /// Customer-facing order reference.
    pub reference: String,
    /// Invoice date as the webservice sends it ("YYYY-MM-DD HH:MM:SS").
    pub invoice_date: String,
    /// Total discount amount, tax-inclusive.
    pub total_discounts: Decimal,
    /// Total paid, tax-inclusive.
    pub total_paid: Decimal,
    /// Product total, tax-exclusive.
    pub total_products: Decimal,
    /// Product total, tax-inclusive ("with taxes").
    pub total_products_wt: Decimal,
    /// Shipping total, tax-inclusive.
    pub total_shipping: Decimal,
    /// Shipping total, tax-exclusive.
    pub total_shipping_tax_excl: Decimal,
    /// True when this order was listed by the refund phase.
    pub is_refund: bool,
    /// Order lines, in storefront order.
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Whether VAT was applied to this order.
    ///
    /// Derived by comparing the tax-inclusive and tax-exclusive product
    /// totals — VAT applies iff the difference is strictly positive. The
    /// order's own "valid" flag is not trusted for this.
    pub fn vat_applied(&self) -> bool {
        self.total_products_wt - self.total_products > Decimal::ZERO
    }
}

impl Default for Order {
    fn default() -> Self {
        Self {
            id: 0,
            id_address_delivery: 0,
            id_address_invoice: 0,
            id_currency: 0,
            id_lang: 0,
            conversion_rate: Decimal::ONE,
            payment: String::new(),
            reference: String::new(),
            invoice_date: String::new(),
            total_discounts: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            total_products: Decimal::ZERO,
            total_products_wt: Decimal::ZERO,
            total_shipping: Decimal::ZERO,
            total_shipping_tax_excl: Decimal::ZERO,
            is_refund: false,
            lines: Vec::new(),
        }
    }
}

/// One order line entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderLine {
    /// Referenced product id. Zero marks a malformed line.
    pub product_id: u64,
    /// Ordered quantity.
    pub quantity: i64,
    /// Product display name at order time.
    pub product_name: String,
    /// Product EAN-13 code, possibly empty.
    pub product_ean13: String,
    /// Unit price, tax-inclusive.
    pub unit_price_tax_incl: Decimal,
    /// Unit price, tax-exclusive.
    pub unit_price_tax_excl: Decimal,
}

impl OrderLine {
    /// Export code for this line: the EAN when present, the product id
    /// otherwise.
    pub fn product_code(&self) -> String {
        let ean = self.product_ean13.trim();
        if ean.is_empty() {
            self.product_id.to_string()
        } else {
            ean.to_string()
        }
    }
}

/// A postal address, used for both delivery and invoice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    /// Storefront address id.
    pub id: u64,
    /// Storefront country id (ISO code resolved via the countries table).
    pub id_country: i64,
    pub company: String,
    pub lastname: String,
    pub firstname: String,
    /// VAT number, possibly empty.
    pub vat_number: String,
    pub address1: String,
    pub address2: String,
    pub postcode: String,
    pub city: String,
    pub phone: String,
    pub phone_mobile: String,
}

impl Address {
    /// Name under which the accounting tool files this address: the company
    /// when one is set, "lastname firstname" otherwise.
    pub fn display_name(&self) -> String {
        let company = self.company.trim();
        if company.is_empty() {
            format!("{} {}", self.lastname.trim(), self.firstname.trim())
                .trim()
                .to_string()
        } else {
            company.to_string()
        }
    }
}

/// A storefront product, fetched once per run when first referenced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    /// Storefront product id.
    pub id: u64,
    /// EAN-13 code, possibly empty.
    pub ean13: String,
    /// Display name.
    pub name: String,
    /// Sale price, tax-exclusive.
    pub price: Decimal,
    /// Wholesale (purchase) price.
    pub wholesale_price: Decimal,
}

impl Product {
    /// Export code for this product: the EAN when present, the id otherwise.
    /// Matches [`OrderLine::product_code`] so the two export files line up.
    pub fn export_code(&self) -> String {
        let ean = self.ean13.trim();
        if ean.is_empty() {
            self.id.to_string()
        } else {
            ean.to_string()
        }
    }
}
