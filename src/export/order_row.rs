//! The denormalized order-line export record.

/// One row of the order export file.
///
/// The fields mirror the accounting import profile's column set, in
/// declaration order: document header, invoice address, delivery address,
/// VAT, totals, line item, deposit and currency blocks. Every field is a
/// string; columns the connector does not populate stay empty. A row is
/// write-once — it is fully built by the transformer (refund adjustment
/// included) and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOrderRow {
    pub document_use_original_number: String,
    pub document_number_prefix: String,
    pub document_number_suffix: String,
    pub document_number: String,
    pub document_date: String,
    pub document_client_code: String,
    pub document_civil: String,
    pub document_client_name: String,
    pub document_invoice_address_1: String,
    pub document_invoice_address_2: String,
    pub document_invoice_address_3: String,
    pub document_invoice_address_4: String,
    pub document_invoice_zip_code: String,
    pub document_invoice_city: String,
    pub document_invoice_department: String,
    pub document_invoice_country_iso_code: String,
    pub document_invoice_lastname: String,
    pub document_invoice_firstname: String,
    pub document_invoice_phone: String,
    pub document_invoice_mobile_phone: String,
    pub document_invoice_fax: String,
    pub document_invoice_email: String,
    pub document_delivery_address_1: String,
    pub document_delivery_address_2: String,
    pub document_delivery_address_3: String,
    pub document_delivery_address_4: String,
    pub document_delivery_zip_code: String,
    pub document_delivery_city: String,
    pub document_delivery_department: String,
    pub document_delivery_country_iso_code: String,
    pub document_delivery_lastname: String,
    pub document_delivery_firstname: String,
    pub document_delivery_phone: String,
    pub document_delivery_mobile_phone: String,
    pub document_delivery_fax: String,
    pub document_delivery_email: String,
    pub document_territoriality: String,
    pub document_vat_number: String,
    pub document_discount_pct: String,
    pub document_discount_amount: String,
    pub document_escompte_pct: String,
    pub document_escompte_amount: String,
    pub document_shipping_cost_code: String,
    pub document_shipping_cost_notax: String,
    pub document_shipping_cost_vat_rate: String,
    pub document_shipping_tva_code: String,
    pub document_total_notax: String,
    pub document_total: String,
    pub document_notes: String,
    pub line_product_code: String,
    pub line_description: String,
    pub line_quantity: String,
    pub line_vat_rate: String,
    pub line_vat_code: String,
    pub document_commercial_code: String,
    pub line_unit_price_notax: String,
    pub line_unit_price: String,
    pub line_discount_pct: String,
    pub line_discount_notax: String,
    pub line_price_notax: String,
    pub line_price: String,
    pub line_commercial_code: String,
    pub document_payment_method: String,
    pub deposit_amount: String,
    pub deposit_payment_method: String,
    pub deposit_date: String,
    pub document_ignore_prices: String,
    pub document_name_delivery_address: String,
    pub document_depot: String,
    pub document_currency_rate: String,
    pub document_currency_iso_code: String,
    pub deposit_amount_currency: String,
    pub deposit_currency_rate: String,
    pub deposit_currency_iso_code: String,
    pub document_currency_amount: String,
    pub document_currency_amount_notax: String,
    pub document_currency_amount_shipping_notax: String,
    pub line_currency_unit_price_notax: String,
    pub line_currency_cumulative_discount_amount_notax: String,
    pub line_currency_total_notax: String,
    pub document_currency_used: String,
    pub document_series: String,
    pub document_business_code: String,
    pub mroad_id: String,
    pub mroad_technicality: String,
    pub document_client_order_number: String,
    pub line_ignore_linked_products: String,
    pub document_language: String,
}

impl ExportOrderRow {
    /// Number of columns in the order export file.
    pub const FIELD_COUNT: usize = 88;

    /// All fields in declaration order — the serialization contract with
    /// the accounting import profile.
    pub fn fields(&self) -> [&str; Self::FIELD_COUNT] {
        [
            &self.document_use_original_number,
            &self.document_number_prefix,
            &self.document_number_suffix,
            &self.document_number,
            &self.document_date,
            &self.document_client_code,
            &self.document_civil,
            &self.document_client_name,
            &self.document_invoice_address_1,
            &self.document_invoice_address_2,
            &self.document_invoice_address_3,
            &self.document_invoice_address_4,
            &self.document_invoice_zip_code,
            &self.document_invoice_city,
            &self.document_invoice_department,
            &self.document_invoice_country_iso_code,
            &self.document_invoice_lastname,
            &self.document_invoice_firstname,
            &self.document_invoice_phone,
            &self.document_invoice_mobile_phone,
            &self.document_invoice_fax,
            &self.document_invoice_email,
            &self.document_delivery_address_1,
            &self.document_delivery_address_2,
            &self.document_delivery_address_3,
            &self.document_delivery_address_4,
            &self.document_delivery_zip_code,
            &self.document_delivery_city,
            &self.document_delivery_department,
            &self.document_delivery_country_iso_code,
            &self.document_delivery_lastname,
            &self.document_delivery_firstname,
            &self.document_delivery_phone,
            &self.document_delivery_mobile_phone,
            &self.document_delivery_fax,
            &self.document_delivery_email,
            &self.document_territoriality,
            &self.document_vat_number,
            &self.document_discount_pct,
            &self.document_discount_amount,
            &self.document_escompte_pct,
            &self.document_escompte_amount,
            &self.document_shipping_cost_code,
            &self.document_shipping_cost_notax,
            &self.document_shipping_cost_vat_rate,
            &self.document_shipping_tva_code,
            &self.document_total_notax,
            &self.document_total,
            &self.document_notes,
            &self.line_product_code,
            &self.line_description,
            &self.line_quantity,
            &self.line_vat_rate,
            &self.line_vat_code,
            &self.document_commercial_code,
            &self.line_unit_price_notax,
            &self.line_unit_price,
            &self.line_discount_pct,
            &self.line_discount_notax,
            &self.line_price_notax,
            &self.line_price,
            &self.line_commercial_code,
            &self.document_payment_method,
            &self.deposit_amount,
            &self.deposit_payment_method,
            &self.deposit_date,
            &self.document_ignore_prices,
            &self.document_name_delivery_address,
            &self.document_depot,
            &self.document_currency_rate,
            &self.document_currency_iso_code,
            &self.deposit_amount_currency,
            &self.deposit_currency_rate,
            &self.deposit_currency_iso_code,
            &self.document_currency_amount,
            &self.document_currency_amount_notax,
            &self.document_currency_amount_shipping_notax,
            &self.line_currency_unit_price_notax,
            &self.line_currency_cumulative_discount_amount_notax,
            &self.line_currency_total_notax,
            &self.document_currency_used,
            &self.document_series,
            &self.document_business_code,
            &self.mroad_id,
            &self.mroad_technicality,
            &self.document_client_order_number,
            &self.line_ignore_linked_products,
            &self.document_language,
        ]
    }
}
