//! Blocking JSON client for the storefront REST API.

use std::collections::HashMap;

use chrono::Local;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::core::{Address, Order, Product};

use super::error::WebserviceError;
use super::payload::{AddressEnvelope, IdEntry, IsoEntry, OrderEnvelope, ProductEnvelope};
use super::Storefront;

/// Page size of the order-listing endpoints.
pub(crate) const PAGE_SIZE: usize = 10;

/// Printed-status values for the `exported` field.
const EXPORTED: u8 = 1;
const REFUNDED: u8 = 2;

/// The real storefront client. One instance per run; authentication is a
/// static API key sent as the HTTP Basic username with an empty password.
#[derive(Debug)]
pub struct WebserviceClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl WebserviceClient {
    /// Build a client for the API at `base_url` (trailing slash ignored).
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, WebserviceError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("Io-Format", HeaderValue::from_static("JSON"));

        let http = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<String, WebserviceError> {
        let url = self.url(endpoint);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.api_key, Some(""))
            .query(query)
            .send()?;
        Self::expect_ok("GET", response)
    }

    fn patch(&self, endpoint: &str, body: String) -> Result<String, WebserviceError> {
        let url = self.url(endpoint);
        let response = self
            .http
            .patch(&url)
            .basic_auth(&self.api_key, Some(""))
            .body(body)
            .send()?;
        Self::expect_ok("PATCH", response)
    }

    /// Any unexpected HTTP status raises immediately; nothing in this
    /// pipeline retries.
    fn expect_ok(method: &'static str, response: Response) -> Result<String, WebserviceError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text()?;
        if status != 200 {
            return Err(WebserviceError::BadStatus {
                method,
                url,
                status,
                body,
            });
        }
        Ok(body)
    }

    /// One listing page of order ids. The `exported` filter separates the
    /// regular phase (0) from the refund phase (1). The upper pagination
    /// bound is `offset + PAGE_SIZE`, so it grows with the offset; that
    /// matches the shop's observed behavior and is kept as is.
    fn order_page(
        &self,
        exported: u8,
        states: &[String],
        offset: usize,
    ) -> Result<Vec<u64>, WebserviceError> {
        let body = self.get(
            "orders_with_printed",
            &[
                ("filter[orders_printed][exported]", exported.to_string()),
                ("filter[current_state]", format!("[{}]", states.join("|"))),
                ("sort", "[id_ASC]".to_string()),
                ("limit", format!("{},{}", offset, offset + PAGE_SIZE)),
            ],
        )?;
        parse_id_page(&body, "orders")
    }

    /// Find the printed-status record of an order and PATCH its `exported`
    /// field. The shop only accepts XML envelopes for partial updates even
    /// though everything else speaks JSON.
    fn set_exported_field(&self, order_id: u64, value: u8) -> Result<(), WebserviceError> {
        let body = self.get(
            "orders_printed",
            &[("filter[id_order]", order_id.to_string())],
        )?;
        let records = parse_id_page(&body, "orders_printed")?;
        let record_id = *records.first().ok_or(WebserviceError::MissingRecord {
            resource: "orders_printed",
            order_id,
        })?;

        let now = Local::now().format("%Y-%m-%d %H:%M:%S");
        let envelope = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <prestashop xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n\
               <order_printed>\n\
                 <id><![CDATA[{record_id}]]></id>\n\
                 <exported><![CDATA[{value}]]></exported>\n\
                 <exported_date><![CDATA[{now}]]></exported_date>\n\
               </order_printed>\n\
             </prestashop>"
        );
        self.patch(&format!("orders_printed/{record_id}"), envelope)?;
        Ok(())
    }

    fn iso_table(&self, endpoint: &str, key: &str) -> Result<Vec<IsoEntry>, WebserviceError> {
        let body = self.get(
            endpoint,
            &[
                ("filter[active]", "1".to_string()),
                ("display", "[id,iso_code]".to_string()),
            ],
        )?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        match value.get(key) {
            Some(list) => Ok(serde_json::from_value(list.clone())?),
            None => Ok(Vec::new()),
        }
    }
}

/// A listing page is either `{"<key>": [{"id": ...}, ...]}` or, when the
/// filter matches nothing, an empty array or an envelope without the key.
fn parse_id_page(body: &str, key: &str) -> Result<Vec<u64>, WebserviceError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: serde_json::Value = serde_json::from_str(body)?;
    match value.get(key) {
        Some(list) => {
            let entries: Vec<IdEntry> = serde_json::from_value(list.clone())?;
            Ok(entries.into_iter().map(|e| e.id).collect())
        }
        None => Ok(Vec::new()),
    }
}

impl Storefront for WebserviceClient {
    fn check_authentication(&self) -> Result<bool, WebserviceError> {
        let response = self
            .http
            .get(format!("{}/", self.base_url))
            .basic_auth(&self.api_key, Some(""))
            .send()?;
        Ok(response.status().as_u16() == 200)
    }

    fn orders_awaiting_export(
        &self,
        states: &[String],
        offset: usize,
    ) -> Result<Vec<u64>, WebserviceError> {
        self.order_page(0, states, offset)
    }

    fn refunds_awaiting_export(
        &self,
        states: &[String],
        offset: usize,
    ) -> Result<Vec<u64>, WebserviceError> {
        self.order_page(1, states, offset)
    }

    fn order(&self, order_id: u64) -> Result<Order, WebserviceError> {
        let body = self.get(&format!("orders/{order_id}"), &[])?;
        let envelope: OrderEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.order.into())
    }

    fn address(&self, address_id: u64) -> Result<Address, WebserviceError> {
        let body = self.get(&format!("addresses/{address_id}"), &[])?;
        let envelope: AddressEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.address.into())
    }

    fn product(&self, product_id: u64) -> Result<Product, WebserviceError> {
        let body = self.get(&format!("products/{product_id}"), &[])?;
        let envelope: ProductEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.product.into())
    }

    fn countries_iso_codes(&self) -> Result<HashMap<i64, String>, WebserviceError> {
        let entries = self.iso_table("countries", "countries")?;
        Ok(entries.into_iter().map(|e| (e.id, e.iso_code)).collect())
    }

    fn currencies_iso_codes(&self) -> Result<HashMap<u64, String>, WebserviceError> {
        let entries = self.iso_table("currencies", "currencies")?;
        Ok(entries
            .into_iter()
            .filter_map(|e| u64::try_from(e.id).ok().map(|id| (id, e.iso_code)))
            .collect())
    }

    fn mark_exported(&self, order_id: u64) -> Result<(), WebserviceError> {
        self.set_exported_field(order_id, EXPORTED)
    }

    fn mark_refunded(&self, order_id: u64) -> Result<(), WebserviceError> {
        self.set_exported_field(order_id, REFUNDED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_the_base_url() {
        let client = WebserviceClient::new("https://shop.example.com/api/", "key").unwrap();
        assert_eq!(client.url("orders/1"), "https://shop.example.com/api/orders/1");
    }

    #[test]
    fn id_page_handles_all_empty_shapes() {
        assert!(parse_id_page("", "orders").unwrap().is_empty());
        assert!(parse_id_page("[]", "orders").unwrap().is_empty());
        assert!(parse_id_page("{}", "orders").unwrap().is_empty());
    }

    #[test]
    fn id_page_extracts_ids_in_order() {
        let ids = parse_id_page(r#"{"orders":[{"id":3},{"id":"7"}]}"#, "orders").unwrap();
        assert_eq!(ids, vec![3, 7]);
    }
}
