use thiserror::Error;

/// Errors from the storefront webservice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WebserviceError {
    /// The API answered with an unexpected HTTP status. Never retried.
    #[error("{method} {url}: unexpected HTTP status {status}: {body}")]
    BadStatus {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// Connection, TLS or protocol failure below the HTTP layer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected JSON shape.
    #[error("unexpected payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// A lookup that must yield a record came back empty, e.g. no
    /// printed-status record exists for an order being marked exported.
    #[error("no {resource} record for order {order_id}")]
    MissingRecord {
        resource: &'static str,
        order_id: u64,
    },
}
