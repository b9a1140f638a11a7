use reqwest::StatusCode;
use thiserror::Error;


// Why an order did not go through
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("cart is empty, nothing to order")]
    EmptyCart,
    #[error("an order is already being sent")]
    InFlight,
    #[error("order endpoint answered {0}")]
    Rejected(StatusCode),
    #[error("order request failed: {0}")]
    Http(#[from] reqwest::Error),
}

// Problems turning command-line arguments into a usable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid order endpoint {url:?}: {reason}")]
    Endpoint { url: String, reason: String },
    #[error("request timeout must be positive")]
    ZeroTimeout,
    #[error("cannot read catalog {path}: {source}")]
    Catalog {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
