use thiserror::Error;

/// Message shown when a catalog failure carries nothing more specific.
pub const GENERIC_LOAD_ERROR: &str = "Unable to load products. Please try again.";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Product not found: {0}")]
    NotFound(u64),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Catalog responded with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

impl CatalogError {
    /// Human readable text for the failure, preferring the backend's own
    /// `message` when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_LOAD_ERROR.to_string(),
        }
    }
}

/// Rejections for links that do not name an in-app screen.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LinkError {
    #[error("Malformed link: {0}")]
    Malformed(String),
    #[error("Unsupported link scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Unknown link host: {0}")]
    UnknownHost(String),
    #[error("Unknown link route: {0}")]
    UnknownRoute(String),
    #[error("Invalid product id in link: {0}")]
    InvalidProductId(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShareError {
    #[error("Share sheet unavailable")]
    Unavailable,
    #[error("Share failed: {0}")]
    Failed(String),
}

/// Failures talking to a service task rather than failures of the service itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("Service communication error: channel closed")]
    Closed,
    #[error("Service communication error: response dropped")]
    Dropped,
    #[error("Service task failed: {0}")]
    TaskFailed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_is_preferred() {
        let err = CatalogError::Status {
            status: 500,
            message: Some("Catalog is down for maintenance".to_string()),
        };
        assert_eq!(err.user_message(), "Catalog is down for maintenance");
    }

    #[test]
    fn falls_back_to_generic_message() {
        assert_eq!(
            CatalogError::Network("connection refused".into()).user_message(),
            GENERIC_LOAD_ERROR
        );
        let blank = CatalogError::Status {
            status: 502,
            message: Some("  ".into()),
        };
        assert_eq!(blank.user_message(), GENERIC_LOAD_ERROR);
    }
}
