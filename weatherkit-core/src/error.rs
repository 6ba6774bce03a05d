use thiserror::Error;

use crate::units::Unit;

/// Boxed lower-level failure carried as an error source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure the WeatherKit client can report.
///
/// Callers match on the variant; the underlying cause, when there is one,
/// is available through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The private key file does not exist, cannot be read, or is empty.
    #[error("Private key not found: {location}")]
    KeyNotFound {
        location: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The key bytes are not a usable P-256 PKCS#8 private key.
    #[error("Failed to decode private key: {message}")]
    DecodingKeyFailed {
        message: String,
        #[source]
        source: Option<jsonwebtoken::errors::Error>,
    },

    /// Claims could not be built or the token could not be signed.
    #[error("Failed to create token: {message}")]
    TokenFailed {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    // ── Decoding ────────────────────────────────────────────────────
    /// The response body is not syntactically valid JSON.
    #[error("Failed to decode JSON: {0}")]
    JsonDecodeFailed(#[source] serde_json::Error),

    /// Valid JSON that does not have the expected shape.
    #[error("Malformed payload: {message}")]
    MalformedPayload {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A symbolic name matched no variant of a closed vocabulary.
    #[error("Value '{value}' not found in {enum_name}")]
    ValueNotFound {
        value: String,
        enum_name: &'static str,
    },

    // ── Input validation ────────────────────────────────────────────
    #[error("Missing or non-finite coordinate: {name}")]
    MissingCoordinate { name: &'static str },

    #[error("Coordinate {name} out of range: {value} (allowed {min}..={max})")]
    CoordinateOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    // ── Units ───────────────────────────────────────────────────────
    #[error("Cannot convert {from} to {to}: incompatible quantities")]
    UnsupportedUnitConversion { from: Unit, to: Unit },

    // ── Transport ───────────────────────────────────────────────────
    /// The request never produced an HTTP response.
    #[error("Request failed: {message}")]
    Request {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// HTTP 4xx (and any other non-success status below 500).
    #[error("Client error (HTTP {status}): {body}")]
    Client { status: u16, body: String },

    /// HTTP 5xx.
    #[error("Server error (HTTP {status}): {body}")]
    Server { status: u16, body: String },
}

impl Error {
    pub(crate) fn key_not_found(location: impl Into<String>, source: Option<std::io::Error>) -> Self {
        Self::KeyNotFound {
            location: location.into(),
            source,
        }
    }

    pub(crate) fn token_failed(message: impl Into<String>) -> Self {
        Self::TokenFailed {
            message: message.into(),
            source: None,
        }
    }

    /// HTTP status of a `Client`/`Server` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if upstream answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` for failures raised before any request is sent
    /// (key, token and input validation).
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::KeyNotFound { .. }
                | Self::DecodingKeyFailed { .. }
                | Self::TokenFailed { .. }
                | Self::MissingCoordinate { .. }
                | Self::CoordinateOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_for_http_errors() {
        let err = Error::Server {
            status: 503,
            body: "unavailable".into(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_not_found());

        let err = Error::Client {
            status: 404,
            body: String::new(),
        };
        assert!(err.is_not_found());

        let err = Error::MissingCoordinate { name: "latitude" };
        assert_eq!(err.status(), None);
        assert!(err.is_local());
    }

    #[test]
    fn value_not_found_names_case_and_enum() {
        let err = Error::ValueNotFound {
            value: "MostlyNotClear".into(),
            enum_name: "ConditionCode",
        };
        let msg = err.to_string();
        assert!(msg.contains("MostlyNotClear"));
        assert!(msg.contains("ConditionCode"));
    }
}
