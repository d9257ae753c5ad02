//! Error types for the e-Stat client.
//!
//! Uses the dual-error pattern: `EstatError` for library consumers, with
//! `TransportError` and `DecodeError` carrying the detail of the two stages
//! a call can fail in.

use std::time::Duration;

use thiserror::Error;

/// Main error type for client operations.
#[derive(Debug, Error)]
pub enum EstatError {
    /// The HTTP exchange could not be completed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response body did not decode into the expected envelope.
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: DecodeError,
    },

    /// The JSON request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The caller cancelled the call before the exchange completed.
    #[error("request cancelled")]
    Cancelled,

    /// The call's deadline elapsed before the exchange completed.
    #[error("request deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Failure to perform the HTTP exchange or read its body.
///
/// A non-2xx status is not a transport error; it is handed back together
/// with the body.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Error reported by the HTTP client (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O failure from a non-reqwest transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The base URL and path did not form a valid URL.
    #[error("invalid request URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Failure to decode a response body.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not well-formed XML (this includes an empty body).
    #[error("XML parsing failed: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The body is not valid UTF-8.
    #[error("response body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The document root is not the element this operation returns.
    #[error("unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    /// A required element is absent.
    #[error("missing required XML element: {element} in {context}")]
    MissingElement {
        element: &'static str,
        context: String,
    },

    /// A payload element holds a value outside its type's domain, such as a
    /// count that is not an integer.
    #[error("invalid value in <{element}>: '{value}'")]
    InvalidValue { element: String, value: String },

    /// A timestamp element could not be parsed.
    #[error("invalid timestamp in <{element}>: '{value}'")]
    InvalidTimestamp { element: String, value: String },
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, EstatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = EstatError::Decode {
            operation: "getStatsList",
            source: DecodeError::UnexpectedRoot {
                expected: "GET_STATS_LIST",
                found: "GET_META_INFO".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "failed to decode getStatsList response: unexpected root element <GET_META_INFO>, expected <GET_STATS_LIST>"
        );
    }

    #[test]
    fn test_transport_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err: EstatError = TransportError::from(io).into();
        assert!(matches!(err, EstatError::Transport(TransportError::Io(_))));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_missing_element_display() {
        let err = DecodeError::MissingElement {
            element: "RESULT",
            context: "GET_STATS_DATA".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "missing required XML element: RESULT in GET_STATS_DATA"
        );
    }
}
