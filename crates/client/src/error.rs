//! Errors from the checks API layer.

use serde::Deserialize;
use stratus_core::CodecError;

/// Errors returned by [`crate::ChecksApi`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error code from the server, when present.
        code: Option<String>,
        /// Human-readable message, or the raw body when the error
        /// payload was not the expected JSON shape.
        message: String,
    },

    /// A check or threshold body failed to encode or decode.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Error payload shape returned by the server on failures.
#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Build an [`ApiError::Api`] from a non-2xx response body.
///
/// The server normally answers with `{"code": ..., "message": ...}`;
/// anything else falls back to the raw body text.
pub(crate) fn decode_error(status: u16, body: &[u8]) -> ApiError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) if parsed.code.is_some() || parsed.message.is_some() => ApiError::Api {
            status,
            code: parsed.code,
            message: parsed.message.unwrap_or_default(),
        },
        _ => ApiError::Api {
            status,
            code: None,
            message: String::from_utf8_lossy(body).into_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn decodes_structured_error_body() {
        let err = decode_error(404, br#"{"code":"not found","message":"check not found"}"#);
        assert_matches!(err, ApiError::Api { status, code, message } => {
            assert_eq!(status, 404);
            assert_eq!(code.as_deref(), Some("not found"));
            assert_eq!(message, "check not found");
        });
    }

    #[test]
    fn falls_back_to_raw_body_text() {
        let err = decode_error(502, b"Bad Gateway");
        assert_matches!(err, ApiError::Api { status, code, message } => {
            assert_eq!(status, 502);
            assert_eq!(code, None);
            assert_eq!(message, "Bad Gateway");
        });
    }

    #[test]
    fn json_body_without_error_fields_is_raw_text() {
        let err = decode_error(500, br#"{"detail":"boom"}"#);
        assert_matches!(err, ApiError::Api { message, .. } => {
            assert_eq!(message, r#"{"detail":"boom"}"#);
        });
    }
}
