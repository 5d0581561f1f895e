//! Error types for LiqPay operations.
//!
//! Every failure in this crate is terminal for the message being processed:
//! there is no network I/O, so nothing here is retryable. A callback whose
//! signature does not match is *not* an error; see
//! [`Notification::acknowledge`](crate::Notification::acknowledge).

/// Error codes for FFI and mobile integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum LiqpayErrorCode {
    /// Invalid request/data
    InvalidArgument = 5000,
    /// The `data` field could not be decoded
    MalformedPayload = 5001,
    /// Serialization error
    Serialization = 5002,
}

/// Error type for LiqPay checkout and callback operations.
#[derive(Debug, thiserror::Error)]
pub enum LiqpayError {
    /// The caller supplied an unusable argument, such as an empty callback.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The transmitted `data` field is not base64-encoded JSON.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A field map could not be serialised.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl LiqpayError {
    /// Get the error code for FFI/mobile integration.
    pub fn code(&self) -> LiqpayErrorCode {
        match self {
            Self::InvalidArgument(_) => LiqpayErrorCode::InvalidArgument,
            Self::MalformedPayload(_) => LiqpayErrorCode::MalformedPayload,
            Self::Serialization(_) => LiqpayErrorCode::Serialization,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Create a malformed payload error from any error type.
    pub fn malformed<E: std::fmt::Display>(context: &str, err: E) -> Self {
        Self::MalformedPayload(format!("{}: {}", context, err))
    }
}

impl From<serde_json::Error> for LiqpayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
