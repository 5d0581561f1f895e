//! Typed views over the callback `status` and `type` fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment status reported by the gateway.
///
/// Only [`Success`](Self::Success) and [`Sandbox`](Self::Sandbox) mean the
/// payer was charged. Unrecognised strings are kept in
/// [`Other`](Self::Other) so nothing is lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Success,
    Failure,
    WaitSecure,
    WaitAccept,
    WaitLc,
    Processing,
    Sandbox,
    Subscribed,
    Unsubscribed,
    Reversed,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::WaitSecure => "wait_secure",
            Self::WaitAccept => "wait_accept",
            Self::WaitLc => "wait_lc",
            Self::Processing => "processing",
            Self::Sandbox => "sandbox",
            Self::Subscribed => "subscribed",
            Self::Unsubscribed => "unsubscribed",
            Self::Reversed => "reversed",
            Self::Other(s) => s,
        }
    }

    /// True only for `success` and `sandbox`.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Success | Self::Sandbox)
    }

    /// True while the gateway still awaits verification or settlement.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::WaitSecure | Self::WaitAccept | Self::WaitLc | Self::Processing
        )
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s {
            "success" => Self::Success,
            "failure" => Self::Failure,
            "wait_secure" => Self::WaitSecure,
            "wait_accept" => Self::WaitAccept,
            "wait_lc" => Self::WaitLc,
            "processing" => Self::Processing,
            "sandbox" => Self::Sandbox,
            "subscribed" => Self::Subscribed,
            "unsubscribed" => Self::Unsubscribed,
            "reversed" => Self::Reversed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation type (`type` field).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaymentType {
    Buy,
    Donate,
    Other(String),
}

impl PaymentType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Buy => "buy",
            Self::Donate => "donate",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for PaymentType {
    fn from(s: &str) -> Self {
        match s {
            "buy" => Self::Buy,
            "donate" => Self::Donate,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
