//! Error handling primitives shared across the core.
//!
//! Every failure surfaces to the caller as-is; nothing in the crate retries or
//! recovers internally.

use thiserror::Error;

/// Stable error codes attached to structured log events.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SweatCode {
    /// Success code used as a sentinel.
    Ok = 0,
    /// Reference groups, labels, target terms or parameters were malformed.
    InvalidConfiguration = 1,
    /// A similarity provider could not resolve a term.
    ProviderLookup = 2,
    /// Requested a test variant that is not implemented.
    UnsupportedOperation = 3,
    /// Zero spread where a standardised value was required.
    DegenerateInput = 4,
}

/// Canonical error type for the core.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SweatError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Out-of-vocabulary terms invalidate the whole test.
    #[error("term `{term}` could not be resolved: {reason}")]
    ProviderLookup { term: String, reason: String },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

/// Result alias used throughout the crate.
pub type SweatResult<T> = Result<T, SweatError>;

impl SweatError {
    /// Validation helper.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Lookup helper for providers.
    pub fn lookup(term: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProviderLookup {
            term: term.into(),
            reason: reason.into(),
        }
    }

    /// Marks a variant that is deliberately left unimplemented.
    pub const fn not_implemented(feature: &'static str) -> Self {
        Self::UnsupportedOperation(feature)
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateInput(msg.into())
    }

    /// Machine parsable code for this error.
    pub fn code(&self) -> SweatCode {
        match self {
            Self::InvalidConfiguration(_) => SweatCode::InvalidConfiguration,
            Self::ProviderLookup { .. } => SweatCode::ProviderLookup,
            Self::UnsupportedOperation(_) => SweatCode::UnsupportedOperation,
            Self::DegenerateInput(_) => SweatCode::DegenerateInput,
        }
    }
}
