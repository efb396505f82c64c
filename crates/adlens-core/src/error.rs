//! Core error type and the user-facing failure taxonomy.

use thiserror::Error;

/// Errors surfaced by the orchestration layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Propagated gateway failure.
    #[error(transparent)]
    Api(#[from] adlens_api::Error),

    /// Input rejected before any request was dispatched.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl CoreError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Coarse classification used to pick a user-facing message.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Api(err) => FailureKind::from(err),
            Self::Validation { .. } => FailureKind::Rejected,
        }
    }

    /// Message suitable for direct display, without transport detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { field, reason } => format!("Invalid {field}: {reason}"),
            Self::Api(err) => match FailureKind::from(err) {
                FailureKind::Connectivity => {
                    "Cannot reach the analytics service. Check your connection and try again."
                        .to_owned()
                }
                FailureKind::Auth => "Your session has expired. Please sign in again.".to_owned(),
                FailureKind::NoData => "No data available for the selected filters.".to_owned(),
                FailureKind::Rejected => err.to_string(),
            },
        }
    }
}

/// The four failure classes shown to users. Everything the gateway can
/// produce folds into one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection refused, DNS failure, timeout, 5xx.
    Connectivity,
    /// Expired or invalid credentials.
    Auth,
    /// The service answered but has nothing for the request.
    NoData,
    /// The service rejected the request as malformed or disallowed.
    Rejected,
}

impl From<&adlens_api::Error> for FailureKind {
    fn from(err: &adlens_api::Error) -> Self {
        if err.is_transient() {
            Self::Connectivity
        } else if err.is_auth_expired() {
            Self::Auth
        } else if err.is_not_found() {
            Self::NoData
        } else {
            Self::Rejected
        }
    }
}
