//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` failure classes into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use adlens_core::{CoreError, FailureKind};

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NO_DATA: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Cannot reach the analytics service")]
    #[diagnostic(
        code(adlens::connection_failed),
        help(
            "Check that the service is running and your connection is up.\n\
             Detail: {detail}"
        )
    )]
    ConnectionFailed { detail: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {detail}")]
    #[diagnostic(
        code(adlens::auth_failed),
        help(
            "Your session may have expired or the API key was rejected.\n\
             Run: adlens login --email <you>  (or check the configured API key)"
        )
    )]
    AuthFailed { detail: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(adlens::no_credentials),
        help(
            "Configure credentials with: adlens config init\n\
             Or set the ADLENS_API_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    #[error("This command requires a signed-in session")]
    #[diagnostic(
        code(adlens::login_required),
        help("Run: adlens login --email <you>")
    )]
    LoginRequired,

    // ── Data ─────────────────────────────────────────────────────────

    #[error("No data available for the selected filters")]
    #[diagnostic(
        code(adlens::no_data),
        help("Widen the date range or drop the ad-set filter.")
    )]
    NoData,

    #[error("The service rejected the request: {message}")]
    #[diagnostic(code(adlens::rejected))]
    Rejected { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(adlens::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(adlens::profile_not_found),
        help("List profiles with: adlens config profiles\nCreate one with: adlens config init")
    )]
    ProfileNotFound { name: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(adlens::no_config),
        help(
            "Create one with: adlens config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(adlens::config))]
    Config(#[from] adlens_config::ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(adlens::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } | Self::LoginRequired => {
                exit_code::AUTH
            }
            Self::NoData => exit_code::NO_DATA,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::Validation { field, reason } => Self::Validation {
                field: field.clone(),
                reason: reason.clone(),
            },
            CoreError::Api(_) => match err.kind() {
                FailureKind::Connectivity => Self::ConnectionFailed {
                    detail: err.to_string(),
                },
                FailureKind::Auth => Self::AuthFailed {
                    detail: err.to_string(),
                },
                FailureKind::NoData => Self::NoData,
                FailureKind::Rejected => Self::Rejected {
                    message: err.user_message(),
                },
            },
        }
    }
}
