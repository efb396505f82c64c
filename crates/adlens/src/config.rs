//! CLI configuration — thin wrapper around `adlens_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--endpoint, --api-key, etc.).

use std::time::Duration;

use secrecy::SecretString;

use adlens_core::ConnectionConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use adlens_config::{
    Config, Defaults, Profile, clear_access_token, config_path, load_access_token,
    load_config_or_default, save_config, store_access_token, store_api_key,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ConnectionConfig` from the config file, profile, and CLI
/// overrides. Flags take priority over profile values.
pub fn build_connection_config(global: &GlobalOpts) -> Result<ConnectionConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, &cfg.defaults, global);
    }

    // No profile -- build from flags / env vars alone.
    let endpoint_str = global.endpoint.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let endpoint: url::Url = endpoint_str.parse().map_err(|_| CliError::Validation {
        field: "endpoint".into(),
        reason: format!("invalid URL: {endpoint_str}"),
    })?;
    let api_key = global
        .api_key
        .clone()
        .map(SecretString::from)
        .ok_or(CliError::NoCredentials {
            profile: profile_name.clone(),
        })?;

    let mut config = ConnectionConfig::new(endpoint, api_key);
    config.access_token = load_access_token(&profile_name);
    config.timeout = Duration::from_secs(global.timeout);
    Ok(config)
}

fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<ConnectionConfig, CliError> {
    // 1. Endpoint (flag > env > profile)
    let endpoint_str = global.endpoint.as_deref().unwrap_or(&profile.endpoint);
    let endpoint: url::Url = endpoint_str.parse().map_err(|_| CliError::Validation {
        field: "endpoint".into(),
        reason: format!("invalid URL: {endpoint_str}"),
    })?;

    // 2. API key (flag > env > keyring > plaintext)
    let api_key = if let Some(ref key) = global.api_key {
        SecretString::from(key.clone())
    } else {
        adlens_config::resolve_api_key(profile, profile_name)?
    };

    let mut config = ConnectionConfig::new(endpoint, api_key);
    config.access_token = load_access_token(profile_name);
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.refresh_period = Duration::from_secs(profile.refresh.unwrap_or(defaults.refresh));
    Ok(config)
}
