//! Login / logout handlers.
//!
//! Login stores the bearer token in the system keyring under the
//! active profile; logout invalidates it server-side and forgets it.

use secrecy::{ExposeSecret, SecretString};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

use super::util;

pub async fn login(email: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let connection = config::build_connection_config(global)?;
    let password = SecretString::from(util::prompt_password(&format!("Password for {email}"))?);

    let session = adlens_core::login(
        &connection.endpoint,
        &connection.api_key,
        email,
        &password,
        connection.timeout,
    )
    .await?;

    let mut cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    config::store_access_token(&profile_name, session.access_token.expose_secret())?;

    // Remember the email so `config show` can display who is signed in.
    if let Some(profile) = cfg.profiles.get_mut(&profile_name) {
        profile.email = Some(email.to_owned());
        config::save_config(&cfg)?;
    }

    if !global.quiet {
        match session.username {
            Some(username) => eprintln!("Signed in as {username}"),
            None => eprintln!("Signed in"),
        }
    }
    Ok(())
}

pub async fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);

    let Some(token) = config::load_access_token(&profile_name) else {
        if !global.quiet {
            eprintln!("No stored session for profile '{profile_name}'");
        }
        return Ok(());
    };

    // Best-effort server-side invalidation; the token is forgotten
    // locally either way.
    match config::build_connection_config(global) {
        Ok(connection) => {
            if let Err(err) = adlens_core::logout(
                &connection.endpoint,
                &connection.api_key,
                &token,
                connection.timeout,
            )
            .await
            {
                tracing::warn!(error = %err, "server-side logout failed");
            }
        }
        Err(err) => tracing::warn!(error = %err, "skipping server-side logout"),
    }

    config::clear_access_token(&profile_name)?;
    if !global.quiet {
        eprintln!("Signed out of profile '{profile_name}'");
    }
    Ok(())
}
