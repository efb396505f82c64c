//! Config command handlers: init, show, profiles, use, set-key.

use serde::Serialize;
use tabled::Tabled;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::Profiles => profiles(global),
        ConfigCommand::Use { name } => use_profile(&name, global),
        ConfigCommand::SetKey { profile } => set_key(profile.as_deref(), global),
    }
}

// ── init ────────────────────────────────────────────────────────────

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path();
    if path.exists() && !util::confirm("Config file exists. Overwrite?", global.yes)? {
        if !global.quiet {
            eprintln!("Aborted");
        }
        return Ok(());
    }

    let endpoint: String = dialoguer::Input::new()
        .with_prompt("Service endpoint URL")
        .validate_with(|input: &String| {
            input
                .parse::<url::Url>()
                .map(|_| ())
                .map_err(|_| "not a valid URL")
        })
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    let profile_name: String = dialoguer::Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    let api_key = util::prompt_password("API key (stored in the system keyring)")?;

    let mut cfg = Config {
        default_profile: Some(profile_name.clone()),
        ..Config::default()
    };
    cfg.profiles.insert(
        profile_name.clone(),
        Profile {
            endpoint,
            ..Profile::default()
        },
    );
    config::save_config(&cfg)?;

    if api_key.trim().is_empty() {
        eprintln!("No API key given; set one later with `adlens config set-key`");
    } else if let Err(err) = config::store_api_key(&profile_name, &api_key) {
        // Keyring may be unavailable (headless systems). Fall back to
        // the config file so the profile still works.
        tracing::warn!(error = %err, "keyring unavailable, storing key in config file");
        if let Some(profile) = cfg.profiles.get_mut(&profile_name) {
            profile.api_key = Some(api_key);
        }
        config::save_config(&cfg)?;
    }

    if !global.quiet {
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

// ── show ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ConfigView {
    path: String,
    profile: String,
    endpoint: Option<String>,
    email: Option<String>,
    api_key_source: &'static str,
    session: &'static str,
    timeout: u64,
    refresh: u64,
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    let api_key_source = match profile {
        _ if global.api_key.is_some() => "flag/env",
        Some(p) if p.api_key_env.is_some() => "env",
        Some(p) if p.api_key.is_some() => "config file",
        Some(_) => "keyring",
        None => "none",
    };
    let session = if config::load_access_token(&profile_name).is_some() {
        "signed in"
    } else {
        "signed out"
    };

    let view = ConfigView {
        path: config::config_path().display().to_string(),
        profile: profile_name,
        endpoint: profile.map(|p| p.endpoint.clone()),
        email: profile.and_then(|p| p.email.clone()),
        api_key_source,
        session,
        timeout: profile
            .and_then(|p| p.timeout)
            .unwrap_or(cfg.defaults.timeout),
        refresh: profile
            .and_then(|p| p.refresh)
            .unwrap_or(cfg.defaults.refresh),
    };

    let renderer = output::Renderer::new(global);
    renderer.single(
        &view,
        |v| {
            renderer
                .details()
                .field("Config file", &v.path)
                .field("Profile", &v.profile)
                .field("Endpoint", v.endpoint.as_deref().unwrap_or("(not set)"))
                .field("Email", v.email.as_deref().unwrap_or("(not set)"))
                .field("API key", v.api_key_source)
                .field("Session", v.session)
                .field("Timeout", format!("{}s", v.timeout))
                .field("Refresh", format!("{}s", v.refresh))
                .render()
        },
        |v| v.profile.clone(),
    );
    Ok(())
}

// ── profiles ────────────────────────────────────────────────────────

#[derive(Serialize, Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "Default")]
    default: String,
}

fn profiles(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    if cfg.profiles.is_empty() {
        return Err(CliError::NoConfig {
            path: config::config_path().display().to_string(),
        });
    }

    let mut rows: Vec<ProfileRow> = cfg
        .profiles
        .iter()
        .map(|(name, profile)| ProfileRow {
            name: name.clone(),
            endpoint: profile.endpoint.clone(),
            default: if cfg.default_profile.as_deref() == Some(name) {
                "*".into()
            } else {
                String::new()
            },
        })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));

    output::Renderer::new(global).list(&rows, |r| r.name.clone());
    Ok(())
}

// ── use / set-key ───────────────────────────────────────────────────

fn use_profile(name: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    if !cfg.profiles.contains_key(name) {
        return Err(CliError::ProfileNotFound { name: name.into() });
    }
    cfg.default_profile = Some(name.to_owned());
    config::save_config(&cfg)?;
    if !global.quiet {
        eprintln!("Default profile set to '{name}'");
    }
    Ok(())
}

fn set_key(profile: Option<&str>, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = profile
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| config::active_profile_name(global, &cfg));
    if !cfg.profiles.contains_key(&profile_name) {
        return Err(CliError::ProfileNotFound { name: profile_name });
    }

    let api_key = util::prompt_password("API key")?;
    if api_key.trim().is_empty() {
        return Err(CliError::Validation {
            field: "api key".into(),
            reason: "must not be empty".into(),
        });
    }
    config::store_api_key(&profile_name, &api_key)?;
    if !global.quiet {
        eprintln!("API key stored for profile '{profile_name}'");
    }
    Ok(())
}
