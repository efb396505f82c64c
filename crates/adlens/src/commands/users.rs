//! User account command handlers.
//!
//! Account management requires a bearer token from `adlens login`; the
//! gateway rejects these calls with the API key alone.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tabled::Tabled;

use adlens_core::{
    AccountEdit, Dashboard, FilterCriteria, NewAccount, ReadinessGate, RenderSurface,
    StatusFilter, UserRecord, project,
};

use crate::cli::{GlobalOpts, StatusArg, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Row types ───────────────────────────────────────────────────────

#[derive(Serialize, Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last Login")]
    last_login: String,
}

impl From<&UserRecord> for UserRow {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            status: if user.is_active { "active" } else { "inactive" }.to_owned(),
            last_login: user
                .last_login
                .map_or_else(|| "never".to_owned(), |t| util::relative_time(t, Utc::now())),
        }
    }
}

#[derive(Serialize)]
struct StatsView {
    total: usize,
    active: usize,
    admins: usize,
    recent: usize,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: UsersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // The gateway rejects account calls made with the API key alone;
    // fail here before any prompt or request goes out.
    if dashboard.config().access_token.is_none() {
        return Err(CliError::LoginRequired);
    }

    match args.command {
        UsersCommand::List {
            search,
            role,
            status,
            page,
            page_size,
        } => list(dashboard, search, role, status, page, page_size, global).await,
        UsersCommand::Watch { interval } => watch(dashboard, interval, global).await,
        UsersCommand::Stats => stats(dashboard, global).await,
        UsersCommand::Create {
            username,
            email,
            role,
            inactive,
        } => create(dashboard, username, email, role, !inactive, global).await,
        UsersCommand::Update {
            id,
            username,
            email,
            role,
            active,
            change_password,
        } => {
            update(
                dashboard,
                &id,
                username,
                email,
                role,
                active,
                change_password,
                global,
            )
            .await
        }
        UsersCommand::Delete { id } => delete(dashboard, &id, global).await,
    }
}

async fn list(
    dashboard: &Dashboard,
    search: Option<String>,
    role: Option<String>,
    status: Option<StatusArg>,
    page: usize,
    page_size: usize,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    dashboard.accounts().refresh().await?;

    let filters = FilterCriteria {
        search: search.unwrap_or_default(),
        role,
        status: status.map(|s| match s {
            StatusArg::Active => StatusFilter::Active,
            StatusArg::Inactive => StatusFilter::Inactive,
        }),
    };
    let records = dashboard.store().users();
    let view = project(&records, &filters, page, page_size);

    if view.page_items.is_empty() {
        return Err(CliError::NoData);
    }

    let rows: Vec<UserRow> = view.page_items.iter().map(|u| UserRow::from(&**u)).collect();
    let renderer = output::Renderer::new(global);
    renderer.list(&rows, |r| r.id.clone());
    renderer.note(&format!(
        "Page {}/{} ({} matching account{})",
        view.page,
        view.total_pages,
        view.filtered_count,
        if view.filtered_count == 1 { "" } else { "s" }
    ));
    Ok(())
}

// ── watch ───────────────────────────────────────────────────────────

/// Terminal sink for directory snapshots. A snapshot arriving before
/// the banner is painted waits in the gate instead of printing above
/// an incomplete header.
struct DirectoryScreen {
    renderer: output::Renderer,
    initialized: AtomicBool,
}

impl RenderSurface<Arc<Vec<Arc<UserRecord>>>> for DirectoryScreen {
    fn try_apply(&self, update: &Arc<Vec<Arc<UserRecord>>>) -> bool {
        if !self.initialized.load(Ordering::SeqCst) {
            return false;
        }
        let rows: Vec<UserRow> = update.iter().map(|u| UserRow::from(&**u)).collect();
        self.renderer.list(&rows, |r| r.id.clone());
        self.renderer.note(&format!(
            "{} account{}",
            update.len(),
            if update.len() == 1 { "" } else { "s" }
        ));
        true
    }
}

/// Re-fetch the account list on a cadence until Ctrl-C, rendering
/// each change through the readiness gate.
async fn watch(
    dashboard: &Dashboard,
    interval: Option<u64>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let period = interval.map_or(dashboard.config().refresh_period, Duration::from_secs);

    let screen = Arc::new(DirectoryScreen {
        renderer: output::Renderer::new(global),
        initialized: AtomicBool::new(false),
    });
    let gate = ReadinessGate::spawn(Arc::clone(&screen), dashboard.cancellation());

    let mut users_rx = dashboard.store().subscribe_users();
    let handle = dashboard.start_users_refresh(period);

    if !global.quiet {
        eprintln!(
            "Watching accounts (refresh every {}s, Ctrl-C to stop)",
            period.as_secs()
        );
    }
    // The first fetch may already have settled; the gate has been
    // holding it until the banner was out.
    screen.initialized.store(true, Ordering::SeqCst);

    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                break;
            }
            changed = users_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                gate.apply_when_ready(users_rx.borrow_and_update().clone());
            }
        }
    }

    handle.stopped().await;
    gate.shutdown().await;
    if !global.quiet {
        eprintln!("Stopped");
    }
    Ok(())
}

async fn stats(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    dashboard.accounts().refresh().await?;

    let records = dashboard.store().users();
    let stats = adlens_core::directory_stats(&records, Utc::now());
    let view = StatsView {
        total: stats.total,
        active: stats.active,
        admins: stats.admins,
        recent: stats.recent,
    };

    let renderer = output::Renderer::new(global);
    renderer.single(
        &view,
        |v| {
            renderer
                .details()
                .field("Total accounts", v.total.to_string())
                .field("Active", v.active.to_string())
                .field("Admins", v.admins.to_string())
                .field("Created in last 7 days", v.recent.to_string())
                .render()
        },
        |v| v.total.to_string(),
    );
    Ok(())
}

async fn create(
    dashboard: &Dashboard,
    username: String,
    email: String,
    role: String,
    is_active: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = util::prompt_password("Password for the new account")?;
    dashboard
        .accounts()
        .create(NewAccount {
            username: username.clone(),
            email,
            password,
            role,
            is_active,
        })
        .await?;
    if !global.quiet {
        eprintln!("Created account '{username}'");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn update(
    dashboard: &Dashboard,
    id: &str,
    username: String,
    email: String,
    role: String,
    is_active: bool,
    change_password: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = if change_password {
        Some(util::prompt_password("New password")?)
    } else {
        None
    };
    dashboard
        .accounts()
        .update(
            id,
            AccountEdit {
                username: username.clone(),
                email,
                password,
                role,
                is_active,
            },
        )
        .await?;
    if !global.quiet {
        eprintln!("Updated account '{username}'");
    }
    Ok(())
}

async fn delete(dashboard: &Dashboard, id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    if !util::confirm(&format!("Delete account {id}?"), global.yes)? {
        if !global.quiet {
            eprintln!("Aborted");
        }
        return Ok(());
    }
    dashboard.accounts().delete(id).await?;
    if !global.quiet {
        eprintln!("Deleted account {id}");
    }
    Ok(())
}
