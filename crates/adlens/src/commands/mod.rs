//! Command dispatch: bridges CLI args -> core operations -> output
//! formatting.

pub mod analyze;
pub mod auth;
pub mod config_cmd;
pub mod dashboard;
pub mod users;
pub mod util;

use adlens_core::Dashboard;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    dashboard: &Dashboard,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Dashboard(args) => dashboard::handle(dashboard, args, global).await,
        Command::Users(args) => users::handle(dashboard, args, global).await,
        Command::Analyze(args) => analyze::handle(dashboard, args, global).await,
        // Handled before dispatch; they don't need a connection.
        Command::Login { .. }
        | Command::Logout
        | Command::Config(_)
        | Command::Completions(_) => unreachable!(),
    }
}
