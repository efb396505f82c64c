//! Clap derive structures for the `adlens` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// adlens -- campaign analytics dashboard for the terminal
#[derive(Debug, Parser)]
#[command(
    name = "adlens",
    version,
    about = "Inspect ad-campaign metrics from the command line",
    long_about = "A terminal dashboard for the ad-campaign analytics service.\n\n\
        Shows campaign totals, monthly trends, and per-ad-set breakdowns,\n\
        manages user accounts, and requests AI performance analyses.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Service profile to use
    #[arg(long, short = 'p', env = "ADLENS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Service endpoint URL (overrides profile)
    #[arg(long, short = 'e', env = "ADLENS_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// API key
    #[arg(long, env = "ADLENS_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ADLENS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "ADLENS_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// View campaign dashboards
    #[command(alias = "dash", alias = "d")]
    Dashboard(DashboardArgs),

    /// Manage user accounts
    #[command(alias = "u")]
    Users(UsersArgs),

    /// Request an AI performance analysis
    Analyze(AnalyzeArgs),

    /// Sign in and store an access token
    Login {
        /// Account email
        #[arg(long, required = true)]
        email: String,
    },

    /// Invalidate and forget the stored access token
    Logout,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared filter arguments ──────────────────────────────────────────

/// Date-range and ad-set filters shared by dashboard views.
#[derive(Debug, Args, Clone)]
pub struct WindowArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Restrict to one ad set
    #[arg(long)]
    pub ad_set: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DASHBOARD
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[command(subcommand)]
    pub command: DashboardCommand,
}

#[derive(Debug, Subcommand)]
pub enum DashboardCommand {
    /// Show the metrics summary for a window
    Show(WindowArgs),

    /// Poll the summary continuously until interrupted
    Watch {
        #[command(flatten)]
        window: WindowArgs,

        /// Refresh cadence in seconds
        #[arg(long, short = 'n')]
        interval: Option<u64>,
    },

    /// Show the month-by-month series for a year
    Monthly {
        /// Calendar year (default: current)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Show the per-ad-set breakdown
    #[command(alias = "adsets")]
    AdSets,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List user accounts
    #[command(alias = "ls")]
    List {
        /// Substring match on username or email (case-insensitive)
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Exact role match (e.g. Admin, User)
        #[arg(long)]
        role: Option<String>,

        /// Activation filter
        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// Page to show (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Rows per page
        #[arg(long, default_value = "10")]
        page_size: usize,
    },

    /// Poll the account list continuously until interrupted
    Watch {
        /// Refresh cadence in seconds
        #[arg(long, short = 'n')]
        interval: Option<u64>,
    },

    /// Aggregate statistics over all accounts
    Stats,

    /// Create a user account
    Create {
        /// Username
        #[arg(long, required = true)]
        username: String,

        /// Email address
        #[arg(long, required = true)]
        email: String,

        /// Role
        #[arg(long, default_value = "User")]
        role: String,

        /// Create the account deactivated
        #[arg(long)]
        inactive: bool,
    },

    /// Update a user account
    Update {
        /// Account ID
        id: String,

        /// New username
        #[arg(long, required = true)]
        username: String,

        /// New email address
        #[arg(long, required = true)]
        email: String,

        /// New role
        #[arg(long, required = true)]
        role: String,

        /// Activate or deactivate
        #[arg(long, action = clap::ArgAction::Set, default_value = "true")]
        active: bool,

        /// Prompt for a new password (otherwise unchanged)
        #[arg(long)]
        change_password: bool,
    },

    /// Delete a user account
    Delete {
        /// Account ID
        id: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ANALYZE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long, required = true)]
    pub start: String,

    /// End date (YYYY-MM-DD)
    #[arg(long, required = true)]
    pub end: String,

    /// Restrict the analysis to one ad set
    #[arg(long)]
    pub ad_set: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an API key in the system keyring
    SetKey {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
