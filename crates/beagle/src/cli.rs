//! Clap derive structures for the `beagle` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Depends on clap alone so `build.rs` can render man pages from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// beagle -- administer the beagle-wind game platform
#[derive(Debug, Parser)]
#[command(
    name = "beagle",
    version,
    about = "Manage beagle-wind game nodes, platforms, cards and instances",
    long_about = "Command-line client for the beagle-wind game platform.\n\n\
        Talks to the live REST API by default. With --mock (or use_mock in the\n\
        config file) it serves built-in fixtures with simulated latency instead.",
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
    /// Serve fixture data instead of calling the API
    #[arg(long, global = true)]
    pub mock: bool,

    /// API server URL (overrides api.base_url)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token (overrides env, keyring and config)
    #[arg(long, global = true, hide = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BEAGLE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides api.timeout)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output ───────────────────────────────────────────────────────────

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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage game nodes
    #[command(alias = "node", alias = "n")]
    Nodes(NodesArgs),

    /// Manage game platforms and their remote-access links
    #[command(alias = "platform", alias = "p")]
    Platforms(PlatformsArgs),

    /// Manage game cards (catalog entries)
    #[command(alias = "card", alias = "c")]
    Cards(CardsArgs),

    /// Manage game instances
    #[command(alias = "instance", alias = "i")]
    Instances(InstancesArgs),

    /// Convert node telemetry between schema generations
    #[command(alias = "tm")]
    Telemetry(TelemetryArgs),

    /// Inspect and edit the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Resource Commands ─────────────────────────────────────────

/// Operations every resource supports.
#[derive(Debug, Subcommand)]
pub enum CrudCommand {
    /// List records, one page at a time
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one record
    Get {
        /// Record ID
        id: String,
    },

    /// Create a record from a JSON file
    Create {
        /// JSON payload file
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Update a record from a JSON file
    Update {
        /// Record ID
        id: String,

        /// JSON payload file
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Record ID
        id: String,
    },
}

/// Pagination and keyword filtering for list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Records per page
    #[arg(long, short = 'l', default_value = "10")]
    pub page_size: u32,

    /// Case-insensitive keyword filter
    #[arg(long, visible_alias = "search")]
    pub keyword: Option<String>,
}

// ── Nodes ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NodesArgs {
    #[command(subcommand)]
    pub command: NodesCommand,
}

#[derive(Debug, Subcommand)]
pub enum NodesCommand {
    #[command(flatten)]
    Crud(CrudCommand),
}

// ── Platforms ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PlatformsArgs {
    #[command(subcommand)]
    pub command: PlatformsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PlatformsCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Show the remote-access URL for a platform
    Access {
        /// Platform ID
        id: String,

        /// Rotate the access token first
        #[arg(long)]
        refresh: bool,
    },
}

// ── Cards ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CardsArgs {
    #[command(subcommand)]
    pub command: CardsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CardsCommand {
    #[command(flatten)]
    Crud(CrudCommand),
}

// ── Instances ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InstancesArgs {
    #[command(subcommand)]
    pub command: InstancesCommand,
}

#[derive(Debug, Subcommand)]
pub enum InstancesCommand {
    #[command(flatten)]
    Crud(CrudCommand),

    /// Start an instance
    Start {
        /// Instance ID
        id: String,
    },

    /// Stop an instance
    Stop {
        /// Instance ID
        id: String,
    },
}

// ── Telemetry ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TelemetryArgs {
    #[command(subcommand)]
    pub command: TelemetryCommand,
}

#[derive(Debug, Subcommand)]
pub enum TelemetryCommand {
    /// Convert a payload (either generation) to the current schema
    Upgrade {
        /// JSON file holding one payload or an array of them
        file: PathBuf,
    },

    /// Convert a payload (either generation) to the legacy schema
    Downgrade {
        /// JSON file holding one payload or an array of them
        file: PathBuf,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display the resolved configuration (secrets masked)
    Show,

    /// Write a default config file if none exists (honours --mock)
    Init,

    /// Store the API token in the system keyring
    SetToken {
        /// Token value (prompted for when omitted)
        value: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
