//! CLI argument definitions using the clap derive API.
//!
//! Argument names, help text and value enums live here. Value enums convert
//! into their tracker-core counterparts; no validation logic lives here.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracker_core::domain::{IdScheme, ImportStrategy, ValidationMode};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "tracker",
    bin_name = "tracker",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validate tracker import bundles before they are persisted",
    long_about = "Runs the ordered validation hooks over a bundle of tracked \
                  entities, enrollments and events, resolving references \
                  against a preheat snapshot, and prints the error report.",
    after_help = "EXAMPLES:\n\
        \x20 tracker validate bundle.json --preheat preheat.json\n\
        \x20 tracker validate bundle.json -p preheat.json --mode fail-fast --format json\n\
        \x20 tracker codes E1056\n\
        \x20 tracker completions bash > /usr/share/bash-completion/completions/tracker",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate an import bundle against a preheat snapshot.
    #[command(
        visible_alias = "v",
        about = "Validate an import bundle",
        after_help = "EXIT STATUS:\n\
            \x20 0  no validation errors\n\
            \x20 5  validation reported errors\n\
            \x20 6  validation could not run (precondition fault)"
    )]
    Validate(ValidateArgs),

    /// Describe the error-code catalog.
    #[command(
        about = "List validation error codes",
        after_help = "EXAMPLES:\n\
            \x20 tracker codes\n\
            \x20 tracker codes E1069\n\
            \x20 tracker codes --format json"
    )]
    Codes(CodesArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 tracker completions bash > ~/.local/share/bash-completion/completions/tracker\n\
            \x20 tracker completions zsh  > ~/.zfunc/_tracker\n\
            \x20 tracker completions fish > ~/.config/fish/completions/tracker.fish"
    )]
    Completions(CompletionsArgs),

    #[command(
        about = "Inspect the effective configuration",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 tracker config get validation.mode\n\
            \x20 tracker config list\n\
            \x20 tracker config path"
    )]
    Config(ConfigCommands),
}

// ── validate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// JSON bundle with `user`, `trackedEntities`, `enrollments` and `events`.
    #[arg(value_name = "BUNDLE", help = "Bundle file (JSON)")]
    pub bundle: PathBuf,

    #[arg(
        short = 'p',
        long = "preheat",
        value_name = "FILE",
        help = "Preheat snapshot file (JSON)"
    )]
    pub preheat: PathBuf,

    /// Overrides both the bundle and `validation.mode`.
    #[arg(short = 'm', long = "mode", value_enum, help = "Validation mode")]
    pub mode: Option<ModeArg>,

    /// Overrides both the bundle and `validation.import_strategy`.
    #[arg(short = 's', long = "strategy", value_enum, help = "Import strategy")]
    pub strategy: Option<StrategyArg>,

    /// Scheme the bundle's program references use.
    #[arg(long = "program-scheme", value_enum, value_name = "SCHEME")]
    pub program_scheme: Option<SchemeArg>,

    #[arg(long = "org-unit-scheme", value_enum, value_name = "SCHEME")]
    pub org_unit_scheme: Option<SchemeArg>,

    /// Evaluate date rules as of this instant instead of the current time.
    #[arg(long = "now", value_name = "RFC3339", help = "Fixed evaluation time")]
    pub now: Option<DateTime<Utc>>,

    #[arg(short = 'f', long = "format", value_enum, help = "Report format")]
    pub format: Option<ReportFormat>,
}

/// How the validation report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One row per report with its rendered message.
    Table,
    /// The full report document.
    Json,
    /// `CODE<TAB>UID` per report.
    Codes,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Collect every error.
    Full,
    /// Stop at the first error.
    FailFast,
}

impl From<ModeArg> for ValidationMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Full => Self::Full,
            ModeArg::FailFast => Self::FailFast,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Create,
    Update,
    Delete,
    #[value(alias = "upsert")]
    CreateAndUpdate,
}

impl From<StrategyArg> for ImportStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Create => Self::Create,
            StrategyArg::Update => Self::Update,
            StrategyArg::Delete => Self::Delete,
            StrategyArg::CreateAndUpdate => Self::CreateAndUpdate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemeArg {
    Uid,
    Code,
    Name,
}

impl From<SchemeArg> for IdScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Uid => Self::Uid,
            SchemeArg::Code => Self::Code,
            SchemeArg::Name => Self::Name,
        }
    }
}

// ── codes ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CodesArgs {
    /// Show a single code, e.g. `E1056`.
    #[arg(value_name = "CODE")]
    pub code: Option<String>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: CodesFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CodesFormat {
    Table,
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `validation.mode`.
        key: String,
    },
    /// Print the effective configuration as TOML.
    List,
    /// Print the path of the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
