use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rworklog
/// Terminal stopwatch that logs time per project into SQLite
#[derive(Parser)]
#[command(
    name = "rworklog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A terminal stopwatch that logs the time spent on projects into SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Start the interactive stopwatch
    Run {
        #[arg(long, help = "Preselect an active project by name")]
        project: Option<String>,
    },

    /// Add, rename, (de)activate or delete projects
    Project {
        #[command(subcommand)]
        action: ProjectCommand,
    },

    /// List saved log entries
    List {
        #[arg(long, help = "Only entries for this project")]
        project: Option<String>,

        #[arg(long, help = "Show total time per project")]
        summary: bool,
    },

    /// Export log entries
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Only entries for this project")]
        project: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Show projects
    List {
        #[arg(long, help = "Include inactive projects")]
        all: bool,
    },

    /// Create one or more projects (all or nothing)
    Add {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Rename a project
    Rename { id: i64, name: String },

    /// Mark projects as active
    Activate {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Mark projects as inactive (hidden from the stopwatch)
    Deactivate {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Delete projects; their log entries are kept
    Del {
        #[arg(required = true)]
        ids: Vec<i64>,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Interactive editor with submit / revert
    Edit,
}
