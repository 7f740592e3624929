//! Command-line interface for timeboard
//!
//! This module defines the CLI structure using clap derive macros.
//! The CLI is the presentation layer: every subcommand maps onto one
//! board mutation or query entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

mod report;
mod task;

/// timeboard - task lifecycle and time accounting
///
/// A board where tasks move through a fixed lifecycle while accruing
/// elapsed time against an estimate, with an audit log per task and
/// aggregated reports.
#[derive(Parser, Debug)]
#[command(name = "timeboard")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding the board file (defaults to the platform
    /// data dir)
    #[arg(long, global = true, env = "TIMEBOARD_DATA")]
    pub data: Option<PathBuf>,

    /// Acting user email for mutations
    #[arg(long, global = true, env = "TIMEBOARD_USER")]
    pub user: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit mutation events as JSON lines ("-" for stdout, or a file path)
    #[arg(long, global = true)]
    pub events: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Aggregated KPIs over the board
    Report {
        /// Narrow to one assignee (email)
        #[arg(long)]
        assignee: Option<String>,

        /// Creation-date window: all, today, week, month
        #[arg(long, default_value = "all")]
        range: String,
    },

    /// Completed tasks
    Archive {
        /// Narrow to one assignee (email)
        #[arg(long)]
        assignee: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    New {
        /// Task name
        name: String,

        /// Description
        #[arg(short, long)]
        description: String,

        /// Assignee email
        #[arg(long)]
        assign: String,

        /// Estimated time as HH:MM:SS (lenient; missing parts count as 0)
        #[arg(long, default_value = "01:00:00")]
        estimate: String,

        /// Optional URL link
        #[arg(long)]
        url: Option<String>,
    },

    /// List tasks in creation order
    List {
        /// Narrow to one assignee (email)
        #[arg(long)]
        assignee: Option<String>,

        /// Narrow to one status: new, started, review, completed
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one task with its notes and logs
    Show {
        /// Task id
        id: String,
    },

    /// Edit the free-text fields of a task
    Edit {
        /// Task id
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New URL link (empty string clears it)
        #[arg(long)]
        url: Option<String>,
    },

    /// Add a note to a task
    Note {
        /// Task id
        id: String,

        /// Note text
        text: String,
    },

    /// Advance a task one lifecycle step
    Advance {
        /// Task id
        id: String,
    },

    /// Move a task to an explicit status
    Status {
        /// Task id
        id: String,

        /// Target status: started, review, completed
        status: String,
    },

    /// Record accumulated elapsed time
    Time {
        /// Task id
        id: String,

        /// Elapsed time as HH:MM:SS (never decreases)
        elapsed: String,
    },

    /// Delete tasks by id
    Rm {
        /// Task ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let ctx = task::CliContext {
            data: self.data,
            user: self.user,
            events: self.events,
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Task(command) => task::run(command, ctx),
            Commands::Report { assignee, range } => report::run_report(assignee, range, ctx),
            Commands::Archive { assignee } => report::run_archive(assignee, ctx),
        }
    }
}
