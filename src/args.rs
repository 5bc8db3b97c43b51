use clap::{Parser, Subcommand};

use crate::models::DEFAULT_MAX_SELECTIONS;
use crate::tasks::stats_refresher::DEFAULT_REFRESH_SECONDS;

/// Anonymous single- or multi-choice polling with live results.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the poll title, selection mode and options.
    Show,
    /// Cast a ballot. Labels are toggled in order, as if clicked.
    Vote {
        #[clap(required = true, value_parser)]
        labels: Vec<String>,
    },
    /// Print the current results once.
    Stats {
        /// Sort rows by ascending count instead of descending.
        #[clap(long, takes_value = false)]
        ascending: bool,
    },
    /// Keep printing results as they change.
    Watch {
        #[clap(long, value_parser, default_value_t = DEFAULT_REFRESH_SECONDS)]
        period_secs: u64,
        #[clap(long, takes_value = false)]
        ascending: bool,
    },
    /// Administrator actions; require the admin password.
    Admin {
        #[clap(long, value_parser)]
        password: String,
        #[clap(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AdminAction {
    SetTitle {
        #[clap(value_parser)]
        title: String,
    },
    /// Replace the option list. Blank entries are dropped.
    SetOptions {
        #[clap(value_parser)]
        options: Vec<String>,
    },
    SetMode {
        #[clap(long, takes_value = false)]
        multi: bool,
        #[clap(long, value_parser, allow_hyphen_values = true, default_value_t = DEFAULT_MAX_SELECTIONS)]
        max: i64,
    },
    /// Save title, options and mode in one go.
    Save {
        #[clap(long, value_parser)]
        title: String,
        #[clap(long, value_parser, multiple_values = true)]
        options: Vec<String>,
        #[clap(long, takes_value = false)]
        multi: bool,
        #[clap(long, value_parser, allow_hyphen_values = true, default_value_t = DEFAULT_MAX_SELECTIONS)]
        max: i64,
    },
    SetPassword {
        #[clap(value_parser)]
        new_password: String,
    },
    /// Delete every recorded ballot.
    Reset,
    /// Write the ballot log as CSV.
    ExportCsv {
        #[clap(long, value_parser)]
        out: Option<String>,
    },
    /// Print a summary report.
    Report,
}
