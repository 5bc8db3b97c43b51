mod admin;
mod stats;
mod vote;

use std::io::Write;

use crate::args::Command;
use crate::ballots::BallotLog;
use crate::config::ConfigRepository;
use crate::error::PollError;

/// Handles shared by every command.
#[derive(Clone)]
pub struct Services {
    pub config: ConfigRepository,
    pub ballots: BallotLog,
}

pub async fn handle_command(
    services: &Services,
    command: Command,
    out: &mut (dyn Write + Send),
) -> Result<(), PollError> {
    match command {
        Command::Show => vote::show_poll(services, out).await,
        Command::Vote { labels } => vote::cast_ballot(services, &labels, out).await,
        Command::Stats { ascending } => stats::print_stats(services, ascending, out).await,
        Command::Watch {
            period_secs,
            ascending,
        } => stats::watch_stats(services, period_secs, ascending, out).await,
        Command::Admin { password, action } => {
            admin::handle_admin(services, &password, action, out).await
        }
    }
}
