use log::info;
use std::io::Write;

use crate::commands::Services;
use crate::error::PollError;
use crate::selection::{SelectionController, ToggleOutcome};

pub async fn show_poll(services: &Services, out: &mut (dyn Write + Send)) -> Result<(), PollError> {
    let config = services.config.get_config().await;

    writeln!(out, "{}", config.title)?;
    if config.mode.multi_select {
        let limit = config.mode.effective_limit(config.options.len());
        writeln!(out, "Choose up to {} options:", limit)?;
    } else {
        writeln!(out, "Choose one option:")?;
    }
    for (i, option) in config.options.iter().enumerate() {
        writeln!(out, "{:>3}. {}", i + 1, option)?;
    }

    Ok(())
}

pub async fn cast_ballot(
    services: &Services,
    labels: &[String],
    out: &mut (dyn Write + Send),
) -> Result<(), PollError> {
    let config = services.config.get_config().await;
    let mut controller = SelectionController::new(&config);

    for label in labels {
        match controller.toggle(label) {
            ToggleOutcome::LimitReached { limit } => {
                writeln!(out, "Skipped {:?}: you can choose at most {} options", label, limit)?;
            }
            ToggleOutcome::UnknownOption => {
                writeln!(out, "Skipped {:?}: not an option in this poll", label)?;
            }
            ToggleOutcome::Replaced { previous } => {
                writeln!(out, "Only one choice allowed, {:?} replaces {:?}", label, previous)?;
            }
            ToggleOutcome::Selected | ToggleOutcome::Deselected => {}
        }
    }

    let recorded = controller.commit(&services.ballots).await?;
    let chosen: Vec<&str> = recorded.iter().map(|b| b.label.as_str()).collect();
    info!("Ballot cast for {} option(s)", chosen.len());
    writeln!(out, "Thank you! Your vote was recorded: {}", chosen.join(", "))?;

    Ok(())
}
