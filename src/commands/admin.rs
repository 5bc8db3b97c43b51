use chrono::Local;
use log::{info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::args::AdminAction;
use crate::commands::Services;
use crate::error::PollError;
use crate::export;
use crate::models::SelectionMode;
use crate::tasks::stats_refresher;

pub async fn handle_admin(
    services: &Services,
    password: &str,
    action: AdminAction,
    out: &mut (dyn Write + Send),
) -> Result<(), PollError> {
    if !services.config.verify_credential(password).await {
        warn!("Rejected admin action with wrong password");
        return Err(PollError::Unauthorized);
    }

    match action {
        AdminAction::SetTitle { title } => {
            services.config.set_title(&title).await?;
            writeln!(out, "Title saved.")?;
        }
        AdminAction::SetOptions { options } => {
            let saved = services.config.set_options(&options).await?;
            writeln!(out, "Saved {} options.", saved.len())?;
        }
        AdminAction::SetMode { multi, max } => {
            let mode = SelectionMode {
                multi_select: multi,
                max_selections: max,
            };
            if let Some(warning) = services.config.set_selection_mode(mode).await? {
                writeln!(out, "Note: {}", warning)?;
            }
            writeln!(out, "Selection mode saved.")?;
        }
        AdminAction::Save {
            title,
            options,
            multi,
            max,
        } => {
            let mode = SelectionMode {
                multi_select: multi,
                max_selections: max,
            };
            let report = services.config.save(&title, &options, mode).await?;
            if let Some(warning) = report.warning {
                writeln!(out, "Note: {}", warning)?;
            }
            writeln!(out, "Settings saved ({} options).", report.config.options.len())?;
        }
        AdminAction::SetPassword { new_password } => {
            services.config.set_credential(&new_password).await?;
            writeln!(out, "Password updated.")?;
        }
        AdminAction::Reset => {
            services.ballots.clear().await?;
            writeln!(out, "All ballots have been cleared.")?;
        }
        AdminAction::ExportCsv { out: path } => {
            let ballots = services.ballots.all().await;
            let path = path.unwrap_or_else(|| export::csv_file_name(Local::now().date_naive()));
            let file = File::create(&path)?;
            export::write_ballots_csv(&ballots, BufWriter::new(file))?;
            info!("Exported {} ballots to {}", ballots.len(), path);
            writeln!(out, "Exported {} ballots to {}", ballots.len(), path)?;
        }
        AdminAction::Report => {
            let stats = stats_refresher::snapshot(&services.config, &services.ballots).await;
            write!(out, "{}", export::stats_report(&stats, &Local::now()))?;
        }
    }

    Ok(())
}
