use std::io::Write;
use std::time::Duration;
use tokio::sync::watch;

use crate::commands::Services;
use crate::error::PollError;
use crate::tasks::stats_refresher;
use crate::voting::{PollStats, SortOrder};

fn sort_order(ascending: bool) -> SortOrder {
    if ascending {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    }
}

pub fn format_stats(stats: &PollStats, order: SortOrder) -> String {
    let mut summary = format!("**{}**\n", stats.title);

    for entry in stats.sorted(order) {
        summary.push_str(&format!(
            "{}: {} votes ({:.1}%)\n",
            entry.label,
            entry.count,
            stats.percentage(&entry)
        ));
    }

    summary.push_str(&format!(
        "\n{} ballots cast across {} options.\n",
        stats.total_ballots, stats.option_count
    ));
    summary
}

pub async fn print_stats(
    services: &Services,
    ascending: bool,
    out: &mut (dyn Write + Send),
) -> Result<(), PollError> {
    let stats = stats_refresher::snapshot(&services.config, &services.ballots).await;
    write!(out, "{}", format_stats(&stats, sort_order(ascending)))?;
    Ok(())
}

/// Prints results on every refresh that changes them. Runs until interrupted.
pub async fn watch_stats(
    services: &Services,
    period_secs: u64,
    ascending: bool,
    out: &mut (dyn Write + Send),
) -> Result<(), PollError> {
    let order = sort_order(ascending);
    let initial = stats_refresher::snapshot(&services.config, &services.ballots).await;
    write!(out, "{}", format_stats(&initial, order))?;

    let (sender, mut receiver) = watch::channel(initial);
    tokio::spawn(stats_refresher::run(
        services.config.clone(),
        services.ballots.clone(),
        Duration::from_secs(period_secs.max(1)),
        sender,
    ));

    let mut last = receiver.borrow().clone();
    while receiver.changed().await.is_ok() {
        let stats = receiver.borrow().clone();
        if stats != last {
            write!(out, "\n{}", format_stats(&stats, order))?;
            out.flush()?;
            last = stats;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::args::Command;
    use crate::commands::test_support::{run, services, strings};

    #[tokio::test]
    async fn prints_sorted_counts_with_percentages() {
        let services = services();
        services.config.set_title("Lunch").await.unwrap();
        services
            .config
            .set_options(&strings(&["Soup", "Salad", "Pie"]))
            .await
            .unwrap();
        services
            .ballots
            .append(&strings(&["Salad", "Salad", "Pie", "Gone"]))
            .await
            .unwrap();

        let (result, out) = run(&services, Command::Stats { ascending: false }).await;
        result.unwrap();

        assert_eq!(
            out,
            "**Lunch**\n\
             Salad: 2 votes (50.0%)\n\
             Pie: 1 votes (25.0%)\n\
             Soup: 0 votes (0.0%)\n\
             \n4 ballots cast across 3 options.\n"
        );
    }

    #[tokio::test]
    async fn ascending_keeps_ties_in_option_order() {
        let services = services();
        services.config.set_options(&strings(&["A", "B", "C"])).await.unwrap();
        services.ballots.append(&strings(&["C"])).await.unwrap();

        let (result, out) = run(&services, Command::Stats { ascending: true }).await;
        result.unwrap();

        let a = out.find("A:").unwrap();
        let b = out.find("B:").unwrap();
        let c = out.find("C:").unwrap();
        assert!(a < b && b < c);
    }
}
