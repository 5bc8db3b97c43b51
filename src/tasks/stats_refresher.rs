use log::{debug, info};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::interval;

use crate::ballots::BallotLog;
use crate::config::ConfigRepository;
use crate::voting::PollStats;

pub const DEFAULT_REFRESH_SECONDS: u64 = 5;

/// Reads the current poll settings and ballot log in full.
pub async fn snapshot(config: &ConfigRepository, ballots: &BallotLog) -> PollStats {
    let poll = config.get_config().await;
    let log = ballots.all().await;
    PollStats::collect(&poll, &log)
}

/// Republishes fresh statistics every `period` until all receivers are gone.
pub async fn run(
    config: ConfigRepository,
    ballots: BallotLog,
    period: Duration,
    sender: watch::Sender<PollStats>,
) {
    info!("Starting statistics refresh every {:?}", period);
    let mut interval = interval(period);

    loop {
        interval.tick().await; // Wait for the next interval tick
        let stats = snapshot(&config, &ballots).await;
        debug!(
            "Refreshed stats: {} ballot(s) across {} option(s)",
            stats.total_ballots, stats.option_count
        );

        if sender.send(stats).is_err() {
            info!("No statistics viewers left, stopping refresh");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn publishes_until_receiver_drops() {
        let store = Arc::new(MemoryStore::new());
        let config = ConfigRepository::new(store.clone());
        let ballots = BallotLog::new(store);
        config.set_options(&["A".to_string(), "B".to_string()]).await.unwrap();
        ballots.append(&["B".to_string()]).await.unwrap();

        let initial = snapshot(&config, &ballots).await;
        let (sender, mut receiver) = watch::channel(initial);
        let task = tokio::spawn(run(
            config.clone(),
            ballots.clone(),
            Duration::from_millis(10),
            sender,
        ));

        ballots.append(&["A".to_string()]).await.unwrap();
        loop {
            receiver.changed().await.unwrap();
            if receiver.borrow().total_ballots == 2 {
                break;
            }
        }
        let counts: Vec<u64> = receiver.borrow().entries.iter().map(|e| e.count).collect();
        assert_eq!(counts, vec![1, 1]);

        drop(receiver);
        task.await.unwrap();
    }
}
