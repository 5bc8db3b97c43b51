use std::collections::HashMap;

use crate::models::{Ballot, PollConfig};
use crate::voting::{SortOrder, TallyEntry};

/// Counts ballots against the current option list.
///
/// Rows follow option order. Duplicate labels share one row at their first
/// position. Ballots naming a label that is no longer an option are skipped.
pub fn tally(config: &PollConfig, ballots: &[Ballot]) -> Vec<TallyEntry> {
    let mut entries: Vec<TallyEntry> = Vec::with_capacity(config.options.len());
    let mut slot_by_label: HashMap<&str, usize> = HashMap::new();

    // Initialize all options with 0 votes
    for option in &config.options {
        if !slot_by_label.contains_key(option.as_str()) {
            slot_by_label.insert(option.as_str(), entries.len());
            entries.push(TallyEntry {
                label: option.clone(),
                count: 0,
            });
        }
    }

    for ballot in ballots {
        if let Some(&slot) = slot_by_label.get(ballot.label.as_str()) {
            entries[slot].count += 1;
        }
    }

    entries
}

/// Share of `total` ballots, in percent. Zero ballots yields 0.0.
pub fn percentage(count: u64, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Stable reorder by count; ties keep option order.
pub fn sort_for_display(entries: &[TallyEntry], order: SortOrder) -> Vec<TallyEntry> {
    let mut sorted = entries.to_vec();
    match order {
        SortOrder::Descending => sorted.sort_by(|a, b| b.count.cmp(&a.count)),
        SortOrder::Ascending => sorted.sort_by(|a, b| a.count.cmp(&b.count)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SelectionMode;
    use crate::voting::PollStats;
    use chrono::Utc;

    fn config(options: &[&str]) -> PollConfig {
        PollConfig {
            options: options.iter().map(|s| s.to_string()).collect(),
            mode: SelectionMode::default(),
            ..PollConfig::default()
        }
    }

    fn ballots(labels: &[&str]) -> Vec<Ballot> {
        let now = Utc::now();
        labels.iter().map(|l| Ballot::new(*l, now)).collect()
    }

    fn pairs(entries: &[TallyEntry]) -> Vec<(&str, u64)> {
        entries.iter().map(|e| (e.label.as_str(), e.count)).collect()
    }

    #[test]
    fn counts_follow_option_order() {
        let result = tally(&config(&["A", "B", "C"]), &ballots(&["B"]));
        assert_eq!(pairs(&result), vec![("A", 0), ("B", 1), ("C", 0)]);
    }

    #[test]
    fn option_order_wins_over_arrival_order() {
        let result = tally(&config(&["A", "B", "C"]), &ballots(&["C", "C", "A"]));
        assert_eq!(pairs(&result), vec![("A", 1), ("B", 0), ("C", 2)]);
    }

    #[test]
    fn orphaned_ballots_are_excluded() {
        let cfg = config(&["A"]);
        let log = ballots(&["B"]);
        let stats = PollStats::collect(&cfg, &log);

        assert_eq!(pairs(&stats.entries), vec![("A", 0)]);
        assert_eq!(stats.total_ballots, 1);
    }

    #[test]
    fn tally_sum_never_exceeds_ballot_count() {
        let cfg = config(&["A", "B"]);

        let clean = ballots(&["A", "B", "A"]);
        let sum: u64 = tally(&cfg, &clean).iter().map(|e| e.count).sum();
        assert_eq!(sum, clean.len() as u64);

        let with_orphans = ballots(&["A", "Z", "B", "old"]);
        let sum: u64 = tally(&cfg, &with_orphans).iter().map(|e| e.count).sum();
        assert!(sum < with_orphans.len() as u64);
        assert_eq!(sum, 2);
    }

    #[test]
    fn duplicate_labels_merge_into_first_slot() {
        let result = tally(&config(&["A", "B", "A"]), &ballots(&["A", "A", "B"]));
        assert_eq!(pairs(&result), vec![("A", 2), ("B", 1)]);
    }

    #[test]
    fn labels_match_exactly() {
        let result = tally(&config(&["Apple"]), &ballots(&["apple", "Apple ", "Apple"]));
        assert_eq!(pairs(&result), vec![("Apple", 1)]);
    }

    #[test]
    fn percentage_handles_zero_total() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn display_sort_is_stable() {
        let entries = tally(
            &config(&["A", "B", "C", "D"]),
            &ballots(&["B", "D", "D", "C"]),
        );

        let desc = sort_for_display(&entries, SortOrder::Descending);
        assert_eq!(pairs(&desc), vec![("D", 2), ("B", 1), ("C", 1), ("A", 0)]);

        let asc = sort_for_display(&entries, SortOrder::Ascending);
        assert_eq!(pairs(&asc), vec![("A", 0), ("B", 1), ("C", 1), ("D", 2)]);

        // Source is left untouched.
        assert_eq!(pairs(&entries), vec![("A", 0), ("B", 1), ("C", 1), ("D", 2)]);
    }

    #[test]
    fn stats_option_count_matches_rows() {
        let stats = PollStats::collect(&config(&["A", "A", "B"]), &ballots(&["B"]));
        assert_eq!(stats.option_count, 2);
        assert_eq!(stats.percentage(&stats.entries[1]), 100.0);
    }
}
