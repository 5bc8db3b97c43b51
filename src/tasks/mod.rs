pub mod stats_refresher;
