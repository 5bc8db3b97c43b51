use chrono::{DateTime, Local, NaiveDate, TimeZone};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

use crate::error::PollError;
use crate::models::Ballot;
use crate::voting::PollStats;

const BOM: &str = "\u{FEFF}";
const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes the ballot log as CSV, prefixed with a byte-order mark so spreadsheets pick UTF-8.
pub fn write_ballots_csv<W: Write>(ballots: &[Ballot], out: W) -> Result<(), PollError> {
    write_ballots_csv_in(ballots, &Local, out)
}

pub fn write_ballots_csv_in<Tz: TimeZone, W: Write>(
    ballots: &[Ballot],
    tz: &Tz,
    mut out: W,
) -> Result<(), PollError>
where
    Tz::Offset: std::fmt::Display,
{
    out.write_all(BOM.as_bytes())?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);
    writer.write_record(["Time", "Option"])?;

    for ballot in ballots {
        let time = ballot.cast_at.with_timezone(tz).format(LOCAL_TIME_FORMAT).to_string();
        writer.write_record([time.as_str(), ballot.label.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn csv_file_name(date: NaiveDate) -> String {
    format!("votes_export_{}.csv", date.format("%Y-%m-%d"))
}

/// Plain-text summary of the current statistics, rows in option order.
pub fn stats_report<Tz: TimeZone>(stats: &PollStats, generated_at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut report = String::new();

    report.push_str(&format!("{} - Poll Report\n", stats.title));
    report.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.format(LOCAL_TIME_FORMAT)
    ));
    report.push_str(&format!("Total ballots: {}\n", stats.total_ballots));
    report.push_str(&format!("Options: {}\n\n", stats.option_count));

    for entry in &stats.entries {
        report.push_str(&format!(
            "{} | {} | {:.1}%\n",
            entry.label,
            entry.count,
            stats.percentage(entry)
        ));
    }

    report
}
