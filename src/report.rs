//! Report assembly: the month-over-month comparison table and auxiliary
//! breakdowns.
//!
//! The table compares two delta pairs column-wise and is emitted as CSV
//! records; visual layout is left to whatever consumes the output.

use crate::delta::{active_non_trial, PeriodDelta};
use crate::error::Result;
use crate::snapshot::Snapshot;
use std::collections::BTreeMap;
use std::io::Write;

/// Default column label format for period headers.
const DEFAULT_HEADER_FORMAT: &str = "%b %Y";

/// The six-row KPI comparison between two delta pairs.
///
/// Mirrors the monthly business report: each column is one pair's metric
/// counts, labeled with that pair's date. The Change column is populated
/// only for the free-account total, the one metric tracked as a
/// percentage.
pub struct ComparisonReport<'a> {
    previous: &'a PeriodDelta<'a>,
    latest: &'a PeriodDelta<'a>,
    header_format: String,
}

impl<'a> ComparisonReport<'a> {
    /// Builds a report over the previous and latest delta pairs.
    pub fn new(previous: &'a PeriodDelta<'a>, latest: &'a PeriodDelta<'a>) -> Self {
        ComparisonReport {
            previous,
            latest,
            header_format: DEFAULT_HEADER_FORMAT.to_string(),
        }
    }

    /// Overrides the `%b %Y` column label format.
    pub fn with_header_format(mut self, format: &str) -> Self {
        self.header_format = format.to_string();
        self
    }

    /// Writes the comparison table as CSV records.
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let old_label = self.previous.date().format(&self.header_format).to_string();
        let new_label = self.latest.date().format(&self.header_format).to_string();
        csv_writer.write_record(["", old_label.as_str(), new_label.as_str(), "Change"])?;

        self.write_count_row(&mut csv_writer, "New Accounts", |d| d.new_accounts().len())?;
        self.write_count_row(&mut csv_writer, "New Free", |d| d.new_free().len())?;
        self.write_count_row(&mut csv_writer, "New Paid", |d| d.new_paid().len())?;

        let free_old = self.previous.free_at_eom().len();
        let free_new = self.latest.free_at_eom().len();
        let change = percent_change(free_old, free_new)
            .map(|pct| format!("{:.2}%", pct))
            .unwrap_or_default();
        csv_writer.write_record([
            "Total Free @ EOM".to_string(),
            free_old.to_string(),
            free_new.to_string(),
            change,
        ])?;

        self.write_count_row(&mut csv_writer, "Paid to Free*", |d| d.paid_to_free().len())?;
        self.write_count_row(&mut csv_writer, "Free to Paid*", |d| d.free_to_paid().len())?;

        csv_writer.flush()?;
        Ok(())
    }

    fn write_count_row<W: Write, F>(
        &self,
        csv_writer: &mut csv::Writer<W>,
        label: &str,
        metric: F,
    ) -> Result<()>
    where
        F: Fn(&PeriodDelta<'_>) -> usize,
    {
        csv_writer.write_record([
            label.to_string(),
            metric(self.previous).to_string(),
            metric(self.latest).to_string(),
            String::new(),
        ])?;
        Ok(())
    }
}

/// Percentage change between two counts.
///
/// Returns `None` when the older count is zero: percentage-of-zero is
/// undefined, and the table renders it as an empty cell.
pub fn percent_change(older: usize, newer: usize) -> Option<f64> {
    if older == 0 {
        return None;
    }
    let net = newer as f64 - older as f64;
    Some(net / older as f64 * 100.0)
}

/// Counts active-non-trial accounts per plan code.
///
/// A simple aggregation over the snapshot's record lookup, keyed
/// deterministically for stable output.
pub fn plan_breakdown(snapshot: &Snapshot) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for id in active_non_trial(snapshot) {
        if let Some(account) = snapshot.account(&id) {
            *counts.entry(account.plan_code().to_string()).or_insert(0) += 1;
        }
    }
    counts
}
