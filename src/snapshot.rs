//! Snapshot classification: one dated pass over an account export.
//!
//! A [`Snapshot`] is the classified state of the world at one observation
//! instant: every account of the export sorted into the trial/active/free/
//! paid membership sets, plus a lookup from identifier to record.

use crate::account::{AccountRecord, RawAccountRow};
use crate::error::{RecordError, ReportError, Result};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::io::Read;

/// The classified state of all accounts as of one reporting period.
///
/// # Invariants
///
/// - `in_trial` is disjoint from `active`, `free` and `paid`
/// - `free` and `paid` are mutually exclusive
/// - `active` may overlap either plan set
/// - accounts created at or after the period appear in no set, but are
///   still present in the record lookup
///
/// Populated by a single classification pass and read-only afterward.
/// Each snapshot owns its sets and records independently; nothing is
/// shared across snapshots.
#[derive(Debug)]
pub struct Snapshot {
    /// Observation instant the export was evaluated against.
    period: NaiveDateTime,

    /// Accounts still inside their 30-day trial window.
    in_trial: HashSet<String>,

    /// Accounts whose activity flag is set.
    active: HashSet<String>,

    /// Out-of-trial accounts on a free plan.
    free: HashSet<String>,

    /// Out-of-trial accounts on a paying plan.
    paid: HashSet<String>,

    /// Every record of the export, keyed by account identifier.
    /// Duplicate identifiers overwrite silently (last write wins).
    accounts: HashMap<String, AccountRecord>,
}

impl Snapshot {
    /// Creates an empty snapshot for the given period.
    pub fn new(period: NaiveDateTime) -> Self {
        Snapshot {
            period,
            in_trial: HashSet::new(),
            active: HashSet::new(),
            free: HashSet::new(),
            paid: HashSet::new(),
            accounts: HashMap::new(),
        }
    }

    /// Classifies an already-parsed sequence of records.
    ///
    /// This is the core boundary: the caller owns fetching and parsing.
    /// The first record error aborts the whole classification; a snapshot
    /// is never silently partial.
    pub fn classify<I>(period: NaiveDateTime, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = AccountRecord>,
    {
        let mut snapshot = Snapshot::new(period);
        for record in records {
            snapshot.ingest(record)?;
        }
        Ok(snapshot)
    }

    /// Classifies a raw CSV export in streaming fashion.
    ///
    /// Records are read one at a time. Record errors are tagged with their
    /// row number and abort the classification.
    pub fn from_csv<R: Read>(period: NaiveDateTime, reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let mut snapshot = Snapshot::new(period);
        for (row_idx, result) in csv_reader.deserialize::<RawAccountRow>().enumerate() {
            let row = row_idx + 2; // 1-indexed, accounting for header row

            let record = result?
                .parse()
                .map_err(|source| ReportError::InvalidRecord { row, source })?;
            snapshot
                .ingest(record)
                .map_err(|source| ReportError::InvalidRecord { row, source })?;
        }

        Ok(snapshot)
    }

    /// Evaluates one record against the period and files it into the sets.
    fn ingest(&mut self, record: AccountRecord) -> std::result::Result<(), RecordError> {
        let id = record.id().to_string();

        // The lookup gets every record, including the ones excluded from
        // classification below.
        self.accounts.insert(id.clone(), record);
        let record = &self.accounts[&id];

        if record.registered_out_of_range(self.period)? {
            debug!("account {}: not yet registered as of {}", id, self.period);
            return Ok(());
        }

        if !record.out_of_trial(self.period)? {
            debug!("account {}: in trial as of {}", id, self.period);
            self.in_trial.insert(id);
            return Ok(());
        }

        if record.is_active() {
            self.active.insert(id.clone());
        }

        if record.is_free() {
            self.free.insert(id);
        } else {
            self.paid.insert(id);
        }

        Ok(())
    }

    /// The observation instant this snapshot was classified against.
    pub fn period(&self) -> NaiveDateTime {
        self.period
    }

    /// Accounts still inside their trial window.
    pub fn in_trial(&self) -> &HashSet<String> {
        &self.in_trial
    }

    /// Accounts whose activity flag is set.
    pub fn active(&self) -> &HashSet<String> {
        &self.active
    }

    /// Out-of-trial accounts on a free plan.
    pub fn free(&self) -> &HashSet<String> {
        &self.free
    }

    /// Out-of-trial accounts on a paying plan.
    pub fn paid(&self) -> &HashSet<String> {
        &self.paid
    }

    /// Looks up the record behind an identifier.
    pub fn account(&self, id: &str) -> Option<&AccountRecord> {
        self.accounts.get(id)
    }

    /// The full identifier-to-record lookup.
    pub fn accounts(&self) -> &HashMap<String, AccountRecord> {
        &self.accounts
    }

    /// Builds a snapshot with hand-picked sets (for testing).
    #[cfg(test)]
    pub(crate) fn with_sets(
        period: NaiveDateTime,
        active: &[&str],
        free: &[&str],
        paid: &[&str],
        in_trial: &[&str],
    ) -> Self {
        let to_set = |ids: &[&str]| ids.iter().map(|id| id.to_string()).collect();
        Snapshot {
            period,
            in_trial: to_set(in_trial),
            active: to_set(active),
            free: to_set(free),
            paid: to_set(paid),
            accounts: HashMap::new(),
        }
    }
}
