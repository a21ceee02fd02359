//! # Account Reports
//!
//! A snapshot classifier and KPI delta engine for monthly account exports.
//! Accounts observed at one instant are sorted into trial/active/free/paid
//! membership sets; two classified snapshots yield the period-over-period
//! movement the monthly comparison table is built from.
//!
//! ## Design Principles
//!
//! - **One-pass classification**: each snapshot is a single streaming fold
//!   over its CSV export
//! - **Pure set algebra**: delta metrics are derived, idempotent, and never
//!   mutate their inputs
//! - **Fail loudly**: malformed records abort a snapshot instead of being
//!   silently skipped
//! - **Deterministic output**: emitted tables and breakdowns have stable
//!   ordering
//!
//! ## Example
//!
//! ```no_run
//! use account_reports::{PeriodDelta, Snapshot};
//! use chrono::{NaiveDate, NaiveTime};
//! use std::io::Cursor;
//!
//! let export = "Account ID,Active,Plan Code,Created\n42,True,seat-5,2014-01-03 09:12:44+00:00\n";
//! let march = NaiveDate::from_ymd_opt(2014, 3, 1).unwrap().and_time(NaiveTime::MIN);
//! let april = NaiveDate::from_ymd_opt(2014, 4, 1).unwrap().and_time(NaiveTime::MIN);
//!
//! let older = Snapshot::from_csv(march, Cursor::new(export)).unwrap();
//! let newer = Snapshot::from_csv(april, Cursor::new(export)).unwrap();
//! let delta = PeriodDelta::new(&older, &newer).unwrap();
//! println!("{} accounts went free to paid", delta.free_to_paid().len());
//! ```

pub mod account;
pub mod delta;
pub mod error;
pub mod report;
pub mod snapshot;

pub use account::{AccountRecord, RawAccountRow};
pub use delta::{active_non_trial, PeriodDelta};
pub use error::{RecordError, ReportError, Result};
pub use report::{percent_change, plan_breakdown, ComparisonReport};
pub use snapshot::Snapshot;
