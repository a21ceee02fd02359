//! Account record model: raw billing-export rows and validated records.
//!
//! Each row of the daily account export becomes one [`AccountRecord`],
//! an immutable field map exposing the classification predicates.

use crate::error::RecordError;
use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;
use std::collections::HashMap;

/// Column holding the account identifier.
pub const FIELD_ACCOUNT_ID: &str = "Account ID";

/// Column holding the activity flag.
pub const FIELD_ACTIVE: &str = "Active";

/// Column holding the billing plan code.
pub const FIELD_PLAN_CODE: &str = "Plan Code";

/// Column holding the account creation timestamp.
pub const FIELD_CREATED: &str = "Created";

/// Timestamp format of the `Created` column. The export always carries a
/// zero UTC offset, so the offset is matched literally.
const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S+00:00";

const REQUIRED_FIELDS: [&str; 4] =
    [FIELD_ACCOUNT_ID, FIELD_ACTIVE, FIELD_PLAN_CODE, FIELD_CREATED];

/// Raw account row as read from CSV.
///
/// A plain column-name-to-value map: the export's column set varies over
/// time, so rows are captured whole and validated by [`RawAccountRow::parse`].
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct RawAccountRow(pub HashMap<String, String>);

impl RawAccountRow {
    /// Validates the raw row into an [`AccountRecord`].
    ///
    /// Returns [`RecordError::MissingField`] naming the first required
    /// column that is absent.
    pub fn parse(self) -> Result<AccountRecord, RecordError> {
        for field in REQUIRED_FIELDS {
            if !self.0.contains_key(field) {
                return Err(RecordError::MissingField(field));
            }
        }
        Ok(AccountRecord { fields: self.0 })
    }
}

/// One account as of a single snapshot.
///
/// Immutable after construction; each snapshot owns its own copy even for
/// the same account. The four required fields are guaranteed present, but
/// the `Created` timestamp is kept as text and parsed on demand, so the
/// date predicates can still fail on malformed values.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    fields: HashMap<String, String>,
}

impl AccountRecord {
    /// The account identifier, stable across snapshots.
    pub fn id(&self) -> &str {
        self.required(FIELD_ACCOUNT_ID)
    }

    /// The billing plan code.
    pub fn plan_code(&self) -> &str {
        self.required(FIELD_PLAN_CODE)
    }

    /// Returns `true` iff the activity flag is exactly the string `True`.
    ///
    /// Any other value, including `true` or `1`, counts as inactive.
    pub fn is_active(&self) -> bool {
        self.required(FIELD_ACTIVE) == "True"
    }

    /// Returns `true` iff the plan code contains the substring `free`.
    ///
    /// Case-sensitive: `free-monthly` matches, `FREE` and `Freelancer`
    /// do not.
    pub fn is_free(&self) -> bool {
        self.required(FIELD_PLAN_CODE).contains("free")
    }

    /// Returns `true` iff the account's 30-day trial ended before `as_of`.
    ///
    /// The boundary is exclusive: an account created exactly 30 days
    /// before `as_of` is still in trial.
    pub fn out_of_trial(&self, as_of: NaiveDateTime) -> Result<bool, RecordError> {
        Ok(self.created()? + Duration::days(30) < as_of)
    }

    /// Returns `true` iff the account did not exist yet as of `as_of`.
    pub fn registered_out_of_range(&self, as_of: NaiveDateTime) -> Result<bool, RecordError> {
        Ok(self.created()? >= as_of)
    }

    /// Raw access to any column, for auxiliary breakdowns.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn created(&self) -> Result<NaiveDateTime, RecordError> {
        let raw = self.required(FIELD_CREATED);
        NaiveDateTime::parse_from_str(raw, CREATED_FORMAT).map_err(|_| {
            RecordError::MalformedTimestamp {
                value: raw.to_string(),
            }
        })
    }

    fn required(&self, name: &str) -> &str {
        // Safety: presence of every required field is checked in parse()
        self.fields.get(name).expect("required field present")
    }
}
