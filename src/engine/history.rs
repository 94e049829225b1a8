use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper bound on how many days `streak` walks back.
pub const MAX_STREAK_LOOKBACK_DAYS: u32 = 3650;

pub const WEEK_WINDOW_DAYS: u32 = 7;

/// Per-day training record, keyed by calendar date.
///
/// Serialized as a JSON object of `"YYYY-MM-DD": bool`. Deserialization is
/// lenient: non-boolean values are read as `false`, and keys that are not
/// dates are kept aside unread and written back as found, so a corrupt blob
/// never fails the whole load and never loses keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionHistory {
    days: BTreeMap<NaiveDate, bool>,
    unparsed: BTreeMap<String, serde_json::Value>,
}

impl CompletionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of dated entries. Unparsed keys are not counted.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<bool> {
        self.days.get(&date).copied()
    }

    pub fn trained_on(&self, date: NaiveDate) -> bool {
        self.get(date).unwrap_or(false)
    }

    /// Overwrite the flag for `date`. Entries are never removed.
    pub fn record(&mut self, date: NaiveDate, trained: bool) {
        self.days.insert(date, trained);
    }

    pub fn trained_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days
            .iter()
            .filter(|(_, trained)| **trained)
            .map(|(date, _)| *date)
    }

    /// Consecutive trained days ending at `today`. Zero when today is not trained.
    pub fn streak(&self, today: NaiveDate) -> u32 {
        let mut count = 0;
        let mut cursor = today;
        while count < MAX_STREAK_LOOKBACK_DAYS && self.trained_on(cursor) {
            count += 1;
            match cursor.checked_sub_signed(Duration::days(1)) {
                Some(prev) => cursor = prev,
                None => break,
            }
        }
        count
    }

    /// Trained days among `today` and the six days before it.
    pub fn weekly_count(&self, today: NaiveDate) -> u32 {
        (0..WEEK_WINDOW_DAYS)
            .filter_map(|offset| today.checked_sub_signed(Duration::days(offset as i64)))
            .filter(|date| self.trained_on(*date))
            .count() as u32
    }

    /// Longest run of consecutive trained days anywhere in the history.
    pub fn best_streak(&self) -> u32 {
        let mut best = 0u32;
        let mut run = 0u32;
        let mut prev: Option<NaiveDate> = None;
        for date in self.trained_days() {
            run = match prev {
                Some(p) if date.signed_duration_since(p).num_days() == 1 => run + 1,
                _ => 1,
            };
            best = best.max(run);
            prev = Some(date);
        }
        best
    }

    /// Build from an arbitrary JSON value. Keys that are not dates take no
    /// part in streaks but are carried through to the next serialization.
    /// Returns the history and the number of such keys.
    pub fn from_json_lenient(value: &serde_json::Value) -> (Self, usize) {
        let mut history = Self::new();
        let Some(map) = value.as_object() else {
            return (history, 0);
        };
        for (key, flag) in map {
            match NaiveDate::parse_from_str(key, DATE_FORMAT) {
                Ok(date) => history.record(date, flag.as_bool().unwrap_or(false)),
                Err(_) => {
                    history.unparsed.insert(key.clone(), flag.clone());
                }
            }
        }
        let unparsed = history.unparsed.len();
        (history, unparsed)
    }
}

impl Serialize for CompletionHistory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut as_strings: BTreeMap<String, serde_json::Value> = self.unparsed.clone();
        as_strings.extend(self.days.iter().map(|(date, trained)| {
            (
                date.format(DATE_FORMAT).to_string(),
                serde_json::Value::Bool(*trained),
            )
        }));
        as_strings.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CompletionHistory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json_lenient(&value).0)
    }
}
