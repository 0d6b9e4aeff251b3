//! End-date calculation for repeating appointments.
//!
//! Given the first occurrence, a repeat frequency and the total number of
//! occurrences, `calculate_end_date` returns the date of the last occurrence.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How often a repeating appointment recurs.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepeatFrequency {
    /// Every day, including weekends.
    Daily,
    /// Monday to Friday only.
    Weekday,
    Weekly,
    Fortnightly,
    /// Same day of the month, clamped to the month's last day.
    Monthly,
}

impl RepeatFrequency {
    pub const ALL: [RepeatFrequency; 5] = [
        RepeatFrequency::Weekday,
        RepeatFrequency::Daily,
        RepeatFrequency::Weekly,
        RepeatFrequency::Fortnightly,
        RepeatFrequency::Monthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekday => "WEEKDAY",
            Self::Weekly => "WEEKLY",
            Self::Fortnightly => "FORTNIGHTLY",
            Self::Monthly => "MONTHLY",
        }
    }
}

impl fmt::Display for RepeatFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepeatFrequency {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == value)
            .ok_or(())
    }
}

/// Calculates the date of the last occurrence of a repeating appointment.
///
/// A `count` of zero or one always yields `start`. Results that would fall
/// outside chrono's supported date range saturate at `NaiveDate::MAX`.
///
/// # Arguments
/// - `start` - Date of the first occurrence
/// - `frequency` - How often the appointment repeats
/// - `count` - Total number of occurrences including the first
///
/// # Returns
/// - `NaiveDate` - Date of the final occurrence
pub fn calculate_end_date(start: NaiveDate, frequency: RepeatFrequency, count: u32) -> NaiveDate {
    if count <= 1 {
        return start;
    }

    let remaining = u64::from(count - 1);

    let end = match frequency {
        RepeatFrequency::Daily => start.checked_add_days(Days::new(remaining)),
        RepeatFrequency::Weekly => start.checked_add_days(Days::new(remaining * 7)),
        RepeatFrequency::Fortnightly => start.checked_add_days(Days::new(remaining * 14)),
        // chrono clamps to the last day of the target month
        RepeatFrequency::Monthly => start.checked_add_months(Months::new(count - 1)),
        RepeatFrequency::Weekday => weekday_end_date(start, remaining),
    };

    end.unwrap_or(NaiveDate::MAX)
}

fn weekday_end_date(start: NaiveDate, remaining: u64) -> Option<NaiveDate> {
    // Weekend starts are counted from the preceding Friday
    let anchor = match start.weekday() {
        Weekday::Sat => start.checked_sub_days(Days::new(1))?,
        Weekday::Sun => start.checked_sub_days(Days::new(2))?,
        _ => start,
    };

    let weeks = remaining / 5;
    let days = remaining % 5;

    let mut end = anchor.checked_add_days(Days::new(weeks * 7 + days))?;

    if u64::from(anchor.weekday().number_from_monday()) + days > 5 {
        end = end.checked_add_days(Days::new(2))?;
    }

    Some(end)
}
