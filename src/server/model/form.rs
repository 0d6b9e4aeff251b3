//! Submitted form values, field-level validation failures and the schema
//! trait each journey form implements.

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{ops::RangeInclusive, str::FromStr};

/// Raw `application/x-www-form-urlencoded` body, in submission order.
///
/// Repeated names (checkbox groups) are kept as separate pairs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FormValues(Vec<(String, String)>);

impl FormValues {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First non-blank value submitted under `name`, trimmed.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.trim())
            .find(|value| !value.is_empty())
    }

    /// Every non-blank value submitted under `name`.
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
            .collect()
    }

    /// JSON object echoed back to the form after a failed submission.
    ///
    /// Names submitted more than once become arrays.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();

        for (key, value) in &self.0 {
            match object.get_mut(key) {
                None => {
                    object.insert(key.clone(), Value::String(value.clone()));
                }
                Some(Value::Array(values)) => values.push(Value::String(value.clone())),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, Value::String(value.clone())]);
                }
            }
        }

        Value::Object(object)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered list of field failures for one submission.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First message recorded against `field`.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|e| e.field.as_str()).collect();
        write!(f, "Validation failed for fields: {}", fields.join(", "))
    }
}

/// Form schema: turns raw values into a typed form or field failures.
pub trait FormInput: Sized {
    fn parse(values: &FormValues) -> Result<Self, ValidationErrors>;
}

/// Flash state exposed to a GET view after a redirect.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormFeedback {
    #[serde(skip_serializing_if = "ValidationErrors::is_empty", default)]
    pub validation_errors: ValidationErrors,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub form_responses: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub success_message: Option<String>,
}

/// Accumulates failures while reading fields from a submission.
///
/// Each accessor records an error and returns `None` when the field is
/// missing or malformed; `finish` then builds the form only if nothing
/// failed.
pub struct FormParser<'a> {
    values: &'a FormValues,
    errors: ValidationErrors,
}

impl<'a> FormParser<'a> {
    pub fn new(values: &'a FormValues) -> Self {
        Self {
            values,
            errors: ValidationErrors::default(),
        }
    }

    pub fn error(&mut self, field: &str, message: &str) {
        self.errors.push(field, message);
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.message_for(field).is_some()
    }

    pub fn required(&mut self, field: &str, message: &str) -> Option<String> {
        match self.values.get(field) {
            Some(value) => Some(value.to_string()),
            None => {
                self.error(field, message);
                None
            }
        }
    }

    pub fn optional(&self, field: &str) -> Option<String> {
        self.values.get(field).map(str::to_string)
    }

    pub fn optional_max_length(&mut self, field: &str, max: usize, message: &str) -> Option<String> {
        let value = self.optional(field)?;
        if value.chars().count() > max {
            self.error(field, message);
            return None;
        }
        Some(value)
    }

    /// Every value submitted under `field`, requiring at least one.
    pub fn required_all(&mut self, field: &str, message: &str) -> Vec<String> {
        let values: Vec<String> = self.values.all(field).into_iter().map(str::to_string).collect();
        if values.is_empty() {
            self.error(field, message);
        }
        values
    }

    /// Required value parsed with `FromStr`; missing and invalid share `message`.
    pub fn choice<T: FromStr>(&mut self, field: &str, message: &str) -> Option<T> {
        let parsed = self.values.get(field).and_then(|value| value.parse::<T>().ok());
        if parsed.is_none() {
            self.error(field, message);
        }
        parsed
    }

    pub fn integer_in(
        &mut self,
        field: &str,
        range: RangeInclusive<u32>,
        missing: &str,
        out_of_range: &str,
    ) -> Option<u32> {
        let Some(raw) = self.values.get(field) else {
            self.error(field, missing);
            return None;
        };

        match raw.parse::<u32>() {
            Ok(value) if range.contains(&value) => Some(value),
            Ok(_) => {
                self.error(field, out_of_range);
                None
            }
            Err(_) => {
                self.error(field, missing);
                None
            }
        }
    }

    /// Required date in `dd/mm/yyyy` form (single-digit day and month accepted).
    pub fn date(&mut self, field: &str, missing: &str, invalid: &str) -> Option<NaiveDate> {
        let Some(raw) = self.values.get(field) else {
            self.error(field, missing);
            return None;
        };

        match parse_date(raw) {
            Some(date) => Some(date),
            None => {
                self.error(field, invalid);
                None
            }
        }
    }

    /// Time split across `{field}-hour` and `{field}-minute`.
    ///
    /// # Returns
    /// - `Some(Some(time))` - Both parts present and valid
    /// - `Some(None)` - Both parts blank
    /// - `None` - Invalid or half-entered; an error is recorded against `field`
    pub fn optional_time(&mut self, field: &str, invalid: &str) -> Option<Option<NaiveTime>> {
        let hour = self.values.get(&format!("{field}-hour"));
        let minute = self.values.get(&format!("{field}-minute"));

        match (hour, minute) {
            (None, None) => Some(None),
            (Some(hour), Some(minute)) => {
                let time = hour
                    .parse::<u32>()
                    .ok()
                    .zip(minute.parse::<u32>().ok())
                    .and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0));
                match time {
                    Some(time) => Some(Some(time)),
                    None => {
                        self.error(field, invalid);
                        None
                    }
                }
            }
            _ => {
                self.error(field, invalid);
                None
            }
        }
    }

    pub fn time(&mut self, field: &str, missing: &str, invalid: &str) -> Option<NaiveTime> {
        match self.optional_time(field, invalid)? {
            Some(time) => Some(time),
            None => {
                self.error(field, missing);
                None
            }
        }
    }

    /// Builds the form when no field failed.
    ///
    /// `build` returns `None` only when a required field is missing, which
    /// already recorded an error.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        build().ok_or_else(|| ValidationErrors::single("form", "Check your answers and try again"))
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/').map(str::trim);
    let day = parts.next()?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let year_part = parts.next()?;
    if parts.next().is_some() || year_part.len() != 4 {
        return None;
    }
    let year = year_part.parse::<i32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Today's date in the server's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YES`/`NO` radio answer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YesNo {
    Yes,
    No,
}

impl FromStr for YesNo {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "YES" => Ok(Self::Yes),
            "NO" => Ok(Self::No),
            _ => Err(()),
        }
    }
}
