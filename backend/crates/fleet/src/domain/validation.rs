//! Form Field Validation
//!
//! Use cases read raw form text through these helpers. Each helper records
//! a message against the field on failure and returns `None`, so one
//! submission reports every problem at once.

use chrono::{Datelike, NaiveDate, Utc};
use kernel::id::{Id, ParseIdError};
use serde::Serialize;
use std::fmt;

use crate::domain::value_object::{email::Email, money::Money};

/// First production car
const MIN_CAR_YEAR: i32 = 1886;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Ordered collection of field errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
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

    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// `Ok(value)` when nothing was recorded
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

fn too_long(errors: &mut ValidationErrors, field: &'static str, label: &str, max: usize) {
    errors.add(field, format!("{label} must be at most {max} characters"));
}

pub fn required_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    raw: &str,
    max: usize,
) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        errors.add(field, format!("{label} is required"));
        return None;
    }
    if value.chars().count() > max {
        too_long(errors, field, label, max);
        return None;
    }
    Some(value.to_string())
}

/// Blank input is `None` without an error
pub fn optional_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    raw: &str,
    max: usize,
) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if value.chars().count() > max {
        too_long(errors, field, label, max);
        return None;
    }
    Some(value.to_string())
}

pub fn required_id<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> Option<Id<T>> {
    match raw.parse::<Id<T>>() {
        Ok(id) => Some(id),
        Err(ParseIdError::Empty) => {
            errors.add(field, format!("{label} is required"));
            None
        }
        Err(ParseIdError::Invalid) => {
            errors.add(field, format!("{label} is not a valid selection"));
            None
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

pub fn required_date(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        errors.add(field, format!("{label} is required"));
        return None;
    }
    let date = parse_date(value);
    if date.is_none() {
        errors.add(field, format!("{label} must be a date in YYYY-MM-DD form"));
    }
    date
}

pub fn optional_date(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    let date = parse_date(value);
    if date.is_none() {
        errors.add(field, format!("{label} must be a date in YYYY-MM-DD form"));
    }
    date
}

pub fn required_money(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> Option<Money> {
    match raw.parse::<Money>() {
        Ok(money) => Some(money),
        Err(e) => {
            errors.add(field, format!("{label} {e}"));
            None
        }
    }
}

/// Model year, between the first car and next year
pub fn optional_year(errors: &mut ValidationErrors, field: &'static str, raw: &str) -> Option<i32> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    let max = Utc::now().year() + 1;
    match value.parse::<i32>() {
        Ok(year) if (MIN_CAR_YEAR..=max).contains(&year) => Some(year),
        _ => {
            errors.add(
                field,
                format!("Year must be a whole number between {MIN_CAR_YEAR} and {max}"),
            );
            None
        }
    }
}

pub fn optional_email(errors: &mut ValidationErrors, field: &'static str, raw: &str) -> Option<Email> {
    if raw.trim().is_empty() {
        return None;
    }
    match Email::new(raw) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.add(field, e.message().to_string());
            None
        }
    }
}
