//! Canonical request input and the field readers shared by every validated
//! record.
//!
//! Transport-specific bodies (JSON objects, form-encoded pairs) are converted
//! into a [`FieldInput`] once at the boundary; validation only ever sees this
//! shape.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use ohs_audit_core::FieldErrors;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::{EmailAddress, Percentage};

/// Message for a missing required value.
pub const REQUIRED: &str = "This field is required.";
/// Message for a malformed email address.
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
/// Message for an unparseable date.
pub const INVALID_DATE: &str = "Enter a valid date.";
/// Message for an unparseable decimal.
pub const INVALID_NUMBER: &str = "Enter a number.";
/// Message for an unparseable integer.
pub const INVALID_INTEGER: &str = "Enter a whole number.";
/// Message for a reference to a row that does not exist.
pub const INVALID_REFERENCE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

const DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

/// Message for a value outside a fixed code list.
#[must_use]
pub fn invalid_choice(value: &str) -> String {
    format!("Select a valid choice. {value} is not one of the available choices.")
}

/// Message for a value below the allowed minimum.
#[must_use]
pub fn below_minimum(limit: impl std::fmt::Display) -> String {
    format!("Ensure this value is greater than or equal to {limit}.")
}

/// Message for a value above the allowed maximum.
#[must_use]
pub fn above_maximum(limit: impl std::fmt::Display) -> String {
    format!("Ensure this value is less than or equal to {limit}.")
}

/// Message for text longer than the column allows.
#[must_use]
pub fn too_long(max_chars: usize, actual: usize) -> String {
    format!("Ensure this value has at most {max_chars} characters (it has {actual}).")
}

/// Canonical request input: field name to submitted text.
///
/// A key that is present with `None` was submitted explicitly empty (JSON
/// `null`); an absent key was not submitted at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInput {
    values: BTreeMap<String, Option<String>>,
}

impl FieldInput {
    /// Creates an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds input from form-encoded pairs. Repeated keys keep the last value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let values = pairs
            .into_iter()
            .map(|(key, value)| (key, Some(value)))
            .collect();

        Self { values }
    }

    /// Builds input from a decoded JSON object.
    #[must_use]
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let values = object
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::Null => None,
                    Value::String(text) => Some(text.clone()),
                    Value::Bool(flag) => Some(flag.to_string()),
                    Value::Number(number) => Some(number.to_string()),
                    Value::Array(_) | Value::Object(_) => Some(value.to_string()),
                };
                (key.clone(), text)
            })
            .collect();

        Self { values }
    }

    /// Adds or replaces one submitted value.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.values.insert(field.to_owned(), Some(value.into()));
        self
    }

    /// Returns whether the field was submitted at all.
    #[must_use]
    pub fn is_present(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Returns the trimmed submitted text, or `None` when absent or blank.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.values
            .get(field)
            .and_then(Option::as_deref)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Returns the submitted text exactly as sent, or `None` when absent or
    /// `null`.
    #[must_use]
    pub fn raw(&self, field: &str) -> Option<&str> {
        self.values.get(field).and_then(Option::as_deref)
    }

    /// Returns a copy holding only the allow-listed fields.
    #[must_use]
    pub fn restricted_to(&self, allowed: &[&str]) -> Self {
        let values = self
            .values
            .iter()
            .filter(|(key, _)| allowed.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self { values }
    }
}

/// Reads typed values out of a [`FieldInput`], collecting field errors.
#[derive(Debug)]
pub struct FieldReader<'a> {
    input: &'a FieldInput,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    /// Starts reading the given input.
    #[must_use]
    pub fn new(input: &'a FieldInput) -> Self {
        Self {
            input,
            errors: FieldErrors::new(),
        }
    }

    /// Records an extra error while reading.
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    /// Reads required text, trimmed.
    pub fn required_text(&mut self, field: &str) -> Option<String> {
        match self.input.text(field) {
            Some(value) => Some(value.to_owned()),
            None => {
                self.errors.add(field, REQUIRED);
                None
            }
        }
    }

    /// Reads optional text, trimmed; blank is `None`.
    #[must_use]
    pub fn optional_text(&self, field: &str) -> Option<String> {
        self.input.text(field).map(ToOwned::to_owned)
    }

    /// Reads a required integer primary key referencing another row.
    pub fn required_reference(&mut self, field: &str) -> Option<i64> {
        let raw = self.required_raw(field)?;
        match raw.parse::<i64>() {
            Ok(value) if value > 0 => Some(value),
            _ => {
                self.errors.add(field, INVALID_REFERENCE);
                None
            }
        }
    }

    /// Reads an optional integer primary key referencing another row.
    pub fn optional_reference(&mut self, field: &str) -> Option<Option<i64>> {
        let Some(raw) = self.input.text(field) else {
            return Some(None);
        };

        match raw.parse::<i64>() {
            Ok(value) if value > 0 => Some(Some(value)),
            _ => {
                self.errors.add(field, INVALID_REFERENCE);
                None
            }
        }
    }

    /// Reads a required calendar date.
    pub fn required_date(&mut self, field: &str) -> Option<NaiveDate> {
        let raw = self.required_raw(field)?;
        self.parse_date(field, raw)
    }

    /// Reads an optional calendar date.
    pub fn optional_date(&mut self, field: &str) -> Option<Option<NaiveDate>> {
        match self.input.text(field) {
            Some(raw) => self.parse_date(field, raw).map(Some),
            None => Some(None),
        }
    }

    /// Reads a required percentage in `[0, 100]`.
    pub fn required_percentage(&mut self, field: &str) -> Option<Percentage> {
        let raw = self.required_raw(field)?;
        self.parse_percentage(field, raw)
    }

    /// Reads a percentage, falling back to `default` when not submitted.
    pub fn percentage_or(&mut self, field: &str, default: Percentage) -> Option<Percentage> {
        match self.input.text(field) {
            Some(raw) => self.parse_percentage(field, raw),
            None => Some(default),
        }
    }

    /// Reads a non-negative counter, falling back to `default` when not submitted.
    pub fn count_or(&mut self, field: &str, default: i32) -> Option<i32> {
        match self.input.text(field) {
            Some(raw) => self.parse_count(field, raw),
            None => Some(default),
        }
    }

    /// Reads an optional non-negative counter.
    pub fn optional_count(&mut self, field: &str) -> Option<Option<i32>> {
        match self.input.text(field) {
            Some(raw) => self.parse_count(field, raw).map(Some),
            None => Some(None),
        }
    }

    /// Reads a boolean flag, falling back to `default` when not submitted.
    pub fn flag_or(&mut self, field: &str, default: bool) -> Option<bool> {
        let Some(raw) = self.input.text(field) else {
            return Some(default);
        };

        match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => Some(true),
            "false" | "0" | "off" | "no" => Some(false),
            _ => {
                self.errors.add(field, invalid_choice(raw));
                None
            }
        }
    }

    /// Reads a required value from a fixed code list.
    pub fn required_choice<T>(
        &mut self,
        field: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let raw = self.required_raw(field)?;
        self.parse_choice(field, raw, parse)
    }

    /// Reads a value from a fixed code list, falling back to `default`.
    pub fn choice_or<T>(
        &mut self,
        field: &str,
        default: T,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        match self.input.text(field) {
            Some(raw) => self.parse_choice(field, raw, parse),
            None => Some(default),
        }
    }

    /// Finishes reading and returns the collected errors.
    #[must_use]
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    fn required_raw(&mut self, field: &str) -> Option<&'a str> {
        let value = self.input.text(field);
        if value.is_none() {
            self.errors.add(field, REQUIRED);
        }
        value
    }

    fn parse_date(&mut self, field: &str, raw: &str) -> Option<NaiveDate> {
        let parsed = DATE_INPUT_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok());
        if parsed.is_none() {
            self.errors.add(field, INVALID_DATE);
        }
        parsed
    }

    fn parse_percentage(&mut self, field: &str, raw: &str) -> Option<Percentage> {
        let Ok(value) = Decimal::from_str(raw) else {
            self.errors.add(field, INVALID_NUMBER);
            return None;
        };

        match Percentage::new(value) {
            Ok(percentage) => Some(percentage),
            Err(message) => {
                self.errors.add(field, message);
                None
            }
        }
    }

    fn parse_count(&mut self, field: &str, raw: &str) -> Option<i32> {
        let Ok(value) = raw.parse::<i32>() else {
            self.errors.add(field, INVALID_INTEGER);
            return None;
        };

        if value < 0 {
            self.errors.add(field, below_minimum(0));
            return None;
        }

        Some(value)
    }

    fn parse_choice<T>(
        &mut self,
        field: &str,
        raw: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let parsed = parse(raw);
        if parsed.is_none() {
            self.errors.add(field, invalid_choice(raw));
        }
        parsed
    }
}

/// Checks a required text column: non-blank and within `max_chars`.
pub fn check_required_text(errors: &mut FieldErrors, field: &str, value: &str, max_chars: usize) {
    if value.trim().is_empty() {
        errors.add(field, REQUIRED);
        return;
    }

    check_length(errors, field, value, max_chars);
}

/// Checks an optional text column against `max_chars`.
pub fn check_optional_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max_chars: usize,
) {
    if let Some(value) = value {
        check_length(errors, field, value, max_chars);
    }
}

/// Checks an optional email column against the address grammar.
pub fn check_optional_email(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    if let Some(value) = value
        && EmailAddress::new(value).is_err()
    {
        errors.add(field, INVALID_EMAIL);
    }
}

/// Checks an optional counter is not negative.
pub fn check_optional_count(errors: &mut FieldErrors, field: &str, value: Option<i32>) {
    if value.is_some_and(|count| count < 0) {
        errors.add(field, below_minimum(0));
    }
}

fn check_length(errors: &mut FieldErrors, field: &str, value: &str, max_chars: usize) {
    let actual = value.chars().count();
    if actual > max_chars {
        errors.add(field, too_long(max_chars, actual));
    }
}

/// Normalizes optional text: trims and maps blank to `None`.
#[must_use]
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{FieldInput, FieldReader, INVALID_DATE, REQUIRED, invalid_choice};

    #[test]
    fn json_object_values_become_text() {
        let object = json!({
            "project": 4,
            "audit_type": "OHS",
            "completed": true,
            "comments": null,
        });
        let Some(object) = object.as_object() else {
            panic!("expected object");
        };

        let input = FieldInput::from_json_object(object);
        assert_eq!(input.text("project"), Some("4"));
        assert_eq!(input.text("completed"), Some("true"));
        assert!(input.is_present("comments"));
        assert_eq!(input.text("comments"), None);
    }

    #[test]
    fn form_pairs_keep_last_value() {
        let input = FieldInput::from_pairs(vec![
            ("username".to_owned(), "first".to_owned()),
            ("username".to_owned(), "second".to_owned()),
        ]);

        assert_eq!(input.text("username"), Some("second"));
    }

    #[test]
    fn restricted_input_drops_unlisted_fields() {
        let input = FieldInput::new()
            .with("name", "Renamed")
            .with("contact_name", "Thandi");

        let restricted = input.restricted_to(&["contact_name"]);
        assert!(!restricted.is_present("name"));
        assert_eq!(restricted.text("contact_name"), Some("Thandi"));
    }

    #[test]
    fn reader_collects_errors_per_field() {
        let input = FieldInput::new()
            .with("audit_date", "17 July")
            .with("audit_type", "SAFETY");
        let mut reader = FieldReader::new(&input);

        assert!(reader.required_date("audit_date").is_none());
        assert!(reader.required_text("performed_by").is_none());
        assert!(
            reader
                .required_choice("audit_type", |raw| (raw == "OHS").then_some(()))
                .is_none()
        );

        let errors = reader.into_errors();
        assert_eq!(errors.messages_for("audit_date"), [INVALID_DATE.to_owned()]);
        assert_eq!(errors.messages_for("performed_by"), [REQUIRED.to_owned()]);
        assert_eq!(
            errors.messages_for("audit_type"),
            [invalid_choice("SAFETY")]
        );
    }

    #[test]
    fn dates_accept_us_formats() {
        let input = FieldInput::new()
            .with("iso", "2025-07-17")
            .with("us", "07/17/2025");
        let mut reader = FieldReader::new(&input);

        assert_eq!(reader.required_date("iso"), reader.required_date("us"));
        assert!(reader.into_errors().is_empty());
    }

    #[test]
    fn negative_counter_is_rejected() {
        let input = FieldInput::new().with("improvement_notices", "-1");
        let mut reader = FieldReader::new(&input);

        assert!(reader.count_or("improvement_notices", 0).is_none());
        assert!(reader.into_errors().contains("improvement_notices"));
    }
}
