use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_KEY: &str = "*";

/// Field name to human-readable messages, in stable field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty error mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mapping holding one message for one field.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Creates a mapping holding one non-field message.
    #[must_use]
    pub fn non_field(message: impl Into<String>) -> Self {
        Self::single(NON_FIELD_KEY, message)
    }

    /// Appends a message for the given field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Moves every message of `other` into this mapping.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// Returns whether no message was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether the field has at least one message.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns the messages recorded for a field.
    #[must_use]
    pub fn messages_for(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates fields and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Returns `Ok(value)` when empty, the mapping otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    formatter.write_str("; ")?;
                }
                write!(formatter, "{field}: {message}")?;
                first = false;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldErrors, NON_FIELD_KEY};

    #[test]
    fn serializes_as_field_to_message_list() {
        let mut errors = FieldErrors::new();
        errors.add("contact_email", "Enter a valid email address.");
        errors.add(NON_FIELD_KEY, "Invalid JSON payload.");

        let value = serde_json::to_value(&errors).unwrap_or_default();
        assert_eq!(
            value,
            serde_json::json!({
                "*": ["Invalid JSON payload."],
                "contact_email": ["Enter a valid email address."],
            })
        );
    }

    #[test]
    fn merge_keeps_messages_from_both_sides() {
        let mut left = FieldErrors::single("audit_date", "Enter a valid date.");
        left.merge(FieldErrors::single("audit_date", "This field is required."));

        assert_eq!(left.messages_for("audit_date").len(), 2);
        assert!(left.into_result(()).is_err());
    }

    #[test]
    fn display_joins_messages() {
        let errors = FieldErrors::single("project", "This field is required.");
        assert_eq!(errors.to_string(), "project: This field is required.");
    }
}
