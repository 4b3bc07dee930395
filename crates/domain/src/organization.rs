//! Client and contractor organizations referenced by projects.

use ohs_audit_core::FieldErrors;
use serde::{Deserialize, Serialize};

use crate::input::{
    FieldInput, FieldReader, INVALID_EMAIL, check_optional_email, check_optional_text,
    check_required_text, normalize_optional,
};
use crate::{ClientId, ConsultingFirmId, EmailAddress, PrincipalContractorId};

/// Maximum characters for organization and contact names.
pub const NAME_MAX_CHARS: usize = 200;
/// Maximum characters for a contact phone number.
pub const PHONE_MAX_CHARS: usize = 50;
/// Maximum characters for a contractor registration number.
pub const REGISTRATION_NUMBER_MAX_CHARS: usize = 100;

/// Fields a client contact update may change.
pub const CLIENT_CONTACT_FIELDS: [&str; 4] =
    ["contact_name", "contact_email", "contact_phone", "address"];

/// Client organization that commissions projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Stored primary key.
    pub id: ClientId,
    /// Organization name.
    pub name: String,
    /// Person to contact at the client.
    pub contact_name: Option<String>,
    /// Contact email address.
    pub contact_email: Option<String>,
    /// Contact phone number.
    pub contact_phone: Option<String>,
    /// Postal or physical address.
    pub address: Option<String>,
}

/// Client fields before the store assigns a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewClient {
    /// Organization name.
    pub name: String,
    /// Person to contact at the client.
    pub contact_name: Option<String>,
    /// Contact email address.
    pub contact_email: Option<String>,
    /// Contact phone number.
    pub contact_phone: Option<String>,
    /// Postal or physical address.
    pub address: Option<String>,
}

impl NewClient {
    /// Creates a client with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Checks every column constraint, returning all failures at once.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required_text(&mut errors, "name", &self.name, NAME_MAX_CHARS);
        check_contact_fields(
            &mut errors,
            self.contact_name.as_deref(),
            self.contact_email.as_deref(),
            self.contact_phone.as_deref(),
        );
        errors.into_result(())
    }

    /// Attaches the stored key.
    #[must_use]
    pub fn into_client(self, id: ClientId) -> Client {
        Client {
            id,
            name: self.name.trim().to_owned(),
            contact_name: normalize_optional(self.contact_name),
            contact_email: normalize_optional(self.contact_email),
            contact_phone: normalize_optional(self.contact_phone),
            address: normalize_optional(self.address),
        }
    }
}

impl Client {
    /// Checks every column constraint of a stored client.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required_text(&mut errors, "name", &self.name, NAME_MAX_CHARS);
        check_contact_fields(
            &mut errors,
            self.contact_name.as_deref(),
            self.contact_email.as_deref(),
            self.contact_phone.as_deref(),
        );
        errors.into_result(())
    }
}

fn check_contact_fields(
    errors: &mut FieldErrors,
    contact_name: Option<&str>,
    contact_email: Option<&str>,
    contact_phone: Option<&str>,
) {
    check_optional_text(errors, "contact_name", contact_name, NAME_MAX_CHARS);
    check_optional_email(errors, "contact_email", contact_email);
    check_optional_text(errors, "contact_phone", contact_phone, PHONE_MAX_CHARS);
}

/// Partial update of a client's contact details.
///
/// The outer `Option` tells whether the field was submitted; an inner `None`
/// clears the stored value. The client name is never part of an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContactUpdate {
    /// New contact name.
    pub contact_name: Option<Option<String>>,
    /// New contact email.
    pub contact_email: Option<Option<String>>,
    /// New contact phone.
    pub contact_phone: Option<Option<String>>,
    /// New address.
    pub address: Option<Option<String>>,
}

impl ClientContactUpdate {
    /// Reads the allow-listed contact fields, ignoring every other key.
    pub fn from_input(input: &FieldInput) -> Result<Self, FieldErrors> {
        let input = input.restricted_to(&CLIENT_CONTACT_FIELDS);
        let reader = FieldReader::new(&input);
        let submitted = |field: &str| {
            input
                .is_present(field)
                .then(|| reader.optional_text(field))
        };

        let update = Self {
            contact_name: submitted("contact_name"),
            contact_email: submitted("contact_email"),
            contact_phone: submitted("contact_phone"),
            address: submitted("address"),
        };

        let mut errors = reader.into_errors();
        if let Some(Some(email)) = &update.contact_email
            && EmailAddress::new(email.as_str()).is_err()
        {
            errors.add("contact_email", INVALID_EMAIL);
        }
        check_optional_text(
            &mut errors,
            "contact_name",
            update.contact_name.clone().flatten().as_deref(),
            NAME_MAX_CHARS,
        );
        check_optional_text(
            &mut errors,
            "contact_phone",
            update.contact_phone.clone().flatten().as_deref(),
            PHONE_MAX_CHARS,
        );

        errors.into_result(update)
    }

    /// Returns whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contact_name.is_none()
            && self.contact_email.is_none()
            && self.contact_phone.is_none()
            && self.address.is_none()
    }

    /// Applies the submitted fields to a stored client.
    #[must_use]
    pub fn apply_to(self, mut client: Client) -> Client {
        if let Some(value) = self.contact_name {
            client.contact_name = value;
        }
        if let Some(value) = self.contact_email {
            client.contact_email = value;
        }
        if let Some(value) = self.contact_phone {
            client.contact_phone = value;
        }
        if let Some(value) = self.address {
            client.address = value;
        }
        client
    }
}

/// Consulting engineering firm attached to projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultingFirm {
    /// Stored primary key.
    pub id: ConsultingFirmId,
    /// Firm name.
    pub name: String,
}

/// Consulting firm fields before the store assigns a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConsultingFirm {
    /// Firm name.
    pub name: String,
}

impl NewConsultingFirm {
    /// Checks the name column.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required_text(&mut errors, "name", &self.name, NAME_MAX_CHARS);
        errors.into_result(())
    }
}

/// Principal contractor responsible for a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalContractor {
    /// Stored primary key.
    pub id: PrincipalContractorId,
    /// Contractor name.
    pub name: String,
    /// Company registration number.
    pub registration_number: Option<String>,
}

/// Principal contractor fields before the store assigns a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrincipalContractor {
    /// Contractor name.
    pub name: String,
    /// Company registration number.
    pub registration_number: Option<String>,
}

impl NewPrincipalContractor {
    /// Checks the name and registration number columns.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required_text(&mut errors, "name", &self.name, NAME_MAX_CHARS);
        check_optional_text(
            &mut errors,
            "registration_number",
            self.registration_number.as_deref(),
            REGISTRATION_NUMBER_MAX_CHARS,
        );
        errors.into_result(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Client, ClientContactUpdate, NewClient};
    use crate::ClientId;
    use crate::input::{FieldInput, REQUIRED};

    fn stored_client() -> Client {
        Client {
            id: ClientId::new(1),
            name: "City of Tshwane".to_owned(),
            contact_name: Some("Thandi".to_owned()),
            contact_email: Some("thandi@tshwane.gov.za".to_owned()),
            contact_phone: Some("012 000 0000".to_owned()),
            address: None,
        }
    }

    #[test]
    fn update_ignores_name_and_keeps_absent_fields() {
        let input = FieldInput::new()
            .with("name", "Hijacked")
            .with("contact_phone", "011 111 1111");

        let update = ClientContactUpdate::from_input(&input).unwrap_or_default();
        let client = update.apply_to(stored_client());

        assert_eq!(client.name, "City of Tshwane");
        assert_eq!(client.contact_phone.as_deref(), Some("011 111 1111"));
        assert_eq!(client.contact_name.as_deref(), Some("Thandi"));
    }

    #[test]
    fn blank_submitted_field_clears_value() {
        let input = FieldInput::new().with("contact_name", "  ");

        let update = ClientContactUpdate::from_input(&input).unwrap_or_default();
        let client = update.apply_to(stored_client());

        assert_eq!(client.contact_name, None);
    }

    #[test]
    fn update_rejects_invalid_email() {
        let input = FieldInput::new().with("contact_email", "not-an-email");

        let errors = ClientContactUpdate::from_input(&input)
            .err()
            .unwrap_or_default();
        assert!(errors.contains("contact_email"));
    }

    #[test]
    fn new_client_requires_name() {
        let errors = NewClient::named(" ").validate().err().unwrap_or_default();
        assert_eq!(errors.messages_for("name"), [REQUIRED.to_owned()]);
    }
}
