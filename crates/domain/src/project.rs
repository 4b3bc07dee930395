use ohs_audit_core::FieldErrors;
use serde::{Deserialize, Serialize};

use crate::input::check_required_text;
use crate::{ClientId, ConsultingFirmId, PrincipalContractorId, ProjectId};

/// Maximum characters for a project title or location.
pub const TITLE_MAX_CHARS: usize = 500;
/// Maximum characters for a construction permit number.
pub const PERMIT_NUMBER_MAX_CHARS: usize = 100;

/// Construction project under audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stored primary key.
    pub id: ProjectId,
    /// Project title.
    pub title: String,
    /// Construction permit number.
    pub permit_number: String,
    /// Site location.
    pub location: String,
    /// Commissioning client.
    pub client_id: ClientId,
    /// Consulting engineer on the project.
    pub consulting_engineer_id: ConsultingFirmId,
    /// Principal contractor on site.
    pub principal_contractor_id: PrincipalContractorId,
}

impl Project {
    /// Human-readable label used in choice lists.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.title, self.permit_number)
    }
}

/// Project fields before the store assigns a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Project title.
    pub title: String,
    /// Construction permit number.
    pub permit_number: String,
    /// Site location.
    pub location: String,
    /// Commissioning client.
    pub client_id: ClientId,
    /// Consulting engineer on the project.
    pub consulting_engineer_id: ConsultingFirmId,
    /// Principal contractor on site.
    pub principal_contractor_id: PrincipalContractorId,
}

impl NewProject {
    /// Checks the text columns. References are checked by the store.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required_text(&mut errors, "title", &self.title, TITLE_MAX_CHARS);
        check_required_text(
            &mut errors,
            "permit_number",
            &self.permit_number,
            PERMIT_NUMBER_MAX_CHARS,
        );
        check_required_text(&mut errors, "location", &self.location, TITLE_MAX_CHARS);
        errors.into_result(())
    }

    /// Attaches the stored key.
    #[must_use]
    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            title: self.title.trim().to_owned(),
            permit_number: self.permit_number.trim().to_owned(),
            location: self.location.trim().to_owned(),
            client_id: self.client_id,
            consulting_engineer_id: self.consulting_engineer_id,
            principal_contractor_id: self.principal_contractor_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NewProject;
    use crate::{ClientId, ConsultingFirmId, PrincipalContractorId, ProjectId};

    fn new_project(title: &str) -> NewProject {
        NewProject {
            title: title.to_owned(),
            permit_number: "CW-2025-118".to_owned(),
            location: "Pretoria North".to_owned(),
            client_id: ClientId::new(1),
            consulting_engineer_id: ConsultingFirmId::new(1),
            principal_contractor_id: PrincipalContractorId::new(1),
        }
    }

    #[test]
    fn label_joins_title_and_permit() {
        let project = new_project("Road Upgrade").into_project(ProjectId::new(3));
        assert_eq!(project.label(), "Road Upgrade - CW-2025-118");
    }

    #[test]
    fn overlong_title_is_rejected() {
        let errors = new_project(&"x".repeat(501))
            .validate()
            .err()
            .unwrap_or_default();
        assert_eq!(
            errors.messages_for("title"),
            ["Ensure this value has at most 500 characters (it has 501).".to_owned()]
        );
    }
}
