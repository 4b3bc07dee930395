use ohs_audit_domain::{
    AUDIT_FIELDS, AuditType, FieldInput, NOTICE_FIELDS, NewAudit, ProjectId, SCORE_FIELDS,
    input::INVALID_REFERENCE,
};
use tracing::info;

use super::*;

impl AuditService {
    /// Describes the audit creation form, including every project as a choice.
    pub async fn form_metadata(&self) -> AppResult<AuditFormMetadata> {
        let projects = self.repositories.projects.list_projects().await?;
        let project_choices = projects
            .iter()
            .map(|project| FieldChoice {
                value: project.id.to_string(),
                label: project.label(),
            })
            .collect::<Vec<_>>();
        let audit_type_choices = AuditType::all()
            .into_iter()
            .map(|audit_type| FieldChoice {
                value: audit_type.as_str().to_owned(),
                label: audit_type.label().to_owned(),
            })
            .collect::<Vec<_>>();

        let fields = AUDIT_FIELDS
            .into_iter()
            .map(|name| FormFieldMetadata {
                name,
                field_type: if name == "audit_date" { "date" } else { "text" },
                choices: match name {
                    "project" => Some(project_choices.clone()),
                    "audit_type" => Some(audit_type_choices.clone()),
                    _ => None,
                },
            })
            .collect();

        let numeric = |name| FormFieldMetadata {
            name,
            field_type: "number",
            choices: None,
        };

        Ok(AuditFormMetadata {
            fields,
            score_fields: SCORE_FIELDS.into_iter().map(numeric).collect(),
            notice_fields: NOTICE_FIELDS.into_iter().map(numeric).collect(),
        })
    }

    /// Validates a full audit submission and stores it.
    ///
    /// Every field error, including an unknown project, is reported in one
    /// `Validation` error and nothing is written.
    pub async fn create_audit(&self, input: &FieldInput) -> AppResult<Audit> {
        let parsed = NewAudit::from_input(input);

        let project_missing = match input.text("project").map(str::parse::<i64>) {
            Some(Ok(raw_id)) if raw_id > 0 => self
                .repositories
                .projects
                .find_project(ProjectId::new(raw_id))
                .await?
                .is_none(),
            _ => false,
        };

        let audit = match parsed {
            Ok(audit) if !project_missing => audit,
            Ok(_) => return Err(AppError::field("project", INVALID_REFERENCE)),
            Err(mut errors) => {
                if project_missing {
                    errors.add("project", INVALID_REFERENCE);
                }
                return Err(AppError::Validation(errors));
            }
        };

        let audit = self.repositories.audits.create_audit(audit).await?;
        info!(
            audit_id = %audit.id,
            project_id = %audit.project_id,
            report_number = %audit.report_number,
            "audit created"
        );
        Ok(audit)
    }

    /// Returns the newest audit with this report number.
    pub async fn find_by_report_number(&self, report_number: &str) -> AppResult<Option<Audit>> {
        self.repositories
            .audits
            .find_audit_by_report_number(report_number)
            .await
    }
}
