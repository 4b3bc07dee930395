use chrono::{DateTime, Utc};
use ohs_audit_core::FieldErrors;
use serde::{Deserialize, Serialize};

use crate::input::{
    below_minimum, check_optional_count, check_optional_text, check_required_text,
    normalize_optional,
};
use crate::{AuditId, SitePersonnelId, VisualObservationId};

/// Maximum characters for an observation type.
pub const OBSERVATION_TYPE_MAX_CHARS: usize = 100;
/// Maximum characters for a photo reference.
pub const PHOTO_REFERENCE_MAX_CHARS: usize = 200;

/// Head count on site during an audit. One record per audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitePersonnel {
    /// Stored primary key.
    pub id: SitePersonnelId,
    /// Owning audit.
    pub audit_id: AuditId,
    /// Everyone on site.
    pub total_personnel: i32,
    /// Management staff.
    pub management_count: Option<i32>,
    /// Workers.
    pub worker_count: Option<i32>,
    /// Subcontractor staff.
    pub subcontractor_count: Option<i32>,
}

/// Head count to record for an audit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitePersonnelCounts {
    /// Everyone on site.
    pub total_personnel: i32,
    /// Management staff.
    pub management_count: Option<i32>,
    /// Workers.
    pub worker_count: Option<i32>,
    /// Subcontractor staff.
    pub subcontractor_count: Option<i32>,
}

impl SitePersonnelCounts {
    /// Checks every count is non-negative.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.total_personnel < 0 {
            errors.add("total_personnel", below_minimum(0));
        }
        check_optional_count(&mut errors, "management_count", self.management_count);
        check_optional_count(&mut errors, "worker_count", self.worker_count);
        check_optional_count(&mut errors, "subcontractor_count", self.subcontractor_count);
        errors.into_result(())
    }

    /// Attaches the stored key and owning audit.
    #[must_use]
    pub fn into_personnel(self, id: SitePersonnelId, audit_id: AuditId) -> SitePersonnel {
        SitePersonnel {
            id,
            audit_id,
            total_personnel: self.total_personnel,
            management_count: self.management_count,
            worker_count: self.worker_count,
            subcontractor_count: self.subcontractor_count,
        }
    }
}

/// Something the auditor saw on site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualObservation {
    /// Stored primary key.
    pub id: VisualObservationId,
    /// Owning audit.
    pub audit_id: AuditId,
    /// What was observed.
    pub description: String,
    /// Kind of observation, e.g. `Housekeeping`.
    pub observation_type: Option<String>,
    /// File path or reference of the photo.
    pub photo_reference: Option<String>,
    /// Set by the store on insert.
    pub date_recorded: DateTime<Utc>,
}

/// Observation before the store assigns a key and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisualObservation {
    /// Owning audit.
    pub audit_id: AuditId,
    /// What was observed.
    pub description: String,
    /// Kind of observation.
    pub observation_type: Option<String>,
    /// File path or reference of the photo.
    pub photo_reference: Option<String>,
}

impl NewVisualObservation {
    /// Checks the text columns.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required_text(&mut errors, "description", &self.description, usize::MAX);
        check_optional_text(
            &mut errors,
            "observation_type",
            self.observation_type.as_deref(),
            OBSERVATION_TYPE_MAX_CHARS,
        );
        check_optional_text(
            &mut errors,
            "photo_reference",
            self.photo_reference.as_deref(),
            PHOTO_REFERENCE_MAX_CHARS,
        );
        errors.into_result(())
    }

    /// Attaches the stored key and insert timestamp.
    #[must_use]
    pub fn into_observation(
        self,
        id: VisualObservationId,
        date_recorded: DateTime<Utc>,
    ) -> VisualObservation {
        VisualObservation {
            id,
            audit_id: self.audit_id,
            description: self.description.trim().to_owned(),
            observation_type: normalize_optional(self.observation_type),
            photo_reference: normalize_optional(self.photo_reference),
            date_recorded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewVisualObservation, SitePersonnelCounts};
    use crate::AuditId;

    #[test]
    fn negative_counts_are_rejected_per_field() {
        let counts = SitePersonnelCounts {
            total_personnel: -1,
            management_count: Some(2),
            worker_count: Some(-4),
            subcontractor_count: None,
        };

        let errors = counts.validate().err().unwrap_or_default();
        assert!(errors.contains("total_personnel"));
        assert!(errors.contains("worker_count"));
        assert!(!errors.contains("management_count"));
    }

    #[test]
    fn observation_requires_description() {
        let observation = NewVisualObservation {
            audit_id: AuditId::new(1),
            description: "   ".to_owned(),
            observation_type: Some("Housekeeping".to_owned()),
            photo_reference: None,
        };

        assert!(observation.validate().is_err());
    }
}
