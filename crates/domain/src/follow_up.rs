use chrono::NaiveDate;
use ohs_audit_core::FieldErrors;
use serde::{Deserialize, Serialize};

use crate::input::{check_optional_text, check_required_text, normalize_optional};
use crate::{ActionItemId, AuditId, RiskRatingId};

/// Maximum characters for a risk rating time frame.
pub const TIME_FRAME_MAX_CHARS: usize = 100;
/// Maximum characters for a regulation reference.
pub const REGULATION_REFERENCE_MAX_CHARS: usize = 100;
/// Maximum characters for an action assignee.
pub const ASSIGNED_TO_MAX_CHARS: usize = 200;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Must be addressed immediately.
    Critical,
    /// Must be addressed urgently.
    High,
    /// Must be addressed soon.
    Medium,
    /// Can be planned.
    Low,
}

impl RiskLevel {
    /// Every level from most to least severe.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Critical, Self::High, Self::Medium, Self::Low]
    }

    /// Stable storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parses a storage code.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::all().into_iter().find(|level| level.as_str() == value)
    }
}

/// Response time frame attached to a risk level. One rating per level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRating {
    /// Stored primary key.
    pub id: RiskRatingId,
    /// Severity.
    pub level: RiskLevel,
    /// Required response time, e.g. `Immediate`.
    pub time_frame: String,
}

/// Risk rating before the store assigns a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRiskRating {
    /// Severity.
    pub level: RiskLevel,
    /// Required response time.
    pub time_frame: String,
}

impl NewRiskRating {
    /// Checks the time frame column.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required_text(
            &mut errors,
            "time_frame",
            &self.time_frame,
            TIME_FRAME_MAX_CHARS,
        );
        errors.into_result(())
    }
}

/// Corrective action raised by an audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    /// Stored primary key.
    pub id: ActionItemId,
    /// Owning audit.
    pub audit_id: AuditId,
    /// What must be done.
    pub description: String,
    /// Regulation the finding refers to, e.g. `CR 8(5)`.
    pub regulation_reference: Option<String>,
    /// Party responsible for the action.
    pub assigned_to: String,
    /// Severity; cleared when the rating is deleted.
    pub risk_rating_id: Option<RiskRatingId>,
    /// Target completion date.
    pub due_date: Option<NaiveDate>,
    /// Whether the action is done.
    pub completed: bool,
    /// Day the action was done.
    pub completion_date: Option<NaiveDate>,
    /// Follow-up comments.
    pub comments: Option<String>,
}

/// Action item before the store assigns a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActionItem {
    /// Owning audit.
    pub audit_id: AuditId,
    /// What must be done.
    pub description: String,
    /// Regulation the finding refers to.
    pub regulation_reference: Option<String>,
    /// Party responsible for the action.
    pub assigned_to: String,
    /// Severity.
    pub risk_rating_id: Option<RiskRatingId>,
    /// Target completion date.
    pub due_date: Option<NaiveDate>,
    /// Follow-up comments.
    pub comments: Option<String>,
}

impl NewActionItem {
    /// Checks the text columns.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required_text(&mut errors, "description", &self.description, usize::MAX);
        check_optional_text(
            &mut errors,
            "regulation_reference",
            self.regulation_reference.as_deref(),
            REGULATION_REFERENCE_MAX_CHARS,
        );
        check_required_text(
            &mut errors,
            "assigned_to",
            &self.assigned_to,
            ASSIGNED_TO_MAX_CHARS,
        );
        errors.into_result(())
    }

    /// Attaches the stored key. New actions start open.
    #[must_use]
    pub fn into_action_item(self, id: ActionItemId) -> ActionItem {
        ActionItem {
            id,
            audit_id: self.audit_id,
            description: self.description.trim().to_owned(),
            regulation_reference: normalize_optional(self.regulation_reference),
            assigned_to: self.assigned_to.trim().to_owned(),
            risk_rating_id: self.risk_rating_id,
            due_date: self.due_date,
            completed: false,
            completion_date: None,
            comments: normalize_optional(self.comments),
        }
    }
}

impl ActionItem {
    /// Marks the action done on the given day.
    pub fn complete(&mut self, on: NaiveDate) {
        self.completed = true;
        self.completion_date = Some(on);
    }

    /// Returns whether the action is open past its due date.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{NewActionItem, RiskLevel};
    use crate::{ActionItemId, AuditId};

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_default()
    }

    #[test]
    fn completed_actions_are_never_overdue() {
        let mut action = NewActionItem {
            audit_id: AuditId::new(1),
            description: "Barricade open trench".to_owned(),
            regulation_reference: Some("CR 13(2)".to_owned()),
            assigned_to: "Principal Contractor".to_owned(),
            risk_rating_id: None,
            due_date: Some(day("2025-06-20")),
            comments: None,
        }
        .into_action_item(ActionItemId::new(1));

        assert!(action.is_overdue(day("2025-06-21")));
        action.complete(day("2025-06-22"));
        assert!(!action.is_overdue(day("2025-06-23")));
        assert_eq!(action.completion_date, Some(day("2025-06-22")));
    }

    #[test]
    fn action_requires_assignee() {
        let action = NewActionItem {
            audit_id: AuditId::new(1),
            description: "Update SHE file".to_owned(),
            regulation_reference: None,
            assigned_to: String::new(),
            risk_rating_id: None,
            due_date: None,
            comments: None,
        };

        let errors = action.validate().err().unwrap_or_default();
        assert!(errors.contains("assigned_to"));
    }

    #[test]
    fn risk_levels_parse_storage_codes() {
        assert_eq!(RiskLevel::parse("CRITICAL"), Some(RiskLevel::Critical));
        assert_eq!(RiskLevel::parse("Severe"), None);
    }
}
