//! Audit records, their score fields, and the dashboard summary row.

use chrono::NaiveDate;
use ohs_audit_core::FieldErrors;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::input::{FieldInput, FieldReader, above_maximum, below_minimum, check_required_text};
use crate::{AuditId, ProjectId};

/// Maximum characters for an audit number.
pub const AUDIT_NUMBER_MAX_CHARS: usize = 50;
/// Maximum characters for the performing consultancy.
pub const PERFORMED_BY_MAX_CHARS: usize = 200;
/// Maximum characters for a report number.
pub const REPORT_NUMBER_MAX_CHARS: usize = 100;

/// Fields rendered in the first step of the audit form.
pub const AUDIT_FIELDS: [&str; 6] = [
    "project",
    "audit_date",
    "audit_type",
    "audit_number",
    "performed_by",
    "report_number",
];
/// Score fields of the audit form.
pub const SCORE_FIELDS: [&str; 2] = ["overall_score_percentage", "standard_required"];
/// Notice counter fields of the audit form.
pub const NOTICE_FIELDS: [&str; 3] = [
    "improvement_notices",
    "contravention_notices",
    "prohibition_notices",
];

const DECIMAL_PLACES_MESSAGE: &str = "Ensure that there are no more than 2 decimal places.";

/// Kind of audit performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditType {
    /// Occupational health and safety.
    #[default]
    #[serde(rename = "OHS")]
    Ohs,
    /// Environmental.
    #[serde(rename = "ENV")]
    Env,
    /// Quality.
    #[serde(rename = "QUAL")]
    Qual,
}

impl AuditType {
    /// Every audit type in display order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Ohs, Self::Env, Self::Qual]
    }

    /// Stable storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ohs => "OHS",
            Self::Env => "ENV",
            Self::Qual => "QUAL",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ohs => "Occupational Health & Safety Audit",
            Self::Env => "Environmental Audit",
            Self::Qual => "Quality Audit",
        }
    }

    /// Parses a storage code.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|audit_type| audit_type.as_str() == value)
    }
}

/// Percentage in `[0, 100]` with at most two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percentage(Decimal);

impl Percentage {
    /// Default compliance threshold.
    pub const STANDARD_REQUIRED: Self = Self(Decimal::from_parts(7500, 0, 0, false, 2));

    /// Validates a percentage, returning the user-facing message on failure.
    pub fn new(value: Decimal) -> Result<Self, String> {
        if value < Decimal::ZERO {
            return Err(below_minimum(0));
        }

        if value > Decimal::ONE_HUNDRED {
            return Err(above_maximum(100));
        }

        if value.normalize().scale() > 2 {
            return Err(DECIMAL_PLACES_MESSAGE.to_owned());
        }

        let mut stored = value;
        stored.rescale(2);
        Ok(Self(stored))
    }

    /// Returns the value with two decimal places.
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Percentage {
    type Error = String;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for Decimal {
    fn from(value: Percentage) -> Self {
        value.0
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Stored audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    /// Stored primary key.
    pub id: AuditId,
    /// Audited project.
    pub project_id: ProjectId,
    /// Day the site was audited.
    pub audit_date: NaiveDate,
    /// Kind of audit.
    pub audit_type: AuditType,
    /// Sequence number of the audit, e.g. `001`.
    pub audit_number: String,
    /// Consultancy that performed the audit.
    pub performed_by: String,
    /// Report reference, e.g. `CHS-LSC-2025/06`.
    pub report_number: String,
    /// Achieved compliance score.
    pub overall_score_percentage: Percentage,
    /// Threshold the site must reach.
    pub standard_required: Percentage,
    /// Number of improvement notices issued.
    pub improvement_notices: i32,
    /// Number of contravention notices issued.
    pub contravention_notices: i32,
    /// Number of prohibition notices issued.
    pub prohibition_notices: i32,
}

impl Audit {
    /// Returns whether the achieved score meets the required standard.
    #[must_use]
    pub fn meets_standard(&self) -> bool {
        self.overall_score_percentage >= self.standard_required
    }
}

/// Audit fields before the store assigns a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAudit {
    /// Audited project.
    pub project_id: ProjectId,
    /// Day the site was audited.
    pub audit_date: NaiveDate,
    /// Kind of audit.
    pub audit_type: AuditType,
    /// Sequence number of the audit.
    pub audit_number: String,
    /// Consultancy that performed the audit.
    pub performed_by: String,
    /// Report reference.
    pub report_number: String,
    /// Achieved compliance score.
    pub overall_score_percentage: Percentage,
    /// Threshold the site must reach.
    pub standard_required: Percentage,
    /// Number of improvement notices issued.
    pub improvement_notices: i32,
    /// Number of contravention notices issued.
    pub contravention_notices: i32,
    /// Number of prohibition notices issued.
    pub prohibition_notices: i32,
}

impl NewAudit {
    /// Reads and validates a full audit submission.
    ///
    /// Every field is checked before returning, so all failures are reported
    /// together. The project reference is only parsed here; whether it exists
    /// is up to the caller.
    pub fn from_input(input: &FieldInput) -> Result<Self, FieldErrors> {
        let mut reader = FieldReader::new(input);

        let project = reader.required_reference("project");
        let audit_date = reader.required_date("audit_date");
        let audit_type = reader.choice_or("audit_type", AuditType::default(), AuditType::parse);
        let audit_number = reader.required_text("audit_number");
        let performed_by = reader.required_text("performed_by");
        let report_number = reader.required_text("report_number");
        let overall_score = reader.required_percentage("overall_score_percentage");
        let standard_required =
            reader.percentage_or("standard_required", Percentage::STANDARD_REQUIRED);
        let improvement_notices = reader.count_or("improvement_notices", 0);
        let contravention_notices = reader.count_or("contravention_notices", 0);
        let prohibition_notices = reader.count_or("prohibition_notices", 0);

        let mut errors = reader.into_errors();

        let (
            Some(project),
            Some(audit_date),
            Some(audit_type),
            Some(audit_number),
            Some(performed_by),
            Some(report_number),
            Some(overall_score_percentage),
            Some(standard_required),
            Some(improvement_notices),
            Some(contravention_notices),
            Some(prohibition_notices),
        ) = (
            project,
            audit_date,
            audit_type,
            audit_number,
            performed_by,
            report_number,
            overall_score,
            standard_required,
            improvement_notices,
            contravention_notices,
            prohibition_notices,
        )
        else {
            return Err(errors);
        };

        let audit = Self {
            project_id: ProjectId::new(project),
            audit_date,
            audit_type,
            audit_number,
            performed_by,
            report_number,
            overall_score_percentage,
            standard_required,
            improvement_notices,
            contravention_notices,
            prohibition_notices,
        };

        if let Err(text_errors) = audit.validate() {
            errors.merge(text_errors);
        }

        errors.into_result(audit)
    }

    /// Checks text lengths and counters of an already typed audit.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required_text(
            &mut errors,
            "audit_number",
            &self.audit_number,
            AUDIT_NUMBER_MAX_CHARS,
        );
        check_required_text(
            &mut errors,
            "performed_by",
            &self.performed_by,
            PERFORMED_BY_MAX_CHARS,
        );
        check_required_text(
            &mut errors,
            "report_number",
            &self.report_number,
            REPORT_NUMBER_MAX_CHARS,
        );
        for (field, count) in [
            ("improvement_notices", self.improvement_notices),
            ("contravention_notices", self.contravention_notices),
            ("prohibition_notices", self.prohibition_notices),
        ] {
            if count < 0 {
                errors.add(field, below_minimum(0));
            }
        }
        errors.into_result(())
    }

    /// Attaches the stored key.
    #[must_use]
    pub fn into_audit(self, id: AuditId) -> Audit {
        Audit {
            id,
            project_id: self.project_id,
            audit_date: self.audit_date,
            audit_type: self.audit_type,
            audit_number: self.audit_number,
            performed_by: self.performed_by,
            report_number: self.report_number,
            overall_score_percentage: self.overall_score_percentage,
            standard_required: self.standard_required,
            improvement_notices: self.improvement_notices,
            contravention_notices: self.contravention_notices,
            prohibition_notices: self.prohibition_notices,
        }
    }
}

/// Dashboard row: an audit joined with its project and client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    /// Stored primary key.
    pub id: AuditId,
    /// Day the site was audited.
    pub audit_date: NaiveDate,
    /// Kind of audit.
    pub audit_type: AuditType,
    /// Sequence number of the audit.
    pub audit_number: String,
    /// Report reference.
    pub report_number: String,
    /// Consultancy that performed the audit.
    pub performed_by: String,
    /// Achieved compliance score.
    pub overall_score_percentage: Percentage,
    /// Audited project.
    pub project_id: ProjectId,
    /// Title of the audited project.
    pub project_title: String,
    /// Name of the project's client.
    pub client_name: String,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    use super::{AuditType, NewAudit, Percentage};
    use crate::input::{FieldInput, REQUIRED};

    fn decimal(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap_or_default()
    }

    fn full_input() -> FieldInput {
        FieldInput::new()
            .with("project", "7")
            .with("audit_date", "2025-06-14")
            .with("audit_number", "001")
            .with("performed_by", "Lethu Safety Consultants")
            .with("report_number", "CHS-LSC-2025/06")
            .with("overall_score_percentage", "82.5")
    }

    #[test]
    fn percentage_bounds_are_inclusive() {
        assert!(Percentage::new(decimal("0")).is_ok());
        assert!(Percentage::new(decimal("100")).is_ok());
        assert!(Percentage::new(decimal("100.00")).is_ok());
        assert!(Percentage::new(decimal("-0.01")).is_err());
        assert!(Percentage::new(decimal("100.01")).is_err());
    }

    #[test]
    fn percentage_rejects_third_decimal_place() {
        assert_eq!(
            Percentage::new(decimal("80.125")),
            Err("Ensure that there are no more than 2 decimal places.".to_owned())
        );
        assert!(Percentage::new(decimal("80.100")).is_ok());
    }

    #[test]
    fn percentage_serializes_with_two_places() {
        let percentage = Percentage::new(decimal("80")).unwrap_or(Percentage::STANDARD_REQUIRED);
        assert_eq!(percentage.to_string(), "80.00");
        assert_eq!(Percentage::STANDARD_REQUIRED.to_string(), "75.00");
    }

    #[test]
    fn audit_defaults_apply_when_absent() {
        let audit = NewAudit::from_input(&full_input());
        let Ok(audit) = audit else {
            panic!("expected valid audit");
        };

        assert_eq!(audit.audit_type, AuditType::Ohs);
        assert_eq!(audit.standard_required, Percentage::STANDARD_REQUIRED);
        assert_eq!(audit.improvement_notices, 0);
        assert_eq!(
            audit.audit_date,
            NaiveDate::from_ymd_opt(2025, 6, 14).unwrap_or_default()
        );
    }

    #[test]
    fn audit_reports_every_failing_field() {
        let input = FieldInput::new()
            .with("audit_type", "SAFETY")
            .with("overall_score_percentage", "101");

        let errors = NewAudit::from_input(&input).err().unwrap_or_default();
        for field in ["project", "audit_date", "audit_number", "performed_by", "report_number"] {
            assert_eq!(errors.messages_for(field), [REQUIRED.to_owned()], "{field}");
        }
        assert!(errors.contains("audit_type"));
        assert_eq!(
            errors.messages_for("overall_score_percentage"),
            ["Ensure this value is less than or equal to 100.".to_owned()]
        );
    }

    #[test]
    fn audit_type_codes_round_trip() {
        for audit_type in AuditType::all() {
            assert_eq!(AuditType::parse(audit_type.as_str()), Some(audit_type));
        }
        assert_eq!(AuditType::parse("ohs"), None);
    }

    proptest! {
        #[test]
        fn in_range_cents_are_accepted(cents in 0_i64..=10_000) {
            let value = Decimal::new(cents, 2);
            let percentage = Percentage::new(value);
            prop_assert!(percentage.is_ok());
            prop_assert_eq!(percentage.map(Percentage::value).unwrap_or_default(), value);
        }

        #[test]
        fn out_of_range_cents_are_rejected(
            cents in prop_oneof![-100_000_i64..0, 10_001_i64..100_000]
        ) {
            prop_assert!(Percentage::new(Decimal::new(cents, 2)).is_err());
        }
    }
}
