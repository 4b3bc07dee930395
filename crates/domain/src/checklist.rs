//! Checklist sections scored during an audit.
//!
//! Every section shares one record shape: a row names an item from the
//! section's fixed code list and scores it against the required level. A row
//! is unique per audit, section, and item.

use ohs_audit_core::FieldErrors;
use serde::{Deserialize, Serialize};

use crate::input::{
    FieldInput, FieldReader, check_optional_text, invalid_choice, normalize_optional,
};
use crate::{AuditId, ChecklistItemId};

/// Maximum characters for the appointed person on a legal appointment.
pub const APPOINTED_PERSON_MAX_CHARS: usize = 200;

/// Code and display label of one checklist item.
pub type ItemCode = (&'static str, &'static str);

const LEGAL_APPOINTMENT_ITEMS: &[ItemCode] = &[
    ("CEO_16_1", "Chief Executive Officer Sec 16.1"),
    ("CEO_16_2", "Assistant CEO Sec 16.2"),
    ("CONSTR_MGR_8_1", "Construction Manager CR 8.1"),
    ("HCA", "HCA (Reg 2020)"),
    ("CONSTR_SUP_8_7", "Construction Supervisor CR 8.7"),
    ("ELEC_INSP", "Electrical Equipment Inspector Controller"),
    ("CHS_OFFICER_8_5", "Construction Health and Safety Officer CR 8.5"),
    ("FIRE_INSP_29H", "Fire Equipment Inspector CR 29(h)"),
    ("ENV_OFFICER", "Environmental Officer"),
    ("EMERGENCY_COORD", "Emergency Coordinator"),
    ("HS_REP_17_1", "Health and Safety Representative Sec 17.1"),
    ("EXCAVATION_SUP_13_1", "Excavation Supervisor CR 13(1)"),
    ("RISK_ASSESSOR_9_1", "Risk Assessor CR 9.(1)"),
    ("PPE_INSP", "PPE Inspector"),
    ("FIRST_AIDER", "First Aider"),
    ("HAND_TOOLS_INSP", "Hand Tools Inspector Sec 8.2i"),
    ("STACKING_STORAGE", "Stacking and Storage Supervisor CR 28(a)"),
    ("HS_COMMITTEE", "Health and Safety Committee Member"),
    ("HYGIENE_INSP", "Hygiene and Facility Inspector"),
    ("INCIDENT_INVEST", "Incident Investigator CR 29(h)"),
    ("PORTABLE_ELEC_INSP", "Portable Elec. Tools Inspector EMR 10"),
    ("HOUSEKEEPING", "Housekeeping CR 27"),
    (
        "VEHICLE_INSP",
        "CR 23 Construction Vehicle and Mobile Plant Inspector",
    ),
    ("TRAFFIC_SAFETY", "Traffic Safety Officer"),
    (
        "HS_CHAIRPERSON",
        "Chairperson Health and Safety Committee Sec 19",
    ),
    (
        "VEHICLE_OPERATOR",
        "CR 23 Construction vehicle and Mobile Plant operator",
    ),
];

const OHS_DOCUMENTATION_ITEMS: &[ItemCode] = &[
    ("SHE_FILE", "SHE File on site"),
    ("CLIENT_SPECS", "Clients Safety Specifications CR 9"),
    ("RISK_ASSESSMENT", "Baseline Risk Assessment"),
    ("CONSTRUCTION_NOTICE", "Notification of Construction"),
    ("COIDA", "COIDA Letter of good standing"),
    ("INCIDENT_REGISTERS", "Incident Registers"),
    ("WCL_FORMS", "WCL1 – WCL6 Forms"),
    ("ACT_DISPLAY", "Copy of Act display on site"),
    ("CONTRACTOR_APPOINTMENT", "Contractors Appointment CR.5(1)(K)"),
    ("MANDATORY_AGREEMENTS", "Signed Mandatory Agreements"),
    ("POLICIES", "Polices to be updated"),
];

const TRAINING_COMMUNICATION_ITEMS: &[ItemCode] = &[
    ("INDUCTION_MANUAL", "Health and Safety Induction Manual"),
    ("SAFETY_TALKS", "Health and Safety Talks"),
    ("DAILY_RISK_ASSESS", "Daily Task Risk Assessments"),
    ("TRAFFIC_MEETINGS", "Daily Traffic Accommodation Meetings"),
];

const INSPECTION_REGISTER_ITEMS: &[ItemCode] = &[
    ("HS_REP_CHECKLIST", "Health and Safety Rep Inspection Checklist"),
    ("FIRST_AID_BOX", "First Aid Box Inspection Registers"),
    ("FIRE_EQUIPMENT", "Fire Extinguishing Equipment Register"),
    ("FACILITIES_HYGIENE", "Facilities/hygiene Inspection Register"),
    ("STACKING_STORAGE", "Stacking & Storage Register"),
    ("HAND_TOOL", "Hand Tool Register"),
    ("MOBILE_PLANT", "Mobile Plant Checklists"),
    ("PPE_REGISTER", "PPE Registers"),
    ("INCIDENT_REGISTER", "Incident Registers"),
    ("EXCAVATION", "Excavation Inspection Register"),
    ("HOUSEKEEPING", "Housekeeping Checklist"),
    ("VEHICLE_PRE_START", "Construction Vehicle Pre-Start Checklist"),
    ("SIGNAGE", "Signage Checklist"),
    ("HYGIENE", "Hygiene Checklist"),
];

const PUBLIC_SAFETY_SECURITY_ITEMS: &[ItemCode] = &[
    ("ACCESS_CONTROL", "Access Control Register"),
    ("GUARDHOUSE", "Guardhouse On site"),
    ("SECURITY_PERSONNEL", "Security Personnel on site"),
    ("PSIRA_REGISTRATION", "PSIRA Registered security appointment"),
    ("SECURITY_RISK_ASSESS", "Security Risk Assessment"),
    ("FIRE_EXTINGUISHER", "Fire Extinguisher"),
    ("SECURITY_LETTER", "Letter of Good Standing (Security)"),
    ("SECURITY_MEDICAL", "Medical certificate (Security)"),
    ("SECURITY_AGREEMENT", "Mandatory Agreement (Security)"),
    ("SECURITY_APPOINTMENT", "Appointment Letter (Security)"),
    ("PSIRA_REG", "PSIRA Registration"),
    ("SECURITY_PPE", "PPE (Security)"),
];

const EMPLOYEE_PROTECTION_ITEMS: &[ItemCode] = &[
    ("PPE_ISSUED", "PPE Issued and being worn (free of charge)"),
    ("AWARENESS", "Employees are aware of their OHS duties"),
    ("PROCEDURES", "Procedure for addressing OHS concerns"),
];

const FIRE_PREVENTION_ITEMS: &[ItemCode] = &[
    (
        "EQUIPMENT_AVAILABLE",
        "Suitable fire extinguishing equipment available",
    ),
    ("FIRE_FIGHTER_APPOINT", "Fire fighter Appointment"),
    ("AWARENESS", "Employees aware of emergency procedures"),
    ("COMPETENCIES", "Fire Fighter Competencies"),
    (
        "EVACUATION_PLAN",
        "Fire emergency evacuation layout plan visible",
    ),
    ("EVACUATION_DRILL", "Fire emergency evacuation drill conducted"),
    ("EMERGENCY_CONTACTS", "Emergency Contact numbers in place"),
];

const OCCUPATIONAL_HEALTH_ITEMS: &[ItemCode] = &[
    ("ENTRY_MEDICAL_EXAM", "Entry Medical Examinations"),
    ("MEDICAL_COPIES", "Copies of medical examinations on file"),
    ("ID_COPIES", "ID copies on site"),
];

const INCIDENT_MANAGEMENT_ITEMS: &[ItemCode] = &[
    ("PROCEDURE", "Incident Management Procedure"),
    ("ANNEXURE", "Annexure.1"),
    ("WCL_FORMS", "WCL1 - WCL6 forms available"),
    ("DISCIPLINARY_PROC", "Disciplinary Procedure in place"),
    ("NEAR_MISS", "Near – miss records"),
    ("FIRST_AID_RECORDS", "First Aid Injury Records"),
];

const INTOXICATION_MANAGEMENT_ITEMS: &[ItemCode] = &[
    ("RANDOM_TESTING", "Random Alcohol testing"),
    ("DISCIPLINARY_PROC", "Disciplinary Procedure in place"),
    ("ALCOHOL_DRUGS_POLICY", "Alcohol and Drugs Policy"),
    ("BREATHALYSER", "Breathalyser"),
];

const TRAFFIC_ACCOMMODATION_ITEMS: &[ItemCode] = &[
    ("FLAG_PEOPLE_TRAINED", "Flag people trained for this job"),
    ("SIGNS_UPDATED", "Signs updated before start and end of shift"),
    ("UPDATE_REGISTER", "Register for update records"),
    ("ROAD_CLEAN", "Existing road is clean and free from danger"),
    (
        "DEVIATION_DAMPED",
        "Deviations damped with water to minimize dust",
    ),
    ("DEVIATION_BLADED", "Deviation bladed if required"),
    ("CHILDREN_PROTECTION", "Children free from being injured"),
    ("VEHICLES_CONDITION", "Construction vehicles in good conditions"),
    ("SAFETY_FEATURES", "Safety features on construction vehicles"),
    ("OPENINGS_BARRICADED", "All openings are barricaded"),
    ("FLAG_POSITIONS", "Flag people always in required positions"),
    ("SIGNS_PLACEMENT", "Signs placed according to specifications"),
    ("SIGNS_REGISTER", "Signs register updated daily"),
];

/// Section of the audit checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistCategory {
    /// Statutory appointments.
    LegalAppointment,
    /// OHS file and documentation.
    OhsDocumentation,
    /// Training and toolbox talks.
    TrainingCommunication,
    /// Inspection registers.
    InspectionRegister,
    /// Site security and public safety.
    PublicSafetySecurity,
    /// Employee protection.
    EmployeeProtection,
    /// Fire prevention and emergency readiness.
    FirePrevention,
    /// Medical surveillance.
    OccupationalHealth,
    /// Incident management.
    IncidentManagement,
    /// Alcohol and drug control.
    IntoxicationManagement,
    /// Traffic accommodation on public roads.
    TrafficAccommodation,
}

impl ChecklistCategory {
    /// Every category in report order.
    #[must_use]
    pub const fn all() -> [Self; 11] {
        [
            Self::LegalAppointment,
            Self::OhsDocumentation,
            Self::TrainingCommunication,
            Self::InspectionRegister,
            Self::PublicSafetySecurity,
            Self::EmployeeProtection,
            Self::FirePrevention,
            Self::OccupationalHealth,
            Self::IncidentManagement,
            Self::IntoxicationManagement,
            Self::TrafficAccommodation,
        ]
    }

    /// Stable storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LegalAppointment => "legal_appointment",
            Self::OhsDocumentation => "ohs_documentation",
            Self::TrainingCommunication => "training_communication",
            Self::InspectionRegister => "inspection_register",
            Self::PublicSafetySecurity => "public_safety_security",
            Self::EmployeeProtection => "employee_protection",
            Self::FirePrevention => "fire_prevention",
            Self::OccupationalHealth => "occupational_health",
            Self::IncidentManagement => "incident_management",
            Self::IntoxicationManagement => "intoxication_management",
            Self::TrafficAccommodation => "traffic_accommodation",
        }
    }

    /// Section heading.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LegalAppointment => "Legal Appointments",
            Self::OhsDocumentation => "OHS Documentation",
            Self::TrainingCommunication => "Training & Communication",
            Self::InspectionRegister => "Inspection Registers",
            Self::PublicSafetySecurity => "Public Safety & Security",
            Self::EmployeeProtection => "Employee Protection",
            Self::FirePrevention => "Fire Prevention",
            Self::OccupationalHealth => "Occupational Health",
            Self::IncidentManagement => "Incident Management",
            Self::IntoxicationManagement => "Intoxication Management",
            Self::TrafficAccommodation => "Traffic Accommodation",
        }
    }

    /// Fixed item codes of the section.
    #[must_use]
    pub const fn items(self) -> &'static [ItemCode] {
        match self {
            Self::LegalAppointment => LEGAL_APPOINTMENT_ITEMS,
            Self::OhsDocumentation => OHS_DOCUMENTATION_ITEMS,
            Self::TrainingCommunication => TRAINING_COMMUNICATION_ITEMS,
            Self::InspectionRegister => INSPECTION_REGISTER_ITEMS,
            Self::PublicSafetySecurity => PUBLIC_SAFETY_SECURITY_ITEMS,
            Self::EmployeeProtection => EMPLOYEE_PROTECTION_ITEMS,
            Self::FirePrevention => FIRE_PREVENTION_ITEMS,
            Self::OccupationalHealth => OCCUPATIONAL_HEALTH_ITEMS,
            Self::IncidentManagement => INCIDENT_MANAGEMENT_ITEMS,
            Self::IntoxicationManagement => INTOXICATION_MANAGEMENT_ITEMS,
            Self::TrafficAccommodation => TRAFFIC_ACCOMMODATION_ITEMS,
        }
    }

    /// Returns the label of an item code, or `None` when the code is not in
    /// this section.
    #[must_use]
    pub fn item_label(self, code: &str) -> Option<&'static str> {
        self.items()
            .iter()
            .find(|(item, _)| *item == code)
            .map(|(_, label)| *label)
    }

    /// Parses a storage code.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|category| category.as_str() == value)
    }
}

/// Compliance level of a checklist item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum ComplianceScore {
    /// Requirement not met.
    NonCompliant,
    /// Requirement partly met.
    Partial,
    /// Requirement fully met.
    #[default]
    Full,
}

impl ComplianceScore {
    /// Numeric score stored and summed in reports.
    #[must_use]
    pub const fn value(self) -> i16 {
        match self {
            Self::NonCompliant => 0,
            Self::Partial => 1,
            Self::Full => 2,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NonCompliant => "Non-Compliant",
            Self::Partial => "Partial Compliance",
            Self::Full => "Fully Compliant",
        }
    }

    /// Maps a numeric score back to its level.
    #[must_use]
    pub const fn from_value(value: i16) -> Option<Self> {
        match value {
            0 => Some(Self::NonCompliant),
            1 => Some(Self::Partial),
            2 => Some(Self::Full),
            _ => None,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        value.parse::<i16>().ok().and_then(Self::from_value)
    }
}

impl TryFrom<i16> for ComplianceScore {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or_else(|| invalid_choice(&value.to_string()))
    }
}

impl From<ComplianceScore> for i16 {
    fn from(value: ComplianceScore) -> Self {
        value.value()
    }
}

/// Stored checklist row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Stored primary key.
    pub id: ChecklistItemId,
    /// Owning audit.
    pub audit_id: AuditId,
    /// Section the row belongs to.
    pub category: ChecklistCategory,
    /// Item code from the section's list.
    pub item_type: String,
    /// Level the site must reach.
    pub required_score: ComplianceScore,
    /// Level observed on site.
    pub actual_score: ComplianceScore,
    /// Name of the appointed person; legal appointments only.
    pub appointed_person: Option<String>,
    /// Auditor comments.
    pub comments: Option<String>,
}

impl ChecklistItem {
    /// Display label of the item code.
    #[must_use]
    pub fn item_label(&self) -> &'static str {
        self.category.item_label(&self.item_type).unwrap_or_default()
    }
}

/// Checklist row before the store assigns a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChecklistItem {
    /// Owning audit.
    pub audit_id: AuditId,
    /// Section the row belongs to.
    pub category: ChecklistCategory,
    /// Item code from the section's list.
    pub item_type: String,
    /// Level the site must reach.
    pub required_score: ComplianceScore,
    /// Level observed on site.
    pub actual_score: ComplianceScore,
    /// Name of the appointed person; legal appointments only.
    pub appointed_person: Option<String>,
    /// Auditor comments.
    pub comments: Option<String>,
}

impl NewChecklistItem {
    /// Starts a row that is fully required and scored as observed.
    #[must_use]
    pub fn scored(
        audit_id: AuditId,
        category: ChecklistCategory,
        item_type: impl Into<String>,
        actual_score: ComplianceScore,
    ) -> Self {
        Self {
            audit_id,
            category,
            item_type: item_type.into(),
            required_score: ComplianceScore::Full,
            actual_score,
            appointed_person: None,
            comments: None,
        }
    }

    /// Reads a checklist row for the given audit and section.
    pub fn from_input(
        audit_id: AuditId,
        category: ChecklistCategory,
        input: &FieldInput,
    ) -> Result<Self, FieldErrors> {
        let mut reader = FieldReader::new(input);
        let item_type = reader.required_text("item_type");
        let required_score =
            reader.choice_or("required_score", ComplianceScore::Full, ComplianceScore::parse);
        let actual_score = reader.required_choice("actual_score", ComplianceScore::parse);
        let appointed_person = reader.optional_text("appointed_person");
        let comments = reader.optional_text("comments");
        let errors = reader.into_errors();

        let (Some(item_type), Some(required_score), Some(actual_score)) =
            (item_type, required_score, actual_score)
        else {
            return Err(errors);
        };

        let item = Self {
            audit_id,
            category,
            item_type,
            required_score,
            actual_score,
            appointed_person,
            comments,
        };
        item.validate()?;
        errors.into_result(item)
    }

    /// Checks the item code belongs to the section and the appointed person
    /// is only set on legal appointments.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.category.item_label(&self.item_type).is_none() {
            errors.add("item_type", invalid_choice(&self.item_type));
        }

        if self.appointed_person.is_some() && self.category != ChecklistCategory::LegalAppointment
        {
            errors.add(
                "appointed_person",
                "Only legal appointments name an appointed person.",
            );
        }
        check_optional_text(
            &mut errors,
            "appointed_person",
            self.appointed_person.as_deref(),
            APPOINTED_PERSON_MAX_CHARS,
        );

        errors.into_result(())
    }

    /// Attaches the stored key.
    #[must_use]
    pub fn into_item(self, id: ChecklistItemId) -> ChecklistItem {
        ChecklistItem {
            id,
            audit_id: self.audit_id,
            category: self.category,
            item_type: self.item_type,
            required_score: self.required_score,
            actual_score: self.actual_score,
            appointed_person: normalize_optional(self.appointed_person),
            comments: normalize_optional(self.comments),
        }
    }
}

/// Checklist rows of one section with their score totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistSection {
    /// Section of the rows.
    pub category: ChecklistCategory,
    /// Rows in insertion order.
    pub items: Vec<ChecklistItem>,
    /// Sum of observed scores.
    pub actual_total: i32,
    /// Sum of required scores.
    pub required_total: i32,
}

impl ChecklistSection {
    /// Groups rows by section in report order, keeping empty sections.
    #[must_use]
    pub fn group(items: Vec<ChecklistItem>) -> Vec<Self> {
        let mut sections: Vec<Self> = ChecklistCategory::all()
            .into_iter()
            .map(|category| Self {
                category,
                items: Vec::new(),
                actual_total: 0,
                required_total: 0,
            })
            .collect();

        for item in items {
            if let Some(section) = sections
                .iter_mut()
                .find(|section| section.category == item.category)
            {
                section.actual_total += i32::from(item.actual_score.value());
                section.required_total += i32::from(item.required_score.value());
                section.items.push(item);
            }
        }

        sections
    }
}

#[cfg(test)]
mod tests {
    use super::{ChecklistCategory, ChecklistSection, ComplianceScore, NewChecklistItem};
    use crate::input::{FieldInput, invalid_choice};
    use crate::{AuditId, ChecklistItemId};

    #[test]
    fn section_code_lists_have_expected_sizes() {
        let sizes: Vec<usize> = ChecklistCategory::all()
            .into_iter()
            .map(|category| category.items().len())
            .collect();
        assert_eq!(sizes, [26, 11, 4, 14, 12, 3, 7, 3, 6, 4, 13]);
    }

    #[test]
    fn item_codes_are_unique_within_each_section() {
        for category in ChecklistCategory::all() {
            let mut codes: Vec<&str> = category.items().iter().map(|(code, _)| *code).collect();
            codes.sort_unstable();
            codes.dedup();
            assert_eq!(codes.len(), category.items().len(), "{}", category.as_str());
        }
    }

    #[test]
    fn item_from_another_section_is_rejected() {
        let input = FieldInput::new()
            .with("item_type", "BREATHALYSER")
            .with("actual_score", "1");

        let errors = NewChecklistItem::from_input(
            AuditId::new(1),
            ChecklistCategory::FirePrevention,
            &input,
        )
        .err()
        .unwrap_or_default();
        assert_eq!(errors.messages_for("item_type"), [invalid_choice("BREATHALYSER")]);
    }

    #[test]
    fn appointed_person_only_on_legal_appointments() {
        let mut item = NewChecklistItem::scored(
            AuditId::new(1),
            ChecklistCategory::EmployeeProtection,
            "PPE_ISSUED",
            ComplianceScore::Full,
        );
        item.appointed_person = Some("S. Dlamini".to_owned());
        assert!(item.validate().is_err());

        item.category = ChecklistCategory::LegalAppointment;
        item.item_type = "CEO_16_1".to_owned();
        assert!(item.validate().is_ok());
    }

    #[test]
    fn score_outside_range_is_rejected() {
        let input = FieldInput::new()
            .with("item_type", "SHE_FILE")
            .with("actual_score", "3");

        let result = NewChecklistItem::from_input(
            AuditId::new(1),
            ChecklistCategory::OhsDocumentation,
            &input,
        );
        assert!(result.is_err());
    }

    #[test]
    fn sections_total_scores() {
        let audit_id = AuditId::new(1);
        let items = vec![
            NewChecklistItem::scored(
                audit_id,
                ChecklistCategory::FirePrevention,
                "AWARENESS",
                ComplianceScore::Partial,
            )
            .into_item(ChecklistItemId::new(1)),
            NewChecklistItem::scored(
                audit_id,
                ChecklistCategory::FirePrevention,
                "COMPETENCIES",
                ComplianceScore::NonCompliant,
            )
            .into_item(ChecklistItemId::new(2)),
        ];

        let sections = ChecklistSection::group(items);
        assert_eq!(sections.len(), 11);
        let Some(fire) = sections
            .iter()
            .find(|section| section.category == ChecklistCategory::FirePrevention)
        else {
            panic!("fire prevention section missing");
        };
        assert_eq!(fire.actual_total, 1);
        assert_eq!(fire.required_total, 4);
    }
}
