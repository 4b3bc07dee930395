use serde::{Deserialize, Serialize};

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a stored primary key.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw primary key.
            #[must_use]
            pub const fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

integer_id!(
    /// Primary key of a client organization.
    ClientId
);
integer_id!(
    /// Primary key of a consulting engineering firm.
    ConsultingFirmId
);
integer_id!(
    /// Primary key of a principal contractor.
    PrincipalContractorId
);
integer_id!(
    /// Primary key of a construction project.
    ProjectId
);
integer_id!(
    /// Primary key of an audit.
    AuditId
);
integer_id!(
    /// Primary key of a checklist row.
    ChecklistItemId
);
integer_id!(
    /// Primary key of a risk rating.
    RiskRatingId
);
integer_id!(
    /// Primary key of a corrective action item.
    ActionItemId
);
integer_id!(
    /// Primary key of a site personnel record.
    SitePersonnelId
);
integer_id!(
    /// Primary key of a visual observation.
    VisualObservationId
);
integer_id!(
    /// Primary key of a user account.
    UserId
);

#[cfg(test)]
mod tests {
    use super::AuditId;

    #[test]
    fn identifiers_serialize_as_plain_integers() {
        let value = serde_json::to_value(AuditId::new(42)).unwrap_or_default();
        assert_eq!(value, serde_json::json!(42));
        assert_eq!(AuditId::new(42).to_string(), "42");
    }
}
