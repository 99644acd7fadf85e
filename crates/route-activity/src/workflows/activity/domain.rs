use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

identifier!(
    /// ERP identifier of a point of sale.
    ClientId
);
identifier!(SalespersonId);
identifier!(RouteId);

/// One roster line: a client assigned to a salesperson's route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClientRecord {
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "id_cliente_erp")]
    pub client_id: ClientId,
    #[serde(rename = "vendedor")]
    pub salesperson: SalespersonId,
    #[serde(rename = "id_ruta")]
    pub route: RouteId,
}

impl ClientRecord {
    /// A row without client id or salesperson stays in the roster but can
    /// never be matched by activity.
    pub fn has_keys(&self) -> bool {
        !self.client_id.is_blank() && !self.salesperson.is_blank()
    }
}

/// Independent proofs that a visit produced some action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisitEvidence {
    pub visited: bool,
    pub sale_recorded: bool,
    pub motive_recorded: bool,
    pub photo_recorded: bool,
}

impl VisitEvidence {
    pub fn had_action(&self) -> bool {
        self.visited || self.sale_recorded || self.motive_recorded || self.photo_recorded
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitRecord {
    pub client_id: ClientId,
    pub salesperson: SalespersonId,
    pub visited_on: Option<NaiveDate>,
    pub evidence: VisitEvidence,
}

impl VisitRecord {
    pub fn had_action(&self) -> bool {
        self.evidence.had_action()
    }
}

/// A sale invoiced outside the route visit. Carries no attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffRouteRecord {
    pub client_id: ClientId,
    pub sold_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityStatus {
    #[serde(rename = "ACTIVO")]
    Active,
    #[serde(rename = "INACTIVO")]
    Inactive,
}

impl ActivityStatus {
    pub const fn from_activity(had_action: bool) -> Self {
        if had_action {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "ACTIVO",
            Self::Inactive => "INACTIVO",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive date window used to pre-filter activity sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportingPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportingPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ActivityError> {
        if to < from {
            return Err(ActivityError::InvertedPeriod { from, to });
        }
        Ok(Self { from, to })
    }

    /// Undated records never fall inside a period.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        date.is_some_and(|date| date >= self.from && date <= self.to)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("reporting period ends ({to}) before it starts ({from})")]
    InvertedPeriod { from: NaiveDate, to: NaiveDate },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_single_evidence_counts_as_action() {
        let none = VisitEvidence::default();
        assert!(!none.had_action());

        let photo_only = VisitEvidence {
            photo_recorded: true,
            ..VisitEvidence::default()
        };
        assert!(photo_only.had_action());

        let motive_only = VisitEvidence {
            motive_recorded: true,
            ..VisitEvidence::default()
        };
        assert!(motive_only.had_action());
    }

    #[test]
    fn status_serializes_with_report_labels() {
        let json = serde_json::to_string(&ActivityStatus::Inactive).expect("serializes");
        assert_eq!(json, "\"INACTIVO\"");
        assert_eq!(ActivityStatus::from_activity(true), ActivityStatus::Active);
    }

    #[test]
    fn period_excludes_undated_and_outside_dates() {
        let from = NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid");
        let to = NaiveDate::from_ymd_opt(2025, 12, 31).expect("valid");
        let period = ReportingPeriod::new(from, to).expect("ordered period");

        assert!(period.contains(Some(from)));
        assert!(period.contains(Some(to)));
        assert!(!period.contains(None));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2026, 1, 1)));
        assert!(ReportingPeriod::new(to, from).is_err());
    }
}
