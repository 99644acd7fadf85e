use super::classifier::{classify, ClassifiedBase};
use super::detector::detect_visit_activity;
use super::domain::{
    ActivityStatus, ClientRecord, OffRouteRecord, ReportingPeriod, VisitRecord,
};
use super::off_route::{reconcile_off_route, UnattributedSale};
use super::roster::{CompanyRoster, IdentityConflict};
use super::unifier::unify;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

/// Visit and off-route rows the loaders could not key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkippedRows {
    pub visits: usize,
    pub off_route: usize,
}

/// The three normalized sources of one reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct ActivityInputs {
    pub roster: Vec<ClientRecord>,
    pub visits: Vec<VisitRecord>,
    pub off_route: Vec<OffRouteRecord>,
    pub skipped: SkippedRows,
}

/// Data-quality findings of one run. None of them drop a roster row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationWarnings {
    pub identity_conflicts: Vec<IdentityConflict>,
    /// Company roster rows with a blank client id or salesperson. They are
    /// classified INACTIVO.
    pub roster_rows_missing_keys: usize,
    pub skipped_visit_rows: usize,
    pub skipped_off_route_rows: usize,
    pub undated_visits_excluded: usize,
    pub undated_off_route_excluded: usize,
}

impl ReconciliationWarnings {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationRun {
    pub company: String,
    pub period: Option<ReportingPeriod>,
    pub base: ClassifiedBase,
    pub unattributed: Vec<UnattributedSale>,
    pub warnings: ReconciliationWarnings,
}

/// Runs roster resolution, both activity detectors, unification and
/// classification. Inputs are only read.
pub fn reconcile(
    inputs: &ActivityInputs,
    company: &str,
    period: Option<ReportingPeriod>,
) -> ReconciliationRun {
    let roster = CompanyRoster::for_company(&inputs.roster, company);
    let roster_rows_missing_keys = roster.rows_missing_keys();
    if roster_rows_missing_keys > 0 {
        warn!(
            rows = roster_rows_missing_keys,
            "roster rows without client id or salesperson"
        );
    }

    let identity = roster.identity_map();
    let identity_conflicts = identity.conflicts();
    if !identity_conflicts.is_empty() {
        warn!(
            clients = identity_conflicts.len(),
            "client ids mapped to more than one salesperson/route"
        );
    }

    let (visits, undated_visits) =
        scope_to_period(&inputs.visits, period, |visit| visit.visited_on);
    let (sales, undated_off_route) =
        scope_to_period(&inputs.off_route, period, |sale| sale.sold_on);
    if undated_visits + undated_off_route > 0 {
        warn!(
            visits = undated_visits,
            off_route = undated_off_route,
            "undated records excluded from the reporting period"
        );
    }

    let visit_signals = detect_visit_activity(&visits);
    let off_route = reconcile_off_route(&sales, &identity);
    let activity = unify([&visit_signals, &off_route.signals]);
    let base = classify(&roster, &activity);

    info!(
        company,
        clients = base.len(),
        active = base.count(ActivityStatus::Active),
        unattributed = off_route.unattributed.len(),
        "activity reconciliation complete"
    );

    ReconciliationRun {
        company: company.to_string(),
        period,
        base,
        unattributed: off_route.unattributed,
        warnings: ReconciliationWarnings {
            identity_conflicts,
            roster_rows_missing_keys,
            skipped_visit_rows: inputs.skipped.visits,
            skipped_off_route_rows: inputs.skipped.off_route,
            undated_visits_excluded: undated_visits,
            undated_off_route_excluded: undated_off_route,
        },
    }
}

/// Keeps the records inside `period`, returning them with the number of
/// undated records that were dropped. Without a period everything is kept.
fn scope_to_period<T, F>(
    records: &[T],
    period: Option<ReportingPeriod>,
    date_of: F,
) -> (Vec<T>, usize)
where
    T: Clone,
    F: Fn(&T) -> Option<NaiveDate>,
{
    let Some(period) = period else {
        return (records.to_vec(), 0);
    };

    let undated = records
        .iter()
        .filter(|record| date_of(*record).is_none())
        .count();
    let scoped = records
        .iter()
        .filter(|record| period.contains(date_of(*record)))
        .cloned()
        .collect();
    (scoped, undated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(company: &str, client: &str, salesperson: &str) -> ClientRecord {
        ClientRecord {
            company: company.to_string(),
            client_id: client.into(),
            salesperson: salesperson.into(),
            route: "R1".into(),
        }
    }

    #[test]
    fn roster_rows_without_keys_are_classified_inactive() {
        let inputs = ActivityInputs {
            roster: vec![row("X", "C1", "V1"), row("X", "C2", ""), row("Y", "C9", "")],
            off_route: vec![OffRouteRecord {
                client_id: "C2".into(),
                sold_on: None,
            }],
            ..ActivityInputs::default()
        };

        let run = reconcile(&inputs, "X", None);
        assert_eq!(run.base.len(), 2);
        assert_eq!(run.base.clients()[1].status, ActivityStatus::Inactive);
        assert_eq!(run.warnings.roster_rows_missing_keys, 1);
    }

    #[test]
    fn clean_inputs_produce_no_warnings() {
        let inputs = ActivityInputs {
            roster: vec![row("X", "C1", "V1")],
            ..ActivityInputs::default()
        };
        assert!(reconcile(&inputs, "X", None).warnings.is_empty());
    }
}
