use super::domain::VisitRecord;
use super::signals::{ActivitySignals, SignalKey};
use tracing::debug;

/// Reduces visit events to one flag per (client, salesperson): true when any
/// visit of the pair carried evidence of action. The caller pre-filters the
/// visits to the reporting period.
pub fn detect_visit_activity(visits: &[VisitRecord]) -> ActivitySignals {
    let signals = ActivitySignals::from_flags(visits.iter().map(|visit| {
        (
            SignalKey::attributed(visit.client_id.clone(), visit.salesperson.clone()),
            visit.had_action(),
        )
    }));

    debug!(
        visits = visits.len(),
        pairs = signals.len(),
        active = signals.active_count(),
        "visit activity detected"
    );
    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::activity::domain::VisitEvidence;

    fn visit(client: &str, salesperson: &str, evidence: VisitEvidence) -> VisitRecord {
        VisitRecord {
            client_id: client.into(),
            salesperson: salesperson.into(),
            visited_on: None,
            evidence,
        }
    }

    #[test]
    fn any_visit_with_action_marks_the_pair() {
        let visits = vec![
            visit("C1", "V1", VisitEvidence::default()),
            visit(
                "C1",
                "V1",
                VisitEvidence {
                    sale_recorded: true,
                    ..VisitEvidence::default()
                },
            ),
            visit("C2", "V1", VisitEvidence::default()),
        ];

        let signals = detect_visit_activity(&visits);
        assert_eq!(signals.len(), 2);
        assert!(signals.had_action(&"C1".into(), &"V1".into()));
        assert_eq!(
            signals.get(&SignalKey::attributed("C2".into(), "V1".into())),
            Some(false)
        );
    }

    #[test]
    fn same_client_under_two_salespeople_stays_separate() {
        let visited = VisitEvidence {
            visited: true,
            ..VisitEvidence::default()
        };
        let visits = vec![
            visit("C1", "V1", visited),
            visit("C1", "V2", VisitEvidence::default()),
        ];

        let signals = detect_visit_activity(&visits);
        assert!(signals.had_action(&"C1".into(), &"V1".into()));
        assert!(!signals.had_action(&"C1".into(), &"V2".into()));
    }

    #[test]
    fn no_visits_yield_no_signals() {
        assert!(detect_visit_activity(&[]).is_empty());
    }
}
