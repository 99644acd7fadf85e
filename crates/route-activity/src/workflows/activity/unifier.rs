use super::signals::ActivitySignals;
use tracing::debug;

/// Unions signal sets and ORs the flags of matching keys. Order and
/// repetition of the inputs do not change the result.
pub fn unify<'a, I>(sets: I) -> ActivitySignals
where
    I: IntoIterator<Item = &'a ActivitySignals>,
{
    let unified = ActivitySignals::from_flags(
        sets.into_iter()
            .flat_map(|set| set.iter().map(|(key, flag)| (key.clone(), flag))),
    );

    debug!(
        pairs = unified.len(),
        active = unified.active_count(),
        "activity signals unified"
    );
    unified
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::activity::signals::SignalKey;

    fn signals(entries: &[(&str, &str, bool)]) -> ActivitySignals {
        ActivitySignals::from_flags(entries.iter().map(|(client, salesperson, flag)| {
            (
                SignalKey::attributed((*client).into(), (*salesperson).into()),
                *flag,
            )
        }))
    }

    #[test]
    fn flags_are_ored_per_pair() {
        let visits = signals(&[("C1", "V1", false), ("C2", "V1", false)]);
        let off_route = signals(&[("C1", "V1", true)]);

        let unified = unify([&visits, &off_route]);
        assert_eq!(unified.len(), 2);
        assert!(unified.had_action(&"C1".into(), &"V1".into()));
        assert!(!unified.had_action(&"C2".into(), &"V1".into()));
    }

    #[test]
    fn unification_is_commutative_and_idempotent() {
        let a = signals(&[("C1", "V1", true), ("C2", "V2", false)]);
        let b = signals(&[("C2", "V2", false), ("C3", "V1", true)]);

        assert_eq!(unify([&a, &b]), unify([&b, &a]));
        assert_eq!(unify([&a, &a]), unify([&a]));
        assert_eq!(unify([&a]), a);
    }

    #[test]
    fn added_evidence_never_turns_a_pair_off() {
        let base = signals(&[("C1", "V1", true), ("C2", "V1", false)]);
        let extra = signals(&[("C1", "V1", false), ("C2", "V1", true)]);

        let before = unify([&base]);
        let after = unify([&base, &extra]);
        for (key, flag) in before.iter() {
            assert!(after.get(key).unwrap_or(false) || !flag);
        }
        assert!(after.had_action(&"C2".into(), &"V1".into()));
    }
}
