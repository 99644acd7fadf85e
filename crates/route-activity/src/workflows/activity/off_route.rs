use super::domain::{ClientId, OffRouteRecord};
use super::roster::IdentityMap;
use super::signals::{ActivitySignals, SignalKey};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Off-route sales for a client the roster does not list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnattributedSale {
    #[serde(rename = "id_cliente_erp")]
    pub client_id: ClientId,
    #[serde(rename = "registros")]
    pub records: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffRouteReconciliation {
    pub signals: ActivitySignals,
    pub unattributed: Vec<UnattributedSale>,
}

/// Recovers salesperson attribution for off-route sales through the identity
/// map. Every record is activity evidence; records whose client has several
/// assignments credit each of them, and unmatched clients land in the
/// unattributed bucket.
pub fn reconcile_off_route(
    records: &[OffRouteRecord],
    identity: &IdentityMap,
) -> OffRouteReconciliation {
    let mut flags = Vec::new();
    let mut unmatched: BTreeMap<ClientId, usize> = BTreeMap::new();

    for record in records {
        let assignments = identity.assignments_for(&record.client_id);
        if assignments.is_empty() {
            *unmatched.entry(record.client_id.clone()).or_default() += 1;
            flags.push((SignalKey::unattributed(record.client_id.clone()), true));
            continue;
        }

        for assignment in assignments {
            flags.push((
                SignalKey::attributed(record.client_id.clone(), assignment.salesperson.clone()),
                true,
            ));
        }
    }

    let signals = ActivitySignals::from_flags(flags);
    let unattributed: Vec<UnattributedSale> = unmatched
        .into_iter()
        .map(|(client_id, records)| UnattributedSale { client_id, records })
        .collect();

    if !unattributed.is_empty() {
        warn!(
            clients = unattributed.len(),
            "off-route sales for clients missing from the roster"
        );
    }
    debug!(
        records = records.len(),
        pairs = signals.len(),
        "off-route sales reconciled"
    );

    OffRouteReconciliation {
        signals,
        unattributed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::activity::domain::ClientRecord;
    use crate::workflows::activity::roster::CompanyRoster;
    use crate::workflows::activity::signals::Attribution;

    fn identity(rows: &[(&str, &str, &str)]) -> IdentityMap {
        let records: Vec<ClientRecord> = rows
            .iter()
            .map(|(client, salesperson, route)| ClientRecord {
                company: "Aloma".into(),
                client_id: (*client).into(),
                salesperson: (*salesperson).into(),
                route: (*route).into(),
            })
            .collect();
        CompanyRoster::for_company(&records, "Aloma").identity_map()
    }

    fn sale(client: &str) -> OffRouteRecord {
        OffRouteRecord {
            client_id: client.into(),
            sold_on: None,
        }
    }

    #[test]
    fn matched_sales_are_attributed_and_deduplicated() {
        let map = identity(&[("C1", "V1", "R1")]);
        let result = reconcile_off_route(&[sale("C1"), sale("C1")], &map);

        assert_eq!(result.signals.len(), 1);
        assert!(result.signals.had_action(&"C1".into(), &"V1".into()));
        assert!(result.unattributed.is_empty());
    }

    #[test]
    fn unknown_clients_are_kept_as_unattributed() {
        let map = identity(&[("C1", "V1", "R1")]);
        let result = reconcile_off_route(&[sale("C9"), sale("C9")], &map);

        assert_eq!(
            result.unattributed,
            vec![UnattributedSale {
                client_id: "C9".into(),
                records: 2
            }]
        );
        let (key, flag) = result.signals.iter().next().expect("signal kept");
        assert_eq!(key.attribution, Attribution::Unattributed);
        assert!(flag);
    }

    #[test]
    fn conflicting_assignments_credit_every_salesperson() {
        let map = identity(&[("C1", "V1", "R1"), ("C1", "V2", "R2")]);
        let result = reconcile_off_route(&[sale("C1")], &map);

        assert!(result.signals.had_action(&"C1".into(), &"V1".into()));
        assert!(result.signals.had_action(&"C1".into(), &"V2".into()));
    }
}
