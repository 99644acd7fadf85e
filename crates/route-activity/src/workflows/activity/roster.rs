use super::domain::{ClientId, ClientRecord, RouteId, SalespersonId};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Every roster row of one company, in source order. This is the universe of
/// the final report: duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyRoster {
    company: String,
    rows: Vec<ClientRecord>,
}

impl CompanyRoster {
    /// Keeps the rows whose company equals `company` exactly (case-sensitive).
    pub fn for_company(records: &[ClientRecord], company: &str) -> Self {
        let rows = records
            .iter()
            .filter(|record| record.company == company)
            .cloned()
            .collect();

        Self {
            company: company.to_string(),
            rows,
        }
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn rows(&self) -> &[ClientRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with a blank client id or salesperson.
    pub fn rows_missing_keys(&self) -> usize {
        self.rows.iter().filter(|row| !row.has_keys()).count()
    }

    /// Projects to (client, salesperson, route) and removes exact duplicates,
    /// keeping first-seen order. Rows missing a key are left out.
    pub fn identity_map(&self) -> IdentityMap {
        let mut seen = HashSet::new();
        let mut by_client: BTreeMap<ClientId, Vec<Assignment>> = BTreeMap::new();
        let mut len = 0;

        for row in self.rows.iter().filter(|row| row.has_keys()) {
            let assignment = Assignment {
                salesperson: row.salesperson.clone(),
                route: row.route.clone(),
            };
            if seen.insert((row.client_id.clone(), assignment.clone())) {
                by_client
                    .entry(row.client_id.clone())
                    .or_default()
                    .push(assignment);
                len += 1;
            }
        }

        IdentityMap { by_client, len }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Assignment {
    #[serde(rename = "vendedor")]
    pub salesperson: SalespersonId,
    #[serde(rename = "id_ruta")]
    pub route: RouteId,
}

/// Canonical client → (salesperson, route) lookup, deduplicated but not
/// arbitrated: a client may hold several assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityMap {
    by_client: BTreeMap<ClientId, Vec<Assignment>>,
    len: usize,
}

impl IdentityMap {
    pub fn assignments_for(&self, client_id: &ClientId) -> &[Assignment] {
        self.by_client
            .get(client_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct (client, salesperson, route) entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clients mapped to more than one assignment, ordered by client id.
    pub fn conflicts(&self) -> Vec<IdentityConflict> {
        self.by_client
            .iter()
            .filter(|(_, assignments)| assignments.len() > 1)
            .map(|(client_id, assignments)| IdentityConflict {
                client_id: client_id.clone(),
                assignments: assignments.clone(),
            })
            .collect()
    }
}

/// A client id that resolves to several salesperson/route pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityConflict {
    #[serde(rename = "id_cliente_erp")]
    pub client_id: ClientId,
    pub assignments: Vec<Assignment>,
}
