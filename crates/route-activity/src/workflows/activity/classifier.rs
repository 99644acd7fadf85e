use super::domain::{ActivityStatus, ClientId, ClientRecord, RouteId, SalespersonId};
use super::roster::CompanyRoster;
use super::signals::ActivitySignals;
use serde::Serialize;
use tracing::debug;

/// A roster row with its activity overlay for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedClient {
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "id_cliente_erp")]
    pub client_id: ClientId,
    #[serde(rename = "vendedor")]
    pub salesperson: SalespersonId,
    #[serde(rename = "id_ruta")]
    pub route: RouteId,
    pub accion_mes: bool,
    #[serde(rename = "estado")]
    pub status: ActivityStatus,
}

impl ClassifiedClient {
    fn from_record(record: &ClientRecord, had_action: bool) -> Self {
        Self {
            company: record.company.clone(),
            client_id: record.client_id.clone(),
            salesperson: record.salesperson.clone(),
            route: record.route.clone(),
            accion_mes: had_action,
            status: ActivityStatus::from_activity(had_action),
        }
    }
}

/// The classified roster consumed by every aggregator. One entry per roster
/// row, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassifiedBase {
    clients: Vec<ClassifiedClient>,
}

impl ClassifiedBase {
    pub fn clients(&self) -> &[ClassifiedClient] {
        &self.clients
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn count(&self, status: ActivityStatus) -> usize {
        self.clients
            .iter()
            .filter(|client| client.status == status)
            .count()
    }
}

/// Left-joins the full company roster against the unified signals on
/// (client, salesperson). Rows without a signal are inactive.
pub fn classify(roster: &CompanyRoster, activity: &ActivitySignals) -> ClassifiedBase {
    let clients: Vec<ClassifiedClient> = roster
        .rows()
        .iter()
        .map(|record| {
            let had_action = activity.had_action(&record.client_id, &record.salesperson);
            ClassifiedClient::from_record(record, had_action)
        })
        .collect();

    debug_assert_eq!(clients.len(), roster.len());
    debug!(
        clients = clients.len(),
        active = clients.iter().filter(|client| client.accion_mes).count(),
        "roster classified"
    );

    ClassifiedBase { clients }
}
