use super::super::domain::{ClientId, RouteId, SalespersonId};
use super::super::off_route::UnattributedSale;
pub use super::super::pipeline::ReconciliationWarnings;
use serde::Serialize;

/// `resumen_vendedor` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalespersonSummaryEntry {
    #[serde(rename = "vendedor")]
    pub salesperson: SalespersonId,
    #[serde(rename = "rutas")]
    pub routes: usize,
    #[serde(rename = "clientes_totales")]
    pub total_clients: usize,
    #[serde(rename = "clientes_inactivos")]
    pub inactive_clients: usize,
}

/// `resumen_ruta` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummaryEntry {
    #[serde(rename = "vendedor")]
    pub salesperson: SalespersonId,
    #[serde(rename = "id_ruta")]
    pub route: RouteId,
    #[serde(rename = "puntos_totales")]
    pub total_points: usize,
    #[serde(rename = "puntos_activos")]
    pub active_points: usize,
    #[serde(rename = "puntos_inactivos")]
    pub inactive_points: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InactiveClientView {
    #[serde(rename = "vendedor")]
    pub salesperson: SalespersonId,
    #[serde(rename = "id_ruta")]
    pub route: RouteId,
    #[serde(rename = "id_cliente_erp")]
    pub client_id: ClientId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityReportView {
    pub empresa: String,
    pub vendedor_seleccionado: String,
    pub clientes: usize,
    pub activos: usize,
    pub inactivos: usize,
    pub resumen_vendedor: Vec<SalespersonSummaryEntry>,
    pub clientes_inactivos: Vec<InactiveClientView>,
    pub detalle_ruta: Vec<RouteSummaryEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sin_atribuir: Vec<UnattributedSale>,
    pub advertencias: ReconciliationWarnings,
}
