use super::super::classifier::ClassifiedBase;
use super::super::domain::{ActivityStatus, ClientId, RouteId, SalespersonId};
use super::super::pipeline::ReconciliationRun;
use super::filter::SalespersonFilter;
use super::views::{
    ActivityReportView, InactiveClientView, RouteSummaryEntry, SalespersonSummaryEntry,
};
use std::collections::{BTreeMap, HashSet};

#[derive(Default)]
struct SalespersonTally<'a> {
    routes: HashSet<&'a RouteId>,
    clients: HashSet<&'a ClientId>,
    inactive: usize,
}

#[derive(Default)]
struct RouteTally<'a> {
    clients: HashSet<&'a ClientId>,
    active: usize,
    inactive: usize,
}

/// Distinct routes, distinct clients and inactive rows per salesperson,
/// across the whole company.
pub fn salesperson_summary(base: &ClassifiedBase) -> Vec<SalespersonSummaryEntry> {
    let mut tallies: BTreeMap<&SalespersonId, SalespersonTally> = BTreeMap::new();

    for client in base.clients() {
        let tally = tallies.entry(&client.salesperson).or_default();
        tally.routes.insert(&client.route);
        tally.clients.insert(&client.client_id);
        if client.status == ActivityStatus::Inactive {
            tally.inactive += 1;
        }
    }

    tallies
        .into_iter()
        .map(|(salesperson, tally)| SalespersonSummaryEntry {
            salesperson: salesperson.clone(),
            routes: tally.routes.len(),
            total_clients: tally.clients.len(),
            inactive_clients: tally.inactive,
        })
        .collect()
}

/// Distinct clients plus active and inactive rows per (salesperson, route),
/// ordered by salesperson then route. The only view the salesperson filter
/// narrows.
pub fn route_summary(base: &ClassifiedBase, filter: &SalespersonFilter) -> Vec<RouteSummaryEntry> {
    let mut tallies: BTreeMap<(&SalespersonId, &RouteId), RouteTally> = BTreeMap::new();

    let selected = base
        .clients()
        .iter()
        .filter(|client| filter.matches(&client.salesperson));
    for client in selected {
        let tally = tallies
            .entry((&client.salesperson, &client.route))
            .or_default();
        tally.clients.insert(&client.client_id);
        match client.status {
            ActivityStatus::Active => tally.active += 1,
            ActivityStatus::Inactive => tally.inactive += 1,
        }
    }

    tallies
        .into_iter()
        .map(|((salesperson, route), tally)| RouteSummaryEntry {
            salesperson: salesperson.clone(),
            route: route.clone(),
            total_points: tally.clients.len(),
            active_points: tally.active,
            inactive_points: tally.inactive,
        })
        .collect()
}

/// Inactive roster rows of the whole company, in roster order.
pub fn inactive_clients(base: &ClassifiedBase) -> Vec<InactiveClientView> {
    base.clients()
        .iter()
        .filter(|client| client.status == ActivityStatus::Inactive)
        .map(|client| InactiveClientView {
            salesperson: client.salesperson.clone(),
            route: client.route.clone(),
            client_id: client.client_id.clone(),
        })
        .collect()
}

pub struct ActivityReport;

impl ActivityReport {
    /// Recomputes every roster view from the run; the run itself is not
    /// touched, so the filter can change without reconciling again. Headline
    /// counts, the salesperson summary and the inactive list stay
    /// company-wide.
    pub fn build(run: &ReconciliationRun, filter: &SalespersonFilter) -> ActivityReportView {
        let base = &run.base;
        let active = base.count(ActivityStatus::Active);

        ActivityReportView {
            empresa: run.company.clone(),
            vendedor_seleccionado: filter.label().to_string(),
            clientes: base.len(),
            activos: active,
            inactivos: base.len() - active,
            resumen_vendedor: salesperson_summary(base),
            clientes_inactivos: inactive_clients(base),
            detalle_ruta: route_summary(base, filter),
            sin_atribuir: run.unattributed.clone(),
            advertencias: run.warnings.clone(),
        }
    }
}
