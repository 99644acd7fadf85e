use super::domain::{weekday_label, DailyActivityRecord};
use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyTotals {
    #[serde(rename = "bultos_totales")]
    pub units_sold: f64,
    #[serde(rename = "visitas_planeadas")]
    pub planned_visits: f64,
    #[serde(rename = "visitas_realizadas")]
    pub realized_visits: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalityVisitsEntry {
    #[serde(rename = "localidad")]
    pub locality: String,
    #[serde(rename = "visitas_planeadas")]
    pub planned_visits: f64,
    #[serde(rename = "visitas_realizadas")]
    pub realized_visits: f64,
    #[serde(rename = "cantidad_rutas")]
    pub routes: usize,
    #[serde(rename = "cantidad_vendedores")]
    pub salespeople: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalityVolumeEntry {
    #[serde(rename = "localidad")]
    pub locality: String,
    #[serde(rename = "bultos_vendidos")]
    pub units_sold: f64,
    #[serde(rename = "visitas_planeadas")]
    pub planned_visits: f64,
    #[serde(rename = "visitas_realizadas")]
    pub realized_visits: f64,
    #[serde(rename = "rutas")]
    pub routes: usize,
    #[serde(rename = "vendedores")]
    pub salespeople: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePerformanceEntry {
    #[serde(rename = "ruta")]
    pub route: String,
    #[serde(rename = "dia")]
    pub weekdays: String,
    #[serde(rename = "visitas_planeadas")]
    pub planned_visits: f64,
    #[serde(rename = "visitas_realizadas")]
    pub realized_visits: f64,
    #[serde(rename = "clientes_con_compra_en_ruta")]
    pub in_route_buyers: f64,
    #[serde(rename = "clientes_con_compra_fuera_ruta")]
    pub off_route_buyers: f64,
    #[serde(rename = "bultos_vendidos")]
    pub units_sold: f64,
    #[serde(rename = "clientes_con_compra_total")]
    pub total_buyers: f64,
    #[serde(rename = "%_fuera_de_ruta")]
    pub off_route_share: f64,
}

/// One bar of the planned-vs-realized chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitSeriesPoint {
    #[serde(rename = "ruta")]
    pub route: String,
    #[serde(rename = "tipo")]
    pub kind: VisitSeriesKind,
    #[serde(rename = "cantidad")]
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VisitSeriesKind {
    #[serde(rename = "Planeadas")]
    Planned,
    #[serde(rename = "Realizadas")]
    Realized,
}

fn or_zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

fn route_days(records: &[DailyActivityRecord]) -> impl Iterator<Item = &DailyActivityRecord> {
    records.iter().filter(|record| record.is_route_day())
}

/// Headline sums over every row of the selected period.
pub fn totals(records: &[DailyActivityRecord]) -> DailyTotals {
    records.iter().fold(DailyTotals::default(), |mut acc, record| {
        acc.units_sold += or_zero(record.units_sold);
        acc.planned_visits += or_zero(record.planned_visits);
        acc.realized_visits += or_zero(record.realized_visits);
        acc
    })
}

#[derive(Default)]
struct LocalityTally<'a> {
    units_sold: f64,
    planned: f64,
    realized: f64,
    routes: HashSet<&'a str>,
    salespeople: HashSet<&'a str>,
}

fn tally_localities(records: &[DailyActivityRecord]) -> BTreeMap<&str, LocalityTally<'_>> {
    let mut tallies: BTreeMap<&str, LocalityTally> = BTreeMap::new();
    for record in route_days(records) {
        let tally = tallies.entry(record.locality.as_str()).or_default();
        tally.units_sold += or_zero(record.units_sold);
        tally.planned += or_zero(record.planned_visits);
        tally.realized += or_zero(record.realized_visits);
        tally.routes.insert(record.route.as_str());
        tally.salespeople.insert(record.salesperson.as_str());
    }
    tallies
}

/// Planned and realized visits per locality, most planned first.
pub fn locality_visits(records: &[DailyActivityRecord]) -> Vec<LocalityVisitsEntry> {
    let mut entries: Vec<LocalityVisitsEntry> = tally_localities(records)
        .into_iter()
        .map(|(locality, tally)| LocalityVisitsEntry {
            locality: locality.to_string(),
            planned_visits: tally.planned,
            realized_visits: tally.realized,
            routes: tally.routes.len(),
            salespeople: tally.salespeople.len(),
        })
        .collect();
    entries.sort_by(|a, b| b.planned_visits.total_cmp(&a.planned_visits));
    entries
}

/// Units sold per locality, highest volume first.
pub fn locality_volume(records: &[DailyActivityRecord]) -> Vec<LocalityVolumeEntry> {
    let mut entries: Vec<LocalityVolumeEntry> = tally_localities(records)
        .into_iter()
        .map(|(locality, tally)| LocalityVolumeEntry {
            locality: locality.to_string(),
            units_sold: tally.units_sold,
            planned_visits: tally.planned,
            realized_visits: tally.realized,
            routes: tally.routes.len(),
            salespeople: tally.salespeople.len(),
        })
        .collect();
    entries.sort_by(|a, b| b.units_sold.total_cmp(&a.units_sold));
    entries
}

/// Sorted distinct salespeople with scheduled route days.
pub fn salesperson_options(records: &[DailyActivityRecord]) -> Vec<String> {
    route_days(records)
        .map(|record| record.salesperson.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Per-route planning, execution and sales for one salesperson, ordered by
/// total buyers, highest first.
pub fn salesperson_routes(
    records: &[DailyActivityRecord],
    salesperson: &str,
) -> Vec<RoutePerformanceEntry> {
    #[derive(Default)]
    struct RouteTally {
        weekdays: BTreeSet<&'static str>,
        planned: f64,
        realized: f64,
        in_route: f64,
        off_route: f64,
        units_sold: f64,
    }

    let mut tallies: BTreeMap<&str, RouteTally> = BTreeMap::new();
    for record in route_days(records).filter(|record| record.salesperson == salesperson) {
        let tally = tallies.entry(record.route.as_str()).or_default();
        tally.weekdays.insert(weekday_label(record.date.weekday()));
        tally.planned += or_zero(record.planned_visits);
        tally.realized += or_zero(record.realized_visits);
        tally.in_route += or_zero(record.in_route_sales);
        tally.off_route += or_zero(record.off_route_sales);
        tally.units_sold += or_zero(record.units_sold);
    }

    let mut entries: Vec<RoutePerformanceEntry> = tallies
        .into_iter()
        .map(|(route, tally)| {
            let total = tally.in_route + tally.off_route;
            let share = if total > 0.0 {
                (tally.off_route / total * 100.0).round() / 100.0
            } else {
                0.0
            };
            RoutePerformanceEntry {
                route: route.to_string(),
                weekdays: tally.weekdays.into_iter().collect::<Vec<_>>().join(", "),
                planned_visits: tally.planned,
                realized_visits: tally.realized,
                in_route_buyers: tally.in_route,
                off_route_buyers: tally.off_route,
                units_sold: tally.units_sold,
                total_buyers: total,
                off_route_share: share,
            }
        })
        .collect();
    entries.sort_by(|a, b| b.total_buyers.total_cmp(&a.total_buyers));
    entries
}

/// Chart series: one planned and one realized point per route, routes in
/// lexical order.
pub fn planned_vs_realized(routes: &[RoutePerformanceEntry]) -> Vec<VisitSeriesPoint> {
    let mut sorted: Vec<&RoutePerformanceEntry> = routes.iter().collect();
    sorted.sort_by(|a, b| a.route.cmp(&b.route));

    let planned = sorted.iter().map(|entry| VisitSeriesPoint {
        route: entry.route.clone(),
        kind: VisitSeriesKind::Planned,
        value: entry.planned_visits,
    });
    let realized = sorted.iter().map(|entry| VisitSeriesPoint {
        route: entry.route.clone(),
        kind: VisitSeriesKind::Realized,
        value: entry.realized_visits,
    });
    planned.chain(realized).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// `figures` is realized visits, units, in-route and off-route buyers.
    fn record(
        route: &str,
        salesperson: &str,
        locality: &str,
        day: u32,
        planned: Option<f64>,
        figures: [f64; 4],
    ) -> DailyActivityRecord {
        let [realized, units, in_route, off_route] = figures;
        DailyActivityRecord {
            route: route.into(),
            salesperson: salesperson.into(),
            locality: locality.into(),
            date: NaiveDate::from_ymd_opt(2025, 12, day).expect("valid date"),
            planned_visits: planned,
            realized_visits: Some(realized),
            units_sold: Some(units),
            in_route_sales: Some(in_route),
            off_route_sales: Some(off_route),
        }
    }

    fn sample() -> Vec<DailyActivityRecord> {
        vec![
            record("101", "Perez", "Rosario", 1, Some(10.0), [8.0, 30.0, 6.0, 2.0]),
            record("101", "Perez", "Rosario", 4, Some(10.0), [9.0, 25.0, 5.0, 1.0]),
            record("102", "Gomez", "Rosario", 2, Some(0.0), [0.0, 12.0, 0.0, 0.0]),
            record("200", "Perez", "Funes", 3, Some(12.0), [12.0, 80.0, 9.0, 0.0]),
            record("300", "Diaz", "Funes", 5, None, [0.0, 7.0, 0.0, 0.0]),
        ]
    }

    #[test]
    fn totals_cover_every_row_in_the_period() {
        let totals = totals(&sample());
        assert_eq!(totals.units_sold, 154.0);
        assert_eq!(totals.planned_visits, 32.0);
        assert_eq!(totals.realized_visits, 29.0);
    }

    #[test]
    fn locality_visits_skip_unscheduled_days_and_keep_counter_days() {
        let entries = locality_visits(&sample());
        assert_eq!(entries.len(), 2);

        let rosario = &entries[0];
        assert_eq!(rosario.locality, "Rosario");
        assert_eq!(rosario.planned_visits, 20.0);
        assert_eq!(rosario.realized_visits, 17.0);
        assert_eq!(rosario.routes, 2);
        assert_eq!(rosario.salespeople, 2);

        let funes = &entries[1];
        assert_eq!(funes.routes, 1, "unscheduled route 300 is excluded");
    }

    #[test]
    fn locality_volume_is_ordered_by_units() {
        let entries = locality_volume(&sample());
        assert_eq!(entries[0].locality, "Funes");
        assert_eq!(entries[0].units_sold, 80.0);
        assert_eq!(entries[1].units_sold, 67.0);
    }

    #[test]
    fn salesperson_routes_compute_off_route_share() {
        let entries = salesperson_routes(&sample(), "Perez");
        assert_eq!(entries.len(), 2);

        let r101 = entries.iter().find(|entry| entry.route == "101").expect("route 101");
        assert_eq!(r101.weekdays, "Jueves, Lunes");
        assert_eq!(r101.total_buyers, 14.0);
        assert_eq!(r101.off_route_share, 0.21);

        let r200 = entries.iter().find(|entry| entry.route == "200").expect("route 200");
        assert_eq!(r200.off_route_share, 0.0);
        assert_eq!(entries[0].route, "101");
    }

    #[test]
    fn options_only_list_salespeople_with_route_days() {
        assert_eq!(salesperson_options(&sample()), vec!["Gomez", "Perez"]);
    }

    #[test]
    fn chart_series_has_planned_then_realized_per_route() {
        let routes = salesperson_routes(&sample(), "Perez");
        let series = planned_vs_realized(&routes);
        assert_eq!(series.len(), 4);
        assert_eq!(series[0].route, "101");
        assert_eq!(series[0].kind, VisitSeriesKind::Planned);
        assert_eq!(series[3].kind, VisitSeriesKind::Realized);
        assert_eq!(series[3].value, 12.0);
    }
}
