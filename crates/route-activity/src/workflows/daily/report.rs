use super::aggregate::{
    locality_visits, locality_volume, planned_vs_realized, salesperson_options, salesperson_routes,
    totals, DailyTotals, LocalityVisitsEntry, LocalityVolumeEntry, RoutePerformanceEntry,
    VisitSeriesPoint,
};
use super::domain::DailyActivityRecord;
use super::period::DateRange;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Route table for one salesperson plus its chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalespersonRoutesView {
    #[serde(rename = "vendedor")]
    pub salesperson: String,
    #[serde(rename = "rutas")]
    pub routes: Vec<RoutePerformanceEntry>,
    #[serde(rename = "planeado_vs_realizado")]
    pub chart: Vec<VisitSeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReportView {
    #[serde(rename = "periodo")]
    pub period: String,
    #[serde(rename = "filas")]
    pub rows: usize,
    #[serde(rename = "totales")]
    pub totals: DailyTotals,
    #[serde(rename = "visitas_por_localidad")]
    pub locality_visits: Vec<LocalityVisitsEntry>,
    #[serde(rename = "volumen_por_localidad")]
    pub locality_volume: Vec<LocalityVolumeEntry>,
    #[serde(rename = "vendedores")]
    pub salespeople: Vec<String>,
    #[serde(rename = "detalle_vendedor", skip_serializing_if = "Option::is_none")]
    pub salesperson_routes: Option<SalespersonRoutesView>,
}

pub struct DailyReport;

impl DailyReport {
    /// Builds every daily view over the selected range. Without an explicit
    /// salesperson the first one in sorted order is detailed, if any.
    pub fn build(
        records: &[DailyActivityRecord],
        range: DateRange,
        today: NaiveDate,
        salesperson: Option<&str>,
    ) -> DailyReportView {
        let scoped = range.apply(records, today);
        let salespeople = salesperson_options(&scoped);

        let selected = salesperson
            .map(str::to_string)
            .or_else(|| salespeople.first().cloned());
        let detail = selected.map(|name| {
            let routes = salesperson_routes(&scoped, &name);
            SalespersonRoutesView {
                chart: planned_vs_realized(&routes),
                salesperson: name,
                routes,
            }
        });

        debug!(
            period = %range.label(),
            rows = scoped.len(),
            salespeople = salespeople.len(),
            "daily report built"
        );

        DailyReportView {
            period: range.label(),
            rows: scoped.len(),
            totals: totals(&scoped),
            locality_visits: locality_visits(&scoped),
            locality_volume: locality_volume(&scoped),
            salespeople,
            salesperson_routes: detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::daily::IsoWeek;

    fn record(day: u32, salesperson: &str, planned: Option<f64>) -> DailyActivityRecord {
        DailyActivityRecord {
            route: "101".into(),
            salesperson: salesperson.into(),
            locality: "Rosario".into(),
            date: NaiveDate::from_ymd_opt(2025, 12, day).expect("valid date"),
            planned_visits: planned,
            realized_visits: Some(4.0),
            units_sold: Some(10.0),
            in_route_sales: Some(3.0),
            off_route_sales: Some(1.0),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 20).expect("valid date")
    }

    #[test]
    fn defaults_to_first_salesperson_with_route_days() {
        let records = vec![
            record(1, "Perez", Some(5.0)),
            record(2, "Gomez", Some(5.0)),
            record(3, "Acosta", None),
        ];
        let view = DailyReport::build(&records, DateRange::All, today(), None);

        assert_eq!(view.period, "Todo");
        assert_eq!(view.rows, 3);
        assert_eq!(view.salespeople, vec!["Gomez", "Perez"]);
        let detail = view.salesperson_routes.expect("detail present");
        assert_eq!(detail.salesperson, "Gomez");
        assert_eq!(detail.routes.len(), 1);
        assert_eq!(detail.chart.len(), 2);
    }

    #[test]
    fn week_selection_scopes_every_table() {
        let records = vec![record(1, "Perez", Some(5.0)), record(9, "Perez", Some(7.0))];
        let week = IsoWeek { year: 2025, week: 50 };
        let view = DailyReport::build(&records, DateRange::Week(week), today(), Some("Perez"));

        assert_eq!(view.rows, 1);
        assert_eq!(view.totals.planned_visits, 7.0);
        assert_eq!(view.locality_visits[0].planned_visits, 7.0);
    }

    #[test]
    fn empty_period_has_no_detail() {
        let records = vec![record(1, "Perez", Some(5.0))];
        let view = DailyReport::build(&records, DateRange::CurrentWeek, today(), None);
        assert_eq!(view.rows, 0);
        assert!(view.salesperson_routes.is_none());
        assert!(view.locality_visits.is_empty());
    }
}
