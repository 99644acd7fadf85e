use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// One row of a distributor's consolidated daily activity sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyActivityRecord {
    #[serde(rename = "ruta")]
    pub route: String,
    #[serde(rename = "vendedor")]
    pub salesperson: String,
    #[serde(rename = "localidad")]
    pub locality: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    /// `None` when the route is not scheduled that day; `Some(0.0)` marks a
    /// counter-sales day and still counts.
    #[serde(rename = "visitas_planeadas")]
    pub planned_visits: Option<f64>,
    #[serde(rename = "visitados")]
    pub realized_visits: Option<f64>,
    #[serde(rename = "cantidad_total_bultos")]
    pub units_sold: Option<f64>,
    #[serde(rename = "venta_en_el_pdv")]
    pub in_route_sales: Option<f64>,
    #[serde(rename = "venta_a_distancia")]
    pub off_route_sales: Option<f64>,
}

impl DailyActivityRecord {
    pub fn is_route_day(&self) -> bool {
        self.planned_visits.is_some()
    }

    pub fn iso_week(&self) -> IsoWeek {
        IsoWeek::of(self.date)
    }
}

/// ISO-8601 year and week number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct IsoWeek {
    pub year: i32,
    pub week: u32,
}

impl IsoWeek {
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Selector label, e.g. `2025 - Semana 49`.
    pub fn label(&self) -> String {
        format!("{} - Semana {}", self.year, self.week)
    }

    /// Accepts `2025 - Semana 49`, `2025-W49` or `2025-49`.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let (year, week) = trimmed
            .split_once(" - Semana ")
            .or_else(|| trimmed.split_once("-W"))
            .or_else(|| trimmed.split_once("-w"))
            .or_else(|| trimmed.split_once('-'))?;
        let year = year.trim().parse().ok()?;
        let week = week.trim().parse().ok()?;
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
        Some(Self { year, week })
    }
}

pub(crate) const fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miércoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}
