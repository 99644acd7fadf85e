//! Daily route activity: a consolidated day-by-day sheet per distributor,
//! summarized by week, locality and salesperson route.

pub mod aggregate;
mod domain;
mod period;
mod report;

pub use aggregate::{
    locality_visits, locality_volume, planned_vs_realized, salesperson_options, salesperson_routes,
    totals, DailyTotals, LocalityVisitsEntry, LocalityVolumeEntry, RoutePerformanceEntry,
    VisitSeriesKind, VisitSeriesPoint,
};
pub use domain::{DailyActivityRecord, IsoWeek};
pub use period::{available_weeks, DateRange};
pub use report::{DailyReport, DailyReportView, SalespersonRoutesView};
