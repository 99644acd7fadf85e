use super::domain::{DailyActivityRecord, IsoWeek};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

/// Period selector for the daily sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Week(IsoWeek),
    /// ISO week containing `today`.
    CurrentWeek,
    /// The seven days up to the latest date in the data, both ends included.
    Trailing7Days,
    All,
}

impl DateRange {
    pub fn label(&self) -> String {
        match self {
            Self::Week(week) => week.label(),
            Self::CurrentWeek => "Semana actual".to_string(),
            Self::Trailing7Days => "Últimos 7d".to_string(),
            Self::All => "Todo".to_string(),
        }
    }

    pub fn apply(
        &self,
        records: &[DailyActivityRecord],
        today: NaiveDate,
    ) -> Vec<DailyActivityRecord> {
        match self {
            Self::All => records.to_vec(),
            Self::Week(week) => in_week(records, *week),
            Self::CurrentWeek => in_week(records, IsoWeek::of(today)),
            Self::Trailing7Days => {
                let Some(end) = records.iter().map(|record| record.date).max() else {
                    return Vec::new();
                };
                let start = end - Duration::days(7);
                records
                    .iter()
                    .filter(|record| record.date >= start && record.date <= end)
                    .cloned()
                    .collect()
            }
        }
    }
}

fn in_week(records: &[DailyActivityRecord], week: IsoWeek) -> Vec<DailyActivityRecord> {
    records
        .iter()
        .filter(|record| record.iso_week() == week)
        .cloned()
        .collect()
}

/// Distinct ISO weeks present in the data, oldest first.
pub fn available_weeks(records: &[DailyActivityRecord]) -> Vec<IsoWeek> {
    records
        .iter()
        .map(DailyActivityRecord::iso_week)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: NaiveDate) -> DailyActivityRecord {
        DailyActivityRecord {
            route: "101".into(),
            salesperson: "Perez".into(),
            locality: "Rosario".into(),
            date,
            planned_visits: Some(10.0),
            realized_visits: Some(8.0),
            units_sold: Some(20.0),
            in_route_sales: Some(5.0),
            off_route_sales: Some(1.0),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn sample() -> Vec<DailyActivityRecord> {
        vec![
            record(date(2025, 11, 24)),
            record(date(2025, 12, 1)),
            record(date(2025, 12, 3)),
            record(date(2025, 12, 9)),
        ]
    }

    #[test]
    fn weeks_are_listed_once_in_order() {
        let weeks = available_weeks(&sample());
        let labels: Vec<String> = weeks.iter().map(IsoWeek::label).collect();
        assert_eq!(
            labels,
            vec!["2025 - Semana 48", "2025 - Semana 49", "2025 - Semana 50"]
        );
    }

    #[test]
    fn week_range_keeps_only_that_week() {
        let week = IsoWeek { year: 2025, week: 49 };
        let filtered = DateRange::Week(week).apply(&sample(), date(2025, 12, 15));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn trailing_window_is_anchored_on_latest_data_date() {
        let filtered = DateRange::Trailing7Days.apply(&sample(), date(2030, 1, 1));
        let dates: Vec<NaiveDate> = filtered.iter().map(|record| record.date).collect();
        assert_eq!(dates, vec![date(2025, 12, 3), date(2025, 12, 9)]);
        assert!(DateRange::Trailing7Days.apply(&[], date(2030, 1, 1)).is_empty());
    }

    #[test]
    fn current_week_uses_today() {
        let filtered = DateRange::CurrentWeek.apply(&sample(), date(2025, 12, 11));
        assert_eq!(filtered.len(), 1);
        assert_eq!(DateRange::All.apply(&sample(), date(2025, 12, 11)).len(), 4);
    }
}
