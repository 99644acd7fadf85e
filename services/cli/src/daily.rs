use crate::infra::{format_count, load_config, parse_date, parse_week, print_json};
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use route_activity::error::AppError;
use route_activity::workflows::daily::{
    available_weeks, DailyActivityRecord, DailyReport, DailyReportView, DateRange, IsoWeek,
};
use route_activity::workflows::ingest::{DataDirectory, SpreadsheetLoader};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct DailySourceArgs {
    /// Folder holding one consolidated workbook per distributor (overrides DAILY_DATA_DIR)
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Workbook to analyze; defaults to the first file in name order
    #[arg(long)]
    pub(crate) file: Option<String>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum QuickRange {
    /// ISO week containing --today
    CurrentWeek,
    /// Seven days up to the latest date in the data
    #[value(name = "last-7-days")]
    Last7Days,
    #[default]
    All,
}

#[derive(Args, Debug)]
pub(crate) struct DailyReportArgs {
    #[command(flatten)]
    pub(crate) source: DailySourceArgs,
    /// Week to report, e.g. "2025 - Semana 49" or 2025-W49
    #[arg(long, value_parser = parse_week, conflicts_with = "range")]
    pub(crate) week: Option<IsoWeek>,
    /// Quick range applied to the whole file
    #[arg(long, value_enum)]
    pub(crate) range: Option<QuickRange>,
    /// Reference date for the current week (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Salesperson for the route table; defaults to the first one listed
    #[arg(long)]
    pub(crate) salesperson: Option<String>,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DailyListArgs {
    #[command(flatten)]
    pub(crate) source: DailySourceArgs,
    /// Emit the listing as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct DailyListing {
    #[serde(rename = "archivos")]
    files: Vec<String>,
    #[serde(rename = "archivo_seleccionado")]
    selected: String,
    #[serde(rename = "semanas")]
    weeks: Vec<String>,
}

fn resolve_range(week: Option<IsoWeek>, range: Option<QuickRange>) -> DateRange {
    match (week, range.unwrap_or_default()) {
        (Some(week), _) => DateRange::Week(week),
        (None, QuickRange::CurrentWeek) => DateRange::CurrentWeek,
        (None, QuickRange::Last7Days) => DateRange::Trailing7Days,
        (None, QuickRange::All) => DateRange::All,
    }
}

fn load_records(
    source: DailySourceArgs,
) -> Result<(DataDirectory, String, Vec<DailyActivityRecord>), AppError> {
    let DailySourceArgs { data_dir, file } = source;
    let config = load_config(|config| {
        if let Some(dir) = data_dir {
            config.daily.data_dir = dir;
        }
    })?;

    let directory = DataDirectory::scan(&config.daily.data_dir)?;
    let path = directory.select(file.as_deref())?;
    let selected = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    info!(file = %path.display(), "loading daily activity");
    let loaded = SpreadsheetLoader::daily_activity_from_path(&path)?;
    Ok((directory, selected, loaded.records))
}

pub(crate) fn run_daily_list(args: DailyListArgs) -> Result<(), AppError> {
    let (directory, selected, records) = load_records(args.source)?;
    let listing = DailyListing {
        files: directory.files().to_vec(),
        selected,
        weeks: available_weeks(&records).iter().map(IsoWeek::label).collect(),
    };

    if args.json {
        return print_json(&listing);
    }

    println!("Data files");
    for file in &listing.files {
        let marker = if *file == listing.selected { "*" } else { "-" };
        println!("{marker} {file}");
    }
    println!("\nWeeks in {}", listing.selected);
    for week in &listing.weeks {
        println!("- {week}");
    }
    Ok(())
}

pub(crate) fn run_daily_report(args: DailyReportArgs) -> Result<(), AppError> {
    let DailyReportArgs {
        source,
        week,
        range,
        today,
        salesperson,
        json,
    } = args;

    let (_, selected, records) = load_records(source)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let range = resolve_range(week, range);
    let view = DailyReport::build(&records, range, today, salesperson.as_deref());

    if json {
        print_json(&view)
    } else {
        render_daily_report(&selected, &view);
        Ok(())
    }
}

fn render_daily_report(file: &str, view: &DailyReportView) {
    println!("Daily activity: {file}");
    println!("Period: {} ({} rows)", view.period, view.rows);
    println!(
        "Units sold {} | planned visits {} | realized visits {}",
        format_count(view.totals.units_sold),
        format_count(view.totals.planned_visits),
        format_count(view.totals.realized_visits)
    );

    println!("\nVisits by locality");
    for entry in &view.locality_visits {
        println!(
            "- {}: {} planned, {} realized, {} routes, {} salespeople",
            entry.locality,
            format_count(entry.planned_visits),
            format_count(entry.realized_visits),
            entry.routes,
            entry.salespeople
        );
    }

    println!("\nVolume by locality");
    for entry in &view.locality_volume {
        println!(
            "- {}: {} units, {} planned, {} realized, {} routes, {} salespeople",
            entry.locality,
            format_count(entry.units_sold),
            format_count(entry.planned_visits),
            format_count(entry.realized_visits),
            entry.routes,
            entry.salespeople
        );
    }

    let Some(detail) = &view.salesperson_routes else {
        println!("\nRoute detail: no scheduled routes in this period");
        return;
    };
    println!("\nRoutes for {}", detail.salesperson);
    for route in &detail.routes {
        println!(
            "- {} ({}): {} planned, {} realized, {} in-route / {} off-route buyers, \
             {} units, {:.0}% off-route",
            route.route,
            route.weekdays,
            format_count(route.planned_visits),
            format_count(route.realized_visits),
            format_count(route.in_route_buyers),
            format_count(route.off_route_buyers),
            format_count(route.units_sold),
            route.off_route_share * 100.0
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_week_wins_over_default_range() {
        let week = IsoWeek { year: 2025, week: 49 };
        assert_eq!(resolve_range(Some(week), None), DateRange::Week(week));
        assert_eq!(resolve_range(None, None), DateRange::All);
        assert_eq!(
            resolve_range(None, Some(QuickRange::Last7Days)),
            DateRange::Trailing7Days
        );
    }
}
