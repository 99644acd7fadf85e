use crate::infra::{load_config, parse_date, print_json};
use chrono::NaiveDate;
use clap::Args;
use route_activity::error::AppError;
use route_activity::workflows::activity::report::salesperson_options;
use route_activity::workflows::activity::report::views::ActivityReportView;
use route_activity::workflows::activity::{
    reconcile, ActivityReport, ReconciliationRun, ReportingPeriod, SalespersonFilter,
};
use route_activity::workflows::ingest::SpreadsheetLoader;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct ActivitySourceArgs {
    /// Company whose roster is reconciled (overrides ACTIVITY_COMPANY)
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// Roster workbook or CSV (overrides ACTIVITY_ROSTER_PATH)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Visit log workbook or CSV (overrides ACTIVITY_VISITS_PATH)
    #[arg(long)]
    pub(crate) visits: Option<PathBuf>,
    /// Off-route sales workbook or CSV (overrides ACTIVITY_OFF_ROUTE_PATH)
    #[arg(long)]
    pub(crate) off_route: Option<PathBuf>,
    /// First day of the reporting period (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, requires = "to")]
    pub(crate) from: Option<NaiveDate>,
    /// Last day of the reporting period (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, requires = "from")]
    pub(crate) to: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ActivityReportArgs {
    #[command(flatten)]
    pub(crate) sources: ActivitySourceArgs,
    /// Restrict the route detail to one salesperson ("Todos" for everyone)
    #[arg(long, default_value = "Todos")]
    pub(crate) salesperson: String,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SalespeopleArgs {
    #[command(flatten)]
    pub(crate) sources: ActivitySourceArgs,
    /// Emit the options as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

fn load_run(sources: ActivitySourceArgs) -> Result<ReconciliationRun, AppError> {
    let ActivitySourceArgs {
        company,
        roster,
        visits,
        off_route,
        from,
        to,
    } = sources;

    let config = load_config(|config| {
        let activity = &mut config.activity;
        if let Some(company) = company {
            activity.company = company;
        }
        if let Some(path) = roster {
            activity.roster_path = path;
        }
        if let Some(path) = visits {
            activity.visits_path = path;
        }
        if let Some(path) = off_route {
            activity.off_route_path = path;
        }
    })?;

    let period = match (from, to) {
        (Some(from), Some(to)) => Some(ReportingPeriod::new(from, to)?),
        _ => None,
    };

    let sources = &config.activity;
    info!(
        environment = ?config.environment,
        company = %sources.company,
        roster = %sources.roster_path.display(),
        visits = %sources.visits_path.display(),
        off_route = %sources.off_route_path.display(),
        "loading activity sources"
    );
    let inputs = SpreadsheetLoader::activity_inputs(
        &sources.roster_path,
        &sources.visits_path,
        &sources.off_route_path,
    )?;

    Ok(reconcile(&inputs, &sources.company, period))
}

pub(crate) fn run_activity_report(args: ActivityReportArgs) -> Result<(), AppError> {
    let ActivityReportArgs {
        sources,
        salesperson,
        json,
    } = args;

    let run = load_run(sources)?;
    let filter = SalespersonFilter::from_selection(&salesperson);
    let view = ActivityReport::build(&run, &filter);

    if json {
        print_json(&view)
    } else {
        render_activity_report(&run, &view);
        Ok(())
    }
}

pub(crate) fn run_salespeople(args: SalespeopleArgs) -> Result<(), AppError> {
    let run = load_run(args.sources)?;
    let options = salesperson_options(&run.base);

    if args.json {
        return print_json(&options);
    }
    for option in &options {
        println!("{option}");
    }
    Ok(())
}

fn render_activity_report(run: &ReconciliationRun, view: &ActivityReportView) {
    println!("Activity report: {}", view.empresa);
    match &run.period {
        Some(period) => println!("Period: {} -> {}", period.from, period.to),
        None => println!("Period: all loaded records"),
    }
    println!("Salesperson: {}", view.vendedor_seleccionado);
    println!(
        "Clients: {} | ACTIVO {} | INACTIVO {}",
        view.clientes, view.activos, view.inactivos
    );

    println!("\nSalesperson summary");
    for entry in &view.resumen_vendedor {
        println!(
            "- {}: {} routes, {} clients, {} inactive",
            entry.salesperson, entry.routes, entry.total_clients, entry.inactive_clients
        );
    }

    println!("\nRoute detail");
    for entry in &view.detalle_ruta {
        println!(
            "- {} / {}: {} points, {} active, {} inactive",
            entry.salesperson,
            entry.route,
            entry.total_points,
            entry.active_points,
            entry.inactive_points
        );
    }

    if view.clientes_inactivos.is_empty() {
        println!("\nInactive clients: none");
    } else {
        println!("\nInactive clients");
        for client in &view.clientes_inactivos {
            println!("- {} / {}: {}", client.salesperson, client.route, client.client_id);
        }
    }

    if !view.sin_atribuir.is_empty() {
        println!("\nUnattributed off-route sales");
        for sale in &view.sin_atribuir {
            println!("- {}: {} records", sale.client_id, sale.records);
        }
    }

    let warnings = &view.advertencias;
    if warnings.is_empty() {
        return;
    }
    println!("\nWarnings");
    for conflict in &warnings.identity_conflicts {
        let assignments: Vec<String> = conflict
            .assignments
            .iter()
            .map(|assignment| format!("{}/{}", assignment.salesperson, assignment.route))
            .collect();
        println!(
            "- client {} has several assignments: {}",
            conflict.client_id,
            assignments.join(", ")
        );
    }
    if warnings.roster_rows_missing_keys > 0 {
        println!(
            "- {} roster rows without client id or salesperson (classified INACTIVO)",
            warnings.roster_rows_missing_keys
        );
    }
    let skipped = [
        ("visit", warnings.skipped_visit_rows),
        ("off-route", warnings.skipped_off_route_rows),
    ];
    for (source, count) in skipped {
        if count > 0 {
            println!("- {count} {source} rows skipped (missing client or salesperson)");
        }
    }
    if warnings.undated_visits_excluded > 0 {
        println!(
            "- {} undated visits excluded from the period",
            warnings.undated_visits_excluded
        );
    }
    if warnings.undated_off_route_excluded > 0 {
        println!(
            "- {} undated off-route sales excluded from the period",
            warnings.undated_off_route_excluded
        );
    }
}
