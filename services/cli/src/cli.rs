use crate::activity::{run_activity_report, run_salespeople, ActivityReportArgs, SalespeopleArgs};
use crate::daily::{run_daily_list, run_daily_report, DailyListArgs, DailyReportArgs};
use clap::{Parser, Subcommand};
use route_activity::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "route-activity",
    about = "Reconcile sales-force visit logs, off-route sales and client rosters",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monthly roster reconciliation (ACTIVO/INACTIVO per client)
    Activity {
        #[command(subcommand)]
        command: ActivityCommand,
    },
    /// Daily route activity by week, locality and salesperson
    Daily {
        #[command(subcommand)]
        command: DailyCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ActivityCommand {
    /// Classify the roster and print the summary, route detail and inactive list
    Report(ActivityReportArgs),
    /// List the salesperson selector options
    Salespeople(SalespeopleArgs),
}

#[derive(Subcommand, Debug)]
enum DailyCommand {
    /// List data files and the weeks available in the selected one
    List(DailyListArgs),
    /// Locality tables and the per-salesperson route table for a period
    Report(DailyReportArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Activity {
            command: ActivityCommand::Report(args),
        } => run_activity_report(args),
        Command::Activity {
            command: ActivityCommand::Salespeople(args),
        } => run_salespeople(args),
        Command::Daily {
            command: DailyCommand::List(args),
        } => run_daily_list(args),
        Command::Daily {
            command: DailyCommand::Report(args),
        } => run_daily_report(args),
    }
}
