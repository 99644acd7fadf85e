mod activity;
mod cli;
mod daily;
mod infra;

use route_activity::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
