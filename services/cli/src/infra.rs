use chrono::NaiveDate;
use route_activity::config::AppConfig;
use route_activity::error::AppError;
use route_activity::telemetry;
use route_activity::workflows::daily::IsoWeek;
use serde::Serialize;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_week(raw: &str) -> Result<IsoWeek, String> {
    IsoWeek::parse(raw).ok_or_else(|| {
        format!("failed to parse '{raw}' as a week (expected e.g. '2025 - Semana 49' or 2025-W49)")
    })
}

/// Loads configuration, lets the caller apply flag overrides, then installs
/// the tracing subscriber with the final settings.
pub(crate) fn load_config<F>(overrides: F) -> Result<AppConfig, AppError>
where
    F: FnOnce(&mut AppConfig),
{
    let mut config = AppConfig::load()?;
    overrides(&mut config);
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_must_be_iso_formatted() {
        assert_eq!(
            parse_date("2025-12-01"),
            Ok(NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid date"))
        );
        assert!(parse_date("01/12/2025").is_err());
    }

    #[test]
    fn weeks_accept_selector_labels() {
        let week = parse_week("2025 - Semana 49").expect("label parses");
        assert_eq!(week, IsoWeek { year: 2025, week: 49 });
        assert!(parse_week("semana").is_err());
    }

    #[test]
    fn counts_drop_trailing_zero_decimals() {
        assert_eq!(format_count(12.0), "12");
        assert_eq!(format_count(0.5), "0.50");
    }
}
