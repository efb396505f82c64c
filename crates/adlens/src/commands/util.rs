//! Shared helpers for command handlers.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
/// Without a terminal there is nobody to ask, so the operation is
/// refused instead of silently defaulting.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    use std::io::IsTerminal;

    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.trim_end_matches('?').to_owned(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Prompt for a password without echo.
pub fn prompt_password(prompt: &str) -> Result<String, CliError> {
    let password = rpassword::prompt_password(format!("{prompt}: "))?;
    Ok(password)
}

/// Spinner on stderr for slow calls. `None` when quiet or piped.
pub fn spinner(quiet: bool, message: &str) -> Option<indicatif::ProgressBar> {
    use std::io::IsTerminal;

    if quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let bar = indicatif::ProgressBar::new_spinner().with_message(message.to_owned());
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    Some(bar)
}

/// Parse a `YYYY-MM-DD` CLI argument.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected YYYY-MM-DD, got '{value}'"),
    })
}

/// Human-readable age of a timestamp, e.g. "3 days ago".
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now - then;
    if delta < chrono::Duration::zero() {
        return "in the future".into();
    }
    let minutes = delta.num_minutes();
    if minutes < 1 {
        return "just now".into();
    }
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = delta.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }
    plural(delta.num_days(), "day")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Format a metric value with thousands grouping and two decimals when
/// fractional.
pub fn format_metric(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        group_thousands(&format!("{value:.0}"))
    } else {
        group_thousands(&format!("{value:.2}"))
    }
}

fn group_thousands(raw: &str) -> String {
    let (int_part, frac_part) = raw.split_once('.').map_or((raw, None), |(i, f)| (i, Some(f)));
    let (sign, digits) = int_part
        .strip_prefix('-')
        .map_or(("", int_part), |rest| ("-", rest));
    let len = digits.chars().count();
    let mut grouped = String::from(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap();
        assert_eq!(relative_time(now, now), "just now");
        assert_eq!(
            relative_time(now - chrono::Duration::minutes(5), now),
            "5 minutes ago"
        );
        assert_eq!(
            relative_time(now - chrono::Duration::hours(1), now),
            "1 hour ago"
        );
        assert_eq!(
            relative_time(now - chrono::Duration::days(3), now),
            "3 days ago"
        );
    }

    #[test]
    fn metric_formatting() {
        assert_eq!(format_metric(0.0), "0");
        assert_eq!(format_metric(1234.0), "1,234");
        assert_eq!(format_metric(1_234_567.89), "1,234,567.89");
        assert_eq!(format_metric(12.5), "12.50");
        assert_eq!(format_metric(-456.0), "-456");
    }

    #[test]
    fn confirm_refuses_without_a_terminal() {
        // The test harness runs with stdin piped, so an unconfirmed
        // prompt must turn into an error rather than hang or default.
        let err = confirm("Delete account 42?", false).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
        assert!(confirm("Delete account 42?", true).unwrap());
    }

    #[test]
    fn date_parsing_rejects_garbage() {
        assert!(parse_date("start", "2026-03-01").is_ok());
        assert!(parse_date("start", "03/01/2026").is_err());
    }
}
