use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tasklane_core::{AppError, AppResult};

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses a timestamp sent by clients.
///
/// Accepts RFC 3339, ISO date-time without offset, `YYYY-MM-DD HH:MM:SS`,
/// and date-only values. Values without an offset are taken as UTC; a
/// date-only value is midnight UTC.
pub fn parse_flexible_datetime(value: &str) -> AppResult<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc());
    }

    Err(AppError::Validation(format!(
        "'{trimmed}' is not a recognised date"
    )))
}

/// Parses an optional timestamp, treating blank strings as absent.
pub fn parse_optional_datetime(value: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    match value {
        Some(text) if !text.trim().is_empty() => parse_flexible_datetime(text).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn accepts_all_supported_formats() -> AppResult<()> {
        let rfc = parse_flexible_datetime("2025-03-01T09:30:00+09:00")?;
        assert_eq!(rfc.hour(), 0);

        let iso = parse_flexible_datetime("2025-03-01T09:30:00")?;
        assert_eq!(iso.minute(), 30);

        let spaced = parse_flexible_datetime("2025-03-01 09:30:00")?;
        assert_eq!(spaced, iso);

        let date_only = parse_flexible_datetime("2025-03-01")?;
        assert_eq!((date_only.day(), date_only.hour()), (1, 0));
        Ok(())
    }

    #[test]
    fn rejects_unknown_formats() {
        assert!(parse_flexible_datetime("03/01/2025").is_err());
    }

    #[test]
    fn blank_optional_value_is_absent() -> AppResult<()> {
        assert_eq!(parse_optional_datetime(Some("  "))?, None);
        assert_eq!(parse_optional_datetime(None)?, None);
        Ok(())
    }
}
