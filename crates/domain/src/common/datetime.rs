//! DateTime parsing utilities with consistent error handling.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::DomainError;

/// Format produced by HTML `datetime-local` inputs (no offset, minute precision).
const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Same as [`DATETIME_LOCAL_FORMAT`] but with seconds, which browsers emit
/// when a `step` attribute is set.
const DATETIME_LOCAL_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses an RFC3339 timestamp string, returning an error if parsing fails.
///
/// # Examples
///
/// ```
/// use ballotbox_domain::common::parse_datetime;
/// use chrono::Datelike;
///
/// let dt = parse_datetime("2024-01-15T10:30:00Z").unwrap();
/// assert_eq!(dt.year(), 2024);
/// ```
///
/// # Errors
///
/// Returns `chrono::ParseError` if the string is not valid RFC3339.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Parses a user-supplied poll expiration.
///
/// Accepts RFC3339 as well as the offset-less `datetime-local` form
/// (`2024-01-15T10:30`), which is interpreted as UTC. Blank input means
/// "no expiration".
///
/// # Examples
///
/// ```
/// use ballotbox_domain::common::parse_expiration;
/// use chrono::Timelike;
///
/// let dt = parse_expiration("2024-01-15T10:30").unwrap().unwrap();
/// assert_eq!(dt.hour(), 10);
/// assert!(parse_expiration("  ").unwrap().is_none());
/// ```
pub fn parse_expiration(s: &str) -> Result<Option<DateTime<Utc>>, DomainError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = parse_datetime(s) {
        return Ok(Some(dt));
    }

    [DATETIME_LOCAL_FORMAT, DATETIME_LOCAL_SECONDS_FORMAT]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| DomainError::parse(format!("Invalid expiration date: '{}'", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_datetime_valid() {
        let dt = parse_datetime("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_datetime_with_timezone() {
        let dt = parse_datetime("2024-01-15T10:30:00+05:00").unwrap();
        // Should be converted to UTC
        assert_eq!(dt.hour(), 5);
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(parse_datetime("not-a-date").is_err());
        assert!(parse_datetime("").is_err());
        assert!(parse_datetime("2024-01-15").is_err());
    }

    #[test]
    fn test_parse_expiration_datetime_local() {
        let dt = parse_expiration("2024-03-01T18:45").unwrap().unwrap();
        assert_eq!(dt.month(), 3);
        assert_eq!(dt.hour(), 18);
        assert_eq!(dt.minute(), 45);

        let dt = parse_expiration("2024-03-01T18:45:30").unwrap().unwrap();
        assert_eq!(dt.second(), 30);
    }

    #[test]
    fn test_parse_expiration_rfc3339() {
        let dt = parse_expiration("2024-03-01T18:45:00+01:00").unwrap().unwrap();
        assert_eq!(dt.hour(), 17);
    }

    #[test]
    fn test_parse_expiration_blank_is_none() {
        assert_eq!(parse_expiration("").unwrap(), None);
        assert_eq!(parse_expiration("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_expiration_invalid() {
        let err = parse_expiration("next tuesday").unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
    }
}
