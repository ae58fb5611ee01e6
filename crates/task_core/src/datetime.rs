use crate::error::AppError;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Assemble already-validated date/time parts into an RFC3339 instant.
///
/// The entered wall-clock values are interpreted as UTC, so the output is
/// always `YYYY-MM-DDThh:mm:00Z` and round-trips without ambiguity. Parts are
/// zero-padded before assembly so single-digit entries form a parseable
/// literal.
pub fn assemble_due_date(
    year: &str,
    month: &str,
    day: &str,
    hour: &str,
    minute: &str,
) -> Result<String, AppError> {
    let candidate = format!(
        "{:0>4}-{:0>2}-{:0>2}T{:0>2}:{:0>2}:00Z",
        year.trim(),
        month.trim(),
        day.trim(),
        hour.trim(),
        minute.trim()
    );

    let parsed = OffsetDateTime::parse(&candidate, &Rfc3339)
        .map_err(|_| AppError::invalid_input("due date parts do not form a valid date"))?;
    parsed
        .format(&Rfc3339)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

/// Render a stored instant the way the task pages show it,
/// e.g. "29 September 2025 at 13:00".
pub fn format_due_date(raw: &str) -> Result<String, AppError> {
    let parsed = OffsetDateTime::parse(raw, &Rfc3339)
        .map_err(|_| AppError::invalid_data("due_date must be RFC3339"))?;
    Ok(format!(
        "{:02} {} {} at {:02}:{:02}",
        parsed.day(),
        parsed.month(),
        parsed.year(),
        parsed.hour(),
        parsed.minute()
    ))
}

/// Split a stored instant back into the five form fields, zero-padded, for
/// pre-filling an edit session.
pub fn split_due_date(raw: &str) -> Result<(String, String, String, String, String), AppError> {
    let parsed = OffsetDateTime::parse(raw, &Rfc3339)
        .map_err(|_| AppError::invalid_data("due_date must be RFC3339"))?;
    Ok((
        format!("{:04}", parsed.year()),
        format!("{:02}", u8::from(parsed.month())),
        format!("{:02}", parsed.day()),
        format!("{:02}", parsed.hour()),
        format!("{:02}", parsed.minute()),
    ))
}

#[cfg(test)]
mod tests {
    use super::{assemble_due_date, format_due_date, split_due_date};
    use time::format_description::well_known::Rfc3339;
    use time::{Month, OffsetDateTime};

    #[test]
    fn assemble_produces_round_trippable_utc_instant() {
        let raw = assemble_due_date("2025", "09", "29", "13", "00").unwrap();
        let parsed = OffsetDateTime::parse(&raw, &Rfc3339).unwrap();

        assert_eq!(parsed.year(), 2025);
        assert_eq!(parsed.month(), Month::September);
        assert_eq!(parsed.day(), 29);
        assert_eq!(parsed.hour(), 13);
        assert_eq!(parsed.minute(), 0);
        assert_eq!(parsed.offset().whole_seconds(), 0);
    }

    #[test]
    fn assemble_pads_single_digit_parts() {
        let raw = assemble_due_date("2025", "9", "2", "8", "5").unwrap();
        assert_eq!(raw, "2025-09-02T08:05:00Z");
    }

    #[test]
    fn assemble_rejects_malformed_parts() {
        let err = assemble_due_date("2025", "13", "01", "00", "00").unwrap_err();
        assert_eq!(err.code(), "invalid_input");

        let err = assemble_due_date("soon", "01", "01", "00", "00").unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn format_renders_long_month_and_24h_clock() {
        let rendered = format_due_date("2025-09-29T13:00:00Z").unwrap();
        assert_eq!(rendered, "29 September 2025 at 13:00");

        let rendered = format_due_date("2026-01-02T08:05:00Z").unwrap();
        assert_eq!(rendered, "02 January 2026 at 08:05");
    }

    #[test]
    fn format_rejects_non_rfc3339_input() {
        let err = format_due_date("tomorrow").unwrap_err();
        assert_eq!(err.code(), "invalid_data");
    }

    #[test]
    fn split_returns_padded_form_fields() {
        let (year, month, day, hour, minute) = split_due_date("2025-09-02T08:05:00Z").unwrap();
        assert_eq!(year, "2025");
        assert_eq!(month, "09");
        assert_eq!(day, "02");
        assert_eq!(hour, "08");
        assert_eq!(minute, "05");
    }

    #[test]
    fn split_feeds_assemble_unchanged() {
        let original = "2025-12-31T23:59:00Z";
        let (year, month, day, hour, minute) = split_due_date(original).unwrap();
        let rebuilt = assemble_due_date(&year, &month, &day, &hour, &minute).unwrap();
        assert_eq!(rebuilt, original);
    }
}
