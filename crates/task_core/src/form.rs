use crate::error::FieldErrors;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

pub const TITLE_MAX: usize = 60;
pub const DESCRIPTION_MAX: usize = 2000;

/// Editable task fields as entered, before any parsing. Lives for one
/// create/edit session and is discarded after a successful submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFormInput {
    pub title: String,
    pub description: String,
    pub due_day: String,
    pub due_month: String,
    pub due_year: String,
    pub due_hour: String,
    pub due_minute: String,
}

/// Check every field and collect one message per failing field key.
/// No short-circuiting: the caller shows all problems at once.
pub fn validate(input: &TaskFormInput) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if input.title.trim().is_empty() {
        errors.insert("title".to_string(), "Enter a task title".to_string());
    } else if input.title.chars().count() > TITLE_MAX {
        errors.insert(
            "title".to_string(),
            "Task title must be 60 characters or fewer".to_string(),
        );
    }

    if input.description.chars().count() > DESCRIPTION_MAX {
        errors.insert(
            "description".to_string(),
            "Description must be 2000 characters or fewer".to_string(),
        );
    }

    if input.due_day.trim().is_empty()
        || input.due_month.trim().is_empty()
        || input.due_year.trim().is_empty()
    {
        errors.insert("due_date".to_string(), "Enter a due date".to_string());
    } else {
        // Read once per validation call; an instant equal to now is not future.
        let now = OffsetDateTime::now_utc();
        match candidate_instant(input) {
            None => {
                errors.insert("due_date".to_string(), "Enter a valid date".to_string());
            }
            Some(due) if due <= now => {
                errors.insert(
                    "due_date".to_string(),
                    "Due date must be in the future".to_string(),
                );
            }
            Some(_) => {}
        }
    }

    if input.due_hour.trim().is_empty() || input.due_minute.trim().is_empty() {
        errors.insert("due_time".to_string(), "Enter a due time".to_string());
    } else {
        let hour = input.due_hour.trim().parse::<i64>().ok();
        let minute = input.due_minute.trim().parse::<i64>().ok();
        if !matches!(hour, Some(0..=23)) {
            errors.insert("due_time".to_string(), "Hour must be 0–23".to_string());
        }
        // Deliberately overwrites the hour message when both are out of range.
        if !matches!(minute, Some(0..=59)) {
            errors.insert("due_time".to_string(), "Minute must be 0–59".to_string());
        }
    }

    errors
}

/// Combine the five parts into a UTC instant. Month input is 1-indexed.
/// Missing time parts default to 0; anything unparseable or outside the
/// calendar yields None.
fn candidate_instant(input: &TaskFormInput) -> Option<OffsetDateTime> {
    let year = input.due_year.trim().parse::<i32>().ok()?;
    let month = input.due_month.trim().parse::<u8>().ok()?;
    let day = input.due_day.trim().parse::<u8>().ok()?;
    let hour = time_part_or_zero(&input.due_hour)?;
    let minute = time_part_or_zero(&input.due_minute)?;

    let month = Month::try_from(month).ok()?;
    let date = Date::from_calendar_date(year, month, day).ok()?;
    let time = Time::from_hms(hour, minute, 0).ok()?;
    Some(PrimitiveDateTime::new(date, time).assume_utc())
}

fn time_part_or_zero(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse().ok()
}
