use std::collections::BTreeMap;
use std::fmt;

/// Field name mapped to a human-readable message. Empty means valid.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    InvalidInput(String),
    InvalidData(String),
    Io(String),
    Http(String),
    Validation(FieldErrors),
}

impl AppError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn http<M: Into<String>>(message: M) -> Self {
        Self::Http(message.into())
    }

    pub fn validation(fields: FieldErrors) -> Self {
        Self::Validation(fields)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidData(_) => "invalid_data",
            Self::Io(_) => "io_error",
            Self::Http(_) => "http_error",
            Self::Validation(_) => "validation",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput(message) => message.clone(),
            Self::InvalidData(message) => message.clone(),
            Self::Io(message) => message.clone(),
            Self::Http(message) => message.clone(),
            Self::Validation(fields) => fields
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect::<Vec<_>>()
                .join("; "),
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::{AppError, FieldErrors};

    #[test]
    fn validation_error_joins_fields_in_order() {
        let mut fields = FieldErrors::new();
        fields.insert("title".to_string(), "Enter a task title".to_string());
        fields.insert("due_date".to_string(), "Enter a due date".to_string());

        let err = AppError::validation(fields);
        assert_eq!(err.code(), "validation");
        assert_eq!(
            err.message(),
            "due_date: Enter a due date; title: Enter a task title"
        );
    }

    #[test]
    fn field_errors_only_present_for_validation() {
        let err = AppError::http("connection refused");
        assert!(err.field_errors().is_none());

        let err = AppError::validation(FieldErrors::new());
        assert!(err.field_errors().is_some());
    }
}
