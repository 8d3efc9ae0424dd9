use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    Zero { field: &'static str },
    InvalidPhoneNumber { input: String },
    MethodNotAllowed { method: String },
    InvalidUrl { input: String },
    MissingEnvVar { name: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::Zero { field } => write!(f, "{field} must not be zero"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::MethodNotAllowed { method } => write!(f, "method not allowed: {method}"),
            Self::InvalidUrl { input } => write!(f, "invalid url: {input}"),
            Self::MissingEnvVar { name } => {
                write!(f, "environment variable {name} is not set")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject values that are empty after trimming.
pub(crate) fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

pub(crate) fn non_empty_list<T>(field: &'static str, items: &[T]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}
