/// Core error types for the user admin panel
use crate::form::FormField;
use thiserror::Error;

/// Result type alias using `AdminError`
pub type Result<T> = std::result::Result<T, AdminError>;

/// Client-side validation failures.
///
/// These are raised before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// Age did not parse to a non-negative integer
    #[error("Age must be a non-negative whole number, got {0:?}")]
    InvalidAge(String),

    /// Status outside Approved/Pending/Denied
    #[error("Invalid status {0:?} (expected Approved, Pending or Denied)")]
    InvalidStatus(String),

    /// Required form field left blank
    #[error("{0} is required")]
    MissingField(FormField),

    /// Field name the form does not know about
    #[error("Unknown form field: {0}")]
    UnknownField(String),
}

impl AdminError {
    /// The form field this error points at, if any
    pub fn field(&self) -> Option<FormField> {
        match self {
            Self::InvalidAge(_) => Some(FormField::Age),
            Self::InvalidStatus(_) => Some(FormField::Status),
            Self::MissingField(field) => Some(*field),
            Self::UnknownField(_) => None,
        }
    }
}
