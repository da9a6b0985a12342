use thiserror::Error;
use uuid::Uuid;

/// Draft fields the user still has to fill before commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    PickupPoint,
    DropoffPoint,
    Employees,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("draft is not ready: missing {missing:?}")]
    Validation { missing: Vec<MissingField> },

    #[error("scheduled date is in the past")]
    ScheduleInPast,

    #[error("no match for the requested location")]
    ResolutionNotFound,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("provider error: {0}")]
    Provider(String),

    #[error("order {0} is already in a terminal status")]
    TerminalOrder(Uuid),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Provider(err.to_string())
    }
}
