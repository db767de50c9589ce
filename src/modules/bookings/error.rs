use anyhow::anyhow;
use thiserror::Error;

use staybook_core::{AppError, FieldErrors};
use staybook_models::{BookingId, InvalidTransition, RoomId};

/// Postgres `exclusion_violation`, raised by the no-overlap constraint.
const EXCLUSION_VIOLATION: &str = "23P01";

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Validation failed: {}", .0.summary())]
    Validation(FieldErrors),

    #[error("Room {0} not found")]
    RoomNotFound(RoomId),

    #[error("Booking {0} not found")]
    BookingNotFound(BookingId),

    #[error("Room is already booked for the requested dates")]
    Conflict {
        room_id: RoomId,
        conflicting: Option<BookingId>,
    },

    #[error("You do not have access to this booking")]
    Forbidden(BookingId),

    #[error(transparent)]
    InvalidState(#[from] InvalidTransition),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BookingError {
    /// Maps an insert failure, turning an exclusion violation into a conflict.
    pub fn from_insert(err: sqlx::Error, room_id: RoomId) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.code().as_deref() == Some(EXCLUSION_VIOLATION)
        {
            return BookingError::Conflict {
                room_id,
                conflicting: None,
            };
        }
        BookingError::Database(err)
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let message = err.to_string();
        match err {
            BookingError::Validation(fields) => AppError::validation(fields),
            BookingError::RoomNotFound(_) | BookingError::BookingNotFound(_) => {
                AppError::not_found(anyhow!(message))
            }
            BookingError::Conflict { .. } => AppError::conflict(anyhow!(message)),
            BookingError::Forbidden(_) => AppError::forbidden(message),
            BookingError::InvalidState(_) => AppError::bad_request(anyhow!(message)),
            BookingError::Database(e) => AppError::database(e),
        }
    }
}
