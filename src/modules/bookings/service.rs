//! Booking lifecycle operations.
//!
//! Every operation takes the acting [`Caller`] explicitly. Creation runs the
//! overlap check and the insert in one transaction holding a row lock on the
//! room, so two requests for the same room are serialized. The
//! `bookings_no_overlap` exclusion constraint backs this up at the storage
//! level. Status changes lock the booking row for the same reason.

use sqlx::{FromRow, PgPool};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use staybook_core::FieldErrors;
use staybook_models::{
    Booking, BookingId, BookingStatus, BookingWithRoom, Caller, CreateBookingDto, DateRange, Room,
    RoomSummary, total_price,
};

use super::error::BookingError;
use crate::metrics;

/// Row of the bookings ⋈ rooms listing query.
#[derive(Debug, FromRow)]
struct BookingRoomRow {
    #[sqlx(flatten)]
    booking: Booking,
    room_name: String,
    room_price_per_night: i64,
}

impl From<BookingRoomRow> for BookingWithRoom {
    fn from(row: BookingRoomRow) -> Self {
        let room = RoomSummary {
            id: row.booking.room_id,
            name: row.room_name,
            price_per_night: row.room_price_per_night,
        };
        BookingWithRoom {
            booking: row.booking,
            room,
        }
    }
}

/// Checks field rules and date order, returning the requested stay.
fn validate_request(dto: &CreateBookingDto) -> Result<DateRange, BookingError> {
    let mut errors = match dto.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => FieldErrors::from(e),
    };

    match dto.stay() {
        Ok(stay) => {
            errors.into_result().map_err(BookingError::Validation)?;
            Ok(stay)
        }
        Err(e) => {
            errors.add("check_out_date", e.to_string());
            Err(BookingError::Validation(errors))
        }
    }
}

pub struct BookingService;

impl BookingService {
    #[instrument(
        skip(db, caller, dto),
        fields(user.id = %caller.user_id, room.id = %dto.room_id, db.table = "bookings")
    )]
    pub async fn create(
        db: &PgPool,
        caller: &Caller,
        dto: CreateBookingDto,
    ) -> Result<Booking, BookingError> {
        let stay = validate_request(&dto)?;

        let mut tx = db.begin().await?;

        let room = sqlx::query_as::<_, Room>(
            "SELECT id, name, price_per_night, created_at, updated_at
             FROM rooms WHERE id = $1 FOR UPDATE",
        )
        .bind(dto.room_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(BookingError::RoomNotFound(dto.room_id))?;

        let candidates = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings
             WHERE room_id = $1 AND status <> 'cancelled' AND check_out_date >= $2
             ORDER BY check_in_date",
        )
        .bind(room.id)
        .bind(stay.check_in())
        .fetch_all(&mut *tx)
        .await?;

        if let Some(existing) = candidates.iter().find(|b| b.blocks(&stay)) {
            warn!(
                booking.id = %existing.id,
                check_in = %stay.check_in(),
                check_out = %stay.check_out(),
                "Requested stay overlaps an existing booking"
            );
            metrics::track_booking_conflict();
            return Err(BookingError::Conflict {
                room_id: room.id,
                conflicting: Some(existing.id),
            });
        }

        let Some(price) = total_price(room.price_per_night, stay.nights()) else {
            let mut errors = FieldErrors::new();
            errors.add("check_out_date", "Total price is out of range for this stay");
            return Err(BookingError::Validation(errors));
        };

        let guest_email = dto.guest_email.as_deref().unwrap_or(&caller.email);

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (
                room_id, user_id, check_in_date, check_out_date,
                guest_name, guest_surname, guest_phone, guest_email,
                passport_series, passport_number, passport_issued_by, passport_issue_date,
                status, total_price
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING *",
        )
        .bind(room.id)
        .bind(caller.user_id)
        .bind(stay.check_in())
        .bind(stay.check_out())
        .bind(&dto.guest_name)
        .bind(&dto.guest_surname)
        .bind(&dto.guest_phone)
        .bind(guest_email)
        .bind(&dto.passport_series)
        .bind(&dto.passport_number)
        .bind(&dto.passport_issued_by)
        .bind(dto.passport_issue_date)
        .bind(BookingStatus::PendingPayment)
        .bind(price)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            let err = BookingError::from_insert(e, room.id);
            if matches!(err, BookingError::Conflict { .. }) {
                warn!(room.id = %room.id, "Insert rejected by the no-overlap constraint");
                metrics::track_booking_conflict();
            }
            err
        })?;

        tx.commit().await?;

        metrics::track_booking_created();
        info!(
            booking.id = %booking.id,
            nights = stay.nights(),
            total_price = booking.total_price,
            "Booking created"
        );

        Ok(booking)
    }

    #[instrument(skip(db, caller), fields(user.id = %caller.user_id))]
    pub async fn pay(
        db: &PgPool,
        caller: &Caller,
        booking_id: BookingId,
    ) -> Result<Booking, BookingError> {
        Self::transition(db, caller, booking_id, BookingStatus::Paid).await
    }

    #[instrument(skip(db, caller), fields(user.id = %caller.user_id))]
    pub async fn cancel(
        db: &PgPool,
        caller: &Caller,
        booking_id: BookingId,
    ) -> Result<Booking, BookingError> {
        Self::transition(db, caller, booking_id, BookingStatus::Cancelled).await
    }

    async fn transition(
        db: &PgPool,
        caller: &Caller,
        booking_id: BookingId,
        next: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let mut tx = db.begin().await?;

        let booking =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
                .bind(booking_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(BookingError::BookingNotFound(booking_id))?;

        if !booking.is_owned_by(caller.user_id) {
            warn!(booking.id = %booking_id, "Status change attempted by non-owner");
            return Err(BookingError::Forbidden(booking_id));
        }

        let status = booking.status.transition(next)?;

        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        metrics::track_booking_transition(status.as_str());
        info!(booking.id = %booking_id, from = %booking.status, to = %status, "Booking status changed");

        Ok(updated)
    }

    #[instrument(skip(db, caller), fields(user.id = %caller.user_id))]
    pub async fn get(
        db: &PgPool,
        caller: &Caller,
        booking_id: BookingId,
    ) -> Result<BookingWithRoom, BookingError> {
        let row = sqlx::query_as::<_, BookingRoomRow>(
            "SELECT b.*, r.name AS room_name, r.price_per_night AS room_price_per_night
             FROM bookings b
             JOIN rooms r ON r.id = b.room_id
             WHERE b.id = $1",
        )
        .bind(booking_id)
        .fetch_optional(db)
        .await?
        .ok_or(BookingError::BookingNotFound(booking_id))?;

        if !row.booking.is_owned_by(caller.user_id) {
            return Err(BookingError::Forbidden(booking_id));
        }

        Ok(row.into())
    }

    /// The caller's bookings, newest stay first, each with its room.
    #[instrument(skip(db, caller), fields(user.id = %caller.user_id))]
    pub async fn list_mine(
        db: &PgPool,
        caller: &Caller,
    ) -> Result<Vec<BookingWithRoom>, BookingError> {
        let rows = sqlx::query_as::<_, BookingRoomRow>(
            "SELECT b.*, r.name AS room_name, r.price_per_night AS room_price_per_night
             FROM bookings b
             JOIN rooms r ON r.id = b.room_id
             WHERE b.user_id = $1
             ORDER BY b.check_in_date DESC, b.created_at DESC",
        )
        .bind(caller.user_id)
        .fetch_all(db)
        .await?;

        debug!(count = rows.len(), "Bookings fetched");

        Ok(rows.into_iter().map(BookingWithRoom::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use staybook_models::RoomId;

    fn dto() -> CreateBookingDto {
        CreateBookingDto {
            room_id: RoomId::new(),
            check_in_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            guest_name: "Ada".into(),
            guest_surname: "Lovelace".into(),
            guest_phone: "+44 20 7946 0000".into(),
            guest_email: None,
            passport_series: "AB".into(),
            passport_number: "123456".into(),
            passport_issued_by: "HM Passport Office".into(),
            passport_issue_date: NaiveDate::from_ymd_opt(2015, 3, 20).unwrap(),
        }
    }

    #[test]
    fn test_validate_request_returns_stay() {
        let stay = validate_request(&dto()).unwrap();
        assert_eq!(stay.nights(), 2);
    }

    #[test]
    fn test_validate_request_rejects_reversed_dates() {
        let mut dto = dto();
        dto.check_out_date = dto.check_in_date;

        match validate_request(&dto) {
            Err(BookingError::Validation(fields)) => assert!(fields.contains("check_out_date")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_request_collects_field_and_date_errors() {
        let mut dto = dto();
        dto.guest_phone = "12".into();
        dto.guest_email = Some("not-an-email".into());
        dto.check_out_date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        match validate_request(&dto) {
            Err(BookingError::Validation(fields)) => {
                assert!(fields.contains("guest_phone"));
                assert!(fields.contains("guest_email"));
                assert!(fields.contains("check_out_date"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
