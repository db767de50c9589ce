//! Booking models, the booking status machine, and stay date ranges.
//!
//! A booking moves through three states:
//!
//! ```text
//! pending_payment ──pay──▶ paid
//!        │                  │
//!        └──cancel──▶ cancelled ◀──cancel
//! ```
//!
//! `cancelled` is terminal. `paid` can still be cancelled (refund flow) but
//! never returns to `pending_payment`.
//!
//! Two stays overlap when they share at least one calendar day, boundaries
//! included: a stay checking out on the 3rd blocks a stay checking in on the 3rd.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{BookingId, RoomId, UserId};
use crate::rooms::RoomSummary;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    PendingPayment,
    Paid,
    Cancelled,
}

impl BookingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            BookingStatus::PendingPayment => "pending_payment",
            BookingStatus::Paid => "paid",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the machine allows moving from `self` to `next`.
    pub const fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::PendingPayment, BookingStatus::Paid)
                | (BookingStatus::PendingPayment, BookingStatus::Cancelled)
                | (BookingStatus::Paid, BookingStatus::Cancelled)
        )
    }

    pub fn transition(self, next: BookingStatus) -> Result<BookingStatus, InvalidTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(InvalidTransition { from: self, to: next })
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled)
    }

    /// Cancelled bookings release their dates.
    pub const fn holds_dates(self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot change booking status from {from} to {to}")]
pub struct InvalidTransition {
    pub from: BookingStatus,
    pub to: BookingStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("check_out_date must be after check_in_date")]
pub struct InvalidDateRange;

/// A stay from `check_in` to `check_out`, with `check_out` strictly later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, InvalidDateRange> {
        if check_out <= check_in {
            return Err(InvalidDateRange);
        }
        Ok(Self { check_in, check_out })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights, always at least one.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Closed-interval intersection. Equivalent to any of: this start inside
    /// `other`, this end inside `other`, `other`'s start inside this, or
    /// `other`'s end inside this.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in <= other.check_out && other.check_in <= self.check_out
    }
}

/// `price_per_night × nights`, or `None` on overflow or a negative input.
pub fn total_price(price_per_night: i64, nights: i64) -> Option<i64> {
    if price_per_night < 0 || nights < 1 {
        return None;
    }
    price_per_night.checked_mul(nights)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: BookingId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_name: String,
    pub guest_surname: String,
    pub guest_phone: String,
    pub guest_email: String,
    pub passport_series: String,
    pub passport_number: String,
    pub passport_issued_by: String,
    pub passport_issue_date: NaiveDate,
    pub status: BookingStatus,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn stay(&self) -> DateRange {
        DateRange {
            check_in: self.check_in_date,
            check_out: self.check_out_date,
        }
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Whether this booking blocks `range` for its room.
    pub fn blocks(&self, range: &DateRange) -> bool {
        self.status.holds_dates() && self.stay().overlaps(range)
    }
}

/// A booking joined with a summary of its room.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingWithRoom {
    #[serde(flatten)]
    pub booking: Booking,
    pub room: RoomSummary,
}

/// Canonical booking request accepted by the booking service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBookingDto {
    pub room_id: RoomId,
    #[schema(example = "2024-06-01")]
    pub check_in_date: NaiveDate,
    #[schema(example = "2024-06-03")]
    pub check_out_date: NaiveDate,
    #[validate(length(min = 1, max = 100, message = "guest_name must be 1-100 characters"))]
    pub guest_name: String,
    #[validate(length(min = 1, max = 100, message = "guest_surname must be 1-100 characters"))]
    pub guest_surname: String,
    #[validate(length(min = 5, max = 32, message = "guest_phone must be 5-32 characters"))]
    pub guest_phone: String,
    /// Defaults to the account e-mail when omitted.
    #[validate(
        email(message = "guest_email must be a valid email address"),
        length(max = 255, message = "guest_email must be at most 255 characters")
    )]
    pub guest_email: Option<String>,
    #[validate(length(min = 1, max = 16, message = "passport_series must be 1-16 characters"))]
    pub passport_series: String,
    #[validate(length(min = 1, max = 32, message = "passport_number must be 1-32 characters"))]
    pub passport_number: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "passport_issued_by must be 1-255 characters"
    ))]
    pub passport_issued_by: String,
    pub passport_issue_date: NaiveDate,
}

impl CreateBookingDto {
    pub fn stay(&self) -> Result<DateRange, InvalidDateRange> {
        DateRange::new(self.check_in_date, self.check_out_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn range(from: &str, to: &str) -> DateRange {
        DateRange::new(date(from), date(to)).unwrap()
    }

    #[test]
    fn test_range_requires_check_out_after_check_in() {
        assert_eq!(
            DateRange::new(date("2024-06-03"), date("2024-06-03")),
            Err(InvalidDateRange)
        );
        assert_eq!(
            DateRange::new(date("2024-06-03"), date("2024-06-01")),
            Err(InvalidDateRange)
        );
        assert!(DateRange::new(date("2024-06-03"), date("2024-06-04")).is_ok());
    }

    #[test]
    fn test_nights() {
        assert_eq!(range("2024-06-01", "2024-06-03").nights(), 2);
        assert_eq!(range("2024-02-28", "2024-03-01").nights(), 2);
        assert_eq!(range("2024-12-31", "2025-01-01").nights(), 1);
    }

    #[test]
    fn test_overlap_start_inside_existing() {
        let existing = range("2024-06-01", "2024-06-05");
        assert!(range("2024-06-03", "2024-06-10").overlaps(&existing));
    }

    #[test]
    fn test_overlap_end_inside_existing() {
        let existing = range("2024-06-05", "2024-06-10");
        assert!(range("2024-06-01", "2024-06-07").overlaps(&existing));
    }

    #[test]
    fn test_overlap_existing_inside_new() {
        let existing = range("2024-06-03", "2024-06-04");
        assert!(range("2024-06-01", "2024-06-10").overlaps(&existing));
    }

    #[test]
    fn test_overlap_new_inside_existing() {
        let existing = range("2024-06-01", "2024-06-10");
        assert!(range("2024-06-03", "2024-06-04").overlaps(&existing));
    }

    #[test]
    fn test_touching_boundary_counts_as_overlap() {
        let existing = range("2024-06-01", "2024-06-03");
        assert!(range("2024-06-03", "2024-06-05").overlaps(&existing));
        assert!(range("2024-05-28", "2024-06-01").overlaps(&existing));
    }

    #[test]
    fn test_disjoint_ranges_do_not_overlap() {
        let existing = range("2024-06-01", "2024-06-03");
        assert!(!range("2024-06-04", "2024-06-06").overlaps(&existing));
        assert!(!range("2024-05-20", "2024-05-31").overlaps(&existing));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let ranges = [
            range("2024-06-01", "2024-06-03"),
            range("2024-06-03", "2024-06-05"),
            range("2024-06-02", "2024-06-04"),
            range("2024-06-10", "2024-06-12"),
        ];
        for a in &ranges {
            for b in &ranges {
                assert_eq!(a.overlaps(b), b.overlaps(a));
            }
        }
    }

    #[test]
    fn test_allowed_transitions() {
        use BookingStatus::*;

        assert!(PendingPayment.can_transition_to(Paid));
        assert!(PendingPayment.can_transition_to(Cancelled));
        assert!(Paid.can_transition_to(Cancelled));
    }

    #[test]
    fn test_forbidden_transitions() {
        use BookingStatus::*;

        for (from, to) in [
            (Paid, PendingPayment),
            (Paid, Paid),
            (Cancelled, PendingPayment),
            (Cancelled, Paid),
            (Cancelled, Cancelled),
            (PendingPayment, PendingPayment),
        ] {
            assert_eq!(from.transition(to), Err(InvalidTransition { from, to }));
        }
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = BookingStatus::Cancelled
            .transition(BookingStatus::Paid)
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot change booking status from cancelled to paid");
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::PendingPayment).unwrap(),
            r#""pending_payment""#
        );
        assert_eq!(BookingStatus::Paid.to_string(), "paid");
    }

    #[test]
    fn test_total_price() {
        assert_eq!(total_price(100, 2), Some(200));
        assert_eq!(total_price(0, 3), Some(0));
        assert_eq!(total_price(100, 0), None);
        assert_eq!(total_price(-1, 2), None);
        assert_eq!(total_price(i64::MAX, 2), None);
    }

    #[test]
    fn test_cancelled_booking_does_not_block() {
        let now = Utc::now();
        let mut booking = Booking {
            id: BookingId::new(),
            room_id: RoomId::new(),
            user_id: UserId::new(),
            check_in_date: date("2024-06-01"),
            check_out_date: date("2024-06-03"),
            guest_name: "Ada".into(),
            guest_surname: "Lovelace".into(),
            guest_phone: "+4420000000".into(),
            guest_email: "ada@example.com".into(),
            passport_series: "AB".into(),
            passport_number: "123456".into(),
            passport_issued_by: "HM Passport Office".into(),
            passport_issue_date: date("2020-01-01"),
            status: BookingStatus::Paid,
            total_price: 200,
            created_at: now,
            updated_at: now,
        };
        let wanted = range("2024-06-02", "2024-06-04");

        assert!(booking.blocks(&wanted));
        booking.status = BookingStatus::Cancelled;
        assert!(!booking.blocks(&wanted));
    }
}
