//! Wire format of the create-booking request.
//!
//! Clients send guest details either as flat `guest_*` / `passport_*` fields
//! or inside a nested `guest_data` object. Both shapes are normalized into a
//! single [`CreateBookingDto`] before the service sees them. When a value is
//! present in both places the flat field wins.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use staybook_core::FieldErrors;
use staybook_models::{CreateBookingDto, InvalidDateRange, RoomId};

use crate::validator::Normalize;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Guest details in the nested request format.
///
/// Fields are kept as raw JSON so a wrongly-typed value is reported per
/// field instead of failing the whole body.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct GuestDataPayload {
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub surname: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub phone: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub email: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub passport_series: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub passport_number: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub passport_issued_by: Option<Value>,
    #[schema(value_type = Option<String>, example = "2015-03-20")]
    pub passport_issue_date: Option<Value>,
}

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct CreateBookingPayload {
    #[schema(value_type = Option<String>, format = "uuid")]
    pub room_id: Option<Value>,
    #[schema(value_type = Option<String>, example = "2024-06-01")]
    pub check_in_date: Option<Value>,
    #[schema(value_type = Option<String>, example = "2024-06-03")]
    pub check_out_date: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub guest_name: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub guest_surname: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub guest_phone: Option<Value>,
    /// Defaults to the account e-mail when omitted.
    #[schema(value_type = Option<String>)]
    pub guest_email: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub passport_series: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub passport_number: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub passport_issued_by: Option<Value>,
    #[schema(value_type = Option<String>, example = "2015-03-20")]
    pub passport_issue_date: Option<Value>,
    #[schema(value_type = Option<GuestDataPayload>)]
    pub guest_data: Option<Value>,
}

/// Reads a string field. Blank strings and `null` count as absent; any other
/// JSON type is recorded as an error under `field`.
fn text(errors: &mut FieldErrors, field: &str, value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(v) => Some(v.trim().to_string()).filter(|v| !v.is_empty()),
        _ => {
            errors.add(field, format!("{} must be a string", field));
            None
        }
    }
}

fn required(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<String> {
    if value.is_none() && !errors.contains(field) {
        errors.add(field, format!("{} is required", field));
    }
    value
}

fn required_date(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<NaiveDate> {
    let raw = required(errors, field, value)?;
    match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, format!("{} must be a date in YYYY-MM-DD format", field));
            None
        }
    }
}

fn required_room_id(errors: &mut FieldErrors, value: Option<String>) -> Option<RoomId> {
    let raw = required(errors, "room_id", value)?;
    match Uuid::parse_str(&raw) {
        Ok(id) => Some(RoomId::from(id)),
        Err(_) => {
            errors.add("room_id", "room_id must be a valid UUID");
            None
        }
    }
}

fn guest_data(errors: &mut FieldErrors, value: Option<Value>) -> GuestDataPayload {
    match value {
        None | Some(Value::Null) => GuestDataPayload::default(),
        Some(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
        Some(_) => {
            errors.add("guest_data", "guest_data must be an object");
            GuestDataPayload::default()
        }
    }
}

impl Normalize for CreateBookingPayload {
    type Output = CreateBookingDto;

    fn normalize(self) -> Result<CreateBookingDto, FieldErrors> {
        let mut errors = FieldErrors::new();
        let guest = guest_data(&mut errors, self.guest_data);

        // Flat field first, then its `guest_data` counterpart.
        let mut merged = |field: &str, flat: Option<Value>, nested_field: &str, nested: Option<Value>| {
            let flat = text(&mut errors, field, flat);
            let nested = text(&mut errors, &format!("guest_data.{}", nested_field), nested);
            flat.or(nested)
        };

        let guest_name = merged("guest_name", self.guest_name, "name", guest.name);
        let guest_surname = merged("guest_surname", self.guest_surname, "surname", guest.surname);
        let guest_phone = merged("guest_phone", self.guest_phone, "phone", guest.phone);
        let guest_email = merged("guest_email", self.guest_email, "email", guest.email);
        let passport_series = merged(
            "passport_series",
            self.passport_series,
            "passport_series",
            guest.passport_series,
        );
        let passport_number = merged(
            "passport_number",
            self.passport_number,
            "passport_number",
            guest.passport_number,
        );
        let passport_issued_by = merged(
            "passport_issued_by",
            self.passport_issued_by,
            "passport_issued_by",
            guest.passport_issued_by,
        );
        let passport_issue_date = merged(
            "passport_issue_date",
            self.passport_issue_date,
            "passport_issue_date",
            guest.passport_issue_date,
        );

        let room_id = text(&mut errors, "room_id", self.room_id);
        let check_in_date = text(&mut errors, "check_in_date", self.check_in_date);
        let check_out_date = text(&mut errors, "check_out_date", self.check_out_date);

        let room_id = required_room_id(&mut errors, room_id);
        let check_in_date = required_date(&mut errors, "check_in_date", check_in_date);
        let check_out_date = required_date(&mut errors, "check_out_date", check_out_date);

        let guest_name = required(&mut errors, "guest_name", guest_name);
        let guest_surname = required(&mut errors, "guest_surname", guest_surname);
        let guest_phone = required(&mut errors, "guest_phone", guest_phone);
        let passport_series = required(&mut errors, "passport_series", passport_series);
        let passport_number = required(&mut errors, "passport_number", passport_number);
        let passport_issued_by = required(&mut errors, "passport_issued_by", passport_issued_by);
        let passport_issue_date =
            required_date(&mut errors, "passport_issue_date", passport_issue_date);

        if let (Some(check_in), Some(check_out)) = (check_in_date, check_out_date)
            && check_out <= check_in
        {
            errors.add("check_out_date", InvalidDateRange.to_string());
        }

        match (
            room_id,
            check_in_date,
            check_out_date,
            guest_name,
            guest_surname,
            guest_phone,
            passport_series,
            passport_number,
            passport_issued_by,
            passport_issue_date,
        ) {
            (
                Some(room_id),
                Some(check_in_date),
                Some(check_out_date),
                Some(guest_name),
                Some(guest_surname),
                Some(guest_phone),
                Some(passport_series),
                Some(passport_number),
                Some(passport_issued_by),
                Some(passport_issue_date),
            ) if errors.is_empty() => Ok(CreateBookingDto {
                room_id,
                check_in_date,
                check_out_date,
                guest_name,
                guest_surname,
                guest_phone,
                guest_email,
                passport_series,
                passport_number,
                passport_issued_by,
                passport_issue_date,
            }),
            _ => Err(errors),
        }
    }
}
