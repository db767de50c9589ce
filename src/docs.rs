use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use staybook_core::ErrorResponse;
use staybook_models::{
    Booking, BookingStatus, BookingWithRoom, LoginRequest, LoginResponse, RegisterRequestDto,
    Room, RoomSummary, User,
};

use crate::modules::bookings::controller::BookingActionResponse;
use crate::modules::bookings::payload::{CreateBookingPayload, GuestDataPayload};
use crate::router::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::rooms::controller::list_rooms,
        crate::modules::rooms::controller::get_room,
        crate::modules::bookings::controller::create_booking,
        crate::modules::bookings::controller::list_my_bookings,
        crate::modules::bookings::controller::get_booking,
        crate::modules::bookings::controller::pay_booking,
        crate::modules::bookings::controller::cancel_booking,
    ),
    components(
        schemas(
            User,
            RegisterRequestDto,
            LoginRequest,
            LoginResponse,
            Room,
            RoomSummary,
            Booking,
            BookingStatus,
            BookingWithRoom,
            CreateBookingPayload,
            GuestDataPayload,
            BookingActionResponse,
            HealthResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Rooms", description = "Room catalogue"),
        (name = "Bookings", description = "Booking lifecycle: create, pay, cancel, list"),
        (name = "Health", description = "Liveness probe")
    ),
    info(
        title = "Staybook API",
        version = "0.1.0",
        description = "Room booking API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
