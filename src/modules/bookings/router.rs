use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    cancel_booking, create_booking, get_booking, list_my_bookings, pay_booking,
};
use crate::state::AppState;

pub fn init_bookings_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking).get(list_my_bookings))
        .route("/{id}", get(get_booking))
        .route("/{id}/pay", post(pay_booking))
        .route("/{id}/cancel", post(cancel_booking))
}
