use axum::{Router, routing::get};

use super::controller::{get_room, list_rooms};
use crate::state::AppState;

pub fn init_rooms_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rooms))
        .route("/{id}", get(get_room))
}
