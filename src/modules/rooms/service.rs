use sqlx::PgPool;
use tracing::instrument;

use staybook_core::AppError;
use staybook_models::{Room, RoomId};

pub struct RoomService;

impl RoomService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "rooms"))]
    pub async fn list(db: &PgPool) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT id, name, price_per_night, created_at, updated_at
             FROM rooms ORDER BY name, id",
        )
        .fetch_all(db)
        .await?;

        Ok(rooms)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "rooms"))]
    pub async fn get(db: &PgPool, room_id: RoomId) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            "SELECT id, name, price_per_night, created_at, updated_at FROM rooms WHERE id = $1",
        )
        .bind(room_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Room {} not found", room_id)))
    }
}
