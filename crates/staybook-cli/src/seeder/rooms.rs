//! Room seeding.

use fake::Fake;
use fake::faker::address::en::{CityName, StreetName};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use staybook_models::RoomId;

use super::RoomSeed;

const ROOM_KINDS: [&str; 5] = ["Single", "Double", "Twin", "Deluxe", "Suite"];

/// Generates room data in parallel using Rayon
pub fn generate_rooms(count: usize) -> Vec<RoomSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let city: String = CityName().fake();
            let street: String = StreetName().fake();
            let kind = ROOM_KINDS[i % ROOM_KINDS.len()];

            RoomSeed {
                name: format!("{} {} {} #{}", city, street, kind, i + 1),
                price_per_night: (40..400).fake::<i64>(),
            }
        })
        .collect()
}

/// Seeds rooms into the database
pub async fn seed_rooms(
    db: &PgPool,
    count: usize,
) -> Result<Vec<RoomId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🛏️  Seeding {} rooms...", count);

    let rooms = generate_rooms(count);
    let room_ids = insert_rooms_batch(db, &rooms).await?;

    println!(
        "   ✓ Inserted {} rooms in {:?}",
        room_ids.len(),
        start_time.elapsed()
    );

    Ok(room_ids)
}

/// Inserts rooms in batches using multi-value INSERT statements
pub async fn insert_rooms_batch(
    db: &PgPool,
    rooms: &[RoomSeed],
) -> Result<Vec<RoomId>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 500;
    let mut all_ids = Vec::with_capacity(rooms.len());

    for chunk in rooms.chunks(BATCH_SIZE) {
        let ids = insert_rooms_chunk(&mut tx, chunk).await?;
        all_ids.extend(ids);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_rooms_chunk(
    tx: &mut Transaction<'_, Postgres>,
    rooms: &[RoomSeed],
) -> Result<Vec<RoomId>, Box<dyn std::error::Error>> {
    if rooms.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO rooms (name, price_per_night) VALUES ");
    for i in 0..rooms.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 2;
        query.push_str(&format!("(${}, ${})", param_idx + 1, param_idx + 2));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar::<_, RoomId>(&query);
    for room in rooms {
        q = q.bind(&room.name).bind(room.price_per_night);
    }

    let ids = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Creates one room and returns its id.
pub async fn create_room(
    db: &PgPool,
    name: &str,
    price_per_night: i64,
) -> Result<RoomId, Box<dyn std::error::Error>> {
    if price_per_night < 0 {
        return Err("price_per_night must not be negative".into());
    }

    let id = sqlx::query_scalar::<_, RoomId>(
        "INSERT INTO rooms (name, price_per_night) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(price_per_night)
    .fetch_one(db)
    .await?;

    Ok(id)
}

/// Deletes every room that has no bookings.
pub async fn clear_rooms(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing rooms without bookings...");

    let result = sqlx::query(
        "DELETE FROM rooms r WHERE NOT EXISTS (SELECT 1 FROM bookings b WHERE b.room_id = r.id)",
    )
    .execute(db)
    .await?
    .rows_affected();

    println!("   ✓ Deleted {} rooms in {:?}", result, start_time.elapsed());

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_rooms_count_and_prices() {
        let rooms = generate_rooms(20);
        assert_eq!(rooms.len(), 20);
        assert!(
            rooms
                .iter()
                .all(|r| (40..400).contains(&r.price_per_night))
        );
    }

    #[test]
    fn test_generated_room_names_are_unique() {
        let rooms = generate_rooms(50);
        let mut names: Vec<&str> = rooms.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 50);
    }
}
