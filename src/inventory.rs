// Startup inventory population. Rooms come from a JSON catalog supplied by
// whoever operates the desk; the reservation core itself never parses
// anything. The loader enforces the one precondition the core assumes
// about rooms it is handed: a positive nightly price.

use serde::Deserialize;
use thiserror::Error;

use crate::model::{Room, RoomType};

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("room {room_id} has non-positive nightly price {nightly_price}")]
    NonPositivePrice { room_id: i64, nightly_price: f64 },
}

// One catalog entry. Availability is not part of the catalog: every room
// starts available.
#[derive(Debug, Deserialize)]
struct CatalogRoom {
    id: i64,
    room_type: RoomType,
    nightly_price: f64,
}

pub fn load_rooms(json: &str) -> Result<Vec<Room>, InventoryError> {
    let entries: Vec<CatalogRoom> = serde_json::from_str(json)?;

    let mut rooms = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.nightly_price <= 0.0 {
            return Err(InventoryError::NonPositivePrice {
                room_id: entry.id,
                nightly_price: entry.nightly_price,
            });
        }
        rooms.push(Room::new(entry.id, entry.room_type, entry.nightly_price));
    }
    Ok(rooms)
}

// A small catalog for demos and inline testing
pub const SAMPLE_ROOMS_JSON: &str = r#"[
    { "id": 101, "room_type": "Single", "nightly_price": 100.0 },
    { "id": 102, "room_type": "Double", "nightly_price": 150.0 },
    { "id": 103, "room_type": "Single", "nightly_price": 100.0 }
]"#;
