use serde::{Deserialize, Serialize};

/// A single physical specialty room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub room_type: String,
    pub name: String,
}

/// Capacity value at or above which H8 (specialty-room capacity) is
/// treated as "effectively unlimited" and skipped outright.
/// Capacity here is simply the count of physical [`Room`]s of a given
/// `room_type`; a type with zero rooms is a real (and generally fatal,
/// caught earlier by feasibility pre-check) shortage, not an unlimited one.
pub const UNLIMITED_ROOM_CAPACITY: u32 = 999;

pub fn room_capacity(rooms: &[Room], room_type: &str) -> u32 {
    rooms.iter().filter(|r| r.room_type == room_type).count() as u32
}
