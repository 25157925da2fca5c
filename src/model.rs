use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// The three room categories the hotel sells. Fixed, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum RoomType {
    Single,
    Double,
    Suite,
}

// A single physical room in the inventory
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Room {
    pub id: i64,
    pub room_type: RoomType,
    pub nightly_price: f64,
    pub available: bool,
}

impl Room {
    // Rooms always enter the inventory available
    pub fn new(id: i64, room_type: RoomType, nightly_price: f64) -> Self {
        Self {
            id,
            room_type,
            nightly_price,
            available: true,
        }
    }
}

// A registered guest
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

// A recorded stay. The room is linked by id rather than by reference, so a
// reservation can never dangle if inventory management ever learns to
// remove rooms.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub room_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
}

// Typed form of the confirmation emitted when a payment is processed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentConfirmation {
    pub reservation_id: i64,
    pub amount: f64,
}
