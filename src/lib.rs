// Main library file for the hotel reservation system

// Export modules for each part of the system
pub mod frontdesk;
pub mod inventory;
pub mod model;
pub mod reservation;

// Re-export key types for convenience
pub use frontdesk::{
    parse_stay_date, run_booking_session, ConsoleInput, GuestInput, SessionError, SessionOutcome,
};
pub use inventory::{load_rooms, InventoryError, SAMPLE_ROOMS_JSON};
pub use model::{PaymentConfirmation, Reservation, Room, RoomType, User};
pub use reservation::{
    nights_for_stay, ReservationService, ServiceStatsReport, SharedReservationService,
};
