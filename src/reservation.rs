// In-memory reservation and inventory state for the hotel desk.
// The plain service assumes a single logical caller; anything that shares
// the desk across threads goes through SharedReservationService instead.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tracing::info;

use crate::model::{PaymentConfirmation, Reservation, Room, RoomType, User};

// Operation counters for the desk
#[derive(Debug, Default)]
pub struct ServiceStats {
    pub rooms_added: AtomicUsize,
    pub users_created: AtomicUsize,
    pub reservations_made: AtomicUsize,
    pub lookup_hits: AtomicUsize,
    pub lookup_misses: AtomicUsize,
}

#[derive(Debug, Default, Clone)]
pub struct ServiceStatsReport {
    pub rooms_added: usize,
    pub users_created: usize,
    pub reservations_made: usize,
    pub lookup_hits: usize,
    pub lookup_misses: usize,
}

// Nights are billed inclusive of both endpoints: a stay from the 10th to
// the 12th counts as three nights. The difference is taken as an absolute
// value, so a check-in after the check-out still yields a positive count.
pub fn nights_for_stay(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days().abs() + 1
}

#[derive(Debug)]
pub struct ReservationService {
    rooms: Vec<Room>,
    users: Vec<User>,
    reservations: Vec<Reservation>,
    next_reservation_id: i64,
    next_user_id: i64,
    stats: ServiceStats,
}

impl Default for ReservationService {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationService {
    pub fn new() -> Self {
        Self {
            rooms: Vec::new(),
            users: Vec::new(),
            reservations: Vec::new(),
            next_reservation_id: 1,
            next_user_id: 1,
            stats: ServiceStats::default(),
        }
    }

    // Insert a room into the inventory. Id uniqueness is the caller's
    // responsibility.
    pub fn add_room(&mut self, room: Room) {
        info!(
            room_id = room.id,
            room_type = ?room.room_type,
            nightly_price = room.nightly_price,
            "room added to inventory"
        );
        self.rooms.push(room);
        self.stats.rooms_added.fetch_add(1, Ordering::SeqCst);
    }

    // Every available room of the requested type, in insertion order.
    // An empty result is a valid answer, not an error.
    pub fn search_rooms(&self, room_type: RoomType) -> Vec<Room> {
        self.rooms
            .iter()
            .filter(|room| room.room_type == room_type && room.available)
            .cloned()
            .collect()
    }

    // Key lookup backing the room_id link on reservations
    pub fn room(&self, room_id: i64) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == room_id)
    }

    pub fn create_user(&mut self, name: impl Into<String>, email: impl Into<String>) -> User {
        let user = User {
            id: self.next_user_id,
            name: name.into(),
            email: email.into(),
        };
        self.next_user_id += 1;
        self.users.push(user.clone());
        self.stats.users_created.fetch_add(1, Ordering::SeqCst);
        info!(user_id = user.id, "guest registered");
        user
    }

    // Record a stay in the given room and take it off the market, all in
    // one step. Returns None only when room_id is not part of the
    // inventory. The room's current availability is not re-checked here:
    // booking an already-booked room succeeds again and records a second
    // reservation against it. Nothing validates check_in <= check_out; an
    // inverted range still prices forward (see nights_for_stay).
    pub fn make_reservation(
        &mut self,
        user: &User,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Option<Reservation> {
        let room = self.rooms.iter_mut().find(|room| room.id == room_id)?;
        let nights = nights_for_stay(check_in, check_out);
        let total_price = nights as f64 * room.nightly_price;
        room.available = false;

        let reservation = Reservation {
            id: self.next_reservation_id,
            user_id: user.id,
            room_id,
            check_in,
            check_out,
            total_price,
        };
        self.next_reservation_id += 1;
        self.reservations.push(reservation.clone());
        self.stats.reservations_made.fetch_add(1, Ordering::SeqCst);
        info!(
            reservation_id = reservation.id,
            room_id,
            nights,
            total_price,
            "reservation recorded"
        );
        Some(reservation)
    }

    // Linear search by id. None means "not found", which callers treat as
    // an ordinary answer rather than a failure.
    pub fn view_booking_details(&self, reservation_id: i64) -> Option<&Reservation> {
        let found = self
            .reservations
            .iter()
            .find(|reservation| reservation.id == reservation_id);
        if found.is_some() {
            self.stats.lookup_hits.fetch_add(1, Ordering::SeqCst);
        } else {
            self.stats.lookup_misses.fetch_add(1, Ordering::SeqCst);
        }
        found
    }

    // Pure report of the amount charged. Nothing is mutated and there is
    // no failure path.
    pub fn process_payment(&self, reservation: &Reservation) -> PaymentConfirmation {
        info!(
            reservation_id = reservation.id,
            "processing payment for reservation"
        );
        info!(total_price = reservation.total_price, "amount charged");
        info!(
            reservation_id = reservation.id,
            "payment processed successfully"
        );
        PaymentConfirmation {
            reservation_id: reservation.id,
            amount: reservation.total_price,
        }
    }

    pub fn stats(&self) -> ServiceStatsReport {
        ServiceStatsReport {
            rooms_added: self.stats.rooms_added.load(Ordering::SeqCst),
            users_created: self.stats.users_created.load(Ordering::SeqCst),
            reservations_made: self.stats.reservations_made.load(Ordering::SeqCst),
            lookup_hits: self.stats.lookup_hits.load(Ordering::SeqCst),
            lookup_misses: self.stats.lookup_misses.load(Ordering::SeqCst),
        }
    }
}

// One mutex in front of the whole desk: every collection and both id
// counters sit behind the same lock, so concurrent callers serialize.
#[derive(Debug, Clone, Default)]
pub struct SharedReservationService {
    inner: Arc<Mutex<ReservationService>>,
}

impl SharedReservationService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ReservationService::new())),
        }
    }

    pub fn add_room(&self, room: Room) {
        self.inner.lock().add_room(room);
    }

    pub fn search_rooms(&self, room_type: RoomType) -> Vec<Room> {
        self.inner.lock().search_rooms(room_type)
    }

    pub fn room(&self, room_id: i64) -> Option<Room> {
        self.inner.lock().room(room_id).cloned()
    }

    pub fn create_user(&self, name: impl Into<String>, email: impl Into<String>) -> User {
        self.inner.lock().create_user(name, email)
    }

    pub fn make_reservation(
        &self,
        user: &User,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Option<Reservation> {
        self.inner
            .lock()
            .make_reservation(user, room_id, check_in, check_out)
    }

    pub fn view_booking_details(&self, reservation_id: i64) -> Option<Reservation> {
        self.inner.lock().view_booking_details(reservation_id).cloned()
    }

    pub fn process_payment(&self, reservation: &Reservation) -> PaymentConfirmation {
        self.inner.lock().process_payment(reservation)
    }

    pub fn stats(&self) -> ServiceStatsReport {
        self.inner.lock().stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;
    use test_case::test_case;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn desk_with_sample_rooms() -> ReservationService {
        let mut desk = ReservationService::new();
        desk.add_room(Room::new(101, RoomType::Single, 100.0));
        desk.add_room(Room::new(102, RoomType::Double, 150.0));
        desk.add_room(Room::new(103, RoomType::Single, 100.0));
        desk
    }

    #[test_case(date(2024, 1, 10), date(2024, 1, 12), 3; "two days apart bills three nights")]
    #[test_case(date(2024, 1, 10), date(2024, 1, 10), 1; "same day still bills one night")]
    #[test_case(date(2024, 1, 12), date(2024, 1, 10), 3; "inverted range counts forward")]
    #[test_case(date(2024, 1, 31), date(2024, 2, 2), 3; "month boundary")]
    #[test_case(date(2024, 2, 28), date(2024, 3, 1), 3; "leap year february")]
    fn test_nights_for_stay(check_in: NaiveDate, check_out: NaiveDate, expected: i64) {
        assert_eq!(nights_for_stay(check_in, check_out), expected);
    }

    #[test]
    fn test_search_returns_available_rooms_in_insertion_order() {
        let desk = desk_with_sample_rooms();

        let singles = desk.search_rooms(RoomType::Single);
        assert_eq!(
            singles.iter().map(|room| room.id).collect::<Vec<_>>(),
            vec![101, 103]
        );

        let doubles = desk.search_rooms(RoomType::Double);
        assert_eq!(doubles.len(), 1);
        assert_eq!(doubles[0].id, 102);

        // No suites in the sample inventory, and that is not an error
        assert!(desk.search_rooms(RoomType::Suite).is_empty());
    }

    #[test]
    fn test_booked_room_disappears_from_search() {
        let mut desk = desk_with_sample_rooms();
        let guest = desk.create_user("Alice", "a@x.com");

        desk.make_reservation(&guest, 101, date(2024, 1, 10), date(2024, 1, 12))
            .unwrap();

        let singles = desk.search_rooms(RoomType::Single);
        assert_eq!(
            singles.iter().map(|room| room.id).collect::<Vec<_>>(),
            vec![103]
        );
        assert!(!desk.room(101).unwrap().available);
    }

    #[test]
    fn test_reservation_scenario() {
        let mut desk = desk_with_sample_rooms();

        let guest = desk.create_user("Alice", "a@x.com");
        assert_eq!(guest.id, 1);

        let reservation = desk
            .make_reservation(&guest, 101, date(2024, 1, 10), date(2024, 1, 12))
            .unwrap();

        // Three nights (10th, 11th, 12th) at 100.0 each
        assert_eq!(reservation.id, 1);
        assert_eq!(reservation.user_id, 1);
        assert_eq!(reservation.room_id, 101);
        assert_eq!(reservation.total_price, 300.0);
    }

    #[test]
    fn test_inverted_date_range_still_prices_positive() {
        let mut desk = desk_with_sample_rooms();
        let guest = desk.create_user("Bob", "b@x.com");

        let reservation = desk
            .make_reservation(&guest, 102, date(2024, 1, 12), date(2024, 1, 10))
            .unwrap();
        assert_eq!(reservation.total_price, 450.0);
    }

    #[test]
    fn test_unknown_room_yields_no_reservation() {
        let mut desk = desk_with_sample_rooms();
        let guest = desk.create_user("Bob", "b@x.com");

        let missing = desk.make_reservation(&guest, 999, date(2024, 1, 10), date(2024, 1, 12));
        assert!(missing.is_none());

        // Nothing was recorded and no id was burned
        let next = desk
            .make_reservation(&guest, 101, date(2024, 1, 10), date(2024, 1, 12))
            .unwrap();
        assert_eq!(next.id, 1);
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut desk = desk_with_sample_rooms();

        let alice = desk.create_user("Alice", "a@x.com");
        let bob = desk.create_user("Bob", "b@x.com");
        let carol = desk.create_user("Carol", "c@x.com");
        assert_eq!(
            vec![alice.id, bob.id, carol.id],
            vec![1, 2, 3]
        );

        let first = desk
            .make_reservation(&alice, 101, date(2024, 1, 10), date(2024, 1, 12))
            .unwrap();
        let second = desk
            .make_reservation(&bob, 102, date(2024, 2, 1), date(2024, 2, 3))
            .unwrap();
        let third = desk
            .make_reservation(&carol, 103, date(2024, 3, 5), date(2024, 3, 6))
            .unwrap();
        assert_eq!(vec![first.id, second.id, third.id], vec![1, 2, 3]);
    }

    #[test]
    fn test_view_booking_details_hits_and_misses() {
        let mut desk = desk_with_sample_rooms();
        let guest = desk.create_user("Alice", "a@x.com");
        let reservation = desk
            .make_reservation(&guest, 101, date(2024, 1, 10), date(2024, 1, 12))
            .unwrap();

        assert_eq!(desk.view_booking_details(1), Some(&reservation));
        assert!(desk.view_booking_details(2).is_none());

        let stats = desk.stats();
        assert_eq!(stats.lookup_hits, 1);
        assert_eq!(stats.lookup_misses, 1);
    }

    // Documents current behavior: a room that is already booked can be
    // booked again, producing a second distinct reservation against it.
    #[test]
    fn test_double_booking_is_not_rejected() {
        let mut desk = desk_with_sample_rooms();
        let alice = desk.create_user("Alice", "a@x.com");
        let bob = desk.create_user("Bob", "b@x.com");

        let first = desk
            .make_reservation(&alice, 101, date(2024, 1, 10), date(2024, 1, 12))
            .unwrap();
        let second = desk
            .make_reservation(&bob, 101, date(2024, 1, 11), date(2024, 1, 13))
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.room_id, second.room_id);
        assert!(desk.view_booking_details(first.id).is_some());
        assert!(desk.view_booking_details(second.id).is_some());
        assert_eq!(desk.stats().reservations_made, 2);
    }

    #[test]
    fn test_payment_confirmation_reports_amount_without_mutation() {
        let mut desk = desk_with_sample_rooms();
        let guest = desk.create_user("Alice", "a@x.com");
        let reservation = desk
            .make_reservation(&guest, 101, date(2024, 1, 10), date(2024, 1, 12))
            .unwrap();

        let before = desk.stats();
        let confirmation = desk.process_payment(&reservation);
        assert_eq!(confirmation.reservation_id, reservation.id);
        assert_eq!(confirmation.amount, 300.0);

        // Paying twice is equally uneventful
        let again = desk.process_payment(&reservation);
        assert_eq!(again, confirmation);
        assert_eq!(desk.stats().reservations_made, before.reservations_made);
    }

    #[test]
    fn test_stats_track_operations() {
        let mut desk = desk_with_sample_rooms();
        let guest = desk.create_user("Alice", "a@x.com");
        desk.make_reservation(&guest, 101, date(2024, 1, 10), date(2024, 1, 12))
            .unwrap();

        let stats = desk.stats();
        assert_eq!(stats.rooms_added, 3);
        assert_eq!(stats.users_created, 1);
        assert_eq!(stats.reservations_made, 1);
    }

    #[test]
    fn test_shared_desk_serializes_concurrent_bookings() {
        let desk = SharedReservationService::new();
        for id in 1..=4 {
            desk.add_room(Room::new(id, RoomType::Single, 100.0));
        }

        let mut handles = vec![];
        for room_id in 1..=4 {
            let desk = desk.clone();
            handles.push(thread::spawn(move || {
                let guest = desk.create_user(format!("guest{}", room_id), "guest@example.com");
                desk.make_reservation(&guest, room_id, date(2025, 6, 1), date(2025, 6, 5))
                    .unwrap()
            }));
        }

        let ids: HashSet<i64> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().id)
            .collect();
        assert_eq!(ids, HashSet::from([1, 2, 3, 4]));
        assert!(desk.search_rooms(RoomType::Single).is_empty());
        assert_eq!(desk.stats().reservations_made, 4);
    }
}
