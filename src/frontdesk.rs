// Interactive booking session. The console is abstracted behind GuestInput
// so the whole flow runs against scripted answers in tests; the reservation
// core never sees a prompt or a raw date string.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

use crate::model::{PaymentConfirmation, Reservation, Room, RoomType};
use crate::reservation::ReservationService;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("invalid date {input:?}: expected YYYY-MM-DD")]
    InvalidDate { input: String },
}

// Everything the booking flow needs from the person on the other side of
// the desk.
pub trait GuestInput {
    fn guest_details(&mut self) -> anyhow::Result<(String, String)>;
    fn room_type_choice(&mut self) -> anyhow::Result<RoomType>;
    fn room_choice(&mut self, offered: &[Room]) -> anyhow::Result<i64>;
    fn stay_dates(&mut self) -> anyhow::Result<(String, String)>;
}

// How a booking session ended. Only Booked leaves a reservation behind.
#[derive(Debug)]
pub enum SessionOutcome {
    Booked {
        reservation: Reservation,
        confirmation: PaymentConfirmation,
    },
    NoRoomsAvailable,
    InvalidRoomChoice,
    InvalidDates,
}

// Strict YYYY-MM-DD, rejected here before the core ever sees a date
pub fn parse_stay_date(input: &str) -> Result<NaiveDate, SessionError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| SessionError::InvalidDate {
        input: input.to_string(),
    })
}

// Numbered menu mapping: 1 Single, 2 Double, 3 Suite. Anything else falls
// back to a Single.
pub fn room_type_from_menu(choice: u32) -> RoomType {
    match choice {
        2 => RoomType::Double,
        3 => RoomType::Suite,
        _ => RoomType::Single,
    }
}

// Drive one walk-up booking from registration through payment. The guest
// is registered up front, so an abandoned session still consumes a user id.
pub fn run_booking_session(
    service: &mut ReservationService,
    input: &mut impl GuestInput,
) -> anyhow::Result<SessionOutcome> {
    let (name, email) = input.guest_details().context("reading guest details")?;
    let user = service.create_user(name, email);

    let room_type = input.room_type_choice().context("reading room type")?;
    let offered = service.search_rooms(room_type);
    if offered.is_empty() {
        return Ok(SessionOutcome::NoRoomsAvailable);
    }

    let room_id = input.room_choice(&offered).context("reading room choice")?;
    if !offered.iter().any(|room| room.id == room_id) {
        warn!(room_id, "guest picked a room that was not offered");
        return Ok(SessionOutcome::InvalidRoomChoice);
    }

    let (check_in_raw, check_out_raw) = input.stay_dates().context("reading stay dates")?;
    let (check_in, check_out) = match (
        parse_stay_date(&check_in_raw),
        parse_stay_date(&check_out_raw),
    ) {
        (Ok(check_in), Ok(check_out)) => (check_in, check_out),
        _ => {
            warn!("invalid date format, reservation canceled");
            return Ok(SessionOutcome::InvalidDates);
        }
    };

    let reservation = service
        .make_reservation(&user, room_id, check_in, check_out)
        .context("offered room vanished from inventory")?;
    let confirmation = service.process_payment(&reservation);

    Ok(SessionOutcome::Booked {
        reservation,
        confirmation,
    })
}

// Stdin-backed input, mirroring the prompts of a walk-up desk
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl ConsoleInput<io::BufReader<io::Stdin>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn read_reply(&mut self) -> anyhow::Result<String> {
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            anyhow::bail!("console input closed");
        }
        Ok(line.trim().to_string())
    }

    fn prompt(&mut self, text: &str) -> anyhow::Result<String> {
        writeln!(self.writer, "{text}")?;
        self.read_reply()
    }
}

impl<R: BufRead, W: Write> GuestInput for ConsoleInput<R, W> {
    fn guest_details(&mut self) -> anyhow::Result<(String, String)> {
        let name = self.prompt("Enter your name:")?;
        let email = self.prompt("Enter your email:")?;
        Ok((name, email))
    }

    fn room_type_choice(&mut self) -> anyhow::Result<RoomType> {
        writeln!(self.writer, "Choose room type:")?;
        writeln!(self.writer, "1. Single")?;
        writeln!(self.writer, "2. Double")?;
        writeln!(self.writer, "3. Suite")?;

        let reply = self.read_reply()?;
        let choice = reply.parse::<u32>().unwrap_or(0);
        if !(1..=3).contains(&choice) {
            writeln!(self.writer, "Invalid choice. Defaulting to Single.")?;
        }
        Ok(room_type_from_menu(choice))
    }

    fn room_choice(&mut self, offered: &[Room]) -> anyhow::Result<i64> {
        writeln!(self.writer, "Available Rooms:")?;
        for room in offered {
            writeln!(
                self.writer,
                "Room ID: {}, Price: ${}",
                room.id, room.nightly_price
            )?;
        }

        let reply = self.prompt("Enter the room ID to make a reservation:")?;
        reply.parse::<i64>().context("room id must be a number")
    }

    fn stay_dates(&mut self) -> anyhow::Result<(String, String)> {
        let check_in = self.prompt("Enter check-in date (YYYY-MM-DD):")?;
        let check_out = self.prompt("Enter check-out date (YYYY-MM-DD):")?;
        Ok((check_in, check_out))
    }
}
