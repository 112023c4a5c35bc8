//! Ticket synthesis for a paid booking. Tickets live only as long as the view.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::NaiveDate;
use shared::{
    domain::{format_seat_list, SeatId, Snack},
    protocol::{BookingPayload, TicketCodePayload},
};
use tracing::{debug, info};

use crate::{
    locale,
    random::RandomSource,
    routing::{Navigation, Route},
};

pub const SHOWTIME: &str = "20:00";
pub const HALL: &str = "Salle 3";
const TICKET_NUMBER_SPACE: u32 = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub number: String,
    pub movie_title: String,
    pub poster_url: Option<String>,
    pub seats: Vec<SeatId>,
    pub snack: Snack,
    pub showtime: &'static str,
    pub hall: &'static str,
    pub date: NaiveDate,
    pub code: String,
}

impl Ticket {
    pub fn seats_label(&self) -> String {
        format_seat_list(&self.seats)
    }

    pub fn snack_label(&self) -> &'static str {
        self.snack.ticket_label()
    }

    pub fn date_label(&self) -> String {
        locale::long_date(self.date)
    }

    /// `lundi 14 juillet - 20:00`
    pub fn screening_label(&self) -> String {
        format!("{} - {}", locale::weekday_date(self.date), self.showtime)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TicketCodeError {
    #[error("ticket code is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("ticket code does not hold a ticket: {0}")]
    Payload(#[from] serde_json::Error),
}

pub fn encode_ticket_code(payload: &TicketCodePayload) -> Result<String, serde_json::Error> {
    Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload)?))
}

pub fn decode_ticket_code(code: &str) -> Result<TicketCodePayload, TicketCodeError> {
    let bytes = URL_SAFE_NO_PAD.decode(code.trim())?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// What the ticket view shows for a given navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum TicketView {
    Redirect(Navigation),
    Issued(Ticket),
}

pub struct TicketIssuer {
    poster_base: String,
}

impl TicketIssuer {
    pub fn new(poster_base: impl Into<String>) -> Self {
        Self {
            poster_base: poster_base.into(),
        }
    }

    /// Issues a ticket from the carried booking, or sends the visitor back
    /// to the catalog when the view was reached without one.
    pub fn issue(
        &self,
        state: Option<&BookingPayload>,
        rng: &mut dyn RandomSource,
        date: NaiveDate,
    ) -> Result<TicketView, serde_json::Error> {
        let Some(booking) = state.filter(|booking| !booking.seats.is_empty()) else {
            debug!("ticket view opened without a booking");
            return Ok(TicketView::Redirect(Navigation::replace(Route::Movies)));
        };

        let number = format!("{:06}", rng.next_below(TICKET_NUMBER_SPACE));
        let mut seats = booking.seats.clone();
        seats.sort();
        seats.dedup();

        let code = encode_ticket_code(&TicketCodePayload {
            title: booking.movie.title.clone(),
            seats: seats.clone(),
            ticket_number: number.clone(),
            time: SHOWTIME.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
        })?;

        info!(
            ticket_number = %number,
            movie_id = %booking.movie.id,
            seats = %format_seat_list(&seats),
            "ticket issued"
        );

        Ok(TicketView::Issued(Ticket {
            number,
            movie_title: booking.movie.title.clone(),
            poster_url: locale::poster_url(&self.poster_base, &booking.movie),
            seats,
            snack: booking.snack,
            showtime: SHOWTIME,
            hall: HALL,
            date,
            code,
        }))
    }
}

impl Default for TicketIssuer {
    fn default() -> Self {
        Self::new(locale::DEFAULT_POSTER_BASE)
    }
}

#[cfg(test)]
#[path = "tests/ticket_tests.rs"]
mod tests;
