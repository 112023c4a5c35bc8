use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(MovieId);

/// Row letters of the auditorium, front to back.
pub const SEAT_ROWS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
pub const SEATS_PER_ROW: u8 = 8;
pub const TOTAL_SEATS: usize = SEAT_ROWS.len() * SEATS_PER_ROW as usize;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatIdError {
    #[error("invalid seat id '{0}'")]
    Malformed(String),
    #[error("unknown seat row '{0}'")]
    UnknownRow(char),
    #[error("seat number {0} is outside 1..=8")]
    NumberOutOfRange(u32),
}

/// A seat such as `C4`. Ordering is row first, then number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId {
    row: u8,
    number: u8,
}

impl SeatId {
    pub fn new(row: char, number: u8) -> Result<Self, SeatIdError> {
        let row_index = SEAT_ROWS
            .iter()
            .position(|candidate| *candidate == row.to_ascii_uppercase())
            .ok_or(SeatIdError::UnknownRow(row))?;
        Self::from_indices(row_index, number)
    }

    /// Builds a seat from a zero-based row index and a one-based seat number.
    pub fn from_indices(row_index: usize, number: u8) -> Result<Self, SeatIdError> {
        if row_index >= SEAT_ROWS.len() {
            return Err(SeatIdError::Malformed(format!("row #{row_index}")));
        }
        if !(1..=SEATS_PER_ROW).contains(&number) {
            return Err(SeatIdError::NumberOutOfRange(u32::from(number)));
        }
        Ok(Self {
            row: row_index as u8,
            number,
        })
    }

    pub fn row(&self) -> char {
        SEAT_ROWS[self.row as usize]
    }

    pub fn row_index(&self) -> usize {
        self.row as usize
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    /// Every seat of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = SeatId> {
        (0..SEAT_ROWS.len()).flat_map(|row| {
            (1..=SEATS_PER_ROW).map(move |number| SeatId {
                row: row as u8,
                number,
            })
        })
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row(), self.number)
    }
}

impl FromStr for SeatId {
    type Err = SeatIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let mut chars = raw.chars();
        let row = chars
            .next()
            .ok_or_else(|| SeatIdError::Malformed(raw.to_string()))?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(SeatIdError::Malformed(raw.to_string()));
        }
        let number: u32 = digits
            .parse()
            .map_err(|_| SeatIdError::Malformed(raw.to_string()))?;
        let number =
            u8::try_from(number).map_err(|_| SeatIdError::NumberOutOfRange(number))?;
        Self::new(row, number)
    }
}

impl TryFrom<String> for SeatId {
    type Error = SeatIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatId> for String {
    fn from(value: SeatId) -> Self {
        value.to_string()
    }
}

/// Joins seats the way tickets and summaries display them: sorted, comma separated.
pub fn format_seat_list(seats: &[SeatId]) -> String {
    let mut sorted = seats.to_vec();
    sorted.sort();
    sorted
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Snack {
    Popcorn,
    Chocolate,
    Water,
    Soda,
    Nothing,
}

impl Snack {
    pub const ALL: [Snack; 5] = [
        Snack::Popcorn,
        Snack::Chocolate,
        Snack::Water,
        Snack::Soda,
        Snack::Nothing,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Snack::Popcorn => "popcorn",
            Snack::Chocolate => "chocolate",
            Snack::Water => "water",
            Snack::Soda => "soda",
            Snack::Nothing => "nothing",
        }
    }

    /// Label shown on the snack picker.
    pub fn label(&self) -> &'static str {
        match self {
            Snack::Popcorn => "Popcorn",
            Snack::Chocolate => "Chocolat",
            Snack::Water => "Eau",
            Snack::Soda => "Boisson",
            Snack::Nothing => "Rien",
        }
    }

    /// Label printed on the ticket.
    pub fn ticket_label(&self) -> &'static str {
        match self {
            Snack::Nothing => "Aucun",
            other => other.label(),
        }
    }
}

impl fmt::Display for Snack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown snack '{0}'")]
pub struct UnknownSnack(pub String);

impl FromStr for Snack {
    type Err = UnknownSnack;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_ascii_lowercase();
        Snack::ALL
            .into_iter()
            .find(|snack| snack.id() == wanted)
            .ok_or_else(|| UnknownSnack(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Seats,
    Snacks,
    Payment,
}

impl BookingStep {
    pub fn next(self) -> Option<Self> {
        match self {
            BookingStep::Seats => Some(BookingStep::Snacks),
            BookingStep::Snacks => Some(BookingStep::Payment),
            BookingStep::Payment => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            BookingStep::Seats => None,
            BookingStep::Snacks => Some(BookingStep::Seats),
            BookingStep::Payment => Some(BookingStep::Snacks),
        }
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingStep::Seats => "seats",
            BookingStep::Snacks => "snacks",
            BookingStep::Payment => "payment",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
