//! Seating chart for one screening: fixed grid, random occupancy, user selection.

use shared::domain::{SeatId, SEATS_PER_ROW, SEAT_ROWS, TOTAL_SEATS};
use tracing::debug;

use crate::random::RandomSource;

/// Share of the room already sold when the chart is generated, in percent.
pub const OCCUPIED_PERCENT: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatState {
    Available,
    Occupied,
    Selected,
}

#[derive(Debug, Clone)]
pub struct SeatMap {
    occupied: Vec<SeatId>,
    selected: Vec<SeatId>,
}

impl SeatMap {
    /// Number of seats marked occupied on every new chart.
    pub fn occupied_count() -> usize {
        TOTAL_SEATS * OCCUPIED_PERCENT / 100
    }

    pub fn generate(rng: &mut dyn RandomSource) -> Self {
        let target = Self::occupied_count();
        let mut occupied = Vec::with_capacity(target);
        while occupied.len() < target {
            let row = rng.next_below(SEAT_ROWS.len() as u32) as usize;
            let number = rng.next_below(u32::from(SEATS_PER_ROW)) as u8 + 1;
            let Ok(seat) = SeatId::from_indices(row, number) else {
                continue;
            };
            if !occupied.contains(&seat) {
                occupied.push(seat);
            }
        }
        debug!(occupied = occupied.len(), "generated seat map");
        Self {
            occupied,
            selected: Vec::new(),
        }
    }

    /// Chart with a caller-chosen occupancy, mostly for replaying a known room.
    pub fn with_occupied(occupied: impl IntoIterator<Item = SeatId>) -> Self {
        let mut seats = Vec::new();
        for seat in occupied {
            if !seats.contains(&seat) {
                seats.push(seat);
            }
        }
        Self {
            occupied: seats,
            selected: Vec::new(),
        }
    }

    pub fn state(&self, seat: SeatId) -> SeatState {
        if self.occupied.contains(&seat) {
            SeatState::Occupied
        } else if self.selected.contains(&seat) {
            SeatState::Selected
        } else {
            SeatState::Available
        }
    }

    pub fn is_occupied(&self, seat: SeatId) -> bool {
        self.occupied.contains(&seat)
    }

    /// Flips `seat` in the selection and returns the new selection, sorted.
    /// Occupied seats are never selectable; toggling one returns `None`.
    pub fn toggle_seat(&mut self, seat: SeatId) -> Option<Vec<SeatId>> {
        if self.is_occupied(seat) {
            debug!(%seat, "ignored toggle on occupied seat");
            return None;
        }

        if let Some(position) = self.selected.iter().position(|s| *s == seat) {
            self.selected.remove(position);
        } else {
            self.selected.push(seat);
        }
        Some(self.selected())
    }

    /// Selection in display order.
    pub fn selected(&self) -> Vec<SeatId> {
        let mut seats = self.selected.clone();
        seats.sort();
        seats
    }

    /// Selection in the order the seats were picked.
    pub fn selection_order(&self) -> &[SeatId] {
        &self.selected
    }

    pub fn occupied(&self) -> Vec<SeatId> {
        let mut seats = self.occupied.clone();
        seats.sort();
        seats
    }

    pub fn available_count(&self) -> usize {
        TOTAL_SEATS - self.occupied.len() - self.selected.len()
    }

    /// Seat states grouped per row, front row first.
    pub fn rows(&self) -> Vec<(char, Vec<(SeatId, SeatState)>)> {
        SEAT_ROWS
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                let seats = (1..=SEATS_PER_ROW)
                    .filter_map(|number| SeatId::from_indices(row_index, number).ok())
                    .map(|seat| (seat, self.state(seat)))
                    .collect();
                (*row, seats)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/seat_map_tests.rs"]
mod tests;
