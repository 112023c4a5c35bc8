//! Three-step booking state machine: seats, then snack, then payment.

use shared::{
    domain::{BookingStep, SeatId, Snack},
    protocol::{BookingPayload, MovieRecord},
};
use tracing::{debug, info, warn};

use crate::{
    error::BookingError,
    payment::{PaymentDetails, PaymentError, PaymentGateway, PaymentReceipt},
    random::RandomSource,
    seat_map::SeatMap,
};

/// Result of a successful payment. The controller that produced it is done.
#[derive(Debug, Clone)]
pub struct CompletedBooking {
    pub payload: BookingPayload,
    pub receipt: PaymentReceipt,
}

#[derive(Debug)]
pub struct BookingFlow {
    movie: MovieRecord,
    step: BookingStep,
    seat_map: SeatMap,
    selected_seats: Vec<SeatId>,
    snack: Option<Snack>,
    payment: PaymentDetails,
    processing: bool,
}

/// A charge that has been started but not yet settled. While one exists the
/// flow reports `is_processing()` and refuses another submission.
#[derive(Debug)]
pub struct PendingCharge {
    details: PaymentDetails,
    payload: BookingPayload,
}

impl PendingCharge {
    pub fn details(&self) -> &PaymentDetails {
        &self.details
    }

    pub fn payload(&self) -> &BookingPayload {
        &self.payload
    }
}

/// Abandons the pending charge unless it was settled, so a dropped future
/// never leaves the flow stuck in processing.
struct SettleOnDrop<'a>(&'a mut BookingFlow);

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        self.0.processing = false;
    }
}

impl BookingFlow {
    pub fn new(movie: MovieRecord, rng: &mut dyn RandomSource) -> Self {
        Self::with_seat_map(movie, SeatMap::generate(rng))
    }

    pub fn with_seat_map(movie: MovieRecord, seat_map: SeatMap) -> Self {
        Self {
            movie,
            step: BookingStep::Seats,
            seat_map,
            selected_seats: Vec::new(),
            snack: None,
            payment: PaymentDetails::default(),
            processing: false,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn movie(&self) -> &MovieRecord {
        &self.movie
    }

    pub fn seat_map(&self) -> &SeatMap {
        &self.seat_map
    }

    /// Last selection reported by the seat map, sorted.
    pub fn selected_seats(&self) -> &[SeatId] {
        &self.selected_seats
    }

    pub fn snack(&self) -> Option<Snack> {
        self.snack
    }

    pub fn payment(&self) -> &PaymentDetails {
        &self.payment
    }

    pub fn payment_mut(&mut self) -> &mut PaymentDetails {
        &mut self.payment
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    fn require_step(&self, expected: BookingStep) -> Result<(), BookingError> {
        if self.step != expected {
            return Err(BookingError::WrongStep {
                expected,
                actual: self.step,
            });
        }
        Ok(())
    }

    /// Returns whether the selection changed; occupied seats leave it untouched.
    pub fn toggle_seat(&mut self, seat: SeatId) -> Result<bool, BookingError> {
        self.require_step(BookingStep::Seats)?;
        match self.seat_map.toggle_seat(seat) {
            Some(selection) => {
                debug!(%seat, selected = selection.len(), "seat selection changed");
                self.selected_seats = selection;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Selects every seat in `seats`, ignoring repeats. Fails without touching
    /// the selection if any of them is occupied.
    pub fn select_seats(
        &mut self,
        seats: impl IntoIterator<Item = SeatId>,
    ) -> Result<&[SeatId], BookingError> {
        self.require_step(BookingStep::Seats)?;
        let mut wanted: Vec<SeatId> = seats.into_iter().collect();
        wanted.sort();
        wanted.dedup();
        if let Some(seat) = wanted.iter().find(|seat| self.seat_map.is_occupied(**seat)) {
            return Err(BookingError::SeatOccupied(*seat));
        }
        for seat in wanted {
            if !self.selected_seats.contains(&seat) {
                self.toggle_seat(seat)?;
            }
        }
        Ok(&self.selected_seats)
    }

    pub fn select_snack(&mut self, snack: Snack) -> Result<(), BookingError> {
        self.require_step(BookingStep::Snacks)?;
        self.snack = Some(snack);
        Ok(())
    }

    /// Advances one step if the current step is complete. On `payment` this
    /// is a no-op; only a successful submission leaves that step.
    pub fn next_step(&mut self) -> Result<BookingStep, BookingError> {
        let next = match self.step {
            BookingStep::Seats if self.selected_seats.is_empty() => {
                return Err(BookingError::SeatSelectionRequired)
            }
            BookingStep::Snacks if self.snack.is_none() => {
                return Err(BookingError::SnackSelectionRequired)
            }
            step => step.next().unwrap_or(step),
        };
        if next != self.step {
            debug!(from = %self.step, to = %next, "booking step advanced");
            self.step = next;
        }
        Ok(self.step)
    }

    /// Steps back without discarding seats, snack or typed payment fields.
    pub fn previous_step(&mut self) -> BookingStep {
        if let Some(previous) = self.step.previous() {
            debug!(from = %self.step, to = %previous, "booking step reverted");
            self.step = previous;
        }
        self.step
    }

    fn booking_payload(&self) -> Result<BookingPayload, BookingError> {
        if self.selected_seats.is_empty() {
            return Err(BookingError::SeatSelectionRequired);
        }
        let snack = self.snack.ok_or(BookingError::SnackSelectionRequired)?;
        Ok(BookingPayload {
            movie: self.movie.clone(),
            seats: self.selected_seats.clone(),
            snack,
        })
    }

    /// Snapshots the form and the booking and marks the flow as processing.
    /// The caller charges `details()` and reports back through
    /// `finish_payment`, or `abandon_payment` if the charge never completes.
    pub fn begin_payment(&mut self) -> Result<PendingCharge, BookingError> {
        self.require_step(BookingStep::Payment)?;
        if self.processing {
            return Err(BookingError::PaymentInProgress);
        }
        if let Some(field) = self.payment.missing_field() {
            return Err(BookingError::MissingPaymentField(field));
        }
        let payload = self.booking_payload()?;
        self.processing = true;
        debug!(movie_id = %payload.movie.id, "payment started");
        Ok(PendingCharge {
            details: self.payment.clone(),
            payload,
        })
    }

    /// Settles a charge. On failure the flow stays on `payment` and can be
    /// resubmitted.
    pub fn finish_payment(
        &mut self,
        pending: PendingCharge,
        outcome: Result<PaymentReceipt, PaymentError>,
    ) -> Result<CompletedBooking, BookingError> {
        self.processing = false;
        let PendingCharge { payload, .. } = pending;
        match outcome {
            Ok(receipt) => {
                info!(
                    movie_id = %payload.movie.id,
                    seats = payload.seats.len(),
                    snack = %payload.snack,
                    reference = %receipt.reference,
                    "booking paid"
                );
                Ok(CompletedBooking { payload, receipt })
            }
            Err(err) => {
                warn!(movie_id = %payload.movie.id, error = %err, "payment failed");
                Err(err.into())
            }
        }
    }

    pub fn abandon_payment(&mut self) {
        if self.processing {
            debug!(movie_id = %self.movie.id, "payment abandoned");
            self.processing = false;
        }
    }

    /// `begin_payment`, charge and `finish_payment` in one call, for callers
    /// that do not need to observe the processing state in between.
    pub async fn submit_payment(
        &mut self,
        gateway: &dyn PaymentGateway,
    ) -> Result<CompletedBooking, BookingError> {
        let pending = self.begin_payment()?;
        let mut settle = SettleOnDrop(self);
        let outcome = gateway.charge(pending.details()).await;
        settle.0.finish_payment(pending, outcome)
    }
}

#[cfg(test)]
#[path = "tests/flow_tests.rs"]
mod tests;
