//! Failures the booking flow and its views can surface.

use shared::{
    domain::{BookingStep, SeatId, SeatIdError, UnknownSnack},
    error::ErrorCode,
};
use thiserror::Error;

use crate::{catalog::CatalogError, payment::PaymentError, payment::PaymentField};

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("select at least one seat before continuing")]
    SeatSelectionRequired,
    #[error("select a snack option before continuing")]
    SnackSelectionRequired,
    #[error("payment field '{0}' is required")]
    MissingPaymentField(PaymentField),
    #[error("auth field '{0}' is required")]
    MissingAuthField(&'static str),
    #[error("action requires the {expected} step but the flow is on {actual}")]
    WrongStep {
        expected: BookingStep,
        actual: BookingStep,
    },
    #[error("seat {0} is already taken")]
    SeatOccupied(SeatId),
    #[error("the movie list was already requested for this view")]
    ListingAlreadyRequested,
    #[error("a payment is already being processed")]
    PaymentInProgress,
    #[error(transparent)]
    InvalidSeat(#[from] SeatIdError),
    #[error(transparent)]
    InvalidSnack(#[from] UnknownSnack),
    #[error("payment failed: {0}")]
    Payment(#[from] PaymentError),
    #[error("catalog request failed: {0}")]
    Catalog(#[from] CatalogError),
    #[error("view was closed before the operation completed")]
    Cancelled,
    #[error("not signed in")]
    Unauthenticated,
    #[error("session store failure: {0}")]
    Session(#[source] anyhow::Error),
    #[error("stored session is malformed: {0}")]
    MalformedSession(#[from] serde_json::Error),
}

impl BookingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::SeatSelectionRequired
            | BookingError::SnackSelectionRequired
            | BookingError::MissingPaymentField(_)
            | BookingError::MissingAuthField(_)
            | BookingError::WrongStep { .. }
            | BookingError::SeatOccupied(_)
            | BookingError::ListingAlreadyRequested
            | BookingError::PaymentInProgress
            | BookingError::InvalidSeat(_)
            | BookingError::InvalidSnack(_) => ErrorCode::Validation,
            BookingError::Payment(_) => ErrorCode::PaymentFailed,
            BookingError::Catalog(CatalogError::NotFound(_)) => ErrorCode::NotFound,
            BookingError::Catalog(_) => ErrorCode::Unavailable,
            BookingError::Cancelled => ErrorCode::Cancelled,
            BookingError::Unauthenticated => ErrorCode::Unauthorized,
            BookingError::Session(_) | BookingError::MalformedSession(_) => ErrorCode::Internal,
        }
    }
}
