//! Booking flow for the cinema demo: seat map, snack and payment steps,
//! ticket issuance, the movie catalog and the fake session.

pub mod catalog;
pub mod error;
pub mod flow;
pub mod locale;
pub mod notice;
pub mod payment;
pub mod random;
pub mod routing;
pub mod scope;
pub mod seat_map;
pub mod session;
pub mod ticket;

pub use catalog::{
    CatalogError, DetailLoader, MovieCatalog, MovieListing, TmdbCatalog, TmdbConfig,
};
pub use error::BookingError;
pub use flow::{BookingFlow, CompletedBooking, PendingCharge};
pub use notice::{Notice, NoticeContext, NoticeVariant};
pub use payment::{PaymentDetails, PaymentGateway, PaymentReceipt, SimulatedGateway};
pub use random::{RandomSource, UuidEntropy};
pub use routing::{guard, Navigation, Route};
pub use scope::{ScopeHandle, ViewScope};
pub use seat_map::{SeatMap, SeatState};
pub use session::{submit_auth, AuthContext, AuthForm, AuthMode, MemorySessionStore, SessionStore};
pub use ticket::{Ticket, TicketIssuer, TicketView};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
