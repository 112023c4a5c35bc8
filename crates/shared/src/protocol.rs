use serde::{Deserialize, Serialize};

use crate::domain::{MovieId, SeatId, Snack};

/// A film as TMDB serialises it on both the now-playing and detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NowPlayingResponse {
    #[serde(default)]
    pub page: Option<u32>,
    pub results: Vec<MovieRecord>,
}

/// State carried by the navigation from the detail view to the ticket view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingPayload {
    pub movie: MovieRecord,
    pub seats: Vec<SeatId>,
    pub snack: Snack,
}

/// Value stored under the session key once a user signs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Content encoded into the ticket's scannable code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCodePayload {
    pub title: String,
    pub seats: Vec<SeatId>,
    pub ticket_number: String,
    pub time: String,
    pub date: String,
}
