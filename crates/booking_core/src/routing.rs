//! Client-side routes, navigation with transient state, and the auth guard.

use std::fmt;

use shared::{domain::MovieId, protocol::BookingPayload};
use tracing::debug;

use crate::{error::BookingError, session::AuthContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Auth,
    Movies,
    MovieDetail(MovieId),
    Ticket,
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["auth"] => Route::Auth,
            ["movies"] => Route::Movies,
            ["ticket"] => Route::Ticket,
            ["movie", id] => id
                .parse()
                .map(|id| Route::MovieDetail(MovieId(id)))
                .unwrap_or(Route::NotFound),
            _ => Route::NotFound,
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Movies | Route::MovieDetail(_) | Route::Ticket
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Auth => f.write_str("/auth"),
            Route::Movies => f.write_str("/movies"),
            Route::MovieDetail(id) => write!(f, "/movie/{id}"),
            Route::Ticket => f.write_str("/ticket"),
            Route::NotFound => f.write_str("/404"),
        }
    }
}

/// A navigation action. `state` is transient: it exists only on the action
/// that carries it and is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub route: Route,
    pub replace: bool,
    pub state: Option<BookingPayload>,
}

impl Navigation {
    pub fn push(route: Route) -> Self {
        Self {
            route,
            replace: false,
            state: None,
        }
    }

    pub fn replace(route: Route) -> Self {
        Self {
            route,
            replace: true,
            state: None,
        }
    }

    /// Hand-off from a paid booking to the ticket view.
    pub fn to_ticket(payload: BookingPayload) -> Self {
        Self {
            route: Route::Ticket,
            replace: false,
            state: Some(payload),
        }
    }
}

/// Lets the navigation through, or redirects to `/auth` when the target is
/// protected and nobody is signed in.
pub async fn guard(navigation: Navigation, auth: &AuthContext) -> Result<Navigation, BookingError> {
    if navigation.route.requires_auth() && !auth.is_authenticated().await? {
        debug!(route = %navigation.route, "redirecting unauthenticated visit");
        return Ok(Navigation::replace(Route::Auth));
    }
    Ok(navigation)
}

#[cfg(test)]
#[path = "tests/routing_tests.rs"]
mod tests;
