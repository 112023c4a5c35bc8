use super::*;
use crate::test_support::sample_movie;
use shared::{domain::Snack, protocol::UserProfile};

#[test]
fn parses_known_paths() {
    assert_eq!(Route::parse("/"), Route::Home);
    assert_eq!(Route::parse("/auth"), Route::Auth);
    assert_eq!(Route::parse("/movies/"), Route::Movies);
    assert_eq!(Route::parse("/movie/550?lang=fr"), Route::MovieDetail(MovieId(550)));
    assert_eq!(Route::parse("/ticket"), Route::Ticket);
    assert_eq!(Route::parse("/movie/abc"), Route::NotFound);
    assert_eq!(Route::parse("/somewhere/else"), Route::NotFound);
}

#[test]
fn displays_paths() {
    assert_eq!(Route::MovieDetail(MovieId(12)).to_string(), "/movie/12");
    assert_eq!(Route::Movies.to_string(), "/movies");
}

#[test]
fn booking_views_are_protected() {
    assert!(Route::Movies.requires_auth());
    assert!(Route::MovieDetail(MovieId(1)).requires_auth());
    assert!(Route::Ticket.requires_auth());
    assert!(!Route::Home.requires_auth());
    assert!(!Route::Auth.requires_auth());
}

#[tokio::test]
async fn guard_redirects_anonymous_visits_to_auth() {
    let auth = AuthContext::in_memory();
    let redirected = guard(Navigation::push(Route::Movies), &auth)
        .await
        .expect("guard");
    assert_eq!(redirected, Navigation::replace(Route::Auth));

    let home = guard(Navigation::push(Route::Home), &auth).await.expect("guard");
    assert_eq!(home.route, Route::Home);
}

#[tokio::test]
async fn guard_keeps_transient_state_for_signed_in_users() {
    let auth = AuthContext::in_memory();
    auth.login(&UserProfile {
        email: "jean@example.fr".to_string(),
        first_name: String::new(),
        last_name: String::new(),
    })
    .await
    .expect("login");

    let navigation = Navigation::to_ticket(BookingPayload {
        movie: sample_movie(3, "Heat"),
        seats: vec!["A1".parse().expect("seat")],
        snack: Snack::Soda,
    });
    let allowed = guard(navigation.clone(), &auth).await.expect("guard");
    assert_eq!(allowed, navigation);
}
