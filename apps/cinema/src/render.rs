//! Plain-text views for the terminal.

use std::fmt::Write as _;

use booking_core::{locale, SeatMap, SeatState, Ticket};
use shared::{domain::SEATS_PER_ROW, protocol::MovieRecord};

pub fn seat_grid(map: &SeatMap) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:^36}", "ÉCRAN");
    out.push_str("   ");
    for number in 1..=SEATS_PER_ROW {
        let _ = write!(out, " {number:^3}");
    }
    out.push('\n');
    for (row, seats) in map.rows() {
        let _ = write!(out, "{row}  ");
        for (_, state) in seats {
            out.push_str(match state {
                SeatState::Available => " [ ]",
                SeatState::Occupied => " [x]",
                SeatState::Selected => " [*]",
            });
        }
        out.push('\n');
    }
    let _ = write!(
        out,
        "[ ] disponible  [x] occupé  [*] sélectionné  ({} libres)",
        map.available_count()
    );
    out
}

pub fn movie_line(movie: &MovieRecord) -> String {
    format!(
        "#{:<8} {}  ★ {:.1}  {}",
        movie.id.to_string(),
        movie.title,
        locale::rating(movie),
        locale::release_date_label(movie)
    )
}

pub fn movie_detail(movie: &MovieRecord, poster_base: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", movie.title);
    let _ = writeln!(out, "Sortie : {}", locale::release_date_label(movie));
    let _ = writeln!(out, "Note : {:.1}/10", locale::rating(movie));
    if let Some(poster) = locale::poster_url(poster_base, movie) {
        let _ = writeln!(out, "Affiche : {poster}");
    }
    out.push_str(locale::overview(movie));
    out
}

pub fn ticket(ticket: &Ticket) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Billet n° {}", ticket.number);
    let _ = writeln!(out, "Film : {}", ticket.movie_title);
    let _ = writeln!(out, "Séance : {}", ticket.screening_label());
    let _ = writeln!(out, "Salle : {}", ticket.hall);
    let _ = writeln!(out, "Sièges : {}", ticket.seats_label());
    let _ = writeln!(out, "Snack : {}", ticket.snack_label());
    if let Some(poster) = &ticket.poster_url {
        let _ = writeln!(out, "Affiche : {poster}");
    }
    let _ = write!(out, "Code : {}", ticket.code);
    out
}
