//! French display strings for dates, ratings and posters.

use chrono::{Datelike, NaiveDate};
use shared::protocol::MovieRecord;

pub const DEFAULT_POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
pub const UNKNOWN_RELEASE_DATE: &str = "Date inconnue";
pub const MISSING_OVERVIEW: &str = "Aucune description disponible.";

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

const WEEKDAYS: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

/// `14 juillet 2025`
pub fn long_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
}

/// `lundi 14 juillet`
pub fn weekday_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        WEEKDAYS[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MONTHS[date.month0() as usize]
    )
}

pub fn release_date_label(movie: &MovieRecord) -> String {
    movie
        .release_date
        .as_deref()
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .map(long_date)
        .unwrap_or_else(|| UNKNOWN_RELEASE_DATE.to_string())
}

/// Vote average rounded to one decimal.
pub fn rating(movie: &MovieRecord) -> f64 {
    (movie.vote_average * 10.0).round() / 10.0
}

pub fn poster_url(poster_base: &str, movie: &MovieRecord) -> Option<String> {
    movie
        .poster_path
        .as_deref()
        .filter(|path| !path.is_empty())
        .map(|path| format!("{}{path}", poster_base.trim_end_matches('/')))
}

pub fn overview(movie: &MovieRecord) -> &str {
    if movie.overview.trim().is_empty() {
        MISSING_OVERVIEW
    } else {
        &movie.overview
    }
}
