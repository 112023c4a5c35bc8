use super::*;

#[test]
fn parses_and_displays_seat_ids() {
    let seat: SeatId = "C4".parse().expect("seat");
    assert_eq!(seat.row(), 'C');
    assert_eq!(seat.number(), 4);
    assert_eq!(seat.to_string(), "C4");

    let lower: SeatId = " f8 ".parse().expect("lowercase seat");
    assert_eq!(lower.to_string(), "F8");
}

#[test]
fn rejects_seats_outside_the_grid() {
    assert_eq!("G1".parse::<SeatId>(), Err(SeatIdError::UnknownRow('G')));
    assert_eq!(
        "A9".parse::<SeatId>(),
        Err(SeatIdError::NumberOutOfRange(9))
    );
    assert_eq!(
        "A0".parse::<SeatId>(),
        Err(SeatIdError::NumberOutOfRange(0))
    );
    assert!(matches!(
        "A1x".parse::<SeatId>(),
        Err(SeatIdError::Malformed(_))
    ));
    assert!(matches!("".parse::<SeatId>(), Err(SeatIdError::Malformed(_))));
    assert!(matches!(
        "A300".parse::<SeatId>(),
        Err(SeatIdError::NumberOutOfRange(300))
    ));
}

#[test]
fn grid_has_forty_eight_distinct_seats_in_row_major_order() {
    let seats: Vec<SeatId> = SeatId::all().collect();
    assert_eq!(seats.len(), TOTAL_SEATS);
    assert_eq!(seats.first().map(ToString::to_string).as_deref(), Some("A1"));
    assert_eq!(seats.last().map(ToString::to_string).as_deref(), Some("F8"));

    let mut sorted = seats.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted, seats);
}

#[test]
fn seat_list_is_sorted_by_row_then_number() {
    let seats: Vec<SeatId> = ["B3", "A2", "B1", "A1"]
        .iter()
        .map(|raw| raw.parse().expect("seat"))
        .collect();
    assert_eq!(format_seat_list(&seats), "A1, A2, B1, B3");
}

#[test]
fn seat_ids_serialize_as_strings() {
    let seat: SeatId = "D7".parse().expect("seat");
    assert_eq!(serde_json::to_string(&seat).expect("json"), "\"D7\"");
    let decoded: SeatId = serde_json::from_str("\"E2\"").expect("decode");
    assert_eq!(decoded.to_string(), "E2");
    assert!(serde_json::from_str::<SeatId>("\"Z2\"").is_err());
}

#[test]
fn snack_labels_match_picker_and_ticket_copy() {
    assert_eq!("popcorn".parse::<Snack>(), Ok(Snack::Popcorn));
    assert_eq!("SODA".parse::<Snack>(), Ok(Snack::Soda));
    assert!("nachos".parse::<Snack>().is_err());

    assert_eq!(Snack::Chocolate.label(), "Chocolat");
    assert_eq!(Snack::Nothing.label(), "Rien");
    assert_eq!(Snack::Nothing.ticket_label(), "Aucun");
    assert_eq!(Snack::Popcorn.ticket_label(), "Popcorn");
}

#[test]
fn booking_steps_walk_forward_and_back() {
    assert_eq!(BookingStep::Seats.next(), Some(BookingStep::Snacks));
    assert_eq!(BookingStep::Snacks.next(), Some(BookingStep::Payment));
    assert_eq!(BookingStep::Payment.next(), None);
    assert_eq!(BookingStep::Payment.previous(), Some(BookingStep::Snacks));
    assert_eq!(BookingStep::Seats.previous(), None);
}
