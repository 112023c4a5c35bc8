use super::*;

#[test]
fn card_number_is_grouped_in_fours() {
    assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
    assert_eq!(format_card_number("4242"), "4242");
    assert_eq!(format_card_number("42424"), "4242 4");
    assert_eq!(format_card_number(""), "");
}

#[test]
fn card_number_drops_non_digits_before_regrouping() {
    assert_eq!(format_card_number("42a4 24 24"), "4242 424");
    assert_eq!(format_card_number("4242-4242 42x42"), "4242 4242 4242");
    assert_eq!(format_card_number("abcd"), "");
}

#[test]
fn card_number_is_capped_at_nineteen_characters() {
    let formatted = format_card_number("42424242424242421234");
    assert_eq!(formatted, "4242 4242 4242 4242");
    assert_eq!(formatted.len(), CARD_NUMBER_MAX_LEN);
}

#[test]
fn reformatting_is_stable() {
    let once = format_card_number("4000056655665556");
    assert_eq!(format_card_number(&once), once);
    let expiry = format_expiry("0728");
    assert_eq!(format_expiry(&expiry), expiry);
}

#[test]
fn expiry_inserts_slash_after_month() {
    assert_eq!(format_expiry("1225"), "12/25");
    assert_eq!(format_expiry("1"), "1");
    assert_eq!(format_expiry("12"), "12");
    assert_eq!(format_expiry("123"), "12/3");
    assert_eq!(format_expiry("12/2599"), "12/25");
    assert_eq!(format_expiry("ab"), "");
}

#[test]
fn cvv_keeps_three_digits() {
    assert_eq!(format_cvv("1a2b3c4"), "123");
    assert_eq!(format_cvv("98"), "98");
}

#[test]
fn details_normalise_input_and_report_missing_fields() {
    let mut details = PaymentDetails::default();
    assert_eq!(details.missing_field(), Some(PaymentField::CardName));

    details.set_card_name("Jean Dupont");
    details.set_card_number("4242 4242 4242 4242");
    assert_eq!(details.missing_field(), Some(PaymentField::ExpiryDate));

    details.set_expiry_date("1/2/2/7");
    details.set_cvv("12x3");
    assert_eq!(details.expiry_date(), "12/27");
    assert_eq!(details.cvv(), "123");
    assert_eq!(details.missing_field(), None);
    assert_eq!(details.last_four(), "4242");

    details.set_card_name("   ");
    assert_eq!(details.missing_field(), Some(PaymentField::CardName));
}

#[test]
fn debug_output_masks_card_data() {
    let details = PaymentDetails::new("Jean Dupont", "4000056655665556", "1227", "987");
    let rendered = format!("{details:?}");
    assert!(rendered.contains("**** 5556"));
    assert!(!rendered.contains("4000 0566"));
    assert!(!rendered.contains("987"));
}

#[tokio::test(start_paused = true)]
async fn simulated_gateway_waits_then_approves() {
    let gateway = SimulatedGateway::default();
    let details = PaymentDetails::new("Jean Dupont", "4242424242424242", "1225", "123");

    let started = tokio::time::Instant::now();
    let receipt = gateway.charge(&details).await.expect("approved");
    assert!(started.elapsed() >= DEFAULT_PROCESSING_DELAY);
    assert_eq!(receipt.card_last_four, "4242");
}

#[tokio::test(start_paused = true)]
async fn declining_gateway_reports_failure() {
    let gateway = SimulatedGateway::declining(Duration::from_millis(10));
    let details = PaymentDetails::new("Jean Dupont", "4242424242424242", "1225", "123");
    let err = gateway.charge(&details).await.expect_err("declined");
    assert!(matches!(err, PaymentError::Declined(_)));
}
