//! Mock payment form: keystroke formatting, required fields, pluggable gateway.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

pub const CARD_NUMBER_MAX_LEN: usize = 19;
pub const EXPIRY_MAX_LEN: usize = 5;
pub const CVV_MAX_LEN: usize = 3;
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// `"42424242 4242-4242"` becomes `"4242 4242 4242 4242"`.
pub fn format_card_number(raw: &str) -> String {
    let mut formatted = String::with_capacity(CARD_NUMBER_MAX_LEN + 1);
    for (index, digit) in digits_only(raw).chars().enumerate() {
        if index > 0 && index % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(digit);
        if formatted.len() >= CARD_NUMBER_MAX_LEN {
            break;
        }
    }
    formatted.truncate(CARD_NUMBER_MAX_LEN);
    formatted.trim_end().to_string()
}

/// `"1225"` becomes `"12/25"`; fewer than three digits are left as typed.
pub fn format_expiry(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.len() <= 2 {
        return digits;
    }
    let month = &digits[..2];
    let year = &digits[2..digits.len().min(4)];
    let mut formatted = format!("{month}/{year}");
    formatted.truncate(EXPIRY_MAX_LEN);
    formatted
}

pub fn format_cvv(raw: &str) -> String {
    digits_only(raw).chars().take(CVV_MAX_LEN).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentField {
    CardName,
    CardNumber,
    ExpiryDate,
    Cvv,
}

impl fmt::Display for PaymentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentField::CardName => "card_name",
            PaymentField::CardNumber => "card_number",
            PaymentField::ExpiryDate => "expiry_date",
            PaymentField::Cvv => "cvv",
        };
        f.write_str(name)
    }
}

/// Values of the payment form. Setters apply the same formatting the input
/// fields apply on every keystroke, so stored values are always normalised.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PaymentDetails {
    card_name: String,
    card_number: String,
    expiry_date: String,
    cvv: String,
}

impl PaymentDetails {
    pub fn new(card_name: &str, card_number: &str, expiry_date: &str, cvv: &str) -> Self {
        let mut details = Self::default();
        details.set_card_name(card_name);
        details.set_card_number(card_number);
        details.set_expiry_date(expiry_date);
        details.set_cvv(cvv);
        details
    }

    pub fn set_card_name(&mut self, raw: &str) {
        self.card_name = raw.to_string();
    }

    pub fn set_card_number(&mut self, raw: &str) {
        self.card_number = format_card_number(raw);
    }

    pub fn set_expiry_date(&mut self, raw: &str) {
        self.expiry_date = format_expiry(raw);
    }

    pub fn set_cvv(&mut self, raw: &str) {
        self.cvv = format_cvv(raw);
    }

    pub fn card_name(&self) -> &str {
        &self.card_name
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub fn expiry_date(&self) -> &str {
        &self.expiry_date
    }

    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    pub fn last_four(&self) -> String {
        let digits = digits_only(&self.card_number);
        digits[digits.len().saturating_sub(4)..].to_string()
    }

    /// First empty field in form order, if any.
    pub fn missing_field(&self) -> Option<PaymentField> {
        [
            (PaymentField::CardName, self.card_name.trim()),
            (PaymentField::CardNumber, self.card_number.as_str()),
            (PaymentField::ExpiryDate, self.expiry_date.as_str()),
            (PaymentField::Cvv, self.cvv.as_str()),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
    }
}

impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card_name", &self.card_name)
            .field("card_number", &format_args!("**** {}", self.last_four()))
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("card declined: {0}")]
    Declined(String),
    #[error("payment gateway unavailable: {0}")]
    Gateway(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub reference: Uuid,
    pub card_last_four: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, details: &PaymentDetails) -> Result<PaymentReceipt, PaymentError>;
}

/// Stand-in gateway: waits, then approves (or declines when configured to).
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
    decline: bool,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            decline: false,
        }
    }

    pub fn declining(delay: Duration) -> Self {
        Self {
            delay,
            decline: true,
        }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSING_DELAY)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, details: &PaymentDetails) -> Result<PaymentReceipt, PaymentError> {
        tokio::time::sleep(self.delay).await;
        if self.decline {
            warn!(last_four = %details.last_four(), "simulated payment declined");
            return Err(PaymentError::Declined("simulated decline".to_string()));
        }
        let receipt = PaymentReceipt {
            reference: Uuid::new_v4(),
            card_last_four: details.last_four(),
        };
        info!(reference = %receipt.reference, "simulated payment approved");
        Ok(receipt)
    }
}

#[cfg(test)]
#[path = "tests/payment_tests.rs"]
mod tests;
