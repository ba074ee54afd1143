//! Business rules for inbound card payments.
//!
//! Every rule runs on every request; violations are merged, in rule order,
//! into a single space-separated message.

use crate::payments::error::{PaymentError, PaymentResult};
use crate::payments::types::PaymentRequest;
use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

pub const DEFAULT_SUPPORTED_CURRENCIES: [&str; 3] = ["GBP", "USD", "CNY"];

const CARD_NUMBER_MESSAGE: &str = "card_number must be a 14-19 length numeric.";
const EXPIRY_MONTH_MESSAGE: &str = "expiry_month must be 1-12.";
const EXPIRY_YEAR_MESSAGE: &str = "expiry_year must be a 4 length numeric.";
const EXPIRY_PAST_MESSAGE: &str = "expiry_year and expiry_month must be in the future.";
const CURRENCY_FORMAT_MESSAGE: &str = "currency must be 3 upper case characters.";
const AMOUNT_MESSAGE: &str = "amount must be positive.";
const CVV_MESSAGE: &str = "cvv must be a 3-4 length numeric.";

static CARD_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[0-9]{14,19}$"));
// Zero-padded months ("01") are rejected.
static EXPIRY_MONTH_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^([1-9]|1[0-2])$"));
static EXPIRY_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[0-9]{4}$"));
static CURRENCY_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[A-Z]{3}$"));
static CVV_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[0-9]{3,4}$"));

fn pattern(expr: &str) -> Regex {
    Regex::new(expr).expect("validation pattern must compile")
}

#[derive(Debug, Clone)]
pub struct PaymentValidator {
    supported_currencies: Vec<String>,
}

impl Default for PaymentValidator {
    fn default() -> Self {
        Self {
            supported_currencies: DEFAULT_SUPPORTED_CURRENCIES
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        }
    }
}

impl PaymentValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self, payment: &PaymentRequest) -> PaymentResult<()> {
        self.validate_at(payment, Utc::now().date_naive())
    }

    /// Same as [`validate`](Self::validate) but measures expiry against `today`.
    pub fn validate_at(&self, payment: &PaymentRequest, today: NaiveDate) -> PaymentResult<()> {
        let errors: Vec<String> = [
            validate_card_number(&payment.card_number),
            validate_expiry(&payment.expiry_month, &payment.expiry_year, today),
            self.validate_currency(&payment.currency),
            validate_amount(payment.amount),
            validate_cvv(&payment.cvv),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if errors.is_empty() {
            return Ok(());
        }

        let message = errors.join(" ");
        warn!(reason = %message, "Invalid payment information");
        Err(PaymentError::validation(message))
    }

    fn validate_currency(&self, currency: &str) -> Result<(), String> {
        if !CURRENCY_RE.is_match(currency) {
            return Err(CURRENCY_FORMAT_MESSAGE.to_string());
        }
        if !self.supported_currencies.iter().any(|c| c == currency) {
            return Err(format!("currency {} is not supported.", currency));
        }
        Ok(())
    }
}

fn validate_card_number(card_number: &str) -> Result<(), String> {
    if !CARD_NUMBER_RE.is_match(card_number) {
        return Err(CARD_NUMBER_MESSAGE.to_string());
    }
    Ok(())
}

fn validate_expiry(month: &str, year: &str, today: NaiveDate) -> Result<(), String> {
    let mut errors = Vec::new();
    if !EXPIRY_MONTH_RE.is_match(month) {
        errors.push(EXPIRY_MONTH_MESSAGE);
    }
    if !EXPIRY_YEAR_RE.is_match(year) {
        errors.push(EXPIRY_YEAR_MESSAGE);
    }

    if errors.is_empty() {
        // Both strings matched their patterns, so they are small decimals.
        let month: i64 = month.parse().unwrap_or_default();
        let year: i64 = year.parse().unwrap_or_default();
        let current = i64::from(today.year()) * 12 + i64::from(today.month());
        if year * 12 + month <= current {
            errors.push(EXPIRY_PAST_MESSAGE);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join(" "))
    }
}

fn validate_amount(amount: i64) -> Result<(), String> {
    if amount <= 0 {
        return Err(AMOUNT_MESSAGE.to_string());
    }
    Ok(())
}

fn validate_cvv(cvv: &str) -> Result<(), String> {
    if !CVV_RE.is_match(cvv) {
        return Err(CVV_MESSAGE.to_string());
    }
    Ok(())
}
