use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Card payment as submitted by the merchant.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentRequest {
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub currency: String,
    pub amount: i64,
    pub cvv: String,
}

// Card number and CVV stay out of logs and panic messages.
impl std::fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentRequest")
            .field(
                "card_number",
                &crate::logging::mask_card_number(&self.card_number),
            )
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("currency", &self.currency)
            .field("amount", &self.amount)
            .field("cvv", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Authorized,
    Declined,
}

impl PaymentStatus {
    pub fn from_authorized(authorized: bool) -> Self {
        if authorized {
            PaymentStatus::Authorized
        } else {
            PaymentStatus::Declined
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Authorized => "AUTHORIZED",
            PaymentStatus::Declined => "DECLINED",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stored and returned record of a processed payment. Only the last four
/// digits of the card survive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub status: PaymentStatus,
    pub card_last4: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub currency: String,
    pub amount: i64,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BankPaymentRequest {
    pub card_number: String,
    /// `{month}/{year}`
    pub expiry_date: String,
    pub currency: String,
    pub amount: i64,
    pub cvv: String,
}

impl std::fmt::Debug for BankPaymentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankPaymentRequest")
            .field(
                "card_number",
                &crate::logging::mask_card_number(&self.card_number),
            )
            .field("expiry_date", &self.expiry_date)
            .field("currency", &self.currency)
            .field("amount", &self.amount)
            .field("cvv", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BankPaymentResponse {
    pub authorized: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub authorization_code: Option<Uuid>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_enum_name() {
        assert_eq!(
            serde_json::to_value(PaymentStatus::Authorized).unwrap(),
            serde_json::json!("AUTHORIZED")
        );
        assert_eq!(
            serde_json::to_value(PaymentStatus::Declined).unwrap(),
            serde_json::json!("DECLINED")
        );
    }

    #[test]
    fn empty_authorization_code_is_none() {
        let parsed: BankPaymentResponse =
            serde_json::from_str(r#"{"authorized": false, "authorization_code": ""}"#).unwrap();
        assert!(!parsed.authorized);
        assert_eq!(parsed.authorization_code, None);

        let parsed: BankPaymentResponse =
            serde_json::from_str(r#"{"authorized": false, "authorization_code": null}"#).unwrap();
        assert_eq!(parsed.authorization_code, None);

        let parsed: BankPaymentResponse = serde_json::from_str(r#"{"authorized": true}"#).unwrap();
        assert_eq!(parsed.authorization_code, None);
    }

    #[test]
    fn authorization_code_parses_uuid() {
        let code = Uuid::new_v4();
        let body = format!(r#"{{"authorized": true, "authorization_code": "{}"}}"#, code);
        let parsed: BankPaymentResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.authorization_code, Some(code));
    }

    #[test]
    fn malformed_authorization_code_is_rejected() {
        let parsed = serde_json::from_str::<BankPaymentResponse>(
            r#"{"authorized": true, "authorization_code": "not-a-uuid"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn debug_output_hides_card_data() {
        let request = PaymentRequest {
            card_number: "12345678901111".to_string(),
            expiry_month: "12".to_string(),
            expiry_year: "2036".to_string(),
            currency: "GBP".to_string(),
            amount: 123,
            cvv: "987".to_string(),
        };
        let rendered = format!("{:?}", request);
        assert!(!rendered.contains("12345678901111"));
        assert!(!rendered.contains("987"));
        assert!(rendered.contains("1111"));
    }
}
