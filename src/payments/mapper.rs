use crate::payments::types::{BankPaymentRequest, PaymentRequest, PaymentResponse, PaymentStatus};
use uuid::Uuid;

pub fn to_bank_request(payment: &PaymentRequest) -> BankPaymentRequest {
    BankPaymentRequest {
        card_number: payment.card_number.clone(),
        expiry_date: format!("{}/{}", payment.expiry_month, payment.expiry_year),
        currency: payment.currency.clone(),
        amount: payment.amount,
        cvv: payment.cvv.clone(),
    }
}

pub fn to_payment_response(
    id: Uuid,
    status: PaymentStatus,
    payment: &PaymentRequest,
) -> PaymentResponse {
    PaymentResponse {
        id,
        status,
        card_last4: last4(&payment.card_number),
        expiry_month: payment.expiry_month.clone(),
        expiry_year: payment.expiry_year.clone(),
        currency: payment.currency.clone(),
        amount: payment.amount,
    }
}

fn last4(card_number: &str) -> String {
    let skip = card_number.chars().count().saturating_sub(4);
    card_number.chars().skip(skip).collect()
}
