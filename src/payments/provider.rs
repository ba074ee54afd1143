use crate::payments::error::PaymentResult;
use crate::payments::types::{BankPaymentRequest, BankPaymentResponse};
use async_trait::async_trait;

/// Downstream authorization capability. Implementations classify every
/// failure into a [`PaymentError`](crate::payments::error::PaymentError)
/// before returning.
#[async_trait]
pub trait BankAuthorizer: Send + Sync {
    async fn authorize(&self, request: BankPaymentRequest) -> PaymentResult<BankPaymentResponse>;

    fn name(&self) -> &'static str;
}
