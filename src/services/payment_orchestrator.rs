//! Payment Orchestrator Service
//!
//! Sends an already-validated payment to the bank, records the outcome and
//! serves lookups of recorded payments. Validation happens before this
//! service is called.

use crate::logging::mask_card_number;
use crate::payments::error::{PaymentError, PaymentResult};
use crate::payments::mapper::{to_bank_request, to_payment_response};
use crate::payments::provider::BankAuthorizer;
use crate::payments::store::PaymentStore;
use crate::payments::types::{PaymentRequest, PaymentResponse, PaymentStatus};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct PaymentOrchestrator {
    authorizer: Arc<dyn BankAuthorizer>,
    store: PaymentStore,
}

impl PaymentOrchestrator {
    pub fn new(authorizer: Arc<dyn BankAuthorizer>, store: PaymentStore) -> Self {
        Self { authorizer, store }
    }

    pub fn store(&self) -> &PaymentStore {
        &self.store
    }

    /// Authorizes `payment` with the bank and records the result.
    ///
    /// A declined payment is a successful outcome and is stored. Bank errors
    /// are returned as classified by the authorizer and nothing is stored.
    pub async fn process_payment(&self, payment: PaymentRequest) -> PaymentResult<PaymentResponse> {
        let bank_response = self
            .authorizer
            .authorize(to_bank_request(&payment))
            .await?;

        let status = PaymentStatus::from_authorized(bank_response.authorized);
        let result = to_payment_response(Uuid::new_v4(), status, &payment);
        self.store.insert(result.clone()).await;

        info!(
            payment_id = %result.id,
            status = %result.status,
            currency = %result.currency,
            amount = result.amount,
            card = %mask_card_number(&payment.card_number),
            authorizer = self.authorizer.name(),
            "payment processed"
        );

        Ok(result)
    }

    pub async fn get_payment(&self, payment_id: Uuid) -> PaymentResult<PaymentResponse> {
        debug!(payment_id = %payment_id, "retrieving payment");
        self.store
            .get(&payment_id)
            .await
            .ok_or(PaymentError::NotFound { payment_id })
    }
}
