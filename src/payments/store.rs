use crate::payments::types::PaymentResponse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-lifetime table of processed payments, keyed by payment id.
///
/// Cloning yields another handle to the same table. Nothing survives a
/// restart and there is no removal.
#[derive(Debug, Default, Clone)]
pub struct PaymentStore {
    payments: Arc<RwLock<HashMap<Uuid, PaymentResponse>>>,
}

impl PaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for `payment.id`.
    pub async fn insert(&self, payment: PaymentResponse) {
        let mut payments = self.payments.write().await;
        payments.insert(payment.id, payment);
    }

    pub async fn get(&self, payment_id: &Uuid) -> Option<PaymentResponse> {
        let payments = self.payments.read().await;
        payments.get(payment_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.payments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.payments.read().await.is_empty()
    }
}
