//! Services module for business logic

pub mod payment_orchestrator;

pub use crate::services::payment_orchestrator::PaymentOrchestrator;
