//! Health check module
//! Provides health status for the application and its dependencies

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::payments::store::PaymentStore;

/// Health status response
#[derive(Debug, Serialize, Clone)]
pub struct HealthStatus {
    pub status: HealthState,
    pub checks: HashMap<String, ComponentHealth>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Overall health state
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub enum HealthState {
    Healthy,
    Degraded,
}

/// Individual component health status
#[derive(Debug, Serialize, Clone)]
pub struct ComponentHealth {
    pub status: ComponentState,
    pub response_time_ms: Option<u128>,
    pub details: Option<String>,
}

/// Component state
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub enum ComponentState {
    Up,
    Down,
}

impl HealthStatus {
    pub fn new() -> Self {
        Self {
            status: HealthState::Healthy,
            checks: HashMap::new(),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self.status, HealthState::Healthy)
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentHealth {
    pub fn up(response_time_ms: Option<u128>, details: Option<String>) -> Self {
        Self {
            status: ComponentState::Up,
            response_time_ms,
            details,
        }
    }

    pub fn down(details: Option<String>) -> Self {
        Self {
            status: ComponentState::Down,
            response_time_ms: None,
            details,
        }
    }
}

/// Health checker for the application
#[derive(Clone)]
pub struct HealthChecker {
    store: PaymentStore,
    bank_url: String,
    client: reqwest::Client,
}

impl HealthChecker {
    pub fn new(store: PaymentStore, bank_url: impl Into<String>) -> Self {
        Self {
            store,
            bank_url: bank_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// The store is in-process and always up. An unreachable bank degrades
    /// the service rather than failing it: lookups still work.
    pub async fn check_health(&self) -> HealthStatus {
        let mut health_status = HealthStatus::new();

        let stored = self.store.len().await;
        health_status.checks.insert(
            "payment_store".to_string(),
            ComponentHealth::up(None, Some(format!("{} payments", stored))),
        );

        let start = Instant::now();
        let probe = self
            .client
            .get(&self.bank_url)
            .timeout(Duration::from_secs(2))
            .send()
            .await;
        match probe {
            Ok(response) if response.status().is_server_error() => {
                let status = response.status().as_u16();
                health_status.status = HealthState::Degraded;
                health_status.checks.insert(
                    "bank".to_string(),
                    ComponentHealth::down(Some(format!("{}: HTTP {}", self.bank_url, status))),
                );
                warn!(status, "Bank health check returned a server error");
            }
            Ok(_) => {
                let elapsed = start.elapsed().as_millis();
                health_status.checks.insert(
                    "bank".to_string(),
                    ComponentHealth::up(Some(elapsed), Some(self.bank_url.clone())),
                );
                info!("Bank health check: OK ({}ms)", elapsed);
            }
            Err(e) => {
                health_status.status = HealthState::Degraded;
                health_status.checks.insert(
                    "bank".to_string(),
                    ComponentHealth::down(Some(format!("{}: unreachable", self.bank_url))),
                );
                warn!(error = %e, "Bank health check failed");
            }
        }

        health_status
    }
}

/// GET /health
pub async fn health(State(checker): State<HealthChecker>) -> impl IntoResponse {
    (StatusCode::OK, Json(checker.check_health().await))
}

/// GET /health/live
pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
