use payment_gateway::api::payments::PaymentsState;
use payment_gateway::config::AppConfig;
use payment_gateway::health::HealthChecker;
use payment_gateway::logging::init_tracing;
use payment_gateway::payments::{BankClient, PaymentStore, PaymentValidator};
use payment_gateway::services::PaymentOrchestrator;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.logging);
    config.validate()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        bank_url = %config.bank.url,
        bank_timeout_secs = config.bank.timeout_secs,
        "Starting payment gateway"
    );

    let bank_client = BankClient::new(&config.bank)
        .map_err(|e| anyhow::anyhow!("failed to build bank client: {}", e))?;
    let store = PaymentStore::new();
    let orchestrator = PaymentOrchestrator::new(Arc::new(bank_client), store.clone());

    let payments_state = PaymentsState {
        orchestrator: Arc::new(orchestrator),
        validator: Arc::new(PaymentValidator::new()),
    };
    let health_checker = HealthChecker::new(store, config.bank.url.clone());
    let app = payment_gateway::build_router(payments_state, health_checker);

    let addr: SocketAddr = config.server.bind_address().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind to address {}: {}", addr, e);
        e
    })?;

    info!(address = %addr, "Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
