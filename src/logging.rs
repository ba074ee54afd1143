//! Tracing setup and log-safe rendering of card data.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` takes precedence over
/// `LOG_LEVEL` when set. Calling this more than once is a no-op.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_lowercase()));
    let registry = tracing_subscriber::registry().with(filter);

    let _ = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Plain => registry.with(fmt::layer().with_target(true)).try_init(),
    };
}

/// Masks all but the last four characters, e.g. `**********1111`.
pub fn mask_card_number(card_number: &str) -> String {
    let len = card_number.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }
    let visible: String = card_number.chars().skip(len - 4).collect();
    format!("{}{}", "*".repeat(len - 4), visible)
}
