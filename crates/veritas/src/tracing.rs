//! Logging utilities with Veritas segment prefixes.
//!
//! Provides consistent logging setup across Veritas components.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with Veritas defaults.
///
/// Sets up tracing-subscriber with:
/// - Environment filter (RUST_LOG)
/// - Compact format on stderr, leaving stdout for reports
pub fn init() {
    init_with_filter("info");
}

/// Initialize tracing with a custom default filter.
///
/// `RUST_LOG` still wins when it is set. Calling this twice is harmless:
/// the second registration is ignored.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Veritas segment prefixes for logging.
pub mod prefix {
    /// Claim verification fan-out
    pub const VERIFY: &str = "⊨";
    /// Pipeline start
    pub const PIPELINE_OPEN: &str = "✿";
    /// Pipeline finish
    pub const PIPELINE_CLOSE: &str = "❀";
    /// Verification cache
    pub const CACHE: &str = "⊔";
}
