//! Opt-in tracing bootstrap for hosts that render dashboards headlessly
//! (CLI exporters, snapshot tests) and have no subscriber of their own.
//!
//! Engine code only emits `tracing` events; it never installs a subscriber.

/// Default directive used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "learner_charts=info";

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_DIRECTIVE`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_directive(DEFAULT_DIRECTIVE)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"learner_charts=trace"` while debugging aggregation input.
#[must_use]
pub fn init_tracing_with_directive(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
