//! Telemetry helpers for applications embedding `chart-histogram`.
//!
//! Pipeline stages emit `tracing` events (`debug` per pass stage, `trace`
//! per selection join). Hosts either call `init_default_tracing` or install
//! their own subscriber and filters.

/// Installs a compact fmt subscriber filtered by `RUST_LOG`
/// (default `chart_histogram=info`).
///
/// `false` means nothing was installed: either the `telemetry` feature is off
/// or the host already set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chart_histogram=info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::init_default_tracing;

    #[test]
    fn second_initialization_is_a_no_op() {
        let _ = init_default_tracing();
        assert!(!init_default_tracing());
    }
}
