use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` overrides `default_level`.
///
/// Stdout carries JSON results and the MCP transport, so logs never go there.
/// Safe to call more than once; later calls are no-ops.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
