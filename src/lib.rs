pub mod collectors;
pub mod runner;
pub mod status;

use tracing_subscriber::EnvFilter;

// stdout belongs to the bar (one JSON line per run); diagnostics go to stderr.
// Quiet by default, RUST_LOG overrides.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
