pub mod config;
pub mod emit;
pub mod error;
pub mod load;

pub use error::{Error, Result};

use tracing_subscriber::{fmt, EnvFilter};

/// Logs go to stderr: stdout carries the protocol.
pub fn init_tracing() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .try_init();
}
