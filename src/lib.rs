pub mod advisor;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod plastic_api;
pub mod plastic_loader;
pub mod utils;

/// `RUST_LOG`-driven subscriber shared by both binaries; defaults to `info`.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
