//! Interactive neuron field viewer.
//!
//! Run with: cargo run --features viewer -- [config.json]

use neurofield::FieldConfig;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,neurofield=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "Loading config");
            FieldConfig::load(&path)?
        }
        None => FieldConfig::default(),
    };

    info!(
        neurons = config.neuron_count,
        flash_probability = config.flash_probability,
        seed = ?config.seed,
        "Starting viewer"
    );
    neurofield::run(config)?;
    Ok(())
}
