//! momitcool Device Simulator
//!
//! Emulates a Momit Cool on a local UDP port. Point the CLI at it with
//! `momitcool --host 127.0.0.1 --port 5684 --bind 127.0.0.1:0 --mode`.

use clap::Parser;
use momitcool::network::DeviceSimulator;
use tracing_subscriber::{fmt, EnvFilter};

/// momitcool Device Simulator
#[derive(Parser, Debug)]
#[command(name = "momitcool-sim")]
#[command(about = "Emulated Momit Cool for local testing")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:5684")]
    listen: String,

    /// Reported room temperature in tenths of a degree
    #[arg(short, long, default_value = "220", allow_hyphen_values = true)]
    temperature: i32,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,momitcool=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("momitcool simulator v{}", momitcool::VERSION);

    let simulator = match DeviceSimulator::bind(&args.listen) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", args.listen, e);
            std::process::exit(1);
        }
    };
    simulator.handle().set_temperature_tenths(args.temperature);

    if let Err(e) = simulator.run() {
        tracing::error!("Simulator error: {}", e);
        std::process::exit(1);
    }
}
