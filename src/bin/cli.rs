//! momitcool CLI
//!
//! Command-line interface for controlling a Momit Cool.

use clap::Parser;
use momitcool::{Config, MomitCool, DEFAULT_PORT};
use tracing_subscriber::{fmt, EnvFilter};

/// momitcool CLI
#[derive(Parser, Debug)]
#[command(name = "momitcool")]
#[command(about = "Control your Momit Cool")]
#[command(version)]
struct Args {
    /// IP address of your Momit Cool
    #[arg(long)]
    host: String,

    /// Device UDP port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Local address to receive the response on (host:port)
    #[arg(short, long, default_value = "0.0.0.0:5683")]
    bind: String,

    /// Give up waiting for a response after this many milliseconds (0 waits forever)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    /// Reject responses whose token does not match the request
    #[arg(long)]
    verify_token: bool,

    /// Turn on the AC in cooling mode
    #[arg(long)]
    cool: bool,

    /// Turn off the AC
    #[arg(long)]
    off: bool,

    /// Print the current mode
    #[arg(long)]
    mode: bool,

    /// Print the current temperature
    #[arg(long)]
    temperature: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .bind_addr(&args.bind)
        .read_timeout_ms(args.timeout_ms)
        .verify_token(args.verify_token)
        .build();

    if let Err(e) = run(&args, config) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args, config: Config) -> momitcool::Result<()> {
    let cool = MomitCool::new(config);

    if args.mode {
        println!("{}", cool.mode()?);
    }

    if args.temperature {
        println!("{:.1}", cool.temperature()?);
    }

    if args.cool {
        cool.cool()?;
    }

    if args.off {
        cool.off()?;
    }

    Ok(())
}
