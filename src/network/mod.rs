//! Network Module
//!
//! UDP transport and device simulator.
//!
//! ## Architecture
//! - One socket per round trip, dropped on every exit path
//! - No retries, no shared state between round trips
//! - Simulator serves requests on a single thread

mod transport;
mod simulator;

pub use transport::UdpTransport;
pub use simulator::{DeviceSimulator, DeviceState, SimulatorHandle};
