//! Device Module
//!
//! Momit Cool operations on top of the transport.
//!
//! ## Resources
//! - `10242/0/0`: air-conditioning state. PUT with content-format 1541 and
//!   a `cm=<mode>,t=<minutes>,sp=<setpoint>` payload changes it, GET
//!   returns `key=value` pairs including `out=<cool|heat|off>`.
//! - `10241/0/0`: sensor readings. GET returns `<tenths-of-degree>,...`.

use std::fmt;
use std::str::FromStr;

use crate::config::Config;
use crate::error::{CoapError, Result};
use crate::network::UdpTransport;
use crate::protocol::{Request, Response, ResponseCode};

/// URI-Path of the air-conditioning state resource
pub const STATE_PATH: [&str; 3] = ["10242", "0", "0"];

/// URI-Path of the temperature sensor resource
pub const TEMPERATURE_PATH: [&str; 3] = ["10241", "0", "0"];

/// Content-Format the device expects for state changes
pub const STATE_CONTENT_FORMAT: u16 = 1541;

/// Timer sent when switching on (minutes)
pub const DEFAULT_TIMER_MINUTES: u32 = 472;

/// Setpoint sent when switching on (tenths of a degree)
pub const DEFAULT_SETPOINT: u16 = 200;

/// Air-conditioning mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Cool,
    Heat,
    Off,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Cool => "cool",
            Mode::Heat => "heat",
            Mode::Off => "off",
        }
    }
}

impl FromStr for Mode {
    type Err = CoapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "cool" => Ok(Mode::Cool),
            "heat" => Ok(Mode::Heat),
            "off" => Ok(Mode::Off),
            other => Err(CoapError::Device(format!("Unknown mode: {:?}", other))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state change sent to the state resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetState {
    /// Requested mode (`cm`)
    pub mode: Mode,

    /// Timer in minutes (`t`), 0 switches off
    pub minutes: u32,

    /// Target in tenths of a degree (`sp`), `None` is sent as `off`
    pub setpoint: Option<u16>,
}

impl SetState {
    /// Switch on in cooling mode
    pub fn cool() -> Self {
        Self {
            mode: Mode::Cool,
            minutes: DEFAULT_TIMER_MINUTES,
            setpoint: Some(DEFAULT_SETPOINT),
        }
    }

    /// Switch off
    pub fn off() -> Self {
        Self {
            mode: Mode::Cool,
            minutes: 0,
            setpoint: None,
        }
    }

    /// Render as `cm=<mode>,t=<minutes>,sp=<setpoint>`
    pub fn to_payload(&self) -> String {
        let setpoint = match self.setpoint {
            Some(sp) => sp.to_string(),
            None => "off".to_string(),
        };
        format!("cm={},t={},sp={}", self.mode, self.minutes, setpoint)
    }

    /// Parse a `cm=..,t=..,sp=..` payload
    pub fn from_payload(payload: &str) -> Result<Self> {
        let pairs = parse_pairs(payload);
        let field = |key: &str| {
            lookup(&pairs, key)
                .ok_or_else(|| CoapError::Device(format!("Missing field {:?}", key)))
        };

        let mode: Mode = field("cm")?.parse()?;
        let minutes: u32 = field("t")?
            .parse()
            .map_err(|_| CoapError::Device(format!("Invalid timer: {:?}", payload)))?;
        let setpoint = match field("sp")? {
            "off" => None,
            sp => Some(
                sp.parse::<u16>()
                    .map_err(|_| CoapError::Device(format!("Invalid setpoint: {:?}", sp)))?,
            ),
        };

        Ok(Self {
            mode,
            minutes,
            setpoint,
        })
    }

    /// Mode the unit ends up running in
    pub fn effective_mode(&self) -> Mode {
        if self.minutes == 0 || self.setpoint.is_none() {
            Mode::Off
        } else {
            self.mode
        }
    }
}

// =============================================================================
// Payload Parsing
// =============================================================================

/// Split a `k=v,k=v` payload into trimmed pairs
///
/// Entries without `=` are skipped.
pub fn parse_pairs(payload: &str) -> Vec<(&str, &str)> {
    payload
        .split(',')
        .filter_map(|entry| {
            let (key, value) = entry.split_once('=')?;
            Some((key.trim(), value.trim()))
        })
        .collect()
}

fn lookup<'a>(pairs: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Extract the running mode (`out`) from a state payload
pub fn parse_mode(payload: &str) -> Result<Mode> {
    let pairs = parse_pairs(payload);
    lookup(&pairs, "out")
        .ok_or_else(|| CoapError::Device(format!("No mode in payload: {:?}", payload)))?
        .parse()
}

/// Extract the temperature in degrees from a sensor payload
pub fn parse_temperature(payload: &str) -> Result<f32> {
    let first = payload.split(',').next().unwrap_or_default().trim();
    let tenths: i32 = first
        .parse()
        .map_err(|_| CoapError::Device(format!("Invalid temperature: {:?}", payload)))?;
    Ok(tenths as f32 / 10.0)
}

// =============================================================================
// Device Client
// =============================================================================

/// A single Momit Cool unit
pub struct MomitCool {
    transport: UdpTransport,
}

impl MomitCool {
    /// Create a client for the configured device
    pub fn new(config: Config) -> Self {
        Self {
            transport: UdpTransport::new(config),
        }
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &UdpTransport {
        &self.transport
    }

    /// Turn on the air-conditioning in cooling mode
    pub fn cool(&self) -> Result<()> {
        self.set_state(&SetState::cool())
    }

    /// Alias of [`MomitCool::cool`]
    pub fn on(&self) -> Result<()> {
        self.cool()
    }

    /// Turn off the air-conditioning
    pub fn off(&self) -> Result<()> {
        self.set_state(&SetState::off())
    }

    /// Send a state change
    pub fn set_state(&self, state: &SetState) -> Result<()> {
        let request = Request::put(STATE_PATH)
            .with_content_format(STATE_CONTENT_FORMAT)
            .with_payload(state.to_payload());

        let response = self.transport.round_trip(&request)?;
        expect_success(&response)?;

        tracing::info!("Set state to {}", state.to_payload());
        Ok(())
    }

    /// Query the current running mode
    pub fn mode(&self) -> Result<Mode> {
        let payload = self.query(&STATE_PATH)?;
        parse_mode(&payload)
    }

    /// Query the current temperature in degrees
    pub fn temperature(&self) -> Result<f32> {
        let payload = self.query(&TEMPERATURE_PATH)?;
        parse_temperature(&payload)
    }

    /// GET a resource and return its payload as text
    fn query(&self, path: &[&str]) -> Result<String> {
        let response = self.transport.round_trip(&Request::get(path.iter().copied()))?;
        expect_success(&response)?;

        String::from_utf8(response.payload)
            .map_err(|_| CoapError::Device("Response payload is not valid UTF-8".to_string()))
    }
}

fn expect_success(response: &Response) -> Result<()> {
    if response.code.is_success() {
        return Ok(());
    }
    Err(CoapError::Device(match response.code {
        ResponseCode::NotFound => "Resource not found".to_string(),
        code => format!("Unexpected response code {}", code),
    }))
}
