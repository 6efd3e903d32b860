//! Lines typed on stdin.
//!
//! ```text
//! 1A2B3C Porch light   name a pending switch
//! /on 1A2B3C           switch on
//! /off 1A2B3C          switch off
//! /status              print every registered switch
//! ```

use insteon_local_domain::id::HubDeviceId;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Answer to a naming prompt. The name may be empty.
    Name { device_id: HubDeviceId, name: String },
    TurnOn(HubDeviceId),
    TurnOff(HubDeviceId),
    Status,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command {0}")]
    Unknown(String),
    #[error("{0} expects a device id")]
    MissingDeviceId(&'static str),
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] for unknown `/` commands or a switch
    /// command without a device id.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match head {
            "/on" => Self::TurnOn(device_id("/on", rest)?),
            "/off" => Self::TurnOff(device_id("/off", rest)?),
            "/status" => Self::Status,
            other if other.starts_with('/') => {
                return Err(CommandError::Unknown(other.to_string()));
            }
            _ => Self::Name {
                device_id: device_id("naming", head)?,
                name: rest.to_string(),
            },
        };
        Ok(Some(command))
    }
}

fn device_id(command: &'static str, raw: &str) -> Result<HubDeviceId, CommandError> {
    HubDeviceId::new(raw).map_err(|_| CommandError::MissingDeviceId(command))
}
