//! Text commands arriving over the environment's config channel.
//!
//! # Wire format
//!
//! One command per message, `key:value`:
//!
//! | Message                          | Command                                  |
//! |----------------------------------|------------------------------------------|
//! | `Bugs.BlackScreen.enabled:True`  | enable a bug                             |
//! | `Bugs.BlackScreen.enabled:False` | disable a bug                            |
//! | `NavMeshBehaviour:True`          | switch every agent to a behaviour        |
//!
//! Flag values are `True` / `False`, matched case-insensitively.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::BugKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("malformed message {0:?}; expected `key:value`")]
    Malformed(String),

    #[error("unknown bug {0:?}")]
    UnknownBug(String),

    #[error("invalid flag {0:?}; expected True or False")]
    InvalidFlag(String),

    #[error("behaviour {0:?} can only be selected, not deselected")]
    Deselect(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigCommand {
    SetBug { bug: BugKind, enabled: bool },
    SelectBehavior(String),
}

impl ConfigCommand {
    pub fn parse(message: &str) -> Result<Self, ChannelError> {
        let message = message.trim();
        let malformed = || ChannelError::Malformed(message.to_owned());

        let (key, value) = message.rsplit_once(':').ok_or_else(malformed)?;
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() {
            return Err(malformed());
        }
        let flag = parse_flag(value)?;

        if let Some(rest) = key.strip_prefix("Bugs.") {
            let name = rest.strip_suffix(".enabled").ok_or_else(malformed)?;
            let bug = name.parse().map_err(ChannelError::UnknownBug)?;
            return Ok(ConfigCommand::SetBug { bug, enabled: flag });
        }

        if key.contains('.') {
            return Err(malformed());
        }
        if !flag {
            return Err(ChannelError::Deselect(key.to_owned()));
        }
        Ok(ConfigCommand::SelectBehavior(key.to_owned()))
    }
}

fn parse_flag(value: &str) -> Result<bool, ChannelError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ChannelError::InvalidFlag(value.to_owned()))
    }
}

impl FromStr for ConfigCommand {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigCommand::parse(s)
    }
}

/// Formats back to the wire format.
impl fmt::Display for ConfigCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |b: bool| if b { "True" } else { "False" };
        match self {
            ConfigCommand::SetBug { bug, enabled } => write!(f, "Bugs.{bug}.enabled:{}", flag(*enabled)),
            ConfigCommand::SelectBehavior(name)   => write!(f, "{name}:True"),
        }
    }
}
