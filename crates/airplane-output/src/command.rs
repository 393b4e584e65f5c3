//! Output commands and their protocol lines.
//!
//! ```text
//! airplane_output_set[:<address>] <json>
//! airplane_output_append[:<address>] <json>
//! airplane_output[:"<name>"] <json>
//! ```
//!
//! A command is built and validated up front; rendering it with
//! [`Command::to_line`] cannot fail.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter};

use crate::{
    path::{encode_path, Address, PathSegment},
    payload::encode_payload,
    Error, Result,
};

static OUTPUT_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_0-9]*$").ok());

// ============================================================================
// COMMAND KIND
// ============================================================================

/// The command header, as written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
pub enum CommandKind {
    /// Replace the output (or the part of it at an address).
    #[strum(serialize = "airplane_output_set")]
    Set,
    /// Append to the output array (or the array at an address).
    #[strum(serialize = "airplane_output_append")]
    Append,
    /// Older name-addressed output.
    #[strum(serialize = "airplane_output")]
    LegacyNamed,
}

// ============================================================================
// OUTPUT NAME
// ============================================================================

/// Name of a legacy output stream. Empty, or ASCII letters, digits and `_`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OutputName(String);

impl OutputName {
    /// # Errors
    ///
    /// Returns `InvalidName` if the name contains anything outside `[A-Za-z0-9_]`.
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let valid = name.is_empty()
            || OUTPUT_NAME
                .as_ref()
                .is_some_and(|re| re.is_match(&name));

        if valid {
            Ok(Self(name))
        } else {
            Err(Error::invalid_name(name))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OutputName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for OutputName {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self> {
        Self::parse(name)
    }
}

// ============================================================================
// COMMAND
// ============================================================================

/// What a command points at, depending on its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Address(Address),
    Name(OutputName),
}

/// One output command with its encoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    kind: CommandKind,
    target: Target,
    payload: String,
}

impl Command {
    /// Set the output, or the part of it at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if `value` has no JSON form.
    pub fn set<T>(value: &T, path: &[PathSegment]) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        Self::addressed(CommandKind::Set, value, path)
    }

    /// Append to the output, or to the array at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if `value` has no JSON form.
    pub fn append<T>(value: &T, path: &[PathSegment]) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        Self::addressed(CommandKind::Append, value, path)
    }

    /// Legacy named output. An empty name is the default stream.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` for a bad name, checked before the value is
    /// encoded, and `Serialization` if `value` has no JSON form.
    pub fn named<T>(name: &str, value: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        let name = OutputName::parse(name)?;
        let payload = encode_payload(value)?;
        Ok(Self {
            kind: CommandKind::LegacyNamed,
            target: Target::Name(name),
            payload,
        })
    }

    fn addressed<T>(kind: CommandKind, value: &T, path: &[PathSegment]) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        let address = encode_path(path);
        let payload = encode_payload(value)?;
        Ok(Self {
            kind,
            target: Target::Address(address),
            payload,
        })
    }

    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        self.kind
    }

    #[must_use]
    pub const fn target(&self) -> &Target {
        &self.target
    }

    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Header with its optional suffix, e.g. `airplane_output_set:a[0]`.
    #[must_use]
    pub fn header(&self) -> String {
        match &self.target {
            Target::Address(address) if !address.is_empty() => {
                format!("{}:{address}", self.kind)
            }
            Target::Name(name) if !name.is_empty() => format!("{}:\"{name}\"", self.kind),
            Target::Address(_) | Target::Name(_) => self.kind.to_string(),
        }
    }

    /// The full protocol line, without a terminator.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{} {}", self.header(), self.payload)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}
