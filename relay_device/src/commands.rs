//! # Device Write Commands
//!
//! Every write to the device carries exactly one command.
//!
//! ## Command Set
//!
//! - `/reg <name>` - Register the calling process under `<name>`
//! - `/unreg <name>` - Remove the caller's registration
//! - `/<name> <message>` - Queue `<message>` for the endpoint `<name>`
//!
//! Names and message bodies are taken verbatim; only one trailing newline is
//! stripped, since line-oriented clients send one.

use crate::error::DeviceError;

/// A parsed device command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayCommand {
    /// Register the caller
    Register { name: String },

    /// Unregister the caller
    Unregister { name: String },

    /// Send a message to a named endpoint
    Send { to: String, body: String },
}

/// Device command parser
pub struct RelayCommandParser;

impl RelayCommandParser {
    /// Parses one command
    pub fn parse(input: &str) -> Result<RelayCommand, DeviceError> {
        let input = strip_line_ending(input);

        if let Some(name) = Self::argument(input, "/reg")? {
            return Ok(RelayCommand::Register { name });
        }
        if let Some(name) = Self::argument(input, "/unreg")? {
            return Ok(RelayCommand::Unregister { name });
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Err(DeviceError::InvalidCommand(input.to_string()));
        };

        let (to, body) = rest.split_once(' ').unwrap_or((rest, ""));
        if to.is_empty() {
            return Err(DeviceError::MissingArgument(
                "destination name".to_string(),
            ));
        }

        Ok(RelayCommand::Send {
            to: to.to_string(),
            body: body.to_string(),
        })
    }

    /// Matches `<keyword> <argument>`, requiring a non-empty argument
    fn argument(input: &str, keyword: &str) -> Result<Option<String>, DeviceError> {
        let Some(rest) = input.strip_prefix(keyword) else {
            return Ok(None);
        };
        let argument = match rest.strip_prefix(' ') {
            Some(argument) => argument,
            None if rest.is_empty() => "",
            // `/register` addresses an endpoint called "register"
            None => return Ok(None),
        };
        if argument.is_empty() {
            return Err(DeviceError::MissingArgument("endpoint name".to_string()));
        }
        Ok(Some(argument.to_string()))
    }
}

fn strip_line_ending(input: &str) -> &str {
    let input = input.strip_suffix('\n').unwrap_or(input);
    input.strip_suffix('\r').unwrap_or(input)
}
