//! # Device Script Parser
//!
//! A line-based format for driving the device from several simulated
//! processes at once, for demos and deterministic tests.
//!
//! ## Format
//!
//! - `<pid> <text>`: `<pid>` writes `<text>` to the device
//! - `<pid>`: `<pid>` reads one message
//! - Blank lines and lines starting with `#` are skipped
//!
//! ## Example
//!
//! ```text
//! # two processes say hello
//! 100 /reg alice
//! 200 /reg bob
//! 200 /alice hi
//! 100
//! ```

use core_types::ProcessId;
use thiserror::Error;

/// Script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },
}

/// What a script line asks the device to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptAction {
    /// Write the text as one command
    Write(String),
    /// Read one message
    Read,
}

/// One scripted device call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    /// Line number in the source text
    pub line: usize,
    /// Calling process
    pub pid: ProcessId,
    /// Requested call
    pub action: ScriptAction,
}

/// Parsed device script
#[derive(Debug, Clone, Default)]
pub struct DeviceScript {
    steps: Vec<ScriptStep>,
}

impl DeviceScript {
    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, ScriptError> {
        let mut steps = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
                continue;
            }
            steps.push(Self::parse_line(trimmed, index + 1)?);
        }

        Ok(Self { steps })
    }

    fn parse_line(line: &str, line_num: usize) -> Result<ScriptStep, ScriptError> {
        let (pid_text, rest) = line.split_once(' ').unwrap_or((line, ""));
        let pid = pid_text
            .trim_end()
            .parse::<u32>()
            .map(ProcessId::from_raw)
            .map_err(|_| ScriptError::ParseError {
                line: line_num,
                message: format!("invalid process id: {}", pid_text),
            })?;

        let action = if rest.trim().is_empty() {
            ScriptAction::Read
        } else {
            ScriptAction::Write(rest.to_string())
        };

        Ok(ScriptStep {
            line: line_num,
            pid,
            action,
        })
    }

    /// Returns the parsed steps in order
    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Returns the number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns whether the script has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
