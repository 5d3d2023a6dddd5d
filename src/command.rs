//! Text command front-end.
//!
//! The annotator is driven by one command per line, read from stdin or a
//! script file:
//!
//! ```text
//! # comments and blank lines are ignored
//! select 3
//! fill 120 45
//! click right 10 10
//! drag 30 31
//! key n
//! thresholds 0.5 1.5
//! preview /tmp/preview.png
//! quit
//! ```

use std::path::PathBuf;
use std::str::SplitWhitespace;

use thiserror::Error;

use crate::input::{PointerButton, PointerEvent};
use crate::keybindings::{Key, KeyBindings};
use crate::message::Action;
use crate::raster::Point;

/// Errors produced while parsing a command line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// First word is not a known command
    #[error("Unknown command '{0}'")]
    Unknown(String),

    /// Command is missing an argument
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        /// Command name
        command: String,
        /// Description of the expected arguments
        expected: &'static str,
    },

    /// Argument could not be parsed
    #[error("'{command}': invalid argument '{value}'")]
    InvalidArgument {
        /// Command name
        command: String,
        /// Offending argument
        value: String,
    },
}

/// Cursor over the arguments of one command.
struct Args<'a> {
    command: &'a str,
    words: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn next_word(&mut self, expected: &'static str) -> Result<&'a str, CommandError> {
        self.words.next().ok_or_else(|| CommandError::MissingArgument {
            command: self.command.to_string(),
            expected,
        })
    }

    fn parse<T: std::str::FromStr>(&mut self, expected: &'static str) -> Result<T, CommandError> {
        let word = self.next_word(expected)?;
        word.parse().map_err(|_| self.invalid(word))
    }

    fn point(&mut self) -> Result<Point, CommandError> {
        let x = self.parse("X Y")?;
        let y = self.parse("X Y")?;
        Ok(Point::new(x, y))
    }

    fn invalid(&self, value: &str) -> CommandError {
        CommandError::InvalidArgument {
            command: self.command.to_string(),
            value: value.to_string(),
        }
    }
}

/// Parse one command line into an action.
///
/// Returns `Ok(None)` for blank lines, comments and keys without a binding.
pub fn parse_command(line: &str, bindings: &KeyBindings) -> Result<Option<Action>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let mut args = Args { command, words };

    let action = match command {
        "fill" => Action::Fill(args.point()?),
        "erase" => Action::Erase(args.point()?),
        "paint" => Action::PaintBoundary(args.point()?),
        "click" => {
            let name = args.next_word("left|middle|right X Y")?;
            let button = PointerButton::parse(name).ok_or_else(|| args.invalid(name))?;
            let point = args.point()?;
            return Ok(PointerEvent::press(button, point.x, point.y).to_action());
        }
        "drag" => {
            let point = args.point()?;
            return Ok(PointerEvent::drag(PointerButton::Middle, point.x, point.y).to_action());
        }
        "key" => {
            let name = args.next_word("a key name")?;
            let key = Key::parse(name).ok_or_else(|| args.invalid(name))?;
            let action = bindings.action_for_key(key);
            if action.is_none() {
                log::debug!("No binding for key {:?}", key);
            }
            return Ok(action);
        }
        "select" => Action::SelectColor(args.parse("a palette index")?),
        "next" => Action::Next,
        "prev" => Action::Prev,
        "first" => Action::First,
        "last" => Action::Last,
        "goto" => Action::Goto(args.parse("a playlist index")?),
        "clear" => Action::Clear,
        "save" => Action::Save,
        "thresholds" => {
            let low = args.parse("LOW HIGH")?;
            let high = args.parse("LOW HIGH")?;
            Action::SetEdgeThresholds { low, high }
        }
        "preview" => Action::ExportPreview(PathBuf::from(args.next_word("an output path")?)),
        "quit" | "exit" => Action::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(action))
}
