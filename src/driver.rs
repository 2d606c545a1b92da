//! Text event script used by the headless binary.
//!
//! One event per line:
//!
//! ```text
//! down 100 100
//! move 300 250
//! up 300 250
//! key s
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::io::BufRead;

use thiserror::Error;

use crate::app::{Editor, Flow};
use crate::event::{EditorEvent, PointerEvent};
use crate::keybindings::Key;

/// A script line that could not be turned into an event.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected} argument(s)")]
    WrongArity {
        command: String,
        expected: usize,
    },

    #[error("bad coordinate '{0}'")]
    BadCoordinate(String),

    #[error("bad key '{0}'")]
    BadKey(String),
}

/// Parse one script line. `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<EditorEvent>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    let arity = |expected: usize| -> Result<(), ScriptError> {
        if args.len() == expected {
            Ok(())
        } else {
            Err(ScriptError::WrongArity {
                command: command.clone(),
                expected,
            })
        }
    };
    let coord = |s: &str| -> Result<i32, ScriptError> {
        s.parse()
            .map_err(|_| ScriptError::BadCoordinate(s.to_string()))
    };

    let event = match command.as_str() {
        "down" | "move" | "up" => {
            arity(2)?;
            let (x, y) = (coord(args[0])?, coord(args[1])?);
            match command.as_str() {
                "down" => PointerEvent::down(x, y),
                "move" => PointerEvent::moved(x, y),
                _ => PointerEvent::up(x, y),
            }
            .into()
        }
        "key" => {
            arity(1)?;
            let key: Key = args[0]
                .parse()
                .map_err(|_| ScriptError::BadKey(args[0].to_string()))?;
            key.into()
        }
        other => return Err(ScriptError::UnknownCommand(other.to_string())),
    };
    Ok(Some(event))
}

/// Feed every line of `input` to the editor until it quits, finishes, or input ends.
///
/// `on_event` is called after each handled event, e.g. to print a frame summary.
pub fn run_script(
    editor: &mut Editor,
    input: impl BufRead,
    mut on_event: impl FnMut(&Editor),
) -> std::io::Result<Flow> {
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let event = match parse_line(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                log::warn!("Line {}: {}", number + 1, e);
                continue;
            }
        };

        let flow = editor.handle(event);
        on_event(editor);
        if flow != Flow::Continue {
            return Ok(flow);
        }
    }
    Ok(Flow::Continue)
}
