//! Gesture scripts: a line-oriented stand-in for a pointing device.
//!
//! ```text
//! # draw a head and take the assistant's offer
//! context condition=assist task=cat trial=1
//! tool ellipse
//! press 0 0
//! move 100 80
//! release 100 80
//! accept
//! ```

use crate::assistant::SuggestionId;
use crate::input::{MouseButton, Tool};
use crate::session::EditorSession;
use thiserror::Error;

/// Errors raised while parsing a gesture script.
#[derive(Debug, Error, PartialEq)]
pub enum ReplayError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: {message}")]
    Invalid { line: usize, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Tool(Tool),
    Press { x: f64, y: f64, button: MouseButton },
    Move { x: f64, y: f64 },
    Release { x: f64, y: f64, button: MouseButton },
    Suggest,
    Accept,
    Dismiss,
    Context {
        condition: Option<String>,
        task_id: Option<String>,
        trial_index: Option<u32>,
    },
}

/// Parses a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(source: &str) -> Result<Vec<ScriptCommand>, ReplayError> {
    let mut commands = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        commands.push(parse_line(text).map_err(|message| match message {
            LineError::Unknown(command) => ReplayError::UnknownCommand { line, command },
            LineError::Invalid(message) => ReplayError::Invalid { line, message },
        })?);
    }
    Ok(commands)
}

enum LineError {
    Unknown(String),
    Invalid(String),
}

impl From<String> for LineError {
    fn from(message: String) -> Self {
        LineError::Invalid(message)
    }
}

fn parse_line(text: &str) -> Result<ScriptCommand, LineError> {
    let mut words = text.split_whitespace();
    let command = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let command = match command {
        "tool" => {
            let [name] = args[..] else {
                return Err(LineError::Invalid("usage: tool <name>".into()));
            };
            ScriptCommand::Tool(name.parse()?)
        }
        "press" | "release" => {
            let (x, y, button) = match args[..] {
                [x, y] => (coord(x)?, coord(y)?, MouseButton::Left),
                [x, y, button] => (coord(x)?, coord(y)?, button.parse::<MouseButton>()?),
                _ => {
                    return Err(LineError::Invalid(format!(
                        "usage: {command} <x> <y> [button]"
                    )));
                }
            };
            if command == "press" {
                ScriptCommand::Press { x, y, button }
            } else {
                ScriptCommand::Release { x, y, button }
            }
        }
        "move" => {
            let [x, y] = args[..] else {
                return Err(LineError::Invalid("usage: move <x> <y>".into()));
            };
            ScriptCommand::Move {
                x: coord(x)?,
                y: coord(y)?,
            }
        }
        "suggest" | "accept" | "dismiss" if !args.is_empty() => {
            return Err(LineError::Invalid(format!("'{command}' takes no arguments")));
        }
        "suggest" => ScriptCommand::Suggest,
        "accept" => ScriptCommand::Accept,
        "dismiss" => ScriptCommand::Dismiss,
        "context" => parse_context(&args)?,
        other => return Err(LineError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn parse_context(args: &[&str]) -> Result<ScriptCommand, String> {
    let (mut condition, mut task_id, mut trial_index) = (None, None, None);
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            return Err(format!("expected key=value, got '{arg}'"));
        };
        match key {
            "condition" => condition = Some(value.to_string()),
            "task" => task_id = Some(value.to_string()),
            "trial" => {
                trial_index = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid trial index '{value}'"))?,
                )
            }
            other => return Err(format!("unknown context key '{other}'")),
        }
    }
    Ok(ScriptCommand::Context {
        condition,
        task_id,
        trial_index,
    })
}

fn coord(value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid coordinate '{value}'"))
}

/// Outcome of running a script.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub commands: usize,
    /// Commands whose event log write failed
    pub log_failures: usize,
    pub accepted: Vec<SuggestionId>,
    pub dismissed: Vec<SuggestionId>,
}

/// Feeds `commands` through `session`.
///
/// Log write failures are warned about and counted; replay always continues.
pub fn run_script(session: &mut EditorSession, commands: &[ScriptCommand]) -> ReplayReport {
    let mut report = ReplayReport::default();
    for command in commands {
        report.commands += 1;
        let result = match command {
            ScriptCommand::Tool(tool) => session.set_tool(*tool),
            ScriptCommand::Press { x, y, button } => session.on_press(*button, *x, *y).map(drop),
            ScriptCommand::Move { x, y } => session.on_motion(*x, *y).map(drop),
            ScriptCommand::Release { x, y, button } => {
                session.on_release(*button, *x, *y).map(drop)
            }
            ScriptCommand::Suggest => session.request_suggestion().map(|id| match id {
                Some(id) => log::info!("Assistant suggests {id}"),
                None => log::info!("Assistant has no suggestion"),
            }),
            ScriptCommand::Accept => {
                let pending = session.current_suggestion().map(|s| s.id);
                session.accept_suggestion().map(|added| {
                    if let (Some(id), false) = (pending, added.is_empty()) {
                        report.accepted.push(id);
                    }
                })
            }
            ScriptCommand::Dismiss => session
                .dismiss_suggestion()
                .map(|id| report.dismissed.extend(id)),
            ScriptCommand::Context {
                condition,
                task_id,
                trial_index,
            } => {
                session.set_experiment_context(
                    condition.as_deref(),
                    task_id.as_deref(),
                    *trial_index,
                );
                Ok(())
            }
        };

        if let Err(err) = result {
            log::warn!("{err}");
            report.log_failures += 1;
        }
    }
    report
}
