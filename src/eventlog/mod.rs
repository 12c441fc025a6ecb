//! Append-only CSV journal of user actions for later analysis.
//!
//! Every record carries the timestamp, the per-process session id and the
//! current experimental context (condition, task, trial). The journal is
//! write-only from the editor's point of view: nothing reads it back at
//! decision time. Write failures come back as [`EventLogError`] so the caller
//! can decide whether to warn; they never interrupt drawing.

mod record;

pub use record::{COLUMNS, EventFields, ExperimentContext};

use chrono::{SecondsFormat, Utc};
use std::borrow::Cow;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while appending to the event log.
#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("failed to open event log {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write event log {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// CSV event journal bound to one destination file.
#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
    session_id: Uuid,
    context: ExperimentContext,
}

impl EventLog {
    /// Creates a log for `path` with a fresh random session id.
    ///
    /// No I/O happens until the first [`EventLog::record`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_session_id(path, Uuid::new_v4())
    }

    pub fn with_session_id(path: impl Into<PathBuf>, session_id: Uuid) -> Self {
        Self {
            path: path.into(),
            session_id,
            context: ExperimentContext::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn context(&self) -> &ExperimentContext {
        &self.context
    }

    /// Updates the ambient context. `None` arguments leave the field unchanged.
    pub fn set_context(
        &mut self,
        condition: Option<&str>,
        task_id: Option<&str>,
        trial_index: Option<u32>,
    ) {
        if let Some(condition) = condition {
            self.context.condition = Some(condition.to_string());
        }
        if let Some(task_id) = task_id {
            self.context.task_id = Some(task_id.to_string());
        }
        if let Some(trial_index) = trial_index {
            self.context.trial_index = Some(trial_index);
        }
        log::debug!("Event log context now {:?}", self.context);
    }

    /// Appends one record, writing the header first if the file has none.
    pub fn record(&mut self, event_type: &str, fields: &EventFields) -> Result<(), EventLogError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| EventLogError::Open {
                path: self.path.clone(),
                source,
            })?;

        let is_empty = file
            .metadata()
            .map(|meta| meta.len() == 0)
            .map_err(|source| self.write_error(source))?;

        let mut payload = if is_empty {
            record::header_line()
        } else {
            String::new()
        };
        payload.push_str(&self.encode(event_type, fields));

        file.write_all(payload.as_bytes())
            .map_err(|source| self.write_error(source))?;
        Ok(())
    }

    /// Appends one record from loosely typed pairs; unrecognized keys are dropped.
    pub fn record_pairs<'a, I>(&mut self, event_type: &str, pairs: I) -> Result<(), EventLogError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let fields = EventFields::from_pairs(pairs);
        self.record(event_type, &fields)
    }

    fn encode(&self, event_type: &str, fields: &EventFields) -> String {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        record::encode_line([
            Cow::Owned(timestamp),
            Cow::Owned(self.session_id.to_string()),
            opt(&self.context.condition),
            opt(&self.context.task_id),
            self.context
                .trial_index
                .map_or(Cow::Borrowed(""), |t| Cow::Owned(t.to_string())),
            Cow::Borrowed(event_type),
            opt(&fields.tool),
            opt(&fields.item_type),
            fields
                .point_count
                .map_or(Cow::Borrowed(""), |c| Cow::Owned(c.to_string())),
            opt(&fields.notes),
        ])
    }

    fn write_error(&self, source: io::Error) -> EventLogError {
        EventLogError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

fn opt(value: &Option<String>) -> Cow<'_, str> {
    Cow::Borrowed(value.as_deref().unwrap_or(""))
}
