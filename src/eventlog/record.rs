//! Record layout for the CSV event log.

use std::borrow::Cow;

/// Column order of every log line, header included.
pub const COLUMNS: [&str; 10] = [
    "timestamp",
    "session_id",
    "condition",
    "task_id",
    "trial_index",
    "event_type",
    "tool",
    "item_type",
    "point_count",
    "notes",
];

/// Ambient experimental context stamped onto every record until changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperimentContext {
    pub condition: Option<String>,
    pub task_id: Option<String>,
    pub trial_index: Option<u32>,
}

/// Optional descriptive columns of a record.
///
/// Unset fields are written as empty strings so every line has all columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub tool: Option<String>,
    pub item_type: Option<String>,
    pub point_count: Option<usize>,
    pub notes: Option<String>,
}

impl EventFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    pub fn item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    pub fn point_count(mut self, count: usize) -> Self {
        self.point_count = Some(count);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builds fields from loosely typed key/value pairs.
    ///
    /// Unknown keys and unparsable point counts are dropped.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut fields = Self::default();
        for (key, value) in pairs {
            match key {
                "tool" => fields.tool = Some(value.to_string()),
                "item_type" => fields.item_type = Some(value.to_string()),
                "point_count" => match value.trim().parse() {
                    Ok(count) => fields.point_count = Some(count),
                    Err(_) => log::debug!("Ignoring non-numeric point_count '{value}'"),
                },
                "notes" => fields.notes = Some(value.to_string()),
                other => log::debug!("Ignoring unknown event field '{other}'"),
            }
        }
        fields
    }
}

/// Renders one CSV line (with trailing newline) from column values.
pub(crate) fn encode_line<'a>(values: impl IntoIterator<Item = Cow<'a, str>>) -> String {
    let mut line = String::new();
    for (index, value) in values.into_iter().enumerate() {
        if index > 0 {
            line.push(',');
        }
        line.push_str(&escape_field(&value));
    }
    line.push('\n');
    line
}

/// Quotes a value when it contains a delimiter, quote or line break.
fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

pub(crate) fn header_line() -> String {
    encode_line(COLUMNS.iter().map(|c| Cow::Borrowed(*c)))
}
