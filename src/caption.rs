use std::fmt;

use serde::{Deserialize, Serialize};

/// Caption identifier. Lyric JSON files use plain integers, hand-edited ones
/// sometimes use strings, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaptionId {
    Int(i64),
    Text(String),
}

impl fmt::Display for CaptionId {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CaptionId::Int(n) => write!(fmt, "{}", n),
            CaptionId::Text(s) => write!(fmt, "{}", s),
        }
    }
}

impl From<i64> for CaptionId {
    fn from(n: i64) -> Self {
        CaptionId::Int(n)
    }
}

impl From<i32> for CaptionId {
    fn from(n: i32) -> Self {
        CaptionId::Int(n.into())
    }
}

impl From<&str> for CaptionId {
    fn from(s: &str) -> Self {
        CaptionId::Text(s.to_string())
    }
}

impl From<String> for CaptionId {
    fn from(s: String) -> Self {
        CaptionId::Text(s)
    }
}

impl CaptionId {
    /// Reads an id from a command-line token: digits become `Int`, anything
    /// else is kept as `Text`.
    pub fn from_token(token: &str) -> Self {
        match token.trim().parse::<i64>() {
            Ok(n) => CaptionId::Int(n),
            Err(_) => CaptionId::Text(token.trim().to_string()),
        }
    }
}

/// One subtitle or lyric line. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionRecord {
    pub id: CaptionId,
    #[serde(default)]
    pub text: String,
    pub start: f64,
    pub end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl CaptionRecord {
    pub fn new(id: impl Into<CaptionId>, text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            start,
            end,
            section: None,
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
