use chrono::{DateTime, Local};
use serde::Serialize;

/// Severity of a status line shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageLevel::Success => write!(f, "success"),
            MessageLevel::Info => write!(f, "info"),
            MessageLevel::Warning => write!(f, "warning"),
            MessageLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
    pub at: DateTime<Local>,
}

impl StatusMessage {
    /// `HH:MM:SS text`, the form both front ends print
    pub fn timestamped(&self) -> String {
        format!("{} {}", self.at.format("%H:%M:%S"), self.text)
    }
}

/// Where status and error messages go
pub trait MessageSink {
    fn push(&mut self, level: MessageLevel, text: String);

    fn success(&mut self, text: String) {
        self.push(MessageLevel::Success, text);
    }

    fn info(&mut self, text: String) {
        self.push(MessageLevel::Info, text);
    }

    fn warning(&mut self, text: String) {
        self.push(MessageLevel::Warning, text);
    }

    fn error(&mut self, text: String) {
        self.push(MessageLevel::Error, text);
    }
}

/// In-memory message channel, oldest first
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<StatusMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&StatusMessage> {
        self.messages.last()
    }

    /// Number of messages at `level`
    pub fn count(&self, level: MessageLevel) -> usize {
        self.messages.iter().filter(|m| m.level == level).count()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl MessageSink for MessageLog {
    fn push(&mut self, level: MessageLevel, text: String) {
        self.messages.push(StatusMessage {
            level,
            text,
            at: Local::now(),
        });
    }
}
