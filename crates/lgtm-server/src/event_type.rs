//! Event types.

use std::convert::TryFrom;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventTypeError {
    /// Unsupported event.
    #[error("Unsupported event: {}", event)]
    UnsupportedEvent { event: String },
}

/// Event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// Issue comment event.
    IssueComment,
    /// Pull request event.
    PullRequest,
    /// Push event.
    Push,
    /// Commit status event.
    Status,
}

impl EventType {
    /// Convert event type to static str.
    pub fn to_str(self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl TryFrom<&str> for EventType {
    type Error = EventTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "issue_comment" => Ok(Self::IssueComment),
            "pull_request" => Ok(Self::PullRequest),
            "push" => Ok(Self::Push),
            "status" => Ok(Self::Status),
            name => Err(EventTypeError::UnsupportedEvent {
                event: name.to_owned(),
            }),
        }
    }
}

impl From<EventType> for &'static str {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::IssueComment => "issue_comment",
            EventType::PullRequest => "pull_request",
            EventType::Push => "push",
            EventType::Status => "status",
        }
    }
}
