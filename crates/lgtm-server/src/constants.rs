//! Webhook constants.

/// GitHub event header.
pub const GITHUB_EVENT_HEADER: &str = "X-GitHub-Event";
/// Body of answers to events that trigger nothing.
pub const PONG_RESPONSE: &str = "pong";
