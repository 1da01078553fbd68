//! Use cases.

pub mod approvals;
pub mod comments;
pub mod pulls;
pub mod push;
pub mod releases;
pub mod repositories;
pub mod status;
