use serde::{Deserialize, Serialize};

/// Pull request seen as an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub body: String,
}

impl Comment {
    pub fn new<A: Into<String>, B: Into<String>>(author: A, body: B) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
        }
    }
}
