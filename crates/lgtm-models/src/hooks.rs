use crate::{Comment, Issue};

/// Repository targeted by a webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentHook {
    pub repo: RepositoryRef,
    pub issue: Issue,
    pub comment: Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHook {
    pub repo: RepositoryRef,
    pub sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestOpenedHook {
    pub repo: RepositoryRef,
    pub number: u64,
    pub title: String,
    pub author: String,
}

impl PullRequestOpenedHook {
    pub fn issue(&self) -> Issue {
        Issue {
            number: self.number,
            title: self.title.clone(),
            author: self.author.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushHook {
    pub repo: RepositoryRef,
    pub sha: String,
}

/// Webhook classified into one of the handled kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hook {
    Comment(CommentHook),
    Status(StatusHook),
    PullRequestOpened(PullRequestOpenedHook),
    Push(PushHook),
}

impl Hook {
    pub fn repo(&self) -> &RepositoryRef {
        match self {
            Self::Comment(h) => &h.repo,
            Self::Status(h) => &h.repo,
            Self::PullRequestOpened(h) => &h.repo,
            Self::Push(h) => &h.repo,
        }
    }
}
