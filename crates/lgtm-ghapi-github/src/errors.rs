use lgtm_ghapi_interface::ApiError;

#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum GitHubError {
    #[error(transparent)]
    HttpError { source: reqwest::Error },

    #[error("Invalid authorization header: {source}")]
    InvalidHeaderError {
        source: http::header::InvalidHeaderValue,
    },

    #[error(
        "Could not merge pull request #{} on repository {}: {}",
        pr_number,
        repository_path,
        message
    )]
    MergeError {
        pr_number: u64,
        repository_path: String,
        message: String,
    },

    #[error("Unknown team '{}' in organization '{}'", team, organization)]
    UnknownTeam { organization: String, team: String },
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        GitHubError::HttpError { source: e }
    }
}

impl From<GitHubError> for ApiError {
    fn from(e: GitHubError) -> Self {
        match e {
            GitHubError::MergeError {
                pr_number,
                repository_path,
                message,
            } => ApiError::MergeError {
                pr_number,
                repository_path,
                message,
            },
            GitHubError::UnknownTeam { organization, team } => {
                ApiError::UnknownTeam { organization, team }
            }
            e => ApiError::ImplementationError { source: e.into() },
        }
    }
}
