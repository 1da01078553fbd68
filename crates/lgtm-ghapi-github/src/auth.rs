//! Auth.

use std::time::Duration;

use http::{header, HeaderMap};
use lgtm_config::Config;
use reqwest::ClientBuilder;

use crate::errors::GitHubError;

/// Get an authenticated GitHub client builder.
///
/// An empty token falls back to the configured one.
pub fn get_authenticated_client_builder(
    config: &Config,
    token: &str,
) -> Result<ClientBuilder, GitHubError> {
    let token = if token.is_empty() {
        config.api.github.token.as_str()
    } else {
        token
    };

    let mut headers = base_headers();
    headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| GitHubError::InvalidHeaderError { source: e })?,
    );

    Ok(get_anonymous_client_builder(config).default_headers(headers))
}

/// Get anonymous GitHub client builder.
pub fn get_anonymous_client_builder(config: &Config) -> ClientBuilder {
    ClientBuilder::new()
        .connect_timeout(Duration::from_millis(config.api.github.connect_timeout))
        .user_agent(format!("lgtm/{}", config.version))
        .default_headers(base_headers())
}

/// Build a GitHub URL.
pub fn build_github_url<T: Into<String>>(config: &Config, path: T) -> String {
    format!("{}{}", config.api.github.root_url, path.into())
}

fn base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/vnd.github+json"),
    );
    headers
}
