use lgtm_config::RepositoryDefaultsConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum RepoConfigError {
    #[error("Error while parsing repository configuration: {source}")]
    InvalidDocument { source: toml::de::Error },
}

/// Compiled approval pattern.
///
/// An invalid pattern never matches.
#[derive(Debug, Clone)]
pub struct ApprovalMatcher {
    regex: Option<Regex>,
}

impl ApprovalMatcher {
    pub fn new(pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(regex) => Self { regex: Some(regex) },
            Err(e) => {
                warn!(
                    pattern = pattern,
                    error = %e,
                    message = "Invalid approval pattern, no comment will match"
                );
                Self { regex: None }
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.regex.is_some()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex
            .as_ref()
            .map(|r| r.is_match(text))
            .unwrap_or(false)
    }

    /// First capture group of the first match, if any.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .as_ref()
            .and_then(|r| r.captures(text))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct RepoConfigDocument {
    approvals: Option<u64>,
    pattern: Option<String>,
    team: Option<String>,
    self_approval_off: Option<bool>,
    approval_algorithm: Option<String>,
    version_algorithm: Option<String>,
    version_format: Option<String>,
    do_merge: Option<bool>,
    do_version: Option<bool>,
}

/// Per-repository settings, read from the `.lgtm` file.
#[derive(Debug, Clone, Serialize)]
pub struct RepoConfig {
    pub approvals: u64,
    pattern: String,
    pub team: String,
    pub self_approval_off: bool,
    pub approval_algorithm: String,
    pub version_algorithm: String,
    pub version_format: String,
    pub do_merge: bool,
    pub do_version: bool,
    #[serde(skip)]
    matcher: ApprovalMatcher,
}

impl RepoConfig {
    /// Parse a `.lgtm` document, filling blanks from defaults.
    pub fn parse(
        document: &str,
        defaults: &RepositoryDefaultsConfig,
    ) -> Result<Self, RepoConfigError> {
        let document: RepoConfigDocument = toml::from_str(document)
            .map_err(|e| RepoConfigError::InvalidDocument { source: e })?;

        let pattern = document
            .pattern
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| defaults.pattern.clone());
        let matcher = ApprovalMatcher::new(&pattern);

        Ok(Self {
            approvals: document
                .approvals
                .filter(|&a| a > 0)
                .unwrap_or(defaults.approvals),
            pattern,
            team: document
                .team
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| defaults.team.clone()),
            self_approval_off: document
                .self_approval_off
                .unwrap_or(defaults.self_approval_off),
            approval_algorithm: document
                .approval_algorithm
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| defaults.approval_algorithm.clone()),
            version_algorithm: document
                .version_algorithm
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| defaults.version_algorithm.clone()),
            version_format: document.version_format.unwrap_or_default(),
            do_merge: document.do_merge.unwrap_or(false),
            do_version: document.do_version.unwrap_or(false),
            matcher,
        })
    }

    /// Settings used when the repository has no `.lgtm` file.
    pub fn from_defaults(defaults: &RepositoryDefaultsConfig) -> Self {
        let matcher = ApprovalMatcher::new(&defaults.pattern);

        Self {
            approvals: defaults.approvals,
            pattern: defaults.pattern.clone(),
            team: defaults.team.clone(),
            self_approval_off: defaults.self_approval_off,
            approval_algorithm: defaults.approval_algorithm.clone(),
            version_algorithm: defaults.version_algorithm.clone(),
            version_format: String::new(),
            do_merge: false,
            do_version: false,
            matcher,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matcher(&self) -> &ApprovalMatcher {
        &self.matcher
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}
