//! Validation utilities.

use lgtm_config::{ApiDriver, CacheDriver, Config};
use lgtm_core::{approvals::ApprovalRegistry, versions::VersionStrategy};
use lgtm_models::ApprovalMatcher;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push_str(&format!("\n  - Missing env. var.: {}", name));
    }

    #[inline]
    fn _invalid(error: &mut String, name: &str) {
        error.push_str(&format!("\n  - Invalid env. var.: {}", name));
    }

    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "LGTM_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "LGTM_SERVER_BIND_PORT");
    }
    if config.name.is_empty() {
        _missing(&mut error, "LGTM_NAME");
    }

    if config.api.driver == ApiDriver::GitHub && config.api.github.root_url.is_empty() {
        _missing(&mut error, "LGTM_API_GITHUB_ROOT_URL");
    }

    if config.cache.driver == CacheDriver::Memory && config.cache.ttl_seconds == 0 {
        _invalid(&mut error, "LGTM_CACHE_TTL_SECONDS");
    }

    // Check repository defaults
    if config.defaults.approvals == 0 {
        _invalid(&mut error, "LGTM_DEFAULT_APPROVALS");
    }
    if !ApprovalMatcher::new(&config.defaults.pattern).is_valid() {
        _invalid(&mut error, "LGTM_DEFAULT_PATTERN");
    }
    if config.defaults.team.is_empty() {
        _missing(&mut error, "LGTM_DEFAULT_TEAM");
    }
    if ApprovalRegistry::with_default_algorithms()
        .lookup(&config.defaults.approval_algorithm)
        .is_err()
    {
        _invalid(&mut error, "LGTM_DEFAULT_APPROVAL_ALGORITHM");
    }
    if config
        .defaults
        .version_algorithm
        .parse::<VersionStrategy>()
        .is_err()
    {
        _invalid(&mut error, "LGTM_DEFAULT_VERSION_ALGORITHM");
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}
