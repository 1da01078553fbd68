//! Config module.

mod drivers;

use std::{env, str::FromStr};

pub use drivers::{ApiDriver, CacheDriver, DatabaseDriver, DriverError};

/// Default approval pattern, capturing an optional version token.
pub const DEFAULT_APPROVAL_PATTERN: &str = r"(?i)LGTM\s*(\S*)";

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database driver.
    pub driver: DatabaseDriver,
    /// Optional JSON file used to seed the store at startup.
    pub seed_file: String,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API driver.
    pub driver: ApiDriver,
    /// GitHub options.
    pub github: ApiGitHubConfig,
}

#[derive(Debug, Clone)]
pub struct ApiGitHubConfig {
    /// GitHub API connect timeout (in milliseconds).
    pub connect_timeout: u64,
    /// GitHub API root URL.
    pub root_url: String,
    /// Fallback personal token, used when a repository owner has none.
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Cache driver.
    pub driver: CacheDriver,
    /// Time to live of cached entries (in seconds).
    pub ttl_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind IP.
    pub bind_ip: String,
    /// Server bind port.
    pub bind_port: u16,
    /// Server workers count.
    pub workers_count: Option<u16>,
}

/// Defaults applied to repositories without explicit settings.
#[derive(Debug, Clone)]
pub struct RepositoryDefaultsConfig {
    pub approvals: u64,
    pub pattern: String,
    pub team: String,
    pub self_approval_off: bool,
    pub approval_algorithm: String,
    pub version_algorithm: String,
}

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot name.
    pub name: String,
    /// API options.
    pub api: ApiConfig,
    /// Cache options.
    pub cache: CacheConfig,
    /// Database options.
    pub database: DatabaseConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Server options.
    pub server: ServerConfig,
    /// Repository defaults.
    pub defaults: RepositoryDefaultsConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Config {
        Config {
            name: env_to_str("LGTM_NAME", "lgtm"),
            api: ApiConfig {
                driver: env_to_driver("LGTM_API_DRIVER", ApiDriver::GitHub),
                github: ApiGitHubConfig {
                    connect_timeout: env_to_u64("LGTM_API_GITHUB_CONNECT_TIMEOUT", 5000),
                    root_url: env_to_str("LGTM_API_GITHUB_ROOT_URL", "https://api.github.com"),
                    token: env_to_str("LGTM_API_GITHUB_TOKEN", ""),
                },
            },
            cache: CacheConfig {
                driver: env_to_driver("LGTM_CACHE_DRIVER", CacheDriver::Memory),
                ttl_seconds: env_to_u64("LGTM_CACHE_TTL_SECONDS", 900),
            },
            database: DatabaseConfig {
                driver: env_to_driver("LGTM_DATABASE_DRIVER", DatabaseDriver::Memory),
                seed_file: env_to_str("LGTM_DATABASE_SEED_FILE", ""),
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("LGTM_LOGGING_USE_BUNYAN", false),
            },
            server: ServerConfig {
                bind_ip: env_to_str("LGTM_SERVER_BIND_IP", "127.0.0.1"),
                bind_port: env_to_u16("LGTM_SERVER_BIND_PORT", 8000),
                workers_count: env_to_optional_u16("LGTM_SERVER_WORKERS_COUNT", None),
            },
            defaults: RepositoryDefaultsConfig {
                approvals: env_to_u64("LGTM_DEFAULT_APPROVALS", 2),
                pattern: env_to_str("LGTM_DEFAULT_PATTERN", DEFAULT_APPROVAL_PATTERN),
                team: env_to_str("LGTM_DEFAULT_TEAM", "MAINTAINERS"),
                self_approval_off: env_to_bool("LGTM_DEFAULT_SELF_APPROVAL_OFF", false),
                approval_algorithm: env_to_str("LGTM_DEFAULT_APPROVAL_ALGORITHM", "simple"),
                version_algorithm: env_to_str("LGTM_DEFAULT_VERSION_ALGORITHM", "semver"),
            },
            version,
        }
    }

    pub fn from_env_no_version() -> Self {
        Self::from_env("0.0.0".into())
    }
}

impl Default for RepositoryDefaultsConfig {
    fn default() -> Self {
        Self {
            approvals: 2,
            pattern: DEFAULT_APPROVAL_PATTERN.into(),
            team: "MAINTAINERS".into(),
            self_approval_off: false,
            approval_algorithm: "simple".into(),
            version_algorithm: "semver".into(),
        }
    }
}

fn env_to_driver<T: FromStr + Copy>(name: &str, default: T) -> T {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_e| default.to_string())
        .replace("\\n", "\n")
}
