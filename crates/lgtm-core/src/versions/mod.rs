//! Version strategies.

use std::str::FromStr;

use lgtm_models::{ApprovalMatcher, Version, VersionError};
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::approvals::Approval;

#[derive(Debug, Error)]
pub enum VersionStrategyError {
    #[error("Unknown version algorithm '{name}'")]
    UnknownAlgorithm { name: String },

    #[error("Invalid version format '{format}': {source}")]
    InvalidFormat {
        format: String,
        source: time::error::InvalidFormatDescription,
    },

    #[error("Version format '{format}' has no date or time component")]
    ConstantFormat { format: String },

    #[error("Could not format timestamp: {source}")]
    FormatError { source: time::error::Format },

    #[error("Could not compute next version: {source}")]
    VersionOverflow { source: VersionError },
}

/// Reference layout tokens, longest first at each position.
const LAYOUT_TOKENS: [(&str, &str); 25] = [
    ("January", "[month repr:long]"),
    ("Monday", "[weekday]"),
    ("2006", "[year]"),
    ("-07:00", "[offset_hour sign:mandatory]:[offset_minute]"),
    ("-0700", "[offset_hour sign:mandatory][offset_minute]"),
    (".000", ".[subsecond digits:3]"),
    ("Jan", "[month repr:short]"),
    ("Mon", "[weekday repr:short]"),
    ("01", "[month]"),
    ("02", "[day]"),
    ("_2", "[day padding:space]"),
    ("03", "[hour repr:12]"),
    ("04", "[minute]"),
    ("05", "[second]"),
    ("06", "[year repr:last_two]"),
    ("15", "[hour]"),
    ("PM", "[period]"),
    ("pm", "[period case:lower]"),
    ("1", "[month padding:none]"),
    ("2", "[day padding:none]"),
    ("3", "[hour repr:12 padding:none]"),
    ("4", "[minute padding:none]"),
    ("5", "[second padding:none]"),
    ("MST", "UTC"),
    ("Z07:00", "Z"),
];

/// Policy used to name the next release tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStrategy {
    /// Next patch of the greatest tag, unless an approver asked for a greater version.
    Semver,
    /// Current UTC time, rendered with the repository version format.
    Timestamp,
}

impl FromStr for VersionStrategy {
    type Err = VersionStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "semver" => Ok(Self::Semver),
            "timestamp" => Ok(Self::Timestamp),
            _ => Err(VersionStrategyError::UnknownAlgorithm { name: s.into() }),
        }
    }
}

/// Greatest version requested by approval comments, through the first
/// capture group of the pattern.
pub fn max_requested_version(matcher: &ApprovalMatcher, approvals: &[Approval]) -> Option<Version> {
    approvals
        .iter()
        .filter_map(|a| matcher.capture(&a.comment.body))
        .filter_map(|c| c.parse::<Version>().ok())
        .max()
}

pub fn next_semver(
    existing: Version,
    requested: Option<Version>,
) -> Result<Version, VersionStrategyError> {
    match requested {
        Some(requested) if requested > existing => Ok(requested),
        _ => existing
            .next_patch()
            .map_err(|e| VersionStrategyError::VersionOverflow { source: e }),
    }
}

/// Translate a reference layout (`Jan 2 2006, 3:04:05 PM`) into a `time`
/// format description. Returns `None` when no token was found.
fn layout_to_description(layout: &str) -> Option<String> {
    let mut description = String::new();
    let mut found = false;
    let mut rest = layout;

    while let Some(c) = rest.chars().next() {
        match LAYOUT_TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
        {
            Some((token, item)) => {
                description.push_str(item);
                rest = &rest[token.len()..];
                found = true;
            }
            None => {
                if c == '[' {
                    description.push('[');
                }
                description.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    found.then_some(description)
}

/// Render a timestamp version.
///
/// `millis` is Unix seconds, an empty format or `rfc3339` is RFC 3339. A
/// format containing `[` is a `time` format description, anything else is a
/// reference layout built around `Mon Jan 2 15:04:05 -0700 2006`.
pub fn timestamp_version(
    format: &str,
    now: OffsetDateTime,
) -> Result<String, VersionStrategyError> {
    let now = now.replace_nanosecond(0).unwrap_or(now);

    match format {
        "millis" => Ok(now.unix_timestamp().to_string()),
        "" | "rfc3339" => now
            .format(&Rfc3339)
            .map_err(|e| VersionStrategyError::FormatError { source: e }),
        custom => {
            let translated;
            let template = if custom.contains('[') {
                custom
            } else {
                translated = layout_to_description(custom).ok_or_else(|| {
                    VersionStrategyError::ConstantFormat {
                        format: custom.into(),
                    }
                })?;
                translated.as_str()
            };

            let description = time::format_description::parse(template).map_err(|e| {
                VersionStrategyError::InvalidFormat {
                    format: custom.into(),
                    source: e,
                }
            })?;

            now.format(&description)
                .map_err(|e| VersionStrategyError::FormatError { source: e })
        }
    }
}

#[cfg(test)]
mod tests {
    use lgtm_config::DEFAULT_APPROVAL_PATTERN;
    use lgtm_models::{Comment, Person};
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    use super::*;

    fn approval(body: &str) -> Approval {
        Approval::new(Person::from_login("bob"), Comment::new("bob", body))
    }

    #[test]
    fn strategy_from_name() {
        assert_eq!("semver".parse::<VersionStrategy>().unwrap(), VersionStrategy::Semver);
        assert_eq!(
            "Timestamp".parse::<VersionStrategy>().unwrap(),
            VersionStrategy::Timestamp
        );
        assert!(matches!(
            "calver".parse::<VersionStrategy>(),
            Err(VersionStrategyError::UnknownAlgorithm { name }) if name == "calver"
        ));
    }

    #[test]
    fn requested_version_overrides_when_greater() {
        let matcher = ApprovalMatcher::new(DEFAULT_APPROVAL_PATTERN);
        let existing = Version::max_of_tags(&["0.0.1"]);

        let requested = max_requested_version(&matcher, &[approval("LGTM 0.1.0")]);
        assert_eq!(requested, Some(Version::new(0, 1, 0)));
        assert_eq!(next_semver(existing, requested).unwrap(), Version::new(0, 1, 0));

        let requested = max_requested_version(&matcher, &[approval("LGTM")]);
        assert_eq!(requested, None);
        assert_eq!(next_semver(existing, requested).unwrap(), Version::new(0, 0, 2));

        let requested = max_requested_version(&matcher, &[approval("lgtm 0.0.1")]);
        assert_eq!(next_semver(existing, requested).unwrap(), Version::new(0, 0, 2));
    }

    #[test]
    fn next_semver_overflow() {
        let existing = Version::max_of_tags(&["0.0.18446744073709551615"]);
        assert!(matches!(
            next_semver(existing, None),
            Err(VersionStrategyError::VersionOverflow {
                source: VersionError::PatchOverflow(_)
            })
        ));
        assert_eq!(
            next_semver(existing, Some(Version::new(0, 1, 0))).unwrap(),
            Version::new(0, 1, 0)
        );
    }

    #[test]
    fn greatest_requested_version_wins() {
        let matcher = ApprovalMatcher::new(DEFAULT_APPROVAL_PATTERN);
        let requested = max_requested_version(
            &matcher,
            &[
                approval("LGTM 1.2.0"),
                approval("LGTM v2"),
                approval("LGTM nope"),
            ],
        );
        assert_eq!(requested, Some(Version::new(2, 0, 0)));
    }

    #[test]
    fn invalid_pattern_requests_nothing() {
        let matcher = ApprovalMatcher::new("LGTM (");
        assert_eq!(
            max_requested_version(&matcher, &[approval("LGTM 1.0.0")]),
            None
        );
    }

    #[test]
    fn timestamp_millis_is_unix_seconds() {
        let now = OffsetDateTime::now_utc();
        let stamp: i64 = timestamp_version("millis", now).unwrap().parse().unwrap();
        assert!((now.unix_timestamp() - stamp).abs() <= 100);
    }

    #[test]
    fn timestamp_rfc3339_round_trips() {
        for format in ["", "rfc3339"] {
            let stamp = timestamp_version(format, OffsetDateTime::now_utc()).unwrap();
            let parsed = OffsetDateTime::parse(&stamp, &Rfc3339).unwrap();
            assert_eq!(parsed.format(&Rfc3339).unwrap(), stamp);
        }
    }

    #[test]
    fn timestamp_custom_format() {
        let now = datetime!(2016-03-04 05:06:07.5 UTC);
        assert_eq!(
            timestamp_version("[year].[month].[day]-[hour][minute]", now).unwrap(),
            "2016.03.04-0506"
        );
        assert_eq!(timestamp_version("", now).unwrap(), "2016-03-04T05:06:07Z");
        assert!(matches!(
            timestamp_version("[nope]", now),
            Err(VersionStrategyError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn timestamp_reference_layout() {
        let layout = "Jan 2 2006, 3:04:05 PM";
        let first = timestamp_version(layout, datetime!(2016-03-04 05:06:07 UTC)).unwrap();
        let second = timestamp_version(layout, datetime!(2020-01-01 00:00:00 UTC)).unwrap();

        assert_eq!(first, "Mar 4 2016, 5:06:07 AM");
        assert_eq!(second, "Jan 1 2020, 12:00:00 AM");
        assert_ne!(first, second);

        assert_eq!(
            timestamp_version("2006-01-02T15:04:05-07:00", datetime!(2016-03-04 17:06:07 UTC))
                .unwrap(),
            "2016-03-04T17:06:07+00:00"
        );
        assert_eq!(
            timestamp_version("v20060102.150405", datetime!(2016-03-04 17:06:07 UTC)).unwrap(),
            "v20160304.170607"
        );
    }

    #[test]
    fn timestamp_constant_layout_is_rejected() {
        assert!(matches!(
            timestamp_version("release", OffsetDateTime::now_utc()),
            Err(VersionStrategyError::ConstantFormat { format }) if format == "release"
        ));
    }
}
