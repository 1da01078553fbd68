use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::Person;

/// Name of the organization produced by [`Roster::for_org`].
pub const CORE_ORG: &str = "core";

lazy_static! {
    static ref LOGIN_LINE: Regex = Regex::new(r"^\w[\w-]+$").unwrap();
    static ref SIGNATURE_LINE: Regex = Regex::new(r"(.+) <(.+)> \(@(.+)\)").unwrap();
    static ref EMAIL_LINE: Regex = Regex::new(r"(.+) <(.+)>").unwrap();
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Invalid roster table: {source}")]
    InvalidTable { source: toml::de::Error },

    #[error("Invalid roster table: missing people section")]
    MissingPeopleTable,

    #[error("Invalid roster line {line_number}: '{line}'")]
    InvalidLine { line_number: usize, line: String },

    #[error("No organization section")]
    MissingOrgSection,

    #[error("No people section")]
    MissingPeopleSection,

    #[error("No organization section for {name}")]
    UnknownOrg { name: String },
}

pub type Result<T, E = RosterError> = core::result::Result<T, E>;

/// Named group of reviewers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub people: Vec<String>,
}

/// Authorized reviewers of a repository.
///
/// People are keyed by login. Organizations are iterated by ascending name,
/// which is the order used for first-organization attribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    pub people: BTreeMap<String, Person>,
    pub org: BTreeMap<String, Organization>,
}

#[derive(Deserialize)]
struct RosterTable {
    people: Option<BTreeMap<String, Person>>,
    #[serde(default)]
    org: BTreeMap<String, Organization>,
}

type RosterParser = fn(&str) -> Result<Roster>;
type LineParser = fn(&str) -> Option<Person>;

const ROSTER_PARSERS: [RosterParser; 2] = [Roster::parse_table, Roster::parse_lines];
const LINE_PARSERS: [LineParser; 3] = [parse_login_line, parse_signature_line, parse_email_line];

impl Roster {
    /// Parse a roster document.
    ///
    /// Grammars are tried in order and the first success wins. Errors from
    /// earlier attempts are dropped, only the last one is reported.
    pub fn parse(document: &str) -> Result<Self> {
        ROSTER_PARSERS[1..]
            .iter()
            .fold(ROSTER_PARSERS[0](document), |result, parser| {
                result.or_else(|e| {
                    debug!(error = %e, message = "Roster grammar rejected, trying next one");
                    parser(document)
                })
            })
    }

    /// Build a roster from a plain list of logins, without organizations.
    pub fn from_logins<I, S>(logins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let people = logins
            .into_iter()
            .map(Into::into)
            .map(|login: String| (login.clone(), Person::from_login(login)))
            .collect();

        Self {
            people,
            org: BTreeMap::new(),
        }
    }

    /// Reduce the roster to the members of one organization, regrouped in a
    /// single [`CORE_ORG`] organization.
    pub fn for_org(&self, name: &str) -> Result<Self> {
        if self.org.is_empty() {
            return Err(RosterError::MissingOrgSection);
        }
        if self.people.is_empty() {
            return Err(RosterError::MissingPeopleSection);
        }

        let org = self
            .org
            .get(name)
            .ok_or_else(|| RosterError::UnknownOrg { name: name.into() })?;

        let mut people = BTreeMap::new();
        let mut members = vec![];
        for login in &org.people {
            if let Some(person) = self.people.get(login) {
                people.insert(login.clone(), person.clone());
                members.push(person.login.clone());
            }
        }

        let mut orgs = BTreeMap::new();
        orgs.insert(CORE_ORG.to_string(), Organization { people: members });

        Ok(Self { people, org: orgs })
    }

    pub fn person(&self, login: &str) -> Option<&Person> {
        self.people.get(login)
    }

    /// First organization listing this login, skipping unknown people.
    pub fn first_org_of(&self, login: &str) -> Option<&str> {
        if !self.people.contains_key(login) {
            return None;
        }

        self.org
            .iter()
            .find(|(_, org)| org.people.iter().any(|p| p == login))
            .map(|(name, _)| name.as_str())
    }

    fn parse_table(document: &str) -> Result<Self> {
        let table: RosterTable =
            toml::from_str(document).map_err(|e| RosterError::InvalidTable { source: e })?;
        let entries = table.people.ok_or(RosterError::MissingPeopleTable)?;

        let people = entries
            .into_iter()
            .map(|(key, mut person)| {
                if person.login.is_empty() {
                    person.login = key;
                }
                (person.login.clone(), person)
            })
            .collect();

        Ok(Self {
            people,
            org: table.org,
        })
    }

    fn parse_lines(document: &str) -> Result<Self> {
        let mut people = BTreeMap::new();

        for (index, line) in document.lines().enumerate() {
            let Some(item) = strip_comments(line) else {
                continue;
            };

            let person = LINE_PARSERS
                .iter()
                .find_map(|parser| parser(item))
                .ok_or_else(|| RosterError::InvalidLine {
                    line_number: index + 1,
                    line: line.into(),
                })?;

            people.insert(person.login.clone(), person);
        }

        Ok(Self {
            people,
            org: BTreeMap::new(),
        })
    }
}

fn strip_comments(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let line = match line.find(" #") {
        Some(index) => line[..index].trim(),
        None => line,
    };

    Some(line)
}

fn parse_login_line(line: &str) -> Option<Person> {
    LOGIN_LINE
        .is_match(line)
        .then(|| Person::from_login(line))
}

fn parse_signature_line(line: &str) -> Option<Person> {
    SIGNATURE_LINE.captures(line).map(|captures| Person {
        name: captures[1].trim().into(),
        email: captures[2].trim().into(),
        login: captures[3].trim().into(),
    })
}

// The display part doubles as the login.
fn parse_email_line(line: &str) -> Option<Person> {
    EMAIL_LINE.captures(line).map(|captures| Person {
        email: captures[2].trim().into(),
        login: captures[1].trim().into(),
        ..Default::default()
    })
}
