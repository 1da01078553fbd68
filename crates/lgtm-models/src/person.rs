use serde::{Deserialize, Serialize};

/// Reviewer listed in a roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub login: String,
}

impl Person {
    pub fn from_login<T: Into<String>>(login: T) -> Self {
        Self {
            login: login.into(),
            ..Default::default()
        }
    }

    /// Render as `Name <email> (@login)`, skipping missing parts.
    pub fn signature(&self) -> String {
        let mut parts = vec![];
        if !self.name.is_empty() {
            parts.push(self.name.clone());
        }
        if !self.email.is_empty() {
            parts.push(format!("<{}>", self.email));
        }
        if !self.login.is_empty() {
            parts.push(format!("(@{})", self.login));
        }

        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn signature() {
        let person = Person {
            name: "Brad Rydzewski".into(),
            email: "brad.rydzewski@mail.com".into(),
            login: "bradrydzewski".into(),
        };
        assert_eq!(
            person.signature(),
            "Brad Rydzewski <brad.rydzewski@mail.com> (@bradrydzewski)"
        );
        assert_eq!(Person::from_login("octocat").signature(), "(@octocat)");
    }
}
