use std::collections::HashSet;

use lgtm_models::{Comment, Issue, RepoConfig, Roster};

use super::{Approval, ApprovalAlgorithm};

/// One approval per listed maintainer, in comment order.
pub struct SimpleAlgorithm;

impl ApprovalAlgorithm for SimpleAlgorithm {
    fn approvals(
        &self,
        config: &RepoConfig,
        roster: &Roster,
        issue: &Issue,
        comments: &[Comment],
    ) -> Vec<Approval> {
        let mut approvers = HashSet::new();
        let mut approvals = vec![];

        for comment in comments {
            if config.self_approval_off && comment.author == issue.author {
                continue;
            }

            let Some(person) = roster.person(&comment.author) else {
                continue;
            };

            if approvers.contains(&comment.author) {
                continue;
            }

            if config.is_match(&comment.body) {
                approvers.insert(comment.author.clone());
                approvals.push(Approval::new(person.clone(), comment.clone()));
            }
        }

        approvals
    }
}

#[cfg(test)]
mod tests {
    use lgtm_config::RepositoryDefaultsConfig;
    use pretty_assertions::assert_eq;

    use super::*;

    fn config(self_approval_off: bool) -> RepoConfig {
        let mut config = RepoConfig::from_defaults(&RepositoryDefaultsConfig::default());
        config.self_approval_off = self_approval_off;
        config
    }

    fn issue() -> Issue {
        Issue {
            number: 1,
            title: "Feature".into(),
            author: "alice".into(),
        }
    }

    fn logins(approvals: &[Approval]) -> Vec<&str> {
        approvals.iter().map(|a| a.person.login.as_str()).collect()
    }

    #[test]
    fn distinct_approvers_in_order() {
        let roster = Roster::from_logins(["alice", "bob", "carol"]);
        let comments = vec![
            Comment::new("carol", "LGTM"),
            Comment::new("mallory", "LGTM"),
            Comment::new("bob", "needs work"),
            Comment::new("carol", "lgtm again"),
            Comment::new("bob", "lgtm"),
        ];

        let approvals = SimpleAlgorithm.approvals(&config(false), &roster, &issue(), &comments);
        assert_eq!(logins(&approvals), vec!["carol", "bob"]);
        assert_eq!(approvals[0].comment.body, "LGTM");
    }

    #[test]
    fn self_approval() {
        let roster = Roster::from_logins(["alice", "bob"]);
        let comments = vec![Comment::new("alice", "LGTM"), Comment::new("bob", "LGTM")];

        let approvals = SimpleAlgorithm.approvals(&config(false), &roster, &issue(), &comments);
        assert_eq!(logins(&approvals), vec!["alice", "bob"]);

        let approvals = SimpleAlgorithm.approvals(&config(true), &roster, &issue(), &comments);
        assert_eq!(logins(&approvals), vec!["bob"]);
    }

    #[test]
    fn invalid_pattern_approves_nobody() {
        let config = RepoConfig::parse(
            r#"pattern = "LGTM(""#,
            &RepositoryDefaultsConfig::default(),
        )
        .unwrap();
        let roster = Roster::from_logins(["bob"]);

        let approvals =
            SimpleAlgorithm.approvals(&config, &roster, &issue(), &[Comment::new("bob", "LGTM(")]);
        assert!(approvals.is_empty());
    }
}
