use std::collections::HashSet;

use lgtm_models::{Comment, Issue, RepoConfig, Roster};

use super::{Approval, ApprovalAlgorithm};

/// At most one approval per organization.
///
/// A person counts for the first organization listing them, by organization
/// name. When self approval is off, the organization of the issue author
/// cannot approve.
pub struct OrgAlgorithm;

impl ApprovalAlgorithm for OrgAlgorithm {
    fn approvals(
        &self,
        config: &RepoConfig,
        roster: &Roster,
        issue: &Issue,
        comments: &[Comment],
    ) -> Vec<Approval> {
        let author_org = roster.first_org_of(&issue.author);
        let mut approving_orgs = HashSet::new();
        let mut approvals = vec![];

        for comment in comments {
            if !config.is_match(&comment.body) {
                continue;
            }

            let (Some(org), Some(person)) = (
                roster.first_org_of(&comment.author),
                roster.person(&comment.author),
            ) else {
                continue;
            };

            if config.self_approval_off && Some(org) == author_org {
                continue;
            }

            if approving_orgs.insert(org) {
                approvals.push(Approval::new(person.clone(), comment.clone()));
            }
        }

        approvals
    }
}
