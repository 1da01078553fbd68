use std::collections::HashMap;

use tracing::debug;

use super::{ApprovalAlgorithm, ApprovalError, OrgAlgorithm, SimpleAlgorithm};

/// Mutable set of approval algorithms, frozen with [`ApprovalRegistryBuilder::build`].
#[derive(Default)]
pub struct ApprovalRegistryBuilder {
    algorithms: HashMap<String, Box<dyn ApprovalAlgorithm>>,
}

impl ApprovalRegistryBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Builder preloaded with the `simple` and `org` algorithms.
    pub fn with_default_algorithms() -> Self {
        let mut algorithms: HashMap<String, Box<dyn ApprovalAlgorithm>> = HashMap::new();
        algorithms.insert("simple".into(), Box::new(SimpleAlgorithm));
        algorithms.insert("org".into(), Box::new(OrgAlgorithm));

        Self { algorithms }
    }

    /// Register an algorithm. Names are case-insensitive.
    pub fn register<N: AsRef<str>>(
        &mut self,
        name: N,
        algorithm: Box<dyn ApprovalAlgorithm>,
    ) -> Result<&mut Self, ApprovalError> {
        let key = name.as_ref().to_lowercase();
        if self.algorithms.contains_key(&key) {
            return Err(ApprovalError::AlreadyRegistered {
                name: name.as_ref().into(),
            });
        }

        debug!(name = %key, message = "Registered approval algorithm");
        self.algorithms.insert(key, algorithm);
        Ok(self)
    }

    pub fn build(self) -> ApprovalRegistry {
        ApprovalRegistry {
            algorithms: self.algorithms,
        }
    }
}

/// Read-only set of approval algorithms.
pub struct ApprovalRegistry {
    algorithms: HashMap<String, Box<dyn ApprovalAlgorithm>>,
}

impl ApprovalRegistry {
    pub fn with_default_algorithms() -> Self {
        ApprovalRegistryBuilder::with_default_algorithms().build()
    }

    pub fn lookup(&self, name: &str) -> Result<&dyn ApprovalAlgorithm, ApprovalError> {
        self.algorithms
            .get(&name.to_lowercase())
            .map(|a| a.as_ref())
            .ok_or_else(|| ApprovalError::UnknownAlgorithm { name: name.into() })
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.algorithms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ApprovalRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalRegistry")
            .field("algorithms", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use lgtm_config::RepositoryDefaultsConfig;
    use lgtm_models::{Comment, Issue, Person, RepoConfig, Roster};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::approvals::{Approval, MockApprovalAlgorithm};

    #[test]
    fn default_algorithms() {
        let registry = ApprovalRegistry::with_default_algorithms();
        assert_eq!(registry.names(), vec!["org", "simple"]);
        assert!(registry.lookup("SIMPLE").is_ok());
        assert!(registry.lookup("Org").is_ok());
    }

    #[test]
    fn unknown_algorithm() {
        let registry = ApprovalRegistry::with_default_algorithms();
        assert_eq!(
            registry.lookup("quorum").err(),
            Some(ApprovalError::UnknownAlgorithm {
                name: "quorum".into()
            })
        );
    }

    #[test]
    fn duplicate_registration() {
        let mut builder = ApprovalRegistryBuilder::with_default_algorithms();
        let result = builder.register("Simple", Box::new(SimpleAlgorithm));
        assert_eq!(
            result.err(),
            Some(ApprovalError::AlreadyRegistered {
                name: "Simple".into()
            })
        );
    }

    #[test]
    fn custom_algorithm() {
        let mut algorithm = MockApprovalAlgorithm::new();
        algorithm.expect_approvals().once().returning(|_, _, _, _| {
            vec![Approval::new(
                Person::from_login("bot"),
                Comment::new("bot", "ship it"),
            )]
        });

        let mut builder = ApprovalRegistryBuilder::new();
        builder.register("Always", Box::new(algorithm)).unwrap();
        let registry = builder.build();

        let approvals = registry.lookup("always").unwrap().approvals(
            &RepoConfig::from_defaults(&RepositoryDefaultsConfig::default()),
            &Roster::default(),
            &Issue::default(),
            &[],
        );
        assert_eq!(approvals.len(), 1);
        assert!(registry.lookup("simple").is_err());
    }
}
