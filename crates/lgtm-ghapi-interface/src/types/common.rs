use serde::{Deserialize, Serialize};

/// GitHub User.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhUser {
    /// Username.
    pub login: String,
}

/// GitHub Repository.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhRepository {
    /// Name.
    pub name: String,
    /// Full name (`owner/name`).
    pub full_name: String,
    /// Owner.
    pub owner: GhUser,
}

/// GitHub Branch.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhBranch {
    /// Reference.
    #[serde(rename = "ref")]
    pub reference: String,
    /// SHA.
    pub sha: String,
}
