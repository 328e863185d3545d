use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A git reference as returned by the refs endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitRef {
    #[serde(rename = "ref")]
    pub name: String,
    pub object: GitObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitObject {
    pub sha: String,
}

impl GitRef {
    /// Fully qualified ref for a tag, e.g. `refs/tags/latest`.
    pub fn tag_ref(tag: &str) -> String {
        format!("refs/tags/{}", tag)
    }

    /// Ref path the update endpoint expects, e.g. `tags/latest`.
    pub fn tag_ref_path(tag: &str) -> String {
        format!("tags/{}", tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReleaseId(pub u64);

impl std::fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub id: ReleaseId,
    pub tag_name: String,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Parameters of a create-release call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelease<'a> {
    pub tag_name: &'a str,
    pub name: &'a str,
    pub body: &'a str,
    pub draft: bool,
    pub prerelease: bool,
}
