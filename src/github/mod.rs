pub mod client;
pub mod types;

use crate::error::ApiError;
use types::{GitRef, NewRelease, ReleaseId, ReleaseInfo};

pub use client::GitHubClient;

/// The remote operations a release run needs from the hosting API.
///
/// Every call names its repository explicitly; implementations hold no
/// per-repository state.
#[allow(async_fn_in_trait)]
pub trait ReleaseApi {
    async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        sha: &str,
    ) -> Result<GitRef, ApiError>;

    /// Moves an existing ref. `reference` is relative to `refs/`.
    async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        sha: &str,
        force: bool,
    ) -> Result<GitRef, ApiError>;

    /// Returns `Ok(None)` when no release is attached to `tag`.
    async fn get_release_by_tag(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
    ) -> Result<Option<ReleaseInfo>, ApiError>;

    async fn delete_release(&self, owner: &str, repo: &str, id: ReleaseId)
        -> Result<(), ApiError>;

    async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        release: &NewRelease<'_>,
    ) -> Result<ReleaseInfo, ApiError>;
}
