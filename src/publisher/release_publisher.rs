use crate::error::{ApiError, PublishError};
use crate::github::types::{GitRef, NewRelease, ReleaseId, ReleaseInfo};
use crate::github::ReleaseApi;

/// Everything needed to publish one release, fixed before any remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    pub repo_owner: String,
    pub repo_name: String,
    pub tag: String,
    pub title: String,
    pub body: String,
    pub is_draft: bool,
    pub is_prerelease: bool,
}

/// How the tag ref ended up pointing at the commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOutcome {
    Created,
    Updated,
}

pub struct ReleasePublisher<C> {
    client: C,
}

impl<C: ReleaseApi> ReleasePublisher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Points the tag at `commit_sha`, drops any release already attached to
    /// it and publishes a fresh one. The steps run strictly in that order.
    pub async fn publish(
        &self,
        request: &ReleaseRequest,
        commit_sha: &str,
    ) -> Result<ReleaseId, PublishError> {
        self.ensure_tag_ref(request, commit_sha).await?;
        self.remove_prior_release(request).await;
        let release = self.create_release(request).await?;
        Ok(release.id)
    }

    /// Creates `refs/tags/<tag>`, or force-moves it when it already exists.
    pub async fn ensure_tag_ref(
        &self,
        request: &ReleaseRequest,
        commit_sha: &str,
    ) -> Result<TagOutcome, PublishError> {
        let reference = GitRef::tag_ref(&request.tag);
        tracing::info!("Attempting to create or update release tag \"{}\"", request.tag);

        let created = self
            .client
            .create_ref(&request.repo_owner, &request.repo_name, &reference, commit_sha)
            .await;

        let outcome = match created {
            Ok(_) => TagOutcome::Created,
            Err(ApiError::AlreadyExists) => {
                let existing = GitRef::tag_ref_path(&request.tag);
                tracing::info!(
                    "Tag \"{}\" already exists, updating \"{}\" to {}",
                    reference,
                    existing,
                    commit_sha
                );
                self.client
                    .update_ref(&request.repo_owner, &request.repo_name, &existing, commit_sha, true)
                    .await
                    .map_err(|source| PublishError::TagRef {
                        reference: existing.clone(),
                        source,
                    })?;
                TagOutcome::Updated
            }
            Err(source) => return Err(PublishError::TagRef { reference, source }),
        };

        tracing::info!("Successfully created or updated the release tag \"{}\"", request.tag);
        Ok(outcome)
    }

    /// Best effort: failures are logged and never abort the run.
    pub async fn remove_prior_release(&self, request: &ReleaseRequest) -> Option<ReleaseId> {
        tracing::info!("Searching for releases corresponding to the \"{}\" tag", request.tag);

        let lookup = self
            .client
            .get_release_by_tag(&request.repo_owner, &request.repo_name, &request.tag)
            .await;

        let release = match lookup {
            Ok(Some(release)) => release,
            Ok(None) => {
                tracing::info!("No release associated with tag \"{}\"", request.tag);
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    "Could not look up release associated with tag \"{}\" ({})",
                    request.tag,
                    e
                );
                return None;
            }
        };

        tracing::info!("Deleting release: {}", release.id);
        match self
            .client
            .delete_release(&request.repo_owner, &request.repo_name, release.id)
            .await
        {
            Ok(()) => Some(release.id),
            Err(e) => {
                tracing::warn!("Could not delete release {} ({})", release.id, e);
                None
            }
        }
    }

    pub async fn create_release(&self, request: &ReleaseRequest) -> Result<ReleaseInfo, PublishError> {
        tracing::info!("Creating new release for the \"{}\" tag", request.tag);

        let release = self
            .client
            .create_release(
                &request.repo_owner,
                &request.repo_name,
                &NewRelease {
                    tag_name: &request.tag,
                    name: &request.title,
                    body: &request.body,
                    draft: request.is_draft,
                    prerelease: request.is_prerelease,
                },
            )
            .await
            .map_err(|source| PublishError::CreateRelease {
                tag: request.tag.clone(),
                source,
            })?;

        match release.created_at {
            Some(created_at) => tracing::info!(
                "Published release {} at {} ({})",
                release.id,
                release.html_url,
                created_at.to_rfc3339()
            ),
            None => tracing::info!("Published release {} at {}", release.id, release.html_url),
        }
        Ok(release)
    }
}
