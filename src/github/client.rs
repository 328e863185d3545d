use anyhow::Result;
use octocrab::models;
use octocrab::Octocrab;
use serde_json::json;

use super::types::{GitRef, NewRelease, ReleaseId, ReleaseInfo};
use super::ReleaseApi;
use crate::error::ApiError;

pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Builds a client authenticated with `token`. `api_url` overrides the
    /// public API base, e.g. for GitHub Enterprise Server.
    pub fn new(token: String, api_url: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token);
        if let Some(url) = api_url {
            builder = builder.base_uri(url)?;
        }
        let client = builder.build()?;
        Ok(Self { client })
    }
}

impl ReleaseApi for GitHubClient {
    async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        sha: &str,
    ) -> Result<GitRef, ApiError> {
        let route = format!("/repos/{}/{}/git/refs", owner, repo);
        self.client
            .post(route, Some(&json!({ "ref": reference, "sha": sha })))
            .await
            .map_err(classify_error)
    }

    async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        sha: &str,
        force: bool,
    ) -> Result<GitRef, ApiError> {
        let route = format!("/repos/{}/{}/git/refs/{}", owner, repo, reference);
        self.client
            .patch(route, Some(&json!({ "sha": sha, "force": force })))
            .await
            .map_err(classify_error)
    }

    async fn get_release_by_tag(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
    ) -> Result<Option<ReleaseInfo>, ApiError> {
        let result = self.client
            .repos(owner, repo)
            .releases()
            .get_by_tag(tag)
            .await;

        match result {
            Ok(release) => Ok(Some(release.into())),
            Err(e) => match classify_error(e) {
                ApiError::NotFound => Ok(None),
                other => Err(other),
            },
        }
    }

    async fn delete_release(&self, owner: &str, repo: &str, id: ReleaseId) -> Result<(), ApiError> {
        // 204 with an empty body, so the typed `delete` would fail to parse it
        let route = format!("/repos/{}/{}/releases/{}", owner, repo, id.0);
        let response = self.client
            ._delete(route.as_str(), None::<&()>)
            .await
            .map_err(classify_error)?;
        octocrab::map_github_error(response)
            .await
            .map(drop)
            .map_err(classify_error)
    }

    async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        release: &NewRelease<'_>,
    ) -> Result<ReleaseInfo, ApiError> {
        self.client
            .repos(owner, repo)
            .releases()
            .create(release.tag_name)
            .name(release.name)
            .body(release.body)
            .draft(release.draft)
            .prerelease(release.prerelease)
            .send()
            .await
            .map(ReleaseInfo::from)
            .map_err(classify_error)
    }
}

impl From<models::repos::Release> for ReleaseInfo {
    fn from(release: models::repos::Release) -> Self {
        Self {
            id: ReleaseId(release.id.into_inner()),
            tag_name: release.tag_name,
            html_url: release.html_url.to_string(),
            created_at: release.created_at,
        }
    }
}

/// Maps an octocrab error onto [`ApiError`] using the error body GitHub sent
/// back. Failures that never produced an API response are transport errors,
/// described by their underlying cause only; octocrab's own `Display`
/// appends a captured backtrace.
pub fn classify_error(err: octocrab::Error) -> ApiError {
    match err {
        octocrab::Error::GitHub { source, .. } => classify_message(&source.message),
        other => ApiError::Transport(transport_message(&other)),
    }
}

fn transport_message(err: &(dyn std::error::Error + 'static)) -> String {
    let text = match err.source() {
        Some(source) => source.to_string(),
        None => err.to_string(),
    };
    text.lines().next().unwrap_or_default().trim().to_string()
}

fn classify_message(message: &str) -> ApiError {
    if message.contains("Not Found") {
        ApiError::NotFound
    } else if message.contains("already exists") {
        ApiError::AlreadyExists
    } else {
        ApiError::Rejected {
            message: message.to_string(),
        }
    }
}
