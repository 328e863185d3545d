use std::path::PathBuf;

use crate::error::ConfigError;
use crate::publisher::ReleaseRequest;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// What the CI environment knows about the run that triggered us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub owner: String,
    pub repo: String,
    pub sha: String,
    pub api_url: String,
    pub event_path: Option<PathBuf>,
}

impl RunContext {
    pub fn new(
        repository: &str,
        sha: String,
        api_url: Option<String>,
        event_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let (owner, repo) = parse_repository(repository)?;
        Ok(Self {
            owner,
            repo,
            sha,
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            event_path,
        })
    }
}

/// Release inputs as supplied by the caller, before defaults are applied.
#[derive(Debug, Clone)]
pub struct ReleaseInputs {
    pub release_tag: String,
    pub title: String,
    pub body: Option<String>,
    pub draft: bool,
    pub prerelease: bool,
}

impl ReleaseInputs {
    pub fn into_request(self, context: &RunContext) -> ReleaseRequest {
        let body = match self.body {
            Some(body) if !body.is_empty() => body,
            _ => default_body(&context.sha),
        };

        ReleaseRequest {
            repo_owner: context.owner.clone(),
            repo_name: context.repo.clone(),
            tag: self.release_tag,
            title: self.title,
            body,
            is_draft: self.draft,
            is_prerelease: self.prerelease,
        }
    }
}

pub fn default_body(sha: &str) -> String {
    format!("Automatically generated from the current master branch ({})", sha)
}

/// Parses an input holding a JSON-encoded boolean (`true` or `false`).
pub fn parse_json_bool(input: &'static str, value: &str) -> Result<bool, ConfigError> {
    serde_json::from_str::<bool>(value.trim()).map_err(|_| ConfigError::InvalidBoolean {
        input,
        value: value.to_string(),
    })
}

fn parse_repository(repository: &str) -> Result<(String, String), ConfigError> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ConfigError::InvalidRepository(repository.to_string())),
    }
}
