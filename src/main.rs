use anyhow::Result;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

mod config;
mod error;
mod github;
mod publisher;

use config::{parse_json_bool, ReleaseInputs, RunContext};
use github::GitHubClient;
use publisher::ReleasePublisher;

#[derive(Parser)]
#[command(name = "automatic-releases")]
#[command(about = "Move a release tag to the current commit and publish a fresh GitHub release for it")]
struct Cli {
    /// Token used for every GitHub API call
    #[arg(long, env = "INPUT_REPO_TOKEN", hide_env_values = true)]
    repo_token: String,

    /// Tag to create or move, and to attach the release to
    #[arg(long, env = "INPUT_RELEASE_TAG")]
    release_tag: String,

    /// Publish as a draft (JSON boolean)
    #[arg(long, env = "INPUT_DRAFT", action = ArgAction::Set, value_parser = |s: &str| parse_json_bool("draft", s))]
    draft: bool,

    /// Mark as a prerelease (JSON boolean)
    #[arg(long, env = "INPUT_PRERELEASE", action = ArgAction::Set, value_parser = |s: &str| parse_json_bool("prerelease", s))]
    prerelease: bool,

    /// Release title
    #[arg(long, env = "INPUT_TITLE")]
    title: String,

    /// Release notes; defaults to a note naming the triggering commit
    #[arg(long, env = "INPUT_BODY")]
    body: Option<String>,

    /// Repository in owner/name form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Commit the tag should point at
    #[arg(long, env = "GITHUB_SHA")]
    sha: String,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Path of the JSON payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => return Err(report_failure(e.into())),
    };

    run(cli).await.map_err(report_failure)
}

/// Reports a fatal error to the runner and hands it back for the exit status.
fn report_failure(err: anyhow::Error) -> anyhow::Error {
    println!("{}", failure_annotation(&err));
    tracing::error!("Release failed: {:?}", err);
    err
}

/// Workflow command the runner picks up as the step's failure message.
fn failure_annotation(err: &anyhow::Error) -> String {
    let message = format!("{:#}", err);
    let escaped = message
        .trim_end()
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{}", escaped)
}

async fn run(cli: Cli) -> Result<()> {
    let context = RunContext::new(&cli.repository, cli.sha, cli.api_url, cli.event_path)?;

    tracing::info!(
        "Initializing release of \"{}\" for {}/{} at {}",
        cli.release_tag,
        context.owner,
        context.repo,
        context.sha
    );
    config::event::dump_event_payload(context.event_path.as_deref());

    let request = ReleaseInputs {
        release_tag: cli.release_tag,
        title: cli.title,
        body: cli.body,
        draft: cli.draft,
        prerelease: cli.prerelease,
    }
    .into_request(&context);

    // Create GitHub client
    let github_client = GitHubClient::new(cli.repo_token, Some(&context.api_url))?;
    let publisher = ReleasePublisher::new(github_client);

    let release_id = publisher.publish(&request, &context.sha).await?;
    tracing::info!("Release {} published for tag \"{}\"", release_id, request.tag);

    Ok(())
}
