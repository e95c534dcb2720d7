//! External CI dispatch
//!
//! Triggers a GitHub Actions workflow run that compiles a generated scaffold
//! into installable binaries. Fire-and-forget: success means the remote
//! accepted the dispatch, not that the build completed, and a dispatch
//! failure never invalidates an already-produced artifact. Polling the
//! remote job is out of scope.

use crate::models::error::BuildError;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_WORKFLOW: &str = "build.yml";
pub const DEFAULT_BRANCH: &str = "main";

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Debug, Clone)]
pub struct DispatchRequest {
    /// CI access token.
    pub token: String,
    /// `owner/name` repository identifier.
    pub repository: String,
    /// Workflow file name inside the repository.
    pub workflow: String,
    /// Branch the workflow runs against.
    pub branch: String,
    pub app_name: String,
    pub app_id: String,
    pub web_url: Option<String>,
}

impl DispatchRequest {
    pub fn new(
        token: impl Into<String>,
        repository: impl Into<String>,
        app_name: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            repository: repository.into(),
            workflow: DEFAULT_WORKFLOW.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            app_name: app_name.into(),
            app_id: app_id.into(),
            web_url: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct DispatchPayload<'a> {
    #[serde(rename = "ref")]
    git_ref: &'a str,
    inputs: DispatchInputs<'a>,
}

#[derive(Debug, Serialize)]
struct DispatchInputs<'a> {
    app_name: &'a str,
    app_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_url: Option<&'a str>,
}

fn split_repository(repository: &str) -> Result<(&str, &str), BuildError> {
    match repository.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok((owner, name)),
        _ => Err(BuildError::validation(format!(
            "repository must be owner/name, got {:?}",
            repository
        ))),
    }
}

/// Dispatch a workflow run against the public GitHub API.
pub async fn dispatch_workflow(request: &DispatchRequest) -> Result<(), BuildError> {
    dispatch_workflow_to(GITHUB_API_BASE, request).await
}

/// Dispatch against an explicit API base. Split out so tests can point at a
/// local server.
pub async fn dispatch_workflow_to(
    api_base: &str,
    request: &DispatchRequest,
) -> Result<(), BuildError> {
    if request.token.is_empty() {
        return Err(BuildError::validation("dispatch token must not be empty"));
    }
    let (owner, name) = split_repository(&request.repository)?;

    let url = format!(
        "{}/repos/{}/{}/actions/workflows/{}/dispatches",
        api_base, owner, name, request.workflow
    );
    let payload = DispatchPayload {
        git_ref: &request.branch,
        inputs: DispatchInputs {
            app_name: &request.app_name,
            app_id: &request.app_id,
            web_url: request.web_url.as_deref(),
        },
    };

    let client = reqwest::Client::builder()
        .user_agent("web2app (https://github.com/web2app/web2app)")
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| BuildError::Dispatch(format!("failed to build HTTP client: {}", e)))?;

    let response = client
        .post(&url)
        .bearer_auth(&request.token)
        .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .json(&payload)
        .send()
        .await
        .map_err(|e| BuildError::Dispatch(format!("dispatch request failed: {}", e)))?;

    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(BuildError::Dispatch(format!(
            "remote rejected dispatch: {} {}",
            status,
            body.trim()
        )))
    }
}
