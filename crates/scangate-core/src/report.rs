// SPDX-License-Identifier: Apache-2.0

//! SARIF report upload to GitHub code scanning.
//!
//! The SARIF payload itself is opaque to this tool: it is downloaded from the
//! scan engine as raw bytes, base64-encoded, and posted to the repository's
//! code-scanning endpoint so findings show up as code scanning alerts.

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ScangateError;

/// Tool name attached to uploaded SARIF runs.
pub const TOOL_NAME: &str = "Scangate DAST";

/// Repository a SARIF report is uploaded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl RepoTarget {
    /// Parses an `owner/repo` slug.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the slug is not `owner/repo`.
    pub fn parse(slug: &str) -> Result<Self> {
        match slug.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(ScangateError::Config {
                message: format!("Invalid repository slug: {slug} (expected owner/repo)"),
            }
            .into()),
        }
    }

    /// Reads the target repository from `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns [`ScangateError::MissingRepository`] when the variable is
    /// unset, or a configuration error when it is malformed.
    pub fn from_env() -> Result<Self> {
        let slug =
            std::env::var("GITHUB_REPOSITORY").map_err(|_| ScangateError::MissingRepository)?;
        Self::parse(&slug)
    }
}

/// Request body for the code-scanning SARIF endpoint.
#[derive(Debug, Serialize)]
struct SarifUploadBody<'a> {
    /// Base64-encoded SARIF document.
    sarif: String,
    /// Git ref the analysis applies to.
    #[serde(rename = "ref")]
    git_ref: &'a str,
    /// Commit the analysis was run against.
    commit_sha: &'a str,
    /// Display name of the producing tool.
    tool_name: &'a str,
    /// `file://` URI of the analyzed checkout.
    checkout_uri: String,
}

/// Client for the GitHub code-scanning upload endpoint.
#[derive(Debug, Clone)]
pub struct CodeScanningClient {
    http: Client,
    token: SecretString,
    api_base: String,
}

impl CodeScanningClient {
    /// Creates a client authenticated with a GitHub token.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(token: SecretString, timeout: std::time::Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("scangate")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            token,
            api_base: "https://api.github.com".to_string(),
        })
    }

    /// Uploads a SARIF report for `target` at the given ref and commit.
    ///
    /// # Errors
    ///
    /// Returns [`ScangateError::EmptyReport`] for an empty report body, or an
    /// API/network error if the upload is rejected.
    pub async fn upload(
        &self,
        target: &RepoTarget,
        git_ref: &str,
        commit_sha: &str,
        sarif: &[u8],
    ) -> Result<()> {
        if sarif.is_empty() {
            return Err(ScangateError::EmptyReport.into());
        }

        let url = format!(
            "{}/repos/{}/{}/code-scanning/sarifs",
            self.api_base, target.owner, target.repo
        );
        let body = SarifUploadBody {
            sarif: BASE64.encode(sarif),
            git_ref,
            commit_sha,
            tool_name: TOOL_NAME,
            checkout_uri: checkout_uri(),
        };

        info!(
            owner = %target.owner,
            repo = %target.repo,
            "uploading SARIF results to GitHub"
        );

        let response = self
            .http
            .post(&url)
            .header(
                "Authorization",
                format!("token {}", self.token.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(ScangateError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ScangateError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        debug!("SARIF upload complete");
        Ok(())
    }
}

/// `file://` URI of the current working directory.
fn checkout_uri() -> String {
    std::env::current_dir().map_or_else(
        |_| "file:///".to_string(),
        |dir| format!("file://{}", dir.display()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_target_parse() {
        let target = RepoTarget::parse("octo/widgets").unwrap();
        assert_eq!(target.owner, "octo");
        assert_eq!(target.repo, "widgets");
    }

    #[test]
    fn test_repo_target_parse_rejects_malformed() {
        assert!(RepoTarget::parse("octo").is_err());
        assert!(RepoTarget::parse("/widgets").is_err());
        assert!(RepoTarget::parse("octo/").is_err());
        assert!(RepoTarget::parse("").is_err());
    }

    #[test]
    #[serial_test::serial]
    fn test_repo_target_from_env() {
        // modifying process env is test-only; serialized against other env tests
        unsafe { std::env::set_var("GITHUB_REPOSITORY", "octo/widgets") };
        let target = RepoTarget::from_env().unwrap();
        assert_eq!(target, RepoTarget::parse("octo/widgets").unwrap());
        unsafe { std::env::remove_var("GITHUB_REPOSITORY") };
    }

    #[test]
    #[serial_test::serial]
    fn test_repo_target_from_env_missing() {
        unsafe { std::env::remove_var("GITHUB_REPOSITORY") };
        let err = RepoTarget::from_env().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScangateError>(),
            Some(ScangateError::MissingRepository)
        ));
    }

    #[test]
    fn test_upload_body_field_names() {
        let body = SarifUploadBody {
            sarif: BASE64.encode(b"{}"),
            git_ref: "refs/heads/main",
            commit_sha: "abc123",
            tool_name: TOOL_NAME,
            checkout_uri: "file:///work".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["ref"], "refs/heads/main");
        assert_eq!(json["commit_sha"], "abc123");
        assert_eq!(json["tool_name"], TOOL_NAME);
        assert_eq!(json["sarif"], BASE64.encode(b"{}"));
        assert_eq!(json["checkout_uri"], "file:///work");
    }
}
