//! HTTP client for the GitHub REST API.
//!
//! Covers issue publishing, comment/reaction harvesting, release listing, and
//! contributor listing. Every endpoint is addressed relative to a configurable
//! base URL so tests can point the client at a wiremock server.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use sigintel_core::RepoRef;

use crate::error::GithubError;
use crate::types::{ErrorBody, Issue, IssueComment, Release, RepoContributor};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const PAGE_SIZE: &str = "100";

pub struct GithubClient {
    client: Client,
    token: Option<String>,
    base_url: Url,
}

impl GithubClient {
    /// Creates a client for the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GithubError> {
        Self::with_base_url(token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (GitHub Enterprise, or a mock
    /// server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`GithubError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GithubError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so joined paths append instead of
        // replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| GithubError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            token: token.map(str::to_owned).filter(|t| !t.trim().is_empty()),
            base_url,
        })
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Opens an issue on `repo`.
    ///
    /// # Errors
    ///
    /// - [`GithubError::Api`] on a non-2xx response.
    /// - [`GithubError::Http`] on network failure.
    /// - [`GithubError::Deserialize`] if the response has an unexpected shape.
    pub async fn create_issue(
        &self,
        repo: &RepoRef,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<Issue, GithubError> {
        let url = self.endpoint(&["repos", &repo.owner, &repo.name, "issues"], &[])?;
        let payload = serde_json::json!({ "title": title, "body": body, "labels": labels });
        let issue: Issue = Self::send(
            self.request(Method::POST, url).json(&payload),
            &format!("create issue on {repo}"),
        )
        .await?;
        tracing::info!(repo = %repo, number = issue.number, url = %issue.html_url, "created issue");
        Ok(issue)
    }

    /// Posts a comment on issue `number`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GithubClient::create_issue`].
    pub async fn create_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> Result<IssueComment, GithubError> {
        let number = number.to_string();
        let url = self.endpoint(
            &["repos", &repo.owner, &repo.name, "issues", &number, "comments"],
            &[],
        )?;
        let payload = serde_json::json!({ "body": body });
        let comment: IssueComment = Self::send(
            self.request(Method::POST, url).json(&payload),
            &format!("comment on {repo}#{number}"),
        )
        .await?;
        tracing::debug!(repo = %repo, issue = %number, comment = comment.id, "posted comment");
        Ok(comment)
    }

    /// Lists comments on issue `number`, each with its reaction rollup.
    ///
    /// Only the first 100 comments are returned.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GithubClient::create_issue`].
    pub async fn list_issue_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Vec<IssueComment>, GithubError> {
        let number = number.to_string();
        let url = self.endpoint(
            &["repos", &repo.owner, &repo.name, "issues", &number, "comments"],
            &[("per_page", PAGE_SIZE)],
        )?;
        Self::send(
            self.request(Method::GET, url),
            &format!("comments on {repo}#{number}"),
        )
        .await
    }

    /// Lists issues (open or closed) carrying `label` updated at or after
    /// `since`. Pull requests are filtered out.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GithubClient::create_issue`].
    pub async fn list_issues_with_label(
        &self,
        repo: &RepoRef,
        label: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Issue>, GithubError> {
        let since = since.to_rfc3339_opts(SecondsFormat::Secs, true);
        let url = self.endpoint(
            &["repos", &repo.owner, &repo.name, "issues"],
            &[
                ("labels", label),
                ("since", &since),
                ("state", "all"),
                ("per_page", PAGE_SIZE),
            ],
        )?;
        let issues: Vec<Issue> = Self::send(
            self.request(Method::GET, url),
            &format!("issues labelled {label} on {repo}"),
        )
        .await?;
        let issues: Vec<Issue> = issues.into_iter().filter(|i| !i.is_pull_request()).collect();
        tracing::info!(repo = %repo, label, since = %since, count = issues.len(), "listed labelled issues");
        Ok(issues)
    }

    /// Most recent releases of `repo`, newest first.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GithubClient::create_issue`].
    pub async fn list_releases(
        &self,
        repo: &RepoRef,
        limit: usize,
    ) -> Result<Vec<Release>, GithubError> {
        let per_page = limit.to_string();
        let url = self.endpoint(
            &["repos", &repo.owner, &repo.name, "releases"],
            &[("per_page", &per_page)],
        )?;
        Self::send(self.request(Method::GET, url), &format!("releases of {repo}"))
            .await
    }

    /// Top contributors of `repo` by commit count.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GithubClient::create_issue`].
    pub async fn list_contributors(
        &self,
        repo: &RepoRef,
        limit: usize,
    ) -> Result<Vec<RepoContributor>, GithubError> {
        let per_page = limit.to_string();
        let url = self.endpoint(
            &["repos", &repo.owner, &repo.name, "contributors"],
            &[("per_page", &per_page)],
        )?;
        Self::send(
            self.request(Method::GET, url),
            &format!("contributors of {repo}"),
        )
        .await
    }

    /// Appends percent-encoded path segments and query pairs to the base URL.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, GithubError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GithubError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request, maps non-2xx responses to [`GithubError::Api`], and
    /// parses the body as `T`.
    async fn send<T: DeserializeOwned>(
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, GithubError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(GithubError::Api {
                status: status.as_u16(),
                context: context.to_string(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| GithubError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GithubClient {
        GithubClient::with_base_url(Some("t0k3n"), 10, "sigintel-test", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_joins_segments_under_base() {
        let client = test_client("https://api.github.com");
        let url = client
            .endpoint(&["repos", "acme", "intel", "issues"], &[])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/acme/intel/issues");
    }

    #[test]
    fn endpoint_keeps_enterprise_prefix() {
        let client = test_client("https://ghe.example.com/api/v3/");
        let url = client
            .endpoint(&["repos", "acme", "intel", "releases"], &[("per_page", "5")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/acme/intel/releases?per_page=5"
        );
    }

    #[test]
    fn endpoint_encodes_query_values() {
        let client = test_client("https://api.github.com");
        let url = client
            .endpoint(&["repos", "a", "b", "issues"], &[("labels", "signal intel")])
            .unwrap();
        assert!(url.as_str().ends_with("labels=signal+intel"), "{url}");
    }

    #[test]
    fn blank_token_is_ignored() {
        let client = GithubClient::with_base_url(Some("  "), 10, "ua", "https://api.github.com")
            .unwrap();
        assert!(!client.has_token());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = GithubClient::with_base_url(None, 10, "ua", "not a url");
        assert!(matches!(result, Err(GithubError::InvalidBaseUrl(_))));
    }
}
