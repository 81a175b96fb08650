use crate::client_error::PrebunClientError;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, LINK};
use serde::{Deserialize, Serialize};
use starbase_styles::color;
use starbase_utils::fs::{self, FsError};
use std::fmt;
use std::io::Write;
use std::path::Path;
use tracing::{debug, instrument, trace};

pub const RELEASES_PER_PAGE: usize = 100;

/// Owner and name of a GitHub repository, for example `oven-sh/bun`.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct RepoCoordinates {
    pub owner: String,
    pub name: String,
}

impl RepoCoordinates {
    pub fn new(owner: impl AsRef<str>, name: impl AsRef<str>) -> Self {
        Self {
            owner: owner.as_ref().to_owned(),
            name: name.as_ref().to_owned(),
        }
    }

    /// Parse an `owner/name` slug.
    pub fn parse(slug: &str) -> Option<Self> {
        let (owner, name) = slug.trim().split_once('/')?;

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }

        Some(Self::new(owner, name))
    }
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GitHubRelease {
    pub tag_name: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReleasePage {
    pub releases: Vec<GitHubRelease>,
    pub has_next: bool,
}

/// Network seam used by the resolver and installer. Implementations are
/// expected to be pre-authenticated.
#[async_trait]
pub trait ReleaseClient: Send + Sync {
    /// Load a single page (1-indexed) of releases for the repository.
    async fn list_releases_page(
        &self,
        repo: &RepoCoordinates,
        page: usize,
    ) -> Result<ReleasePage, PrebunClientError>;

    /// Download the file at the URL and write it to the destination,
    /// creating parent directories as needed.
    async fn download_file(&self, url: &str, dest_file: &Path) -> Result<(), PrebunClientError>;
}

/// Return true if a `Link` header advertises another page.
pub fn has_next_link(header: &str) -> bool {
    header
        .split(',')
        .any(|part| part.split(';').skip(1).any(|param| param.trim() == "rel=\"next\""))
}

/// Client for the GitHub REST API and release downloads.
pub struct GitHubClient {
    api_host: String,
    client: reqwest::Client,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_host: impl AsRef<str>, token: Option<String>) -> Result<Self, PrebunClientError> {
        debug!("Creating HTTP client");

        let client = reqwest::Client::builder()
            .user_agent(format!("prebun@{}", env!("CARGO_PKG_VERSION")))
            .use_rustls_tls()
            .build()
            .map_err(|error| PrebunClientError::CreateFailed {
                error: Box::new(error),
            })?;

        if token.is_some() {
            trace!("Authenticating API requests with a token");
        }

        Ok(Self {
            api_host: api_host.as_ref().trim_end_matches('/').to_owned(),
            client,
            token,
        })
    }
}

#[async_trait]
impl ReleaseClient for GitHubClient {
    #[instrument(skip(self))]
    async fn list_releases_page(
        &self,
        repo: &RepoCoordinates,
        page: usize,
    ) -> Result<ReleasePage, PrebunClientError> {
        let url = format!("{}/repos/{}/{}/releases", self.api_host, repo.owner, repo.name);
        let handle_http_error = |error: reqwest::Error| PrebunClientError::Http {
            url: url.clone(),
            error: Box::new(error),
        };

        trace!(page, "Loading releases from {}", color::url(&url));

        let mut request = self
            .client
            .get(&url)
            .query(&[
                ("per_page", RELEASES_PER_PAGE.to_string()),
                ("page", page.to_string()),
            ])
            .header(ACCEPT, "application/vnd.github+json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(handle_http_error)?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(PrebunClientError::NotFound { url });
        }

        if !status.is_success() {
            return Err(PrebunClientError::InvalidResponse {
                url,
                status: status.to_string(),
            });
        }

        let has_next = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .is_some_and(has_next_link);

        let releases: Vec<GitHubRelease> = response.json().await.map_err(handle_http_error)?;

        Ok(ReleasePage { releases, has_next })
    }

    #[instrument(skip(self))]
    async fn download_file(&self, url: &str, dest_file: &Path) -> Result<(), PrebunClientError> {
        let handle_http_error = |error: reqwest::Error| PrebunClientError::Http {
            url: url.to_owned(),
            error: Box::new(error),
        };
        let handle_io_error = |error: std::io::Error| FsError::Write {
            path: dest_file.to_path_buf(),
            error: Box::new(error),
        };

        debug!(
            dest_file = ?dest_file,
            "Downloading file from {}",
            color::url(url),
        );

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(handle_http_error)?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(PrebunClientError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(PrebunClientError::InvalidResponse {
                url: url.to_owned(),
                status: status.to_string(),
            });
        }

        if let Some(parent) = dest_file.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::create_file(dest_file)?;

        while let Some(chunk) = response.chunk().await.map_err(handle_http_error)? {
            file.write_all(&chunk).map_err(handle_io_error)?;
        }

        file.flush().map_err(handle_io_error)?;

        debug!(dest_file = ?dest_file, "Downloaded file");

        Ok(())
    }
}
