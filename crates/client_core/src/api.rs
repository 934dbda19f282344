use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
};
use shared::{
    domain::MinistryId,
    error::ApiError,
    protocol::{decode_group_list, GroupResponse},
};
use tracing::{debug, info};
use url::Url;

use crate::{error::FetchError, settings::Settings};

/// Anything that can produce the ministry's group hierarchy.
#[async_trait]
pub trait GroupSource: Send + Sync {
    async fn fetch_groups(&self) -> Result<Vec<GroupResponse>, FetchError>;
}

/// Church API client. Every request carries the configured bearer token.
#[derive(Debug, Clone)]
pub struct ChurchApiClient {
    http: Client,
    base_url: Url,
    ministry_id: MinistryId,
}

impl ChurchApiClient {
    pub fn new(
        base_url: &str,
        token: &str,
        ministry_id: MinistryId,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| FetchError::InvalidToken)?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
            ministry_id,
        })
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let token = settings.require_token()?;
        let ministry_id = settings.require_ministry()?;
        Self::new(
            &settings.church_api_url,
            token,
            ministry_id,
            settings.request_timeout(),
        )
        .with_context(|| format!("failed to build client for {}", settings.church_api_url))
    }

    pub fn ministry_id(&self) -> MinistryId {
        self.ministry_id
    }

    pub fn groups_url(&self) -> Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(&format!("groups/ministries/{}", self.ministry_id))?;
        url.query_pairs_mut().append_pair("hierarchy", "true");
        Ok(url)
    }
}

/// Relative joins drop the last path segment unless it ends in a slash.
fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let raw = raw.trim();
    if raw.ends_with('/') {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{raw}/"))
    }
}

#[async_trait]
impl GroupSource for ChurchApiClient {
    async fn fetch_groups(&self) -> Result<Vec<GroupResponse>, FetchError> {
        let url = self.groups_url()?;
        debug!(%url, "fetching ministry groups");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &body).into());
        }

        let groups: Vec<GroupResponse> = decode_group_list(&body)?;
        info!(
            ministry_id = %self.ministry_id,
            groups = groups.len(),
            "fetched ministry groups"
        );
        Ok(groups)
    }
}

/// Reads a saved hierarchy response from disk, for offline use.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl GroupSource for SnapshotSource {
    async fn fetch_groups(&self) -> Result<Vec<GroupResponse>, FetchError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;
        let groups: Vec<GroupResponse> = decode_group_list(&raw)?;
        debug!(path = %self.path.display(), groups = groups.len(), "loaded snapshot");
        Ok(groups)
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
