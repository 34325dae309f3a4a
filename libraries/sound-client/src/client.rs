//! Episode API client.

use crate::error::{ClientError, Result};
use crate::types::{ClientConfig, EpisodeQuery, RawEpisode};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use sound_core::{Episode, EpisodeId};
use tracing::{debug, info, warn};
use url::Url;

/// Client for the episode API.
///
/// # Example
///
/// ```ignore
/// use sound_client::{ClientConfig, EpisodeClient, EpisodeQuery};
///
/// let client = EpisodeClient::new(ClientConfig::new("http://localhost:3333"))?;
///
/// let episodes = client.list_episodes(&EpisodeQuery::latest(12)).await?;
/// println!("Found {} episodes", episodes.len());
///
/// let detail = client.get_episode(&episodes[0].id).await?;
/// println!("{}", detail.title);
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeClient {
    http: Client,
    base_url: Url,
}

impl EpisodeClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/');
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        let base_url = Url::parse(url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("SoundPlus/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Get the API base URL (without trailing slash).
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// List episodes (`GET /episodes`).
    ///
    /// Records that cannot be decoded or mapped to an episode are skipped
    /// with a warning. Only a body that is not a JSON array fails.
    pub async fn list_episodes(&self, query: &EpisodeQuery) -> Result<Vec<Episode>> {
        let url = self.endpoint(&["episodes"])?;
        debug!(url = %url, ?query, "Fetching episodes");

        let response = self
            .send(self.http.get(url).query(&query.to_params()))
            .await?;
        let response = check_status(response, None).await?;

        let records: Vec<serde_json::Value> = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse episode list: {}", e))
        })?;

        let total = records.len();
        let episodes: Vec<Episode> = records
            .into_iter()
            .filter_map(|record| {
                let mapped = RawEpisode::from_value(record).and_then(RawEpisode::into_episode);
                match mapped {
                    Ok(episode) => Some(episode),
                    Err(e) => {
                        warn!(error = %e, "Skipping malformed episode record");
                        None
                    }
                }
            })
            .collect();

        info!(
            fetched = total,
            usable = episodes.len(),
            "Fetched episode list"
        );

        Ok(episodes)
    }

    /// Fetch a single episode (`GET /episodes/{id}`).
    pub async fn get_episode(&self, id: &EpisodeId) -> Result<Episode> {
        let url = self.endpoint(&["episodes", id.as_str()])?;
        debug!(url = %url, episode_id = %id, "Fetching episode");

        let response = self.send(self.http.get(url)).await?;
        let response = check_status(response, Some(id)).await?;

        let record: RawEpisode = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse episode {}: {}", id, e))
        })?;

        record.into_episode()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::ServerUnreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })
    }
}

async fn check_status(response: Response, id: Option<&EpisodeId>) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(ClientError::NotFound(id.to_string()));
        }
    }

    let error_text = response.text().await.unwrap_or_default();
    Err(ClientError::ServerError {
        status: status.as_u16(),
        message: error_text,
    })
}
