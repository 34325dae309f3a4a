//! Types for the episode API requests and responses.

use crate::dates::format_published_at;
use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use sound_core::{parse_seconds, Episode};
use std::time::Duration;

/// Configuration for connecting to the episode API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:3333")
    pub url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Create a config with default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Listing Query
// =============================================================================

/// Sort direction for episode listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query parameters for `GET /episodes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeQuery {
    /// Maximum number of episodes (`_limit`)
    pub limit: Option<u32>,
    /// Sort direction (`_order`)
    pub order: SortOrder,
    /// Field to sort by (`_sort`)
    pub sort: String,
}

impl EpisodeQuery {
    /// Most recent episodes first.
    pub fn latest(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            order: SortOrder::Desc,
            sort: "published_at".to_string(),
        }
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(limit) = self.limit {
            params.push(("_limit", limit.to_string()));
        }
        params.push(("_order", self.order.as_str().to_string()));
        params.push(("_sort", self.sort.clone()));
        params
    }
}

impl Default for EpisodeQuery {
    fn default() -> Self {
        Self::latest(12)
    }
}

// =============================================================================
// Raw Records
// =============================================================================

/// Episode record as served by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEpisode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    #[serde(default)]
    pub description: Option<String>,
    pub published_at: String,
    pub file: RawFile,
}

/// Audio file section of an episode record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFile {
    pub url: String,
    pub duration: RawDuration,
}

/// Duration as sent by the API: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Number(f64),
    Text(String),
}

impl RawDuration {
    /// Whole seconds, rejecting negative or non-numeric values.
    pub fn to_seconds(&self) -> sound_core::Result<u64> {
        match self {
            RawDuration::Number(value) => parse_seconds(&value.to_string()),
            RawDuration::Text(text) => parse_seconds(text),
        }
    }
}

impl RawEpisode {
    /// Decode one entry of a listing.
    ///
    /// Structural problems (missing fields, a `null` duration) are reported
    /// as [`ClientError::InvalidRecord`] carrying the entry's id when it has
    /// one.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let id = value
            .get("id")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("<unknown>")
            .to_string();

        serde_json::from_value(value).map_err(|e| ClientError::InvalidRecord {
            id,
            reason: e.to_string(),
        })
    }

    /// Map the record into an [`Episode`].
    ///
    /// Fails when the duration or the publication timestamp is unusable.
    pub fn into_episode(self) -> Result<Episode> {
        let duration = self
            .file
            .duration
            .to_seconds()
            .map_err(|e| ClientError::InvalidRecord {
                id: self.id.clone(),
                reason: e.to_string(),
            })?;

        let published_at =
            format_published_at(&self.published_at).ok_or_else(|| ClientError::InvalidRecord {
                id: self.id.clone(),
                reason: format!("unrecognized published_at {:?}", self.published_at),
            })?;

        let episode = Episode::new(
            self.id.as_str(),
            self.title,
            self.members,
            self.thumbnail,
            self.file.url,
            duration,
            published_at,
        );

        Ok(match self.description {
            Some(description) => episode.with_description(description),
            None => episode,
        })
    }
}
