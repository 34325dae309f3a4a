/// Episode domain types
use crate::duration::format_duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Episode identifier
///
/// The API uses human-readable slugs, so this is a plain string wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(String);

impl EpisodeId {
    /// Create a new episode ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EpisodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A playable podcast episode
///
/// Episodes are read-only once built. `duration_as_string` is derived from
/// `duration` by the constructor and is never set on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Unique episode identifier
    pub id: EpisodeId,

    /// Episode title
    pub title: String,

    /// Credits line (hosts and guests)
    pub members: String,

    /// Cover image URL
    pub thumbnail: String,

    /// Audio resource URL
    pub url: String,

    /// Length in whole seconds
    pub duration: u64,

    /// `duration` formatted as `HH:MM:SS`
    pub duration_as_string: String,

    /// Display date (`d MMM yy`)
    pub published_at: String,

    /// HTML description, only present on detail fetches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Episode {
    /// Create an episode, deriving the formatted duration
    pub fn new(
        id: impl Into<EpisodeId>,
        title: impl Into<String>,
        members: impl Into<String>,
        thumbnail: impl Into<String>,
        url: impl Into<String>,
        duration: u64,
        published_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            members: members.into(),
            thumbnail: thumbnail.into(),
            url: url.into(),
            duration,
            duration_as_string: format_duration(duration),
            published_at: published_at.into(),
            description: None,
        }
    }

    /// Attach the HTML description shown on the detail page
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
