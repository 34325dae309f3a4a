//! Sound+ Episode API Client
//!
//! HTTP client library for the REST API that serves Sound+ episodes.
//!
//! # Features
//!
//! - **Listing**: `GET /episodes` with `_limit`/`_order`/`_sort` parameters
//! - **Detail**: `GET /episodes/{id}`
//! - **Mapping**: raw records become [`sound_core::Episode`] values with a
//!   parsed duration, its `HH:MM:SS` form and a display date
//!
//! # Example
//!
//! ```ignore
//! use sound_client::{ClientConfig, EpisodeClient, EpisodeQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EpisodeClient::new(ClientConfig::new("http://localhost:3333"))?;
//!
//!     for episode in client.list_episodes(&EpisodeQuery::default()).await? {
//!         println!("{} ({})", episode.title, episode.duration_as_string);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod dates;
mod error;
mod types;

// Re-export main types
pub use client::EpisodeClient;
pub use dates::{format_published_at, parse_published_at};
pub use error::{ClientError, Result};
pub use types::{ClientConfig, EpisodeQuery, RawDuration, RawEpisode, RawFile, SortOrder};
