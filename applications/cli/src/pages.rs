//! Text renditions of the Sound+ pages
//!
//! Each page owns the data it was built from and knows how to hand episodes
//! to the player store.

use crate::error;
use chrono::NaiveDate;
use sound_client::{EpisodeClient, EpisodeQuery};
use sound_core::{Episode, EpisodeId};
use sound_playback::{PlaybackError, PlayerStore};
use std::fmt::Write as _;

pub const BRAND: &str = "Sound+";
pub const TAGLINE: &str = "Nothing but the moment";

/// Landing page: two recommended episodes followed by the full table
#[derive(Debug, Clone, Default)]
pub struct HomePage {
    latest: Vec<Episode>,
    all: Vec<Episode>,
}

impl HomePage {
    /// Number of episodes shown in the recommended section
    pub const LATEST_COUNT: usize = 2;

    /// Split a newest-first listing into recommended and remaining episodes
    pub fn from_episodes(mut episodes: Vec<Episode>) -> Self {
        let split = episodes.len().min(Self::LATEST_COUNT);
        let all = episodes.split_off(split);
        Self {
            latest: episodes,
            all,
        }
    }

    /// Fetch the newest episodes and build the page from them
    pub async fn fetch(client: &EpisodeClient, query: &EpisodeQuery) -> error::Result<Self> {
        let episodes = client.list_episodes(query).await?;
        Ok(Self::from_episodes(episodes))
    }

    pub fn latest(&self) -> &[Episode] {
        &self.latest
    }

    pub fn all(&self) -> &[Episode] {
        &self.all
    }

    /// Both sections as one playback queue, recommended first
    pub fn queue(&self) -> Vec<Episode> {
        self.latest.iter().chain(&self.all).cloned().collect()
    }

    /// Queue position of the `index`-th recommended episode
    pub fn latest_start_index(&self, index: usize) -> Option<usize> {
        (index < self.latest.len()).then_some(index)
    }

    /// Queue position of the `index`-th row of the table
    pub fn all_start_index(&self, index: usize) -> Option<usize> {
        (index < self.all.len()).then_some(index + self.latest.len())
    }

    /// Play the whole page starting from a recommended episode
    pub fn play_latest(&self, store: &mut PlayerStore, index: usize) -> Result<(), PlaybackError> {
        let start = self
            .latest_start_index(index)
            .ok_or(PlaybackError::IndexOutOfBounds {
                index,
                len: self.latest.len(),
            })?;
        store.play_list(self.queue(), start)
    }

    /// Play the whole page starting from a table row
    pub fn play_from_all(&self, store: &mut PlayerStore, index: usize) -> Result<(), PlaybackError> {
        let start = self
            .all_start_index(index)
            .ok_or(PlaybackError::IndexOutOfBounds {
                index,
                len: self.all.len(),
            })?;
        store.play_list(self.queue(), start)
    }

    /// Play the whole page starting from the number shown next to an
    /// episode in [`HomePage::render`]
    pub fn play_listed(&self, store: &mut PlayerStore, number: usize) -> Result<(), PlaybackError> {
        let len = self.latest.len() + self.all.len();
        if number >= len {
            return Err(PlaybackError::IndexOutOfBounds { index: number, len });
        }

        match number.checked_sub(self.latest.len()) {
            Some(row) => self.play_from_all(store, row),
            None => self.play_latest(store, number),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Recommended by {}", BRAND);
        for (i, episode) in self.latest.iter().enumerate() {
            let _ = writeln!(
                out,
                "  [{}] {}\n      {} · {} · {}",
                i, episode.title, episode.members, episode.published_at, episode.duration_as_string
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "All Songs");
        let _ = writeln!(out, "  {:<4} {:<40} {:<30} {:>10}", "#", "Song", "Artist", "Duration");
        for (i, episode) in self.all.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:<4} {:<40} {:<30} {:>10}",
                i + self.latest.len(),
                truncate(&episode.title, 40),
                truncate(&episode.members, 30),
                episode.duration_as_string
            );
        }

        out
    }
}

/// Detail page for a single episode
#[derive(Debug, Clone)]
pub struct EpisodePage {
    episode: Episode,
}

impl EpisodePage {
    pub fn new(episode: Episode) -> Self {
        Self { episode }
    }

    pub async fn fetch(client: &EpisodeClient, id: &EpisodeId) -> error::Result<Self> {
        Ok(Self::new(client.get_episode(id).await?))
    }

    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    /// Play just this episode
    pub fn play(&self, store: &mut PlayerStore) {
        store.play(self.episode.clone());
    }

    pub fn render(&self) -> String {
        let episode = &self.episode;
        let mut out = String::new();

        let _ = writeln!(out, "{}", episode.title);
        let _ = writeln!(out, "By {}", episode.members);
        let _ = writeln!(out, "{} · {}", episode.published_at, episode.duration_as_string);
        let _ = writeln!(out);
        let _ = writeln!(out, "Who is {}", episode.members);
        if let Some(description) = &episode.description {
            let _ = writeln!(out, "{}", strip_html(description));
        }

        out
    }
}

/// Header line: brand, tagline and today's date (`Mo, 19 October`)
pub fn render_header(today: NaiveDate) -> String {
    format!("{} | {} | {}", BRAND, TAGLINE, header_date(today))
}

/// Two-letter weekday, day of month and full month name, in English
pub fn header_date(date: NaiveDate) -> String {
    let weekday = date.format("%a").to_string();
    let short: String = weekday.chars().take(2).collect();
    format!("{}, {}", short, date.format("%-d %B"))
}

/// Reduce an HTML fragment to plain text
///
/// Block-level closing tags and `<br>` become line breaks, everything else
/// is dropped. A handful of common entities are decoded.
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut tag = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match (in_tag, c) {
            (false, '<') => {
                in_tag = true;
                tag.clear();
            }
            (true, '>') => {
                in_tag = false;
                let name = tag
                    .trim_start_matches('/')
                    .split(|c: char| c.is_whitespace() || c == '/')
                    .next()
                    .unwrap_or("")
                    .to_ascii_lowercase();
                let closing = tag.starts_with('/');
                if name == "br" || (closing && matches!(name.as_str(), "p" | "div" | "li")) {
                    text.push('\n');
                }
            }
            (true, c) => tag.push(c),
            (false, c) => text.push(c),
        }
    }

    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
