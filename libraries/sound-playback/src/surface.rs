//! Player surface
//!
//! Binds a [`PlayerStore`] to a live [`MediaPrimitive`]. State flows both
//! ways:
//! - store -> media: [`PlayerSurface::sync`] loads episodes and issues
//!   play/pause when the store's intent changes
//! - media -> store: [`PlayerSurface::handle_media_event`] reconciles the
//!   playing flag, tracks progress and advances on end of episode
//!
//! The surface remembers the last play/pause state the media is known to be
//! in. Media-reported events update that memory before the store is touched,
//! so an event never bounces back as a redundant command.

use crate::error::{PlaybackError, Result};
use crate::media::{MediaEvent, MediaPrimitive};
use crate::store::PlayerStore;
use crate::types::{ButtonState, Controls};
use sound_core::{format_duration, EpisodeId};
use std::time::Duration;
use tracing::debug;

/// Player surface driving a media primitive
#[derive(Debug)]
pub struct PlayerSurface<M: MediaPrimitive> {
    media: M,

    /// Elapsed seconds of the current episode
    progress: u64,

    /// Last store selection applied to the media
    seen_selection: u64,

    loaded_episode: Option<EpisodeId>,
    media_playing: bool,
    media_looping: bool,
}

impl<M: MediaPrimitive> PlayerSurface<M> {
    /// Create a surface around a media primitive
    pub fn new(media: M) -> Self {
        Self {
            media,
            progress: 0,
            seen_selection: 0,
            loaded_episode: None,
            media_playing: false,
            media_looping: false,
        }
    }

    /// Access the underlying media primitive
    pub fn media(&self) -> &M {
        &self.media
    }

    /// Mutable access to the underlying media primitive
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Apply the store's state to the media element
    ///
    /// Call after every store mutation. Only issues commands for things
    /// that changed since the last call.
    pub fn sync(&mut self, store: &PlayerStore) {
        if store.is_looping() != self.media_looping {
            self.media_looping = store.is_looping();
            self.media.set_looping(self.media_looping);
        }

        if store.selection() != self.seen_selection {
            self.seen_selection = store.selection();
            self.apply_selection(store);
            return;
        }

        if store.current_episode().is_none() {
            return;
        }

        if store.is_playing() != self.media_playing {
            self.command_playing(store.is_playing());
        }
    }

    /// Feed an event reported by the media element
    ///
    /// Re-syncs the media with the store afterwards.
    pub fn handle_media_event(&mut self, store: &mut PlayerStore, event: MediaEvent) {
        match event {
            MediaEvent::PlayStarted => {
                self.media_playing = true;
                store.set_playing_state(true);
            }
            MediaEvent::Paused => {
                self.media_playing = false;
                store.set_playing_state(false);
            }
            MediaEvent::TimeAdvanced(position) => {
                self.progress = position.as_secs();
            }
            MediaEvent::MetadataLoaded => {
                self.media.seek(Duration::ZERO);
                self.progress = 0;
            }
            MediaEvent::Ended => {
                self.media_playing = false;
                self.handle_ended(store);
            }
        }

        self.sync(store);
    }

    /// Seek the current episode to `seconds`
    ///
    /// Position and progress are updated together. The position is clamped
    /// to the episode duration.
    pub fn seek(&mut self, store: &PlayerStore, seconds: u64) -> Result<()> {
        let episode = store
            .current_episode()
            .ok_or(PlaybackError::NoEpisodeLoaded)?;

        let position = seconds.min(episode.duration);
        self.media.seek(Duration::from_secs(position));
        self.progress = position;
        Ok(())
    }

    /// Elapsed seconds of the current episode
    pub fn progress(&self) -> u64 {
        self.progress
    }

    /// Elapsed time as `HH:MM:SS`
    pub fn progress_label(&self) -> String {
        format_duration(self.progress)
    }

    /// Current episode length as `HH:MM:SS` (`00:00:00` when empty)
    pub fn duration_label(&self, store: &PlayerStore) -> String {
        format_duration(store.current_episode().map_or(0, |e| e.duration))
    }

    /// Enabled/active state of every control
    pub fn controls(&self, store: &PlayerStore) -> Controls {
        let has_episode = store.current_episode().is_some();

        Controls {
            shuffle: ButtonState {
                enabled: has_episode && store.queue().len() > 1,
                active: store.is_shuffling(),
            },
            previous: ButtonState {
                enabled: has_episode && store.has_previous(),
                active: false,
            },
            play_pause: ButtonState {
                enabled: has_episode,
                active: store.is_playing(),
            },
            next: ButtonState {
                enabled: has_episode && store.has_next(),
                active: false,
            },
            looping: ButtonState {
                enabled: has_episode,
                active: store.is_looping(),
            },
        }
    }

    fn apply_selection(&mut self, store: &PlayerStore) {
        self.progress = 0;

        let Some(episode) = store.current_episode() else {
            if self.loaded_episode.take().is_some() {
                debug!("Unloading media");
                self.media.unload();
            }
            self.media_playing = false;
            return;
        };

        if self.loaded_episode.as_ref() == Some(&episode.id) {
            debug!(episode_id = %episode.id, "Restarting episode");
            self.media.seek(Duration::ZERO);
        } else {
            debug!(episode_id = %episode.id, url = %episode.url, "Loading episode");
            self.media.load(&episode.url);
            self.loaded_episode = Some(episode.id.clone());
            self.media_playing = false;
        }

        if store.is_playing() != self.media_playing {
            self.command_playing(store.is_playing());
        }
    }

    fn handle_ended(&mut self, store: &mut PlayerStore) {
        let selection = store.selection();
        store.handle_episode_ended();

        if store.current_episode().is_none() {
            return;
        }

        if store.selection() == selection {
            // Looping on the last episode: nothing to advance to, replay it
            self.media.seek(Duration::ZERO);
            self.progress = 0;
        }

        // The next episode starts on its own, like an autoplaying element
        store.set_playing_state(true);
    }

    fn command_playing(&mut self, playing: bool) {
        if playing {
            self.media.play();
        } else {
            self.media.pause();
        }
        self.media_playing = playing;
    }
}
