//! Player state store
//!
//! Single source of truth for what the player is doing. The store is created
//! once per session and handed by reference to every consumer; all writes go
//! through the operations below.

use crate::error::{PlaybackError, Result};
use crate::events::PlayerEvent;
use crate::shuffle::{random_index, shuffle_rng};
use crate::types::PlayerConfig;
use rand::rngs::StdRng;
use sound_core::Episode;
use tracing::debug;

/// Player state store
///
/// Holds the episode queue, the current index and the playback flags.
///
/// Invariants:
/// - `current_index` is `Some(i)` with `i < queue.len()`, or `None`
/// - the queue is empty exactly when `current_index` is `None`
///
/// `is_playing` is the user's *intent*. The media element reports what it is
/// actually doing through [`PlayerStore::set_playing_state`].
pub struct PlayerStore {
    // State
    episode_queue: Vec<Episode>,
    current_index: Option<usize>,
    is_playing: bool,
    is_shuffling: bool,
    is_looping: bool,

    // Bumped on every selection so observers can tell re-selection apart
    selection: u64,

    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

impl std::fmt::Debug for PlayerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerStore")
            .field("queue_len", &self.episode_queue.len())
            .field("current_index", &self.current_index)
            .field("is_playing", &self.is_playing)
            .field("is_shuffling", &self.is_shuffling)
            .field("is_looping", &self.is_looping)
            .field("selection", &self.selection)
            .finish()
    }
}

impl PlayerStore {
    /// Create an empty store
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            episode_queue: Vec::new(),
            current_index: None,
            is_playing: false,
            is_shuffling: config.shuffle,
            is_looping: config.looping,
            selection: 0,
            rng: shuffle_rng(config.seed),
            pending_events: Vec::new(),
        }
    }

    // ===== Loading =====

    /// Play a single episode
    ///
    /// Replaces the queue with just this episode.
    pub fn play(&mut self, episode: Episode) {
        debug!(episode_id = %episode.id, "Playing single episode");
        self.load_queue(vec![episode], 0);
    }

    /// Play a list of episodes starting at `start_index`
    ///
    /// An out-of-range index is rejected and leaves the store untouched.
    pub fn play_list(&mut self, queue: Vec<Episode>, start_index: usize) -> Result<()> {
        if start_index >= queue.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index: start_index,
                len: queue.len(),
            });
        }

        debug!(length = queue.len(), start_index, "Playing episode list");
        self.load_queue(queue, start_index);
        Ok(())
    }

    // ===== Flags =====

    /// Flip play/pause intent
    pub fn toggle_play(&mut self) {
        self.set_playing_state(!self.is_playing);
    }

    /// Flip loop mode
    pub fn toggle_loop(&mut self) {
        self.is_looping = !self.is_looping;
        self.emit(PlayerEvent::LoopChanged {
            is_looping: self.is_looping,
        });
    }

    /// Flip shuffle mode
    pub fn toggle_shuffle(&mut self) {
        self.is_shuffling = !self.is_shuffling;
        self.emit(PlayerEvent::ShuffleChanged {
            is_shuffling: self.is_shuffling,
        });
    }

    /// Set the playing flag explicitly
    ///
    /// Used to reconcile with play/pause events reported by the media
    /// element. Setting the current value again is a no-op.
    pub fn set_playing_state(&mut self, value: bool) {
        if self.is_playing == value {
            return;
        }
        self.is_playing = value;
        self.emit(PlayerEvent::PlayingChanged { is_playing: value });
    }

    // ===== Navigation =====

    /// Move to the next episode
    ///
    /// With shuffle on, jumps to a random index (possibly the current one).
    /// Otherwise advances by one; at the last episode this does nothing, so
    /// callers should check [`PlayerStore::has_next`] first.
    pub fn play_next(&mut self) {
        let Some(current) = self.current_index else {
            return;
        };

        if self.is_shuffling {
            if let Some(index) = random_index(&mut self.rng, self.episode_queue.len()) {
                debug!(from = current, to = index, "Shuffle next");
                self.select(index);
            }
        } else if current + 1 < self.episode_queue.len() {
            self.select(current + 1);
        } else {
            debug!(index = current, "Already at last episode");
        }
    }

    /// Move to the previous episode
    ///
    /// Same shuffle policy as [`PlayerStore::play_next`]. Without shuffle,
    /// does nothing at index 0.
    pub fn play_previous(&mut self) {
        let Some(current) = self.current_index else {
            return;
        };

        if self.is_shuffling {
            if let Some(index) = random_index(&mut self.rng, self.episode_queue.len()) {
                debug!(from = current, to = index, "Shuffle previous");
                self.select(index);
            }
        } else if current > 0 {
            self.select(current - 1);
        } else {
            debug!("Already at first episode");
        }
    }

    /// Empty the queue and drop the current episode
    pub fn clear_player_state(&mut self) {
        self.episode_queue.clear();
        self.current_index = None;
        self.selection += 1;
        self.emit(PlayerEvent::Cleared);
    }

    /// React to the current episode reaching its natural end
    ///
    /// Advances when there is somewhere to go, otherwise clears the player.
    pub fn handle_episode_ended(&mut self) {
        if self.has_next() {
            self.play_next();
        } else {
            debug!("Queue finished, clearing player");
            self.clear_player_state();
        }
    }

    // ===== State Queries =====

    /// Episodes queued for playback
    pub fn queue(&self) -> &[Episode] {
        &self.episode_queue
    }

    /// Index of the current episode
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// The current episode
    pub fn current_episode(&self) -> Option<&Episode> {
        self.current_index.and_then(|i| self.episode_queue.get(i))
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    /// Counter bumped every time an episode is selected or the player cleared
    ///
    /// Loading the current episode again through [`PlayerStore::play`] or
    /// [`PlayerStore::play_list`] does not count as a new selection.
    pub fn selection(&self) -> u64 {
        self.selection
    }

    /// Check if there is a next episode
    pub fn has_next(&self) -> bool {
        if self.is_looping {
            return true;
        }
        if self.is_shuffling && !self.episode_queue.is_empty() {
            return true;
        }
        matches!(self.current_index, Some(i) if i + 1 < self.episode_queue.len())
    }

    /// Check if there is a previous episode
    pub fn has_previous(&self) -> bool {
        if self.is_shuffling && !self.episode_queue.is_empty() {
            return true;
        }
        matches!(self.current_index, Some(i) if i > 0)
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // Loading the episode that is already current keeps the selection, so
    // the media continues instead of restarting.
    fn load_queue(&mut self, queue: Vec<Episode>, index: usize) {
        let continues = self.current_episode().map(|e| &e.id) == queue.get(index).map(|e| &e.id);

        let length = queue.len();
        self.episode_queue = queue;
        self.emit(PlayerEvent::QueueChanged { length });

        if continues {
            self.set_current(index);
        } else {
            self.select(index);
        }
        self.set_playing_state(true);
    }

    fn select(&mut self, index: usize) {
        self.selection += 1;
        self.set_current(index);
    }

    fn set_current(&mut self, index: usize) {
        self.current_index = Some(index);

        let episode_id = self.episode_queue[index].id.to_string();
        self.emit(PlayerEvent::EpisodeChanged { episode_id, index });
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }
}
