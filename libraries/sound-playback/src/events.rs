//! Player Events
//!
//! Every effective mutation of the player store records an event. Consumers
//! drain them after each interaction to refresh whatever they display.

use serde::{Deserialize, Serialize};

/// Events emitted by the player store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// The queue was replaced
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// An episode was selected as current
    ///
    /// Also emitted when the same episode is selected again (shuffle can
    /// pick the current index).
    EpisodeChanged {
        /// ID of the selected episode
        episode_id: String,
        /// Index of the episode in the queue
        index: usize,
    },

    /// Play/pause intent changed
    PlayingChanged { is_playing: bool },

    /// Shuffle toggled
    ShuffleChanged { is_shuffling: bool },

    /// Loop toggled
    LoopChanged { is_looping: bool },

    /// Queue and current episode were cleared
    Cleared,
}
