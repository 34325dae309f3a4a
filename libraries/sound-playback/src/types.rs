//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Configuration for the player store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Start with shuffle enabled (default: false)
    #[serde(default)]
    pub shuffle: bool,

    /// Start with loop enabled (default: false)
    #[serde(default)]
    pub looping: bool,

    /// Seed for the shuffle RNG; `None` seeds from the OS
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PlayerConfig {
    /// Config with a fixed shuffle seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// Enabled/active state of a single player button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    /// Whether the button accepts input
    pub enabled: bool,

    /// Whether the button shows its "on" indicator
    pub active: bool,
}

/// Snapshot of every player control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub shuffle: ButtonState,
    pub previous: ButtonState,
    /// `active` means the pause icon is shown
    pub play_pause: ButtonState,
    pub next: ButtonState,
    pub looping: ButtonState,
}
