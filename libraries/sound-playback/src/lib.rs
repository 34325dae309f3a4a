//! Sound+ - Playback Management
//!
//! Platform-agnostic player state for Sound+.
//!
//! This crate provides:
//! - Player state store (queue, current episode, play/shuffle/loop flags)
//! - Sequential and shuffled next/previous navigation
//! - End-of-episode policy (advance or clear)
//! - Player surface binding the store to a media element
//! - Button enablement and progress display
//!
//! # Architecture
//!
//! `sound-playback` knows nothing about audio decoding or HTTP. The store is
//! a plain value owned by the application and passed by reference; the
//! actual audio element is provided through the [`MediaPrimitive`] trait.
//!
//! # Example: Store
//!
//! ```rust
//! use sound_core::Episode;
//! use sound_playback::PlayerStore;
//!
//! let episodes: Vec<Episode> = (0..3)
//!     .map(|i| {
//!         Episode::new(
//!             format!("ep{}", i).as_str(),
//!             format!("Episode {}", i),
//!             "Host",
//!             "https://example.com/thumb.jpg",
//!             format!("https://example.com/ep{}.m4a", i),
//!             1800,
//!             "8 jan 21",
//!         )
//!     })
//!     .collect();
//!
//! let mut store = PlayerStore::default();
//! store.play_list(episodes, 0).unwrap();
//!
//! store.play_next();
//! assert_eq!(store.current_index(), Some(1));
//! assert!(store.has_next());
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use sound_playback::{MediaEvent, MediaPrimitive, PlayerStore, PlayerSurface};
//! use std::time::Duration;
//!
//! struct MyAudioElement {
//!     // ... platform-specific handle
//! }
//!
//! impl MediaPrimitive for MyAudioElement {
//!     fn load(&mut self, url: &str) {}
//!     fn unload(&mut self) {}
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, position: Duration) {}
//!     fn set_looping(&mut self, looping: bool) {}
//! }
//!
//! let mut store = PlayerStore::default();
//! let mut surface = PlayerSurface::new(MyAudioElement {});
//!
//! // After every user interaction
//! store.toggle_play();
//! surface.sync(&store);
//!
//! // From the element's callbacks
//! surface.handle_media_event(&mut store, MediaEvent::TimeAdvanced(Duration::from_secs(12)));
//! ```

mod error;
mod events;
mod media;
mod shuffle;
mod store;
mod surface;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use media::{MediaEvent, MediaPrimitive};
pub use store::PlayerStore;
pub use surface::PlayerSurface;
pub use types::{ButtonState, Controls, PlayerConfig};
