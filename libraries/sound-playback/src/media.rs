//! Platform-agnostic media primitive
//!
//! Abstracts whatever actually plays audio (a browser element, a native
//! decoder, a simulated clock in tests).

use std::time::Duration;

/// Commands the player surface issues to the media element
///
/// Implementors report what happens back through [`MediaEvent`]s, which the
/// platform feeds into [`crate::PlayerSurface::handle_media_event`].
pub trait MediaPrimitive {
    /// Load a new audio resource
    ///
    /// The element is paused after loading until `play` is called.
    fn load(&mut self, url: &str);

    /// Drop the loaded resource
    fn unload(&mut self);

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Jump to position in the loaded resource
    fn seek(&mut self, position: Duration);

    /// Restart the resource by itself on end instead of reporting `Ended`
    fn set_looping(&mut self, looping: bool);
}

/// Events reported by the media element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Periodic position update
    TimeAdvanced(Duration),

    /// Resource metadata (duration etc.) is available
    MetadataLoaded,

    /// Resource played to its natural end
    Ended,

    /// Playback started, whoever asked for it
    PlayStarted,

    /// Playback paused, whoever asked for it (includes load failures)
    Paused,
}
