//! Sound+ Core
//!
//! Platform-agnostic domain types shared by every Sound+ crate.
//!
//! This crate provides:
//! - **Domain Types**: `Episode`, `EpisodeId`
//! - **Duration Formatting**: `format_duration` / `parse_duration`
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use sound_core::{format_duration, Episode};
//!
//! let episode = Episode::new(
//!     "a-importancia-da-contribuicao-em-open-source",
//!     "Faladev #30 | A importância da contribuição em Open Source",
//!     "Diego Fernandes, João Pedro, Diego Haz e Bruno Lemos",
//!     "https://example.com/thumb.jpg",
//!     "https://example.com/episode.m4a",
//!     3981,
//!     "8 jan 21",
//! );
//!
//! assert_eq!(episode.duration_as_string, "01:06:21");
//! assert_eq!(format_duration(65), "00:01:05");
//! ```

#![forbid(unsafe_code)]

pub mod duration;
pub mod error;
pub mod types;

pub use duration::{format_duration, parse_duration, parse_seconds};
pub use error::{CoreError, Result};
pub use types::{Episode, EpisodeId};
