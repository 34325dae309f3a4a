//! Sound+ CLI Library
//!
//! Terminal front end for the Sound+ podcast player: episode listings, the
//! episode detail page and a headless player session.
//!
//! This library exposes the components for testing purposes.

pub mod config;
pub mod error;
pub mod pages;
pub mod session;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use pages::{EpisodePage, HomePage};
pub use session::{Command, Session, SimulatedMedia};
