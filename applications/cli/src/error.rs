/// Application error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Client(#[from] sound_client::ClientError),

    #[error("Playback error: {0}")]
    Playback(#[from] sound_playback::PlaybackError),

    #[error("No episodes available")]
    NoEpisodes,

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}
