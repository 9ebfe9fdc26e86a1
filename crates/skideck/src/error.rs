use std::path::PathBuf;

use crate::deck::slide::Slide;

/// Central error type for the deck core and the sync channel.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("slide not in registry: {0}")]
    SlideNotFound(Slide),

    #[error("a deck needs at least one slide")]
    EmptyRegistry,

    #[error("slide listed twice in registry: {0}")]
    DuplicateSlide(Slide),

    #[error("invalid sync payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("watcher error: {0}")]
    Watcher(String),

    #[error("channel directory unavailable: {}: {source}", path.display())]
    ChannelDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to launch companion view: {0}")]
    Spawn(std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DeckError>;
