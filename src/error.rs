use thiserror::Error;

/// Errors that can occur while rendering a track.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RenderError {
    #[error("track contains no points")]
    EmptyTrack,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
