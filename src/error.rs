//! Construction-time errors
//!
//! Nothing in the frame loop can fail; every error here is raised while
//! building a swarm, a canvas, or loading their configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid canvas dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid particle count {0}: a swarm needs at least one particle")]
    InvalidParticleCount(usize),

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
