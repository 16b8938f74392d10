//! swarmtrail: a particle swarm rendered into a software pixel buffer,
//! blurred every frame so the particles leave fading trails.
//!
//! The core is platform free: [`ParticleSwarm`] moves, [`Canvas`] paints and
//! blurs, [`Simulation`] runs both once per frame. The SDL2 window lives
//! behind the `sdl` feature.

pub mod config;
pub mod display;
pub mod error;
pub mod particles;
pub mod simulation;
pub mod util;

pub use config::SwarmConfig;
pub use display::{Canvas, PixelBuffer};
pub use error::ConfigError;
pub use particles::{Particle, ParticleSwarm};
pub use simulation::Simulation;
