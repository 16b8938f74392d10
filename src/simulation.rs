//! One frame of the trail effect: move, paint, blur

use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

use crate::config::SwarmConfig;
use crate::display::{frame_color, Canvas};
use crate::error::ConfigError;
use crate::particles::ParticleSwarm;

pub struct Simulation<R = StdRng> {
    swarm: ParticleSwarm<R>,
    canvas: Canvas,
}

impl Simulation<StdRng> {
    pub fn from_config(config: &SwarmConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let canvas = Canvas::new(config.width, config.height)?;
        let swarm = ParticleSwarm::new(config.particle_count)?;
        info!(
            width = config.width,
            height = config.height,
            particles = config.particle_count,
            "simulation ready"
        );
        Ok(Self::new(swarm, canvas))
    }
}

impl<R: Rng> Simulation<R> {
    pub fn new(swarm: ParticleSwarm<R>, canvas: Canvas) -> Self {
        Self { swarm, canvas }
    }

    /// Run one frame at `elapsed_ms`. Afterwards `canvas().front()` holds
    /// the image to present.
    pub fn step(&mut self, elapsed_ms: u64) {
        self.swarm.update(elapsed_ms);
        self.canvas
            .paint(self.swarm.positions(), frame_color(elapsed_ms));
        self.canvas.box_blur();
    }

    pub fn swarm(&self) -> &ParticleSwarm<R> {
        &self.swarm
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }
}
