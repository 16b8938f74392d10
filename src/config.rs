//! Run configuration: canvas size, swarm size, presentation flags.
//!
//! Values come from defaults, an optional JSON file, then command line
//! overrides, in that order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 800;
pub const DEFAULT_PARTICLES: usize = 6000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    pub width: u32,
    pub height: u32,
    pub particle_count: usize,
    pub vsync: bool,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            particle_count: DEFAULT_PARTICLES,
            vsync: true,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Run(SwarmConfig),
    Help,
}

impl SwarmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.particle_count == 0 {
            return Err(ConfigError::InvalidParticleCount(self.particle_count));
        }
        Ok(())
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load config from a JSON file; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config from command line arguments (without the program name).
    ///
    /// `--config PATH` is applied first wherever it appears, so explicit
    /// flags always win over the file. Malformed numbers are skipped with a
    /// warning and leave the previous value in place.
    pub fn from_args<I, S>(args: I) -> Result<CliCommand, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        let mut config = match args.iter().position(|a| a == "--config" || a == "-c") {
            Some(i) => match args.get(i + 1) {
                Some(path) => Self::load(path)?,
                None => Self::default(),
            },
            None => Self::default(),
        };

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--help" => return Ok(CliCommand::Help),
                "--no-vsync" => config.vsync = false,
                "--config" | "-c" => i += 1,
                "--width" | "-w" => {
                    if let Some(w) = parse_value(&args, i) {
                        config.width = w;
                    }
                    i += 1;
                },
                "--height" | "-h" => {
                    if let Some(h) = parse_value(&args, i) {
                        config.height = h;
                    }
                    i += 1;
                },
                "--particles" | "-n" => {
                    if let Some(n) = parse_value(&args, i) {
                        config.particle_count = n;
                    }
                    i += 1;
                },
                "--resolution" | "-r" => {
                    // WxH, e.g. 1920x1080
                    if let Some(value) = args.get(i + 1) {
                        match value.split_once('x') {
                            Some((w, h)) => match (w.parse::<u32>(), h.parse::<u32>()) {
                                (Ok(w), Ok(h)) => {
                                    config.width = w;
                                    config.height = h;
                                },
                                _ => warn!(value = %value, "ignoring malformed --resolution"),
                            },
                            None => warn!(value = %value, "ignoring malformed --resolution"),
                        }
                    }
                    i += 1;
                },
                other => warn!(arg = other, "ignoring unknown argument"),
            }
            i += 1;
        }

        config.validate()?;
        Ok(CliCommand::Run(config))
    }
}

/// Parse the value following flag `args[i]`
fn parse_value<T: std::str::FromStr>(args: &[String], i: usize) -> Option<T> {
    let value = args.get(i + 1)?;
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(flag = %args[i], value = %value, "ignoring malformed value");
            None
        },
    }
}

pub fn usage() -> String {
    format!(
        "Usage: swarmtrail [OPTIONS]

Options:
  --width W, -w W           Set window width (default: {})
  --height H, -h H          Set window height (default: {})
  --resolution WxH, -r WxH  Set resolution (e.g., 1920x1080)
  --particles N, -n N       Number of particles (default: {})
  --config PATH, -c PATH    Load settings from a JSON file
  --no-vsync                Disable VSync for uncapped framerate
  --help                    Show this help message",
        DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_PARTICLES
    )
}
