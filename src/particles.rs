//! Particle swarm for the trail effect
//!
//! Particles live in a normalized [-1, 1] x [-1, 1] space and drift along
//! slowly curving paths. Anything that leaves the square is respawned at the
//! origin with a fresh speed and heading.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::error::ConfigError;

/// Heading change per millisecond, bends straight paths into spirals
pub const ANGULAR_DRIFT: f64 = 0.0005;

/// Scale applied to the uniform sample before squaring it into a speed
pub const SPEED_SCALE: f64 = 0.04;

/// A single particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    speed: f64,
    direction: f64,
}

impl Particle {
    /// Create a particle at the origin with a random speed and heading
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut particle = Self::with_motion(0.0, 0.0);
        particle.respawn(rng);
        particle
    }

    /// Create a particle at the origin with explicit motion parameters
    pub fn with_motion(speed: f64, direction: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            speed,
            direction,
        }
    }

    #[inline]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn direction(&self) -> f64 {
        self.direction
    }

    /// Check if the particle is inside the normalized square
    #[inline]
    pub fn in_bounds(&self) -> bool {
        self.x >= -1.0 && self.x <= 1.0 && self.y >= -1.0 && self.y <= 1.0
    }

    /// Apply one step of motion without the bounds check.
    /// Returns true if the particle ended up outside the square.
    pub fn advance(&mut self, interval: f64) -> bool {
        self.direction += interval * ANGULAR_DRIFT;

        let vx = self.speed * self.direction.sin();
        let vy = self.speed * self.direction.cos();

        self.x += vx * interval;
        self.y += vy * interval;

        !self.in_bounds()
    }

    /// Reset to the origin with freshly sampled speed and direction.
    /// Squaring the sample skews speeds toward zero and drops the sign.
    pub fn respawn(&mut self, rng: &mut impl Rng) {
        self.x = 0.0;
        self.y = 0.0;

        let sample: f64 = rng.gen_range(-1.0..=1.0);
        self.speed = (sample * SPEED_SCALE).powi(2);
        self.direction = rng.gen_range(0.0..TAU);
    }
}

/// Fixed-size particle swarm
pub struct ParticleSwarm<R = StdRng> {
    particles: Vec<Particle>,
    last_timestamp: Option<u64>,
    rng: R,
}

impl ParticleSwarm<StdRng> {
    /// Create a swarm seeded from OS entropy
    pub fn new(count: usize) -> Result<Self, ConfigError> {
        Self::with_rng(count, StdRng::from_entropy())
    }
}

impl<R: Rng> ParticleSwarm<R> {
    /// Create a swarm drawing from the given random source
    pub fn with_rng(count: usize, mut rng: R) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::InvalidParticleCount(count));
        }

        let particles = (0..count).map(|_| Particle::new(&mut rng)).collect();
        debug!(count, "particle swarm created");

        Ok(Self {
            particles,
            last_timestamp: None,
            rng,
        })
    }

    /// Advance every particle to `elapsed_ms`.
    ///
    /// The first call only records the baseline, so nothing moves. Later
    /// calls move by the time since the previous call; a clock that runs
    /// backwards yields a zero interval.
    pub fn update(&mut self, elapsed_ms: u64) {
        let interval = match self.last_timestamp {
            Some(last) => elapsed_ms.saturating_sub(last),
            None => 0,
        };
        self.last_timestamp = Some(elapsed_ms);

        let interval = interval as f64;
        let mut respawned = 0usize;
        for particle in &mut self.particles {
            if particle.advance(interval) {
                particle.respawn(&mut self.rng);
                respawned += 1;
            }
        }

        trace!(interval, respawned, "swarm updated");
    }

    /// Current particle positions, valid until the next `update`
    pub fn positions(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + '_ {
        self.particles.iter().map(Particle::position)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Timestamp of the most recent update, if any
    pub fn last_timestamp(&self) -> Option<u64> {
        self.last_timestamp
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_swarm(count: usize) -> ParticleSwarm<StdRng> {
        ParticleSwarm::with_rng(count, StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn test_zero_particles_rejected() {
        let err = ParticleSwarm::new(0).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidParticleCount(0)));
    }

    #[test]
    fn test_new_swarm_starts_at_origin() {
        let swarm = seeded_swarm(100);
        assert_eq!(swarm.len(), 100);
        assert!(swarm.positions().all(|p| p == (0.0, 0.0)));
        assert_eq!(swarm.last_timestamp(), None);
    }

    #[test]
    fn test_first_update_does_not_move() {
        let mut swarm = seeded_swarm(500);
        let before: Vec<Particle> = swarm.particles().to_vec();

        swarm.update(5000);

        assert!(swarm.positions().all(|p| p == (0.0, 0.0)));
        // Zero interval also leaves headings untouched
        assert_eq!(swarm.particles(), before.as_slice());
        assert_eq!(swarm.last_timestamp(), Some(5000));
    }

    #[test]
    fn test_second_update_uses_delta() {
        let mut swarm = seeded_swarm(1);
        let mut expected = swarm.particles()[0].clone();

        swarm.update(5000);
        swarm.update(5016);

        let escaped = expected.advance(16.0);
        assert!(!escaped);
        assert_eq!(swarm.particles()[0], expected);
    }

    #[test]
    fn test_backwards_clock_is_zero_interval() {
        let mut swarm = seeded_swarm(50);
        swarm.update(1000);
        swarm.update(1010);
        let before: Vec<Particle> = swarm.particles().to_vec();

        swarm.update(900);

        assert_eq!(swarm.particles(), before.as_slice());
        assert_eq!(swarm.last_timestamp(), Some(900));
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let mut swarm = seeded_swarm(2000);
        let mut t = 0;
        swarm.update(t);
        for step in [1, 16, 33, 250, 1000, 60_000, 7, 2] {
            t += step;
            swarm.update(t);
            for (x, y) in swarm.positions() {
                assert!((-1.0..=1.0).contains(&x), "x out of bounds: {}", x);
                assert!((-1.0..=1.0).contains(&y), "y out of bounds: {}", y);
            }
        }
    }

    #[test]
    fn test_escaped_particle_respawns_at_origin() {
        let mut swarm = seeded_swarm(300);
        swarm.update(0);
        // A full minute pushes any nonzero-speed particle far outside
        swarm.update(60_000);

        for p in swarm.particles() {
            assert!(p.in_bounds());
            assert!(p.speed() >= 0.0 && p.speed() <= SPEED_SCALE * SPEED_SCALE);
            assert!(p.direction() >= 0.0);
        }
        assert!(swarm.positions().filter(|&p| p == (0.0, 0.0)).count() > 0);
    }

    #[test]
    fn test_identical_particles_move_identically() {
        let mut a = Particle::with_motion(0.0009, 1.25);
        let mut b = Particle::with_motion(0.0009, 1.25);

        for _ in 0..10 {
            a.advance(16.0);
            b.advance(16.0);
        }

        assert_eq!(a, b);
    }

    #[test]
    fn test_advance_kinematics() {
        let mut p = Particle::with_motion(0.001, 0.0);
        let escaped = p.advance(100.0);

        let direction = 100.0 * ANGULAR_DRIFT;
        assert!(!escaped);
        assert!((p.direction() - direction).abs() < 1e-12);
        assert!((p.x - 0.001 * direction.sin() * 100.0).abs() < 1e-12);
        assert!((p.y - 0.001 * direction.cos() * 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_advance_reports_escape() {
        let mut p = Particle::with_motion(0.01, 0.0);
        assert!(p.advance(1000.0));
        assert!(!p.in_bounds());
    }

    #[test]
    fn test_respawn_samples_ranges() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut p = Particle::with_motion(1.0, 1.0);
        p.x = 0.5;
        p.y = -0.5;

        for _ in 0..1000 {
            p.respawn(&mut rng);
            assert_eq!(p.position(), (0.0, 0.0));
            assert!(p.speed() >= 0.0 && p.speed() <= 0.0016 + 1e-15);
            assert!(p.direction() >= 0.0 && p.direction() < TAU);
        }
    }
}
