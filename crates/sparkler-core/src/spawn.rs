//! Particle spawn sites. Every site goes through [`Spawner::spawn_one`],
//! which refuses once the live list holds `max_particles`.

use glam::Vec2;
use tracing::trace;

use crate::color::Rgba;
use crate::particle::Particle;
use crate::preset::lerp_range;
use crate::simulation::SimulationParams;
use crate::trail::TrailSegment;

const SPAWN_JITTER: f32 = 10.0;
const AUTO_SPAWN_INTERVAL: f32 = 0.1;
const AUTO_SPAWN_BURST: usize = 5;
const SPARKLE_CHANCE: f32 = 0.3;
const SPARKLE_JITTER: f32 = 20.0;
const SPARKLE_LIFE: f32 = 0.5;

#[derive(Debug, Default)]
pub struct Spawner {
    auto_spawn_timer: f32,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes one particle unless the cap is reached. Returns whether it spawned.
    pub fn spawn_one(
        particles: &mut Vec<Particle>,
        params: &SimulationParams,
        particle: Particle,
    ) -> bool {
        if particles.len() >= params.max_particles {
            return false;
        }
        particles.push(particle);
        true
    }

    /// Builds a particle around `pos` from the current parameters.
    pub fn make_particle(params: &SimulationParams, rng: &mut fastrand::Rng, pos: Vec2) -> Particle {
        let jitter = Vec2::new(rng.f32() - 0.5, rng.f32() - 0.5) * SPAWN_JITTER;
        let color = if params.palette.is_empty() {
            Rgba::random_bright(rng)
        } else {
            params.palette[rng.usize(..params.palette.len())]
        };
        let mut particle = Particle::new(pos + jitter, color);
        particle.vel = params.velocity.sample(params, rng);
        particle.size = lerp_range(rng, params.min_size, params.max_size);
        particle.shape = params.shape;
        particle.set_life(lerp_range(rng, params.min_life, params.max_life));
        particle
    }

    /// `floor(rate * dt)` particles, plus one more with probability equal to
    /// the fractional remainder.
    pub fn spawn_count(rate: f32, dt: f32, rng: &mut fastrand::Rng) -> usize {
        let wanted = (rate * dt).max(0.0);
        let whole = wanted.floor();
        let mut count = whole as usize;
        if rng.f32() < wanted - whole {
            count += 1;
        }
        count
    }

    /// Spawns at `rate` particles per second around `pos`. Returns how many spawned.
    pub fn spawn_at_rate(
        particles: &mut Vec<Particle>,
        params: &SimulationParams,
        rng: &mut fastrand::Rng,
        pos: Vec2,
        rate: f32,
        dt: f32,
    ) -> usize {
        let count = Self::spawn_count(rate, dt, rng);
        Self::spawn_burst(particles, params, rng, pos, count)
    }

    pub fn spawn_burst(
        particles: &mut Vec<Particle>,
        params: &SimulationParams,
        rng: &mut fastrand::Rng,
        pos: Vec2,
        count: usize,
    ) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            let particle = Self::make_particle(params, rng, pos);
            if !Self::spawn_one(particles, params, particle) {
                trace!(cap = params.max_particles, "particle cap reached");
                break;
            }
            spawned += 1;
        }
        spawned
    }

    /// Every 0.1 s emits a burst of five at the auto-spawn center.
    pub fn tick_auto_spawn(
        &mut self,
        particles: &mut Vec<Particle>,
        params: &SimulationParams,
        rng: &mut fastrand::Rng,
        dt: f32,
    ) -> usize {
        if !params.auto_spawn {
            return 0;
        }
        self.auto_spawn_timer += dt;
        if self.auto_spawn_timer < AUTO_SPAWN_INTERVAL {
            return 0;
        }
        self.auto_spawn_timer = 0.0;
        Self::spawn_burst(particles, params, rng, params.auto_spawn_center, AUTO_SPAWN_BURST)
    }

    /// Sheds short-lived golden sparks between neighbouring trail points.
    pub fn spawn_trail_sparkles(
        particles: &mut Vec<Particle>,
        trails: &[TrailSegment],
        params: &SimulationParams,
        rng: &mut fastrand::Rng,
    ) -> usize {
        if !params.trail_sparkles {
            return 0;
        }
        let mut spawned = 0;
        for segment in trails {
            for pair in segment.points.windows(2) {
                if rng.f32() >= SPARKLE_CHANCE {
                    continue;
                }
                let along = pair[0].pos.lerp(pair[1].pos, rng.f32());
                let jitter = Vec2::new(rng.f32() - 0.5, rng.f32() - 0.5) * SPARKLE_JITTER;
                let mut sparkle = Particle::new(along + jitter, Rgba::SPARKLE);
                sparkle.vel = Vec2::new((rng.f32() - 0.5) * 50.0, (rng.f32() - 0.5) * 50.0 - 20.0);
                sparkle.size = rng.f32() * 2.0 + 1.0;
                sparkle.set_life(SPARKLE_LIFE);
                if !Self::spawn_one(particles, params, sparkle) {
                    return spawned;
                }
                spawned += 1;
            }
        }
        spawned
    }
}
