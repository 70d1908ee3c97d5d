//! Per-tick integration of the live particle and trail lists.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::color::Rgba;
use crate::particle::{Particle, ShapeType};
use crate::preset::VelocityProfile;
use crate::trail::TrailSegment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Particles per second while the pointer hovers.
    pub hover_spawn_rate: f32,
    /// Particles per second while the pointer is pressed.
    pub click_spawn_rate: f32,
    /// Added to `vel.y` per second, after drag.
    pub gravity: f32,
    /// Per-tick velocity multiplier.
    pub drag: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_life: f32,
    pub max_life: f32,
    /// Initial life of every recorded trail point.
    pub trail_life: f32,
    /// Suspends trail point decay.
    pub infinite_trails: bool,
    /// Spawns small sparks along live trail segments.
    pub trail_sparkles: bool,
    pub auto_spawn: bool,
    pub auto_spawn_center: Vec2,
    /// Hard cap on the live particle list, enforced at every spawn site.
    pub max_particles: usize,
    pub shape: ShapeType,
    /// Empty palette means random bright colors.
    pub palette: Vec<Rgba>,
    pub velocity: VelocityProfile,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            hover_spawn_rate: 10.0,
            click_spawn_rate: 100.0,
            gravity: 100.0,
            drag: 0.98,
            min_speed: 50.0,
            max_speed: 250.0,
            min_size: 2.0,
            max_size: 6.0,
            min_life: 1.0,
            max_life: 3.0,
            trail_life: 3.0,
            infinite_trails: false,
            trail_sparkles: true,
            auto_spawn: false,
            auto_spawn_center: Vec2::new(640.0, 360.0),
            max_particles: 5000,
            shape: ShapeType::Circle,
            palette: Vec::new(),
            velocity: VelocityProfile::Radial,
        }
    }
}

/// Advances both live lists by `dt`.
pub fn step(
    particles: &mut Vec<Particle>,
    trails: &mut Vec<TrailSegment>,
    params: &SimulationParams,
    dt: f32,
) {
    step_particles(particles, params, dt);
    step_trails(trails, params, dt);
    trace!(particles = particles.len(), trails = trails.len(), "simulation step");
}

/// Integrates, then applies drag followed by gravity, then culls dead
/// particles. The drag-then-gravity order is part of the visual contract.
pub fn step_particles(particles: &mut Vec<Particle>, params: &SimulationParams, dt: f32) {
    particles.retain_mut(|particle| {
        particle.integrate(dt);
        particle.vel *= params.drag;
        particle.vel.y += params.gravity * dt;
        particle.is_alive()
    });
}

/// Decays every point (unless trails are infinite), trims dead points from
/// the front of each segment and drops segments with nothing left alive.
pub fn step_trails(trails: &mut Vec<TrailSegment>, params: &SimulationParams, dt: f32) {
    trails.retain_mut(|segment| {
        if !params.infinite_trails {
            segment.decay(dt);
        }
        segment.trim_dead_front();
        segment.is_alive()
    });
}
