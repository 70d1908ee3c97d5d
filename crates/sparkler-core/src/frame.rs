//! Timeline frames and the particle snapshots stored inside them.
//!
//! Frames own their data outright. Capturing into a frame and loading out of
//! one always copies, so the live simulation lists and stored frames never
//! share storage.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::particle::{Particle, ShapeType};
use crate::trail::TrailSegment;

/// Value projection of a [`Particle`] stored in a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Rgba,
    pub shape: ShapeType,
    pub life: f32,
}

impl ParticleSnapshot {
    pub fn from_particle(particle: &Particle) -> Self {
        Self {
            pos: particle.pos,
            vel: particle.vel,
            size: particle.size,
            color: particle.color,
            shape: particle.shape,
            life: particle.life(),
        }
    }

    /// Live particle whose initial life equals the saved remaining life.
    pub fn to_particle(&self) -> Particle {
        let mut particle = Particle::new(self.pos, self.color);
        particle.vel = self.vel;
        particle.size = self.size;
        particle.shape = self.shape;
        particle.set_life(self.life);
        particle
    }
}

impl From<&Particle> for ParticleSnapshot {
    fn from(particle: &Particle) -> Self {
        Self::from_particle(particle)
    }
}

/// One stored position of the timeline. `Clone` is a full deep copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Equals the frame's index after every structural edit of the timeline.
    pub frame_number: usize,
    pub trail_segments: Vec<TrailSegment>,
    pub particle_snapshots: Vec<ParticleSnapshot>,
}

impl Frame {
    pub fn new(frame_number: usize) -> Self {
        Self {
            frame_number,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.trail_segments.is_empty() && self.particle_snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.trail_segments.clear();
        self.particle_snapshots.clear();
    }

    /// Replaces the stored contents with copies of `other`'s contents,
    /// keeping this frame's number.
    pub fn copy_contents_from(&mut self, other: &Frame) {
        self.trail_segments.clone_from(&other.trail_segments);
        self.particle_snapshots.clone_from(&other.particle_snapshots);
    }

    /// Overwrites the frame with copies of the live lists.
    pub fn capture(&mut self, trails: &[TrailSegment], particles: &[Particle]) {
        self.trail_segments.clear();
        self.trail_segments
            .extend(trails.iter().map(TrailSegment::restarted));
        self.particle_snapshots.clear();
        self.particle_snapshots
            .extend(particles.iter().map(ParticleSnapshot::from_particle));
    }

    /// Fresh live lists built from the stored contents.
    pub fn restore(&self) -> (Vec<TrailSegment>, Vec<Particle>) {
        let trails = self
            .trail_segments
            .iter()
            .map(TrailSegment::restarted)
            .collect();
        let particles = self
            .particle_snapshots
            .iter()
            .map(ParticleSnapshot::to_particle)
            .collect();
        (trails, particles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::TrailPoint;
    use approx::assert_relative_eq;

    fn sample_particle() -> Particle {
        let mut p = Particle::new(Vec2::new(3.0, 4.0), Rgba::new(9, 8, 7, 255));
        p.vel = Vec2::new(-1.0, 2.0);
        p.size = 5.5;
        p.shape = ShapeType::Heart;
        p.set_life(2.0);
        p.integrate(0.5);
        p
    }

    #[test]
    fn snapshot_round_trip_resets_initial_life() {
        let p = sample_particle();
        let back = ParticleSnapshot::from_particle(&p).to_particle();

        assert_eq!(back.pos, p.pos);
        assert_eq!(back.vel, p.vel);
        assert_eq!(back.size, p.size);
        assert_eq!(back.color, p.color);
        assert_eq!(back.shape, ShapeType::Heart);
        assert_relative_eq!(back.life(), 1.5);
        assert_relative_eq!(back.max_life(), 1.5);
    }

    #[test]
    fn capture_overwrites_instead_of_appending() {
        let trails = vec![TrailSegment::from_points([TrailPoint::new(Vec2::ZERO, 1.0)])];
        let particles = vec![sample_particle()];
        let mut frame = Frame::new(0);
        frame.capture(&trails, &particles);
        frame.capture(&trails, &particles);
        assert_eq!(frame.trail_segments.len(), 1);
        assert_eq!(frame.particle_snapshots.len(), 1);
    }

    #[test]
    fn clone_is_independent() {
        let mut frame = Frame::new(2);
        frame.capture(
            &[TrailSegment::from_points([TrailPoint::new(Vec2::ONE, 1.0)])],
            &[sample_particle()],
        );
        let copy = frame.clone();
        frame.trail_segments[0].points[0].pos = Vec2::new(50.0, 50.0);
        frame.particle_snapshots[0].size = 99.0;

        assert_eq!(copy.trail_segments[0].points[0].pos, Vec2::ONE);
        assert_eq!(copy.particle_snapshots[0].size, 5.5);
        assert_eq!(copy.frame_number, 2);
    }

    #[test]
    fn frame_survives_json() {
        let mut frame = Frame::new(3);
        frame.capture(
            &[TrailSegment::from_points([TrailPoint::new(Vec2::new(1.0, 2.0), 2.5)])],
            &[sample_particle()],
        );
        let text = serde_json::to_string(&frame).unwrap();
        let back: Frame = serde_json::from_str(&text).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn copy_contents_keeps_number() {
        let mut source = Frame::new(7);
        source.capture(&[], &[sample_particle()]);
        let mut target = Frame::new(1);
        target.copy_contents_from(&source);
        assert_eq!(target.frame_number, 1);
        assert_eq!(target.particle_snapshots, source.particle_snapshots);
    }
}
