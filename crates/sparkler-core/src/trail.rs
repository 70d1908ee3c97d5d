//! Sparkler trails: strokes made of independently decaying points.
//!
//! A stroke fades from its oldest end. Every tick dead points are trimmed
//! from the front of the segment, which produces the "undraw" effect; once
//! no point survives the segment is dropped by the simulation step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TRAIL_LIFE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    life: f32,
    max_life: f32,
}

impl TrailPoint {
    pub fn new(pos: Vec2, max_life: f32) -> Self {
        Self {
            pos,
            life: max_life,
            max_life,
        }
    }

    /// Fresh point at the same position whose initial life is this point's
    /// remaining life.
    pub fn restarted(&self) -> Self {
        Self::new(self.pos, self.life)
    }

    pub fn decay(&mut self, dt: f32) {
        self.life -= dt;
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn max_life(&self) -> f32 {
        self.max_life
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn life_ratio(&self) -> f32 {
        if self.max_life > 0.0 {
            self.life / self.max_life
        } else {
            0.0
        }
    }
}

/// One continuous drawn stroke. Point order is drawing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrailSegment {
    pub points: Vec<TrailPoint>,
}

impl TrailSegment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = TrailPoint>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    pub fn push(&mut self, point: TrailPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_alive(&self) -> bool {
        self.points.iter().any(TrailPoint::is_alive)
    }

    pub fn decay(&mut self, dt: f32) {
        for point in &mut self.points {
            point.decay(dt);
        }
    }

    /// Drops the run of dead points at the start of the stroke.
    pub fn trim_dead_front(&mut self) {
        let first_alive = self
            .points
            .iter()
            .position(TrailPoint::is_alive)
            .unwrap_or(self.points.len());
        self.points.drain(..first_alive);
    }

    /// Copy whose points restart their fade from their current remaining life.
    pub fn restarted(&self) -> Self {
        Self::from_points(self.points.iter().map(TrailPoint::restarted))
    }
}

/// Turns pointer drags into trail segments. While drawing, the last segment
/// of the live trail list is the active stroke.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    drawing: bool,
    last_pos: Option<Vec2>,
}

impl StrokeRecorder {
    /// Distance between interpolated points, in pixels.
    pub const POINT_SPACING: f32 = 2.0;

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Adds `pos` to the active stroke, filling the gap from the previous
    /// position. Returns `true` when this call started a new stroke.
    pub fn extend(&mut self, trails: &mut Vec<TrailSegment>, pos: Vec2, life: f32) -> bool {
        let started = !self.drawing || trails.is_empty();
        if started {
            trails.push(TrailSegment::new());
            self.drawing = true;
            self.last_pos = None;
        }
        let Some(segment) = trails.last_mut() else {
            return started;
        };

        if let Some(last) = self.last_pos {
            let count = ((last.distance(pos) / Self::POINT_SPACING) as usize).max(1);
            for i in 0..count {
                let t = i as f32 / count as f32;
                segment.push(TrailPoint::new(last.lerp(pos, t), life));
            }
        }
        segment.push(TrailPoint::new(pos, life));
        self.last_pos = Some(pos);
        started
    }

    /// Ends the active stroke. Returns `true` if one was in progress.
    pub fn end(&mut self) -> bool {
        let was_drawing = self.drawing;
        self.drawing = false;
        self.last_pos = None;
        was_drawing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn segment_with_lives(lives: &[f32]) -> TrailSegment {
        TrailSegment::from_points(
            lives
                .iter()
                .enumerate()
                .map(|(i, &life)| TrailPoint::new(Vec2::new(i as f32, 0.0), life)),
        )
    }

    #[test]
    fn trim_only_removes_leading_dead_points() {
        let mut seg = segment_with_lives(&[0.1, 1.0, 0.1, 1.0]);
        seg.decay(0.2);
        seg.trim_dead_front();
        assert_eq!(seg.len(), 3);
        assert_relative_eq!(seg.points[0].pos.x, 1.0);
        assert!(!seg.points[1].is_alive());
        assert!(seg.is_alive());
    }

    #[test]
    fn trim_all_dead_empties_segment() {
        let mut seg = segment_with_lives(&[0.1, 0.2]);
        seg.decay(0.5);
        seg.trim_dead_front();
        assert!(seg.is_empty());
        assert!(!seg.is_alive());
    }

    #[test]
    fn restarted_point_has_full_ratio() {
        let mut p = TrailPoint::new(Vec2::ONE, 3.0);
        p.decay(1.0);
        let r = p.restarted();
        assert_relative_eq!(r.life(), 2.0);
        assert_relative_eq!(r.max_life(), 2.0);
        assert_relative_eq!(r.life_ratio(), 1.0);
    }

    #[test]
    fn stroke_interpolates_every_two_pixels() {
        let mut trails = Vec::new();
        let mut stroke = StrokeRecorder::default();

        assert!(stroke.extend(&mut trails, Vec2::ZERO, 3.0));
        assert_eq!(trails.len(), 1);
        assert_eq!(trails[0].len(), 1);

        assert!(!stroke.extend(&mut trails, Vec2::new(10.0, 0.0), 3.0));
        // five interpolated points starting at the previous position, then the new one
        assert_eq!(trails[0].len(), 7);
        assert_relative_eq!(trails[0].points[1].pos.x, 0.0);
        assert_relative_eq!(trails[0].points[2].pos.x, 2.0);
        assert_relative_eq!(trails[0].points[6].pos.x, 10.0);
    }

    #[test]
    fn short_moves_still_add_one_interpolated_point() {
        let mut trails = Vec::new();
        let mut stroke = StrokeRecorder::default();
        stroke.extend(&mut trails, Vec2::ZERO, 1.0);
        stroke.extend(&mut trails, Vec2::new(0.5, 0.0), 1.0);
        assert_eq!(trails[0].len(), 3);
    }

    #[test]
    fn ending_a_stroke_starts_a_new_segment_next_time() {
        let mut trails = Vec::new();
        let mut stroke = StrokeRecorder::default();
        stroke.extend(&mut trails, Vec2::ZERO, 1.0);
        assert!(stroke.end());
        assert!(!stroke.end());
        assert!(stroke.extend(&mut trails, Vec2::ONE, 1.0));
        assert_eq!(trails.len(), 2);
    }
}
