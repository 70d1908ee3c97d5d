use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;

pub const DEFAULT_PARTICLE_LIFE: f32 = 2.0;
pub const DEFAULT_PARTICLE_SIZE: f32 = 4.0;

/// Shape tag carried by a particle. Drawing it is the renderer's business.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    #[default]
    Circle,
    Square,
    Star,
    Heart,
    Triangle,
    Diamond,
}

impl ShapeType {
    pub const ALL: [ShapeType; 6] = [
        ShapeType::Circle,
        ShapeType::Square,
        ShapeType::Star,
        ShapeType::Heart,
        ShapeType::Triangle,
        ShapeType::Diamond,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeType::Circle => "Circle",
            ShapeType::Square => "Square",
            ShapeType::Star => "Star",
            ShapeType::Heart => "Heart",
            ShapeType::Triangle => "Triangle",
            ShapeType::Diamond => "Diamond",
        }
    }
}

/// A live particle. Its alpha channel is derived from the remaining life
/// every time it is integrated.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgba,
    pub size: f32,
    pub shape: ShapeType,
    life: f32,
    max_life: f32,
}

impl Particle {
    pub fn new(pos: Vec2, color: Rgba) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            color,
            size: DEFAULT_PARTICLE_SIZE,
            shape: ShapeType::Circle,
            life: DEFAULT_PARTICLE_LIFE,
            max_life: DEFAULT_PARTICLE_LIFE,
        }
    }

    /// Restarts the fade: both remaining and initial life become `life`.
    pub fn set_life(&mut self, life: f32) {
        self.life = life;
        self.max_life = life;
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

    /// Moves by `vel * dt`, burns `dt` of life and refreshes alpha while alive.
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.life -= dt;
        if self.is_alive() {
            self.color.a = (255.0 * self.life_ratio()) as u8;
        }
    }
}
