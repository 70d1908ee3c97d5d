//! Named particle parameter sets.

use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::ConfigError;
use crate::simulation::SimulationParams;

/// How a freshly spawned particle picks its velocity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityProfile {
    /// Uniform direction, speed in the configured speed range.
    #[default]
    Radial,
    /// Upward cone of ±45 degrees, speed 200..400.
    Fountain,
    /// Slow sideways drift with a downward fall.
    Snow,
    /// Fast, nearly vertical fall.
    Rain,
    /// Radial burst with a rotational twist.
    Galaxy,
}

impl VelocityProfile {
    pub fn sample(self, params: &SimulationParams, rng: &mut fastrand::Rng) -> Vec2 {
        match self {
            VelocityProfile::Radial => {
                let angle = rng.f32() * TAU;
                let speed = lerp_range(rng, params.min_speed, params.max_speed);
                Vec2::from_angle(angle) * speed
            }
            VelocityProfile::Fountain => {
                let angle = (rng.f32() - 0.5) * PI * 0.5 - PI / 2.0;
                let speed = rng.f32() * 200.0 + 200.0;
                Vec2::from_angle(angle) * speed
            }
            VelocityProfile::Snow => {
                Vec2::new((rng.f32() - 0.5) * 30.0, rng.f32() * 30.0 + 20.0)
            }
            VelocityProfile::Rain => {
                Vec2::new((rng.f32() - 0.5) * 20.0, rng.f32() * 100.0 + 300.0)
            }
            VelocityProfile::Galaxy => {
                const ROTATION_FORCE: f32 = 30.0;
                let angle = rng.f32() * TAU;
                let speed = rng.f32() * 100.0 + 50.0;
                let mut v = Vec2::from_angle(angle) * speed;
                // y uses the already twisted x
                v.x += -v.y * ROTATION_FORCE * 0.01;
                v.y += v.x * ROTATION_FORCE * 0.01;
                v
            }
        }
    }
}

pub(crate) fn lerp_range(rng: &mut fastrand::Rng, min: f32, max: f32) -> f32 {
    rng.f32() * (max - min) + min
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresetKind {
    #[default]
    Custom,
    Fireworks,
    Fountain,
    Snow,
    Rain,
    Galaxy,
}

impl PresetKind {
    pub const ALL: [PresetKind; 6] = [
        PresetKind::Custom,
        PresetKind::Fireworks,
        PresetKind::Fountain,
        PresetKind::Snow,
        PresetKind::Rain,
        PresetKind::Galaxy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PresetKind::Custom => "Custom",
            PresetKind::Fireworks => "Fireworks",
            PresetKind::Fountain => "Fountain",
            PresetKind::Snow => "Snow",
            PresetKind::Rain => "Rain",
            PresetKind::Galaxy => "Galaxy",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PresetKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticlePreset {
    pub kind: PresetKind,
    pub hover_spawn_rate: f32,
    pub click_spawn_rate: f32,
    pub gravity: f32,
    pub drag: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_life: f32,
    pub max_life: f32,
    pub palette: Vec<Rgba>,
    pub velocity: VelocityProfile,
}

impl ParticlePreset {
    pub fn for_kind(kind: PresetKind) -> Self {
        match kind {
            PresetKind::Custom => Self::from_params(kind, &SimulationParams::default()),
            PresetKind::Fireworks => Self {
                kind,
                hover_spawn_rate: 0.0,
                click_spawn_rate: 150.0,
                gravity: 200.0,
                drag: 0.98,
                min_speed: 300.0,
                max_speed: 500.0,
                min_size: 3.0,
                max_size: 8.0,
                min_life: 1.5,
                max_life: 3.0,
                palette: vec![
                    Rgba::new(255, 100, 100, 255),
                    Rgba::new(100, 255, 100, 255),
                    Rgba::new(100, 100, 255, 255),
                    Rgba::new(255, 255, 100, 255),
                    Rgba::new(255, 100, 255, 255),
                    Rgba::new(100, 255, 255, 255),
                ],
                velocity: VelocityProfile::Radial,
            },
            PresetKind::Fountain => Self {
                kind,
                hover_spawn_rate: 50.0,
                click_spawn_rate: 200.0,
                gravity: 300.0,
                drag: 0.99,
                min_speed: 200.0,
                max_speed: 400.0,
                min_size: 2.0,
                max_size: 4.0,
                min_life: 2.0,
                max_life: 4.0,
                palette: vec![
                    Rgba::new(100, 150, 255, 255),
                    Rgba::new(150, 200, 255, 255),
                    Rgba::new(200, 220, 255, 255),
                ],
                velocity: VelocityProfile::Fountain,
            },
            PresetKind::Snow => Self {
                kind,
                hover_spawn_rate: 30.0,
                click_spawn_rate: 100.0,
                gravity: 50.0,
                drag: 0.99,
                min_speed: 20.0,
                max_speed: 50.0,
                min_size: 2.0,
                max_size: 6.0,
                min_life: 5.0,
                max_life: 10.0,
                palette: vec![
                    Rgba::new(255, 255, 255, 255),
                    Rgba::new(240, 240, 255, 255),
                    Rgba::new(230, 230, 240, 255),
                ],
                velocity: VelocityProfile::Snow,
            },
            PresetKind::Rain => Self {
                kind,
                hover_spawn_rate: 50.0,
                click_spawn_rate: 200.0,
                gravity: 800.0,
                drag: 0.999,
                min_speed: 300.0,
                max_speed: 400.0,
                min_size: 1.0,
                max_size: 2.0,
                min_life: 1.0,
                max_life: 2.0,
                palette: vec![
                    Rgba::new(150, 180, 220, 200),
                    Rgba::new(180, 200, 230, 180),
                    Rgba::new(200, 210, 240, 160),
                ],
                velocity: VelocityProfile::Rain,
            },
            PresetKind::Galaxy => Self {
                kind,
                hover_spawn_rate: 20.0,
                click_spawn_rate: 80.0,
                gravity: 0.0,
                drag: 0.995,
                min_speed: 50.0,
                max_speed: 150.0,
                min_size: 1.0,
                max_size: 4.0,
                min_life: 3.0,
                max_life: 8.0,
                palette: vec![
                    Rgba::new(255, 200, 255, 255),
                    Rgba::new(200, 200, 255, 255),
                    Rgba::new(255, 255, 200, 255),
                    Rgba::new(200, 255, 255, 255),
                    Rgba::new(255, 220, 200, 255),
                ],
                velocity: VelocityProfile::Galaxy,
            },
        }
    }

    fn from_params(kind: PresetKind, params: &SimulationParams) -> Self {
        Self {
            kind,
            hover_spawn_rate: params.hover_spawn_rate,
            click_spawn_rate: params.click_spawn_rate,
            gravity: params.gravity,
            drag: params.drag,
            min_speed: params.min_speed,
            max_speed: params.max_speed,
            min_size: params.min_size,
            max_size: params.max_size,
            min_life: params.min_life,
            max_life: params.max_life,
            palette: params.palette.clone(),
            velocity: params.velocity,
        }
    }

    /// Overwrites the spawn and physics fields of `params`. Trail settings,
    /// caps and toggles are left alone.
    pub fn apply(&self, params: &mut SimulationParams) {
        params.hover_spawn_rate = self.hover_spawn_rate;
        params.click_spawn_rate = self.click_spawn_rate;
        params.gravity = self.gravity;
        params.drag = self.drag;
        params.min_speed = self.min_speed;
        params.max_speed = self.max_speed;
        params.min_size = self.min_size;
        params.max_size = self.max_size;
        params.min_life = self.min_life;
        params.max_life = self.max_life;
        params.palette = self.palette.clone();
        params.velocity = self.velocity;
    }
}

impl From<PresetKind> for ParticlePreset {
    fn from(kind: PresetKind) -> Self {
        Self::for_kind(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_ignores_case() {
        assert_eq!(PresetKind::from_name("snow").unwrap(), PresetKind::Snow);
        assert_eq!("GALAXY".parse::<PresetKind>().unwrap(), PresetKind::Galaxy);
        assert!(matches!(
            PresetKind::from_name("lava"),
            Err(ConfigError::UnknownPreset(name)) if name == "lava"
        ));
    }

    #[test]
    fn apply_keeps_trail_settings() {
        let mut params = SimulationParams {
            trail_life: 4.5,
            infinite_trails: true,
            max_particles: 12,
            ..SimulationParams::default()
        };
        ParticlePreset::for_kind(PresetKind::Rain).apply(&mut params);

        assert_eq!(params.gravity, 800.0);
        assert_eq!(params.velocity, VelocityProfile::Rain);
        assert_eq!(params.palette.len(), 3);
        assert_eq!(params.trail_life, 4.5);
        assert!(params.infinite_trails);
        assert_eq!(params.max_particles, 12);
    }

    #[test]
    fn custom_matches_defaults() {
        let mut params = SimulationParams::default();
        params.gravity = -20.0;
        ParticlePreset::for_kind(PresetKind::Custom).apply(&mut params);
        assert_eq!(params, SimulationParams::default());
    }

    #[test]
    fn profiles_stay_in_their_ranges() {
        let params = SimulationParams::default();
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..500 {
            let radial = VelocityProfile::Radial.sample(&params, &mut rng).length();
            assert!(radial >= params.min_speed - 1e-3 && radial <= params.max_speed + 1e-3);

            let fountain = VelocityProfile::Fountain.sample(&params, &mut rng);
            assert!(fountain.y < 0.0, "fountain should shoot upwards");

            let rain = VelocityProfile::Rain.sample(&params, &mut rng);
            assert!(rain.y >= 300.0 && rain.x.abs() <= 10.0);

            let snow = VelocityProfile::Snow.sample(&params, &mut rng);
            assert!(snow.y >= 20.0 && snow.x.abs() <= 15.0);
        }
    }
}
