//! Sparkler core engine: platform-agnostic particles, sparkler trails and
//! the stop-motion timeline with undo/redo that captures them.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod history;
pub mod particle;
pub mod preset;
pub mod session;
pub mod simulation;
pub mod spawn;
pub mod timeline;
pub mod trail;

pub use color::Rgba;
pub use config::EngineConfig;
pub use error::ConfigError;
pub use frame::{Frame, ParticleSnapshot};
pub use history::{Action, ActionEvent, History, HistoryConfig, DEFAULT_HISTORY_CAPACITY};
pub use particle::{Particle, ShapeType};
pub use preset::{ParticlePreset, PresetKind, VelocityProfile};
pub use session::{Intent, PointerState, SceneView, Session};
pub use simulation::SimulationParams;
pub use spawn::Spawner;
pub use timeline::{Timeline, TimelineConfig};
pub use trail::{StrokeRecorder, TrailPoint, TrailSegment};
