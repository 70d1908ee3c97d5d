//! Collaborator traits so `sparkler-core` stays free of windowing, input and GPU code.

use serde::{Deserialize, Serialize};
use sparkler_core::{Intent, PointerState, SceneView};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Drawable area in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn center(&self) -> [f32; 2] {
        [self.width as f32 / 2.0, self.height as f32 / 2.0]
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32
    }

    /// Drops a pointer position that lies outside the canvas.
    pub fn clip(&self, pointer: PointerState) -> PointerState {
        PointerState {
            position: pointer.position.filter(|pos| self.contains(pos.x, pos.y)),
            ..pointer
        }
    }
}

/// Everything the UI layer produced for one tick.
#[derive(Debug, Clone, Default)]
pub struct InputBatch {
    pub pointer: PointerState,
    pub intents: Vec<Intent>,
}

/// Source of pointer state and user intents (window events, UI widgets, scripts).
pub trait IntentSource {
    fn viewport(&self) -> Viewport;
    /// Next tick's input, or `None` once the source wants to quit.
    fn poll(&mut self, dt: f32) -> Option<InputBatch>;
}

/// Consumes the engine state read-only and produces pixels.
pub trait SceneRenderer {
    fn init(&mut self, _viewport: Viewport) -> Result<()> {
        Ok(())
    }
    fn render_frame(&mut self, scene: &SceneView<'_>) -> Result<()>;
    fn resize(&mut self, _viewport: Viewport) -> Result<()> {
        Ok(())
    }
}
