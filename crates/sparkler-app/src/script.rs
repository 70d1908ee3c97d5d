use std::f32::consts::TAU;

use glam::Vec2;
use sparkler_core::{Intent, PointerState};
use sparkler_platform::{InputBatch, IntentSource, Viewport};

/// Canned input: draws two frames, edits them and plays the result back.
pub struct ScriptedInput {
    viewport: Viewport,
    tick: u64,
}

impl ScriptedInput {
    pub const DEMO_TICKS: u64 = 420;

    pub fn demo() -> Self {
        Self {
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
            tick: 0,
        }
    }

    fn center(&self) -> Vec2 {
        Vec2::from(self.viewport.center())
    }

    fn batch(&self) -> InputBatch {
        let center = self.center();
        let t = self.tick;
        let (pointer, intents) = match t {
            // a circle on frame 0
            0..=89 => {
                let angle = t as f32 / 90.0 * TAU;
                (PointerState::pressed(center + Vec2::from_angle(angle) * 120.0), vec![])
            }
            90 => (PointerState::default(), vec![Intent::AddFrame]),
            // a spiral on frame 1
            91..=179 => {
                let k = (t - 91) as f32 / 89.0;
                let pos = center + Vec2::from_angle(k * 2.0 * TAU) * (20.0 + 140.0 * k);
                (PointerState::pressed(pos), vec![])
            }
            180 => (PointerState::default(), vec![Intent::DuplicateCurrentFrame]),
            181 => (PointerState::default(), vec![Intent::ClearCurrentFrame]),
            182 => (PointerState::default(), vec![Intent::Undo]),
            183 => (
                PointerState::default(),
                vec![Intent::SetPlaybackSpeed(8.0), Intent::Play],
            ),
            400 => (PointerState::default(), vec![Intent::Stop]),
            401 => (PointerState::default(), vec![Intent::Undo, Intent::Redo]),
            _ => (PointerState::hover(center), vec![]),
        };
        InputBatch { pointer, intents }
    }
}

impl IntentSource for ScriptedInput {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn poll(&mut self, _dt: f32) -> Option<InputBatch> {
        if self.tick >= Self::DEMO_TICKS {
            return None;
        }
        let batch = self.batch();
        self.tick += 1;
        Some(batch)
    }
}
