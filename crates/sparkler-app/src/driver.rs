use glam::Vec2;
use sparkler_core::{EngineConfig, Session};
use sparkler_platform::{IntentSource, Result, SceneRenderer};
use tracing::info;

/// Fixed simulation step of the headless loop.
pub const TICK_DT: f32 = 1.0 / 60.0;

/// Pumps `input` into a session at a fixed step and hands every tick to `renderer`.
pub fn run_headless(
    config: &EngineConfig,
    input: &mut dyn IntentSource,
    renderer: &mut dyn SceneRenderer,
) -> Result<Session> {
    let viewport = input.viewport();
    let mut session = Session::new(config);
    session.params_mut().auto_spawn_center = Vec2::from(viewport.center());
    renderer.init(viewport)?;

    let mut ticks = 0u64;
    while let Some(batch) = input.poll(TICK_DT) {
        session.tick(TICK_DT, viewport.clip(batch.pointer), batch.intents);
        renderer.render_frame(&session.view())?;
        ticks += 1;
    }

    let timeline = session.timeline();
    info!(
        ticks,
        frames = timeline.frame_count(),
        current = timeline.current_index(),
        undo = session.history().undo_len(),
        redo = session.history().redo_len(),
        "session finished"
    );
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::LogRenderer;
    use crate::script::ScriptedInput;
    use sparkler_core::PointerState;
    use sparkler_platform::{InputBatch, Viewport};

    /// Presses and drags outside the canvas for a fixed number of ticks.
    struct OffCanvasDrag {
        remaining: usize,
    }

    impl IntentSource for OffCanvasDrag {
        fn viewport(&self) -> Viewport {
            Viewport {
                width: 64,
                height: 64,
            }
        }

        fn poll(&mut self, _dt: f32) -> Option<InputBatch> {
            self.remaining = self.remaining.checked_sub(1)?;
            let x = 100.0 + self.remaining as f32 * 5.0;
            Some(InputBatch {
                pointer: PointerState::pressed(Vec2::new(x, 10.0)),
                intents: Vec::new(),
            })
        }
    }

    #[test]
    fn demo_script_builds_an_animation() {
        let config = EngineConfig {
            seed: Some(42),
            ..EngineConfig::default()
        };
        let mut input = ScriptedInput::demo();
        let mut renderer = LogRenderer::new(0);
        let session = run_headless(&config, &mut input, &mut renderer).unwrap();

        assert_eq!(renderer.frames_rendered(), ScriptedInput::DEMO_TICKS);
        assert_eq!(session.timeline().frame_count(), 3);
        assert!(!session.timeline().is_playing());
        assert!(renderer.peak_particles() <= config.simulation.max_particles);
        assert!(renderer.saw_playback());
    }

    #[test]
    fn off_canvas_pointer_neither_draws_nor_spawns() {
        let mut input = OffCanvasDrag { remaining: 30 };
        let mut renderer = LogRenderer::new(0);
        let session = run_headless(&EngineConfig::default(), &mut input, &mut renderer).unwrap();

        assert_eq!(renderer.frames_rendered(), 30);
        assert!(session.trails().is_empty());
        assert!(session.particles().is_empty());
        assert!(!session.history().can_undo());
    }
}
