use sparkler_core::SceneView;
use sparkler_platform::{Result, SceneRenderer, Viewport};
use tracing::{debug, info};

/// Headless renderer: reports scene statistics instead of drawing.
pub struct LogRenderer {
    /// Log every n-th frame; 0 disables periodic logging.
    every: u64,
    rendered: u64,
    peak_particles: usize,
    saw_playback: bool,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every,
            rendered: 0,
            peak_particles: 0,
            saw_playback: false,
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.rendered
    }

    pub fn peak_particles(&self) -> usize {
        self.peak_particles
    }

    pub fn saw_playback(&self) -> bool {
        self.saw_playback
    }
}

impl SceneRenderer for LogRenderer {
    fn init(&mut self, viewport: Viewport) -> Result<()> {
        info!(width = viewport.width, height = viewport.height, "log renderer ready");
        Ok(())
    }

    fn render_frame(&mut self, scene: &SceneView<'_>) -> Result<()> {
        self.rendered += 1;
        self.peak_particles = self.peak_particles.max(scene.particles.len());
        self.saw_playback |= scene.playing;

        if self.every > 0 && self.rendered % self.every == 0 {
            let points: usize = scene.trails.iter().map(|t| t.len()).sum();
            info!(
                tick = self.rendered,
                particles = scene.particles.len(),
                trails = scene.trails.len(),
                points,
                frame = scene.frame_index,
                frames = scene.frame_count,
                playing = scene.playing,
                undo = scene.undo_label.unwrap_or("-"),
                "scene"
            );
        } else {
            debug!(tick = self.rendered, particles = scene.particles.len(), "scene");
        }
        Ok(())
    }
}
