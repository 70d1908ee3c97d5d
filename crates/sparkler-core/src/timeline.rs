//! Stop-motion timeline: an ordered, never-empty list of frames with a
//! play/pause/loop state machine.
//!
//! Playback runs at its own rate. [`Timeline::update`] accumulates elapsed
//! time and advances one frame per `1 / fps` quantum, independently of the
//! simulation tick rate. Structural edits renumber every frame so that
//! `frame_number` always equals the frame's index.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::frame::Frame;
use crate::particle::Particle;
use crate::trail::TrailSegment;

pub const MIN_PLAYBACK_FPS: f32 = 1.0;
pub const MAX_PLAYBACK_FPS: f32 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub playback_fps: f32,
    pub looping: bool,
    /// Capture the live lists into the current frame after every editing tick.
    pub auto_save: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            playback_fps: 12.0,
            looping: true,
            auto_save: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Timeline {
    frames: Vec<Frame>,
    current: usize,
    playing: bool,
    looping: bool,
    playback_fps: f32,
    frame_timer: f32,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(&TimelineConfig::default())
    }
}

impl Timeline {
    /// Starts with a single empty frame.
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            frames: vec![Frame::new(0)],
            current: 0,
            playing: false,
            looping: config.looping,
            playback_fps: config.playback_fps.clamp(MIN_PLAYBACK_FPS, MAX_PLAYBACK_FPS),
            frame_timer: 0.0,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn playback_fps(&self) -> f32 {
        self.playback_fps
    }

    pub fn frame_timer(&self) -> f32 {
        self.frame_timer
    }

    /// Seconds per frame during playback.
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.playback_fps
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.current]
    }

    pub fn current_frame_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.current]
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frame_mut(&mut self, index: usize) -> Option<&mut Frame> {
        self.frames.get_mut(index)
    }

    // -------- playback --------

    /// Accumulates `dt` and advances one frame per elapsed quantum.
    /// Returns the number of frames advanced.
    pub fn update(&mut self, dt: f32) -> usize {
        if !self.playing || self.frames.len() <= 1 || !dt.is_finite() {
            return 0;
        }
        self.frame_timer += dt;
        let quantum = self.frame_duration();
        let mut advanced = 0;
        if self.looping {
            // whole cycles land back on the same frame
            let cycle = quantum * self.frames.len() as f32;
            if self.frame_timer >= cycle {
                let cycles = (self.frame_timer / cycle) as usize;
                advanced = cycles.saturating_mul(self.frames.len());
                self.frame_timer %= cycle;
            }
        }
        while self.frame_timer >= quantum {
            self.frame_timer -= quantum;
            self.next_frame();
            advanced = advanced.saturating_add(1);
            if !self.playing {
                // reached the end without looping; pause reset the timer
                break;
            }
        }
        advanced
    }

    pub fn play(&mut self) {
        if self.frames.len() > 1 {
            self.playing = true;
            self.frame_timer = 0.0;
            debug!(frame = self.current, fps = self.playback_fps, "playback started");
        } else {
            debug!("play refused: timeline has a single frame");
        }
    }

    pub fn pause(&mut self) {
        if self.playing {
            debug!(frame = self.current, "playback paused");
        }
        self.playing = false;
        self.frame_timer = 0.0;
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.current = 0;
        self.frame_timer = 0.0;
        debug!("playback stopped");
    }

    pub fn set_playback_speed(&mut self, fps: f32) {
        self.playback_fps = fps.clamp(MIN_PLAYBACK_FPS, MAX_PLAYBACK_FPS);
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    // -------- navigation --------

    /// Wraps when looping; otherwise clamps at the last frame and pauses.
    pub fn next_frame(&mut self) {
        let count = self.frames.len();
        if self.current + 1 < count {
            self.current += 1;
        } else if self.looping {
            self.current = 0;
        } else {
            self.current = count - 1;
            self.pause();
        }
    }

    /// Wraps when looping; otherwise clamps at the first frame.
    pub fn previous_frame(&mut self) {
        if self.current > 0 {
            self.current -= 1;
        } else if self.looping {
            self.current = self.frames.len() - 1;
        }
    }

    pub fn go_to_frame(&mut self, index: usize) {
        self.current = index.min(self.frames.len() - 1);
    }

    // -------- structural edits --------

    /// Appends an empty frame. The current index does not move.
    pub fn add_new_frame(&mut self) -> usize {
        let index = self.frames.len();
        self.frames.push(Frame::new(index));
        debug!(index, count = self.frames.len(), "frame added");
        index
    }

    /// Inserts an empty frame at `index` (clamped to `[0, len]`).
    /// Returns the index it landed at.
    pub fn insert_frame(&mut self, index: usize) -> usize {
        self.insert_frame_with(index, Frame::default())
    }

    /// Inserts `frame` at `index` (clamped to `[0, len]`).
    pub fn insert_frame_with(&mut self, index: usize, frame: Frame) -> usize {
        let index = index.min(self.frames.len());
        self.frames.insert(index, frame);
        self.renumber();
        debug!(index, count = self.frames.len(), "frame inserted");
        index
    }

    /// Removes the frame at `index` (clamped to the last frame). Refused when
    /// only one frame remains.
    pub fn delete_frame(&mut self, index: usize) -> Option<Frame> {
        if self.frames.len() <= 1 {
            debug!("delete refused: last remaining frame");
            return None;
        }
        let index = index.min(self.frames.len() - 1);
        let removed = self.frames.remove(index);
        self.renumber();
        if self.current >= self.frames.len() {
            self.current = self.frames.len() - 1;
        }
        debug!(index, count = self.frames.len(), "frame deleted");
        Some(removed)
    }

    /// Deep-copies the current frame right after itself and moves onto the copy.
    pub fn duplicate_current_frame(&mut self) -> usize {
        let duplicate = self.current_frame().clone();
        self.frames.insert(self.current + 1, duplicate);
        self.renumber();
        self.current += 1;
        debug!(index = self.current, "frame duplicated");
        self.current
    }

    pub fn clear_current_frame(&mut self) {
        self.current_frame_mut().clear();
    }

    pub fn clear_frame(&mut self, index: usize) -> bool {
        match self.frames.get_mut(index) {
            Some(frame) => {
                frame.clear();
                true
            }
            None => false,
        }
    }

    fn renumber(&mut self) {
        for (i, frame) in self.frames.iter_mut().enumerate() {
            frame.frame_number = i;
        }
    }

    // -------- capture --------

    /// Overwrites the current frame with copies of the live lists.
    pub fn save_current_state(&mut self, trails: &[TrailSegment], particles: &[Particle]) {
        self.current_frame_mut().capture(trails, particles);
    }

    /// Fresh live lists loaded from `frame`; nothing is shared with it.
    pub fn load_frame_data(frame: &Frame) -> (Vec<TrailSegment>, Vec<Particle>) {
        frame.restore()
    }

    pub fn load_current_frame(&self) -> (Vec<TrailSegment>, Vec<Particle>) {
        self.current_frame().restore()
    }
}
