//! The editing session: live simulation lists plus the timeline and history
//! that capture them.
//!
//! One [`Session::tick`] runs, in order: pointer input capture, queued
//! intents (navigation, structural edits, undo/redo), timeline playback,
//! the simulation step and the auto-save capture. While the timeline plays
//! the simulation is frozen and the live lists only ever receive copies of
//! stored frames, so playback cannot corrupt what was drawn.

use glam::Vec2;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::frame::Frame;
use crate::history::{Action, ActionEvent, History};
use crate::particle::Particle;
use crate::preset::{ParticlePreset, PresetKind};
use crate::simulation::{self, SimulationParams};
use crate::spawn::Spawner;
use crate::timeline::Timeline;
use crate::trail::{StrokeRecorder, TrailSegment};

/// Pointer state sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// `None` when the pointer is outside the canvas or over UI.
    pub position: Option<Vec2>,
    pub pressed: bool,
}

impl PointerState {
    pub fn hover(position: Vec2) -> Self {
        Self {
            position: Some(position),
            pressed: false,
        }
    }

    pub fn pressed(position: Vec2) -> Self {
        Self {
            position: Some(position),
            pressed: true,
        }
    }
}

/// Discrete user commands produced by the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Play,
    Pause,
    TogglePlayback,
    Stop,
    SetPlaybackSpeed(f32),
    SetLooping(bool),
    NextFrame,
    PreviousFrame,
    GoToFrame(usize),
    AddFrame,
    InsertFrame(usize),
    DeleteFrame(usize),
    DeleteCurrentFrame,
    DuplicateCurrentFrame,
    ClearCurrentFrame,
    SaveFrame,
    Undo,
    Redo,
    /// Empties the live lists without touching history.
    ClearAll,
    ApplyPreset(PresetKind),
    SetAutoSpawn(bool),
    SetInfiniteTrails(bool),
}

/// Read-only view handed to renderers and UI.
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub particles: &'a [Particle],
    pub trails: &'a [TrailSegment],
    pub frame_index: usize,
    pub frame_count: usize,
    pub playing: bool,
    pub looping: bool,
    pub playback_fps: f32,
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_label: Option<&'static str>,
    pub redo_label: Option<&'static str>,
}

pub struct Session {
    params: SimulationParams,
    auto_save: bool,
    particles: Vec<Particle>,
    trails: Vec<TrailSegment>,
    stroke: StrokeRecorder,
    /// Frame contents when the active stroke started.
    stroke_before: Option<Frame>,
    spawner: Spawner,
    timeline: Timeline,
    history: History,
    rng: fastrand::Rng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl Session {
    pub fn new(config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        info!(preset = ?config.preset, "session created");
        Self {
            params: config.resolved_params(),
            auto_save: config.timeline.auto_save,
            particles: Vec::new(),
            trails: Vec::new(),
            stroke: StrokeRecorder::default(),
            stroke_before: None,
            spawner: Spawner::new(),
            timeline: Timeline::new(&config.timeline),
            history: History::new(&config.history),
            rng,
        }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SimulationParams {
        &mut self.params
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn trails(&self) -> &[TrailSegment] {
        &self.trails
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn view(&self) -> SceneView<'_> {
        SceneView {
            particles: &self.particles,
            trails: &self.trails,
            frame_index: self.timeline.current_index(),
            frame_count: self.timeline.frame_count(),
            playing: self.timeline.is_playing(),
            looping: self.timeline.is_looping(),
            playback_fps: self.timeline.playback_fps(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            undo_label: self.history.undo_label(),
            redo_label: self.history.redo_label(),
        }
    }

    pub fn tick(&mut self, dt: f32, pointer: PointerState, intents: impl IntoIterator<Item = Intent>) {
        if !self.timeline.is_playing() {
            self.capture_input(pointer, dt);
        }

        for intent in intents {
            self.apply(intent);
        }

        if self.timeline.is_playing() {
            let before = self.timeline.current_index();
            self.timeline.update(dt);
            if self.timeline.current_index() != before {
                self.load_current_frame();
            }
            return;
        }

        simulation::step(&mut self.particles, &mut self.trails, &self.params, dt);
        if self.auto_save {
            self.save_current_frame();
        }
    }

    fn capture_input(&mut self, pointer: PointerState, dt: f32) {
        match pointer.position {
            Some(pos) if pointer.pressed => {
                if self.stroke.extend(&mut self.trails, pos, self.params.trail_life) {
                    self.begin_stroke();
                }
            }
            _ => self.finish_stroke(),
        }

        if let Some(pos) = pointer.position {
            let rate = if pointer.pressed {
                self.params.click_spawn_rate
            } else {
                self.params.hover_spawn_rate
            };
            Spawner::spawn_at_rate(&mut self.particles, &self.params, &mut self.rng, pos, rate, dt);
        }
        self.spawner
            .tick_auto_spawn(&mut self.particles, &self.params, &mut self.rng, dt);
        Spawner::spawn_trail_sparkles(&mut self.particles, &self.trails, &self.params, &mut self.rng);
    }

    /// Snapshots the live lists as they were before the stroke that just started.
    fn begin_stroke(&mut self) {
        let mut before = Frame::new(self.timeline.current_index());
        let trails_before = &self.trails[..self.trails.len().saturating_sub(1)];
        before.capture(trails_before, &self.particles);
        self.stroke_before = Some(before);
    }

    /// Ends the active stroke and records it as an undoable draw.
    fn finish_stroke(&mut self) {
        if !self.stroke.end() {
            return;
        }
        let Some(before) = self.stroke_before.take() else {
            return;
        };
        self.save_current_frame();
        let index = self.timeline.current_index();
        let after = self.timeline.current_frame().clone();
        self.history
            .execute(Action::draw(index, &before, &after), &mut self.timeline);
    }

    /// Drops an in-progress stroke without recording it.
    fn abandon_stroke(&mut self) {
        self.stroke.end();
        self.stroke_before = None;
    }

    pub fn apply(&mut self, intent: Intent) {
        debug!(?intent, "intent");
        match intent {
            Intent::Play => self.play(),
            Intent::Pause => self.timeline.pause(),
            Intent::TogglePlayback => {
                if self.timeline.is_playing() {
                    self.timeline.pause();
                } else {
                    self.play();
                }
            }
            Intent::Stop => {
                self.commit_edits();
                self.timeline.stop();
                self.load_current_frame();
            }
            Intent::SetPlaybackSpeed(fps) => self.timeline.set_playback_speed(fps),
            Intent::SetLooping(looping) => self.timeline.set_looping(looping),
            Intent::NextFrame => self.navigate(Timeline::next_frame),
            Intent::PreviousFrame => self.navigate(Timeline::previous_frame),
            Intent::GoToFrame(index) => self.navigate(|t| t.go_to_frame(index)),
            Intent::AddFrame => {
                let index = self.timeline.frame_count();
                self.execute(Action::add_frame(index));
            }
            Intent::InsertFrame(index) => self.execute(Action::add_frame(index)),
            Intent::DeleteFrame(index) => self.delete_frame(index),
            Intent::DeleteCurrentFrame => self.delete_frame(self.timeline.current_index()),
            Intent::DuplicateCurrentFrame => {
                self.commit_edits();
                self.timeline.duplicate_current_frame();
                self.load_current_frame();
            }
            Intent::ClearCurrentFrame => {
                self.commit_edits();
                let index = self.timeline.current_index();
                self.execute(Action::clear_frame(&self.timeline, index));
            }
            Intent::SaveFrame => self.save_current_frame(),
            Intent::Undo => {
                self.commit_edits();
                if let Some(event) = self.history.undo(&mut self.timeline) {
                    self.sync_after(event);
                }
            }
            Intent::Redo => {
                self.commit_edits();
                if let Some(event) = self.history.redo(&mut self.timeline) {
                    self.sync_after(event);
                }
            }
            Intent::ClearAll => self.clear_all(),
            Intent::ApplyPreset(kind) => {
                ParticlePreset::for_kind(kind).apply(&mut self.params);
                info!(preset = %kind, "preset applied");
            }
            Intent::SetAutoSpawn(on) => self.params.auto_spawn = on,
            Intent::SetInfiniteTrails(on) => self.params.infinite_trails = on,
        }
    }

    fn play(&mut self) {
        self.commit_edits();
        self.timeline.play();
    }

    fn navigate(&mut self, step: impl FnOnce(&mut Timeline)) {
        self.commit_edits();
        let before = self.timeline.current_index();
        step(&mut self.timeline);
        if self.timeline.current_index() != before {
            self.load_current_frame();
        }
    }

    fn delete_frame(&mut self, index: usize) {
        if self.timeline.frame_count() <= 1 {
            debug!("delete refused: last remaining frame");
            return;
        }
        self.commit_edits();
        self.execute(Action::delete_frame(&self.timeline, index));
    }

    fn execute(&mut self, action: Action) {
        self.commit_edits();
        let event = self.history.execute(action, &mut self.timeline);
        self.sync_after(event);
    }

    /// Brings the live lists in line with the timeline after an action.
    fn sync_after(&mut self, event: ActionEvent) {
        match event {
            ActionEvent::FrameInserted(index) => {
                self.timeline.go_to_frame(index);
                self.load_current_frame();
            }
            ActionEvent::FrameRemoved(_) => self.load_current_frame(),
            ActionEvent::FrameContentsChanged(index) => {
                if index == self.timeline.current_index() {
                    self.load_current_frame();
                }
            }
            ActionEvent::Unchanged => {}
        }
    }

    /// Records an in-progress stroke and saves the live lists.
    fn commit_edits(&mut self) {
        self.finish_stroke();
        self.save_if_editing();
    }

    fn save_if_editing(&mut self) {
        if !self.timeline.is_playing() {
            self.save_current_frame();
        }
    }

    pub fn save_current_frame(&mut self) {
        self.timeline.save_current_state(&self.trails, &self.particles);
    }

    fn load_current_frame(&mut self) {
        self.abandon_stroke();
        let (trails, particles) = self.timeline.load_current_frame();
        self.trails = trails;
        self.particles = particles;
    }

    pub fn clear_all(&mut self) {
        self.abandon_stroke();
        self.particles.clear();
        self.trails.clear();
    }
}
