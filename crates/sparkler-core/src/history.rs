//! Undo/redo over structural timeline edits.
//!
//! Actions are a closed set. Each one captures, when it is built, everything
//! it needs to replay or revert itself, so later changes to the timeline
//! cannot leak into it. Instead of calling back into the UI, executing or
//! reverting an action returns an [`ActionEvent`] describing what changed.
//!
//! Actions address frames by the index they were built with. If frames are
//! inserted or removed outside the history between execute and undo, that
//! index may refer to a different frame.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::frame::Frame;
use crate::timeline::Timeline;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// What an executed or reverted action did to the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEvent {
    FrameInserted(usize),
    FrameRemoved(usize),
    FrameContentsChanged(usize),
    /// The target frame was missing or the edit was refused.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddFrame { index: usize },
    DeleteFrame { index: usize, frame: Frame },
    ClearFrame { index: usize, before: Frame },
    Draw { index: usize, before: Frame, after: Frame },
}

impl Action {
    pub fn add_frame(index: usize) -> Self {
        Action::AddFrame { index }
    }

    /// Captures a copy of the frame that will be deleted.
    pub fn delete_frame(timeline: &Timeline, index: usize) -> Self {
        let index = index.min(timeline.frame_count() - 1);
        let frame = timeline
            .frame(index)
            .cloned()
            .unwrap_or_else(|| Frame::new(index));
        Action::DeleteFrame { index, frame }
    }

    /// Captures a copy of the frame contents before they are cleared.
    pub fn clear_frame(timeline: &Timeline, index: usize) -> Self {
        let before = timeline
            .frame(index)
            .cloned()
            .unwrap_or_else(|| Frame::new(index));
        Action::ClearFrame { index, before }
    }

    /// Records a drawing pass on frame `index` as a before/after pair.
    pub fn draw(index: usize, before: &Frame, after: &Frame) -> Self {
        Action::Draw {
            index,
            before: before.clone(),
            after: after.clone(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::AddFrame { .. } => "Add Frame",
            Action::DeleteFrame { .. } => "Delete Frame",
            Action::ClearFrame { .. } => "Clear Frame",
            Action::Draw { .. } => "Draw",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Action::AddFrame { index }
            | Action::DeleteFrame { index, .. }
            | Action::ClearFrame { index, .. }
            | Action::Draw { index, .. } => *index,
        }
    }

    pub fn execute(&self, timeline: &mut Timeline) -> ActionEvent {
        match self {
            Action::AddFrame { index } => ActionEvent::FrameInserted(timeline.insert_frame(*index)),
            Action::DeleteFrame { index, .. } => remove(timeline, *index),
            Action::ClearFrame { index, .. } => {
                if timeline.clear_frame(*index) {
                    ActionEvent::FrameContentsChanged(*index)
                } else {
                    ActionEvent::Unchanged
                }
            }
            Action::Draw { index, after, .. } => set_contents(timeline, *index, after),
        }
    }

    pub fn undo(&self, timeline: &mut Timeline) -> ActionEvent {
        match self {
            Action::AddFrame { index } => remove(timeline, *index),
            Action::DeleteFrame { index, frame } => {
                ActionEvent::FrameInserted(timeline.insert_frame_with(*index, frame.clone()))
            }
            Action::ClearFrame { index, before } => set_contents(timeline, *index, before),
            Action::Draw { index, before, .. } => set_contents(timeline, *index, before),
        }
    }
}

fn remove(timeline: &mut Timeline, index: usize) -> ActionEvent {
    match timeline.delete_frame(index) {
        Some(_) => ActionEvent::FrameRemoved(index.min(timeline.frame_count())),
        None => ActionEvent::Unchanged,
    }
}

fn set_contents(timeline: &mut Timeline, index: usize, source: &Frame) -> ActionEvent {
    match timeline.frame_mut(index) {
        Some(frame) => {
            frame.copy_contents_from(source);
            ActionEvent::FrameContentsChanged(index)
        }
        None => ActionEvent::Unchanged,
    }
}

/// Linear undo/redo history with a bounded undo stack.
#[derive(Debug)]
pub struct History {
    undo_stack: VecDeque<Action>,
    redo_stack: VecDeque<Action>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    pub fn new(config: &HistoryConfig) -> Self {
        Self::with_capacity(config.capacity)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Executes `action`, records it and drops any redo history. A refused
    /// action ([`ActionEvent::Unchanged`]) is not recorded.
    pub fn execute(&mut self, action: Action, timeline: &mut Timeline) -> ActionEvent {
        let event = action.execute(timeline);
        if event == ActionEvent::Unchanged {
            debug!(action = action.label(), "refused, not recorded");
            return event;
        }
        debug!(action = action.label(), ?event, "executed");
        self.redo_stack.clear();
        if self.undo_stack.len() >= self.capacity {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(action);
        event
    }

    /// Reverts the newest action. `None` if there is nothing to undo.
    pub fn undo(&mut self, timeline: &mut Timeline) -> Option<ActionEvent> {
        let Some(action) = self.undo_stack.pop_back() else {
            debug!("undo refused: history empty");
            return None;
        };
        let event = action.undo(timeline);
        debug!(action = action.label(), ?event, "undone");
        self.redo_stack.push_back(action);
        Some(event)
    }

    /// Re-executes the most recently undone action. `None` if there is nothing to redo.
    pub fn redo(&mut self, timeline: &mut Timeline) -> Option<ActionEvent> {
        let Some(action) = self.redo_stack.pop_back() else {
            debug!("redo refused: nothing undone");
            return None;
        };
        let event = action.execute(timeline);
        debug!(action = action.label(), ?event, "redone");
        // a refused replay has nothing to revert
        if event != ActionEvent::Unchanged {
            self.undo_stack.push_back(action);
        }
        Some(event)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_label(&self) -> Option<&'static str> {
        self.undo_stack.back().map(Action::label)
    }

    pub fn redo_label(&self) -> Option<&'static str> {
        self.redo_stack.back().map(Action::label)
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undoable actions, oldest first.
    pub fn undo_actions(&self) -> impl Iterator<Item = &Action> {
        self.undo_stack.iter()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
