use proptest::prelude::*;
use sparkler_core::{Action, History, Timeline};

#[derive(Debug, Clone)]
enum Op {
    Next,
    Previous,
    GoTo(usize),
    Add,
    Insert(usize),
    Delete(usize),
    Duplicate,
    Play,
    Pause,
    Stop,
    Loop(bool),
    Update(f32),
    Undo,
    Redo,
    UndoableAdd(usize),
    UndoableDelete(usize),
    UndoableClear(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Next),
        Just(Op::Previous),
        (0usize..12).prop_map(Op::GoTo),
        Just(Op::Add),
        (0usize..12).prop_map(Op::Insert),
        (0usize..12).prop_map(Op::Delete),
        Just(Op::Duplicate),
        Just(Op::Play),
        Just(Op::Pause),
        Just(Op::Stop),
        any::<bool>().prop_map(Op::Loop),
        (0.0f32..1.0).prop_map(Op::Update),
        Just(Op::Undo),
        Just(Op::Redo),
        (0usize..12).prop_map(Op::UndoableAdd),
        (0usize..12).prop_map(Op::UndoableDelete),
        (0usize..12).prop_map(Op::UndoableClear),
    ]
}

fn apply(timeline: &mut Timeline, history: &mut History, op: Op) {
    match op {
        Op::Next => timeline.next_frame(),
        Op::Previous => timeline.previous_frame(),
        Op::GoTo(i) => timeline.go_to_frame(i),
        Op::Add => {
            timeline.add_new_frame();
        }
        Op::Insert(i) => {
            timeline.insert_frame(i);
        }
        Op::Delete(i) => {
            timeline.delete_frame(i);
        }
        Op::Duplicate => {
            timeline.duplicate_current_frame();
        }
        Op::Play => timeline.play(),
        Op::Pause => timeline.pause(),
        Op::Stop => timeline.stop(),
        Op::Loop(on) => timeline.set_looping(on),
        Op::Update(dt) => {
            timeline.update(dt);
        }
        Op::Undo => {
            history.undo(timeline);
        }
        Op::Redo => {
            history.redo(timeline);
        }
        Op::UndoableAdd(i) => {
            history.execute(Action::add_frame(i), timeline);
        }
        Op::UndoableDelete(i) => {
            history.execute(Action::delete_frame(timeline, i), timeline);
        }
        Op::UndoableClear(i) => {
            history.execute(Action::clear_frame(timeline, i), timeline);
        }
    }
}

proptest! {
    #[test]
    fn index_stays_in_bounds_and_frames_stay_numbered(ops in prop::collection::vec(op(), 0..80)) {
        let mut timeline = Timeline::default();
        let mut history = History::default();
        for op in ops {
            apply(&mut timeline, &mut history, op);
            prop_assert!(timeline.frame_count() >= 1);
            prop_assert!(timeline.current_index() < timeline.frame_count());
            for (i, frame) in timeline.frames().iter().enumerate() {
                prop_assert_eq!(frame.frame_number, i);
            }
        }
    }

    #[test]
    fn history_never_exceeds_capacity(cap in 1usize..20, pushes in 0usize..60) {
        let mut timeline = Timeline::default();
        let mut history = History::with_capacity(cap);
        for i in 0..pushes {
            history.execute(Action::add_frame(i), &mut timeline);
        }
        prop_assert_eq!(history.undo_len(), pushes.min(cap));
        let kept: Vec<usize> = history.undo_actions().map(Action::index).collect();
        let expected: Vec<usize> = (pushes.saturating_sub(cap)..pushes).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn update_advances_floor_of_elapsed_quanta(fps in 1.0f32..60.0, quanta in 0usize..8) {
        let mut timeline = Timeline::default();
        for _ in 0..20 {
            timeline.add_new_frame();
        }
        timeline.set_playback_speed(fps);
        timeline.play();
        // land halfway between quanta so rounding cannot flip the count
        let dt = (quanta as f32 + 0.5) / timeline.playback_fps();
        prop_assert_eq!(timeline.update(dt), quanta);
        prop_assert_eq!(timeline.current_index(), quanta);
    }
}
