use approx::assert_relative_eq;
use glam::Vec2;
use sparkler_core::{
    Action, History, Particle, Rgba, ShapeType, SimulationParams, Timeline, TrailPoint,
    TrailSegment,
};

fn live_state() -> (Vec<TrailSegment>, Vec<Particle>) {
    let trails = vec![
        TrailSegment::from_points([
            TrailPoint::new(Vec2::new(0.0, 0.0), 3.0),
            TrailPoint::new(Vec2::new(2.0, 1.0), 3.0),
        ]),
        TrailSegment::from_points([TrailPoint::new(Vec2::new(9.0, 9.0), 1.5)]),
    ];
    let mut particle = Particle::new(Vec2::new(5.0, 6.0), Rgba::new(120, 130, 140, 255));
    particle.vel = Vec2::new(30.0, -12.0);
    particle.size = 3.5;
    particle.shape = ShapeType::Star;
    particle.set_life(2.5);
    particle.integrate(0.5);
    (trails, vec![particle])
}

#[test]
fn save_then_load_reproduces_live_state() {
    let (trails, particles) = live_state();
    let mut timeline = Timeline::default();
    timeline.save_current_state(&trails, &particles);

    let (loaded_trails, loaded_particles) = Timeline::load_frame_data(timeline.current_frame());

    assert_eq!(loaded_trails.len(), trails.len());
    for (loaded, original) in loaded_trails.iter().zip(&trails) {
        assert_eq!(loaded.len(), original.len());
        for (a, b) in loaded.points.iter().zip(&original.points) {
            assert_eq!(a.pos, b.pos);
            assert_relative_eq!(a.life(), b.life());
        }
    }

    let (a, b) = (&loaded_particles[0], &particles[0]);
    assert_eq!(a.pos, b.pos);
    assert_eq!(a.vel, b.vel);
    assert_eq!(a.size, b.size);
    assert_eq!(a.color, b.color);
    assert_eq!(a.shape, b.shape);
    assert_relative_eq!(a.life(), b.life());
    // the fade restarts from the saved remaining life
    assert_relative_eq!(a.max_life(), b.life());
}

#[test]
fn mutating_live_lists_after_save_leaves_frame_alone() {
    let (mut trails, mut particles) = live_state();
    let mut timeline = Timeline::default();
    timeline.save_current_state(&trails, &particles);
    let stored = timeline.current_frame().clone();

    trails[0].points[0].pos = Vec2::new(-100.0, -100.0);
    trails.push(TrailSegment::new());
    particles[0].vel = Vec2::ZERO;
    particles.clear();

    assert_eq!(timeline.current_frame(), &stored);
}

#[test]
fn simulating_loaded_lists_leaves_frame_alone() {
    let (trails, particles) = live_state();
    let mut timeline = Timeline::default();
    timeline.save_current_state(&trails, &particles);
    let stored = timeline.current_frame().clone();

    let (mut live_trails, mut live_particles) = timeline.load_current_frame();
    let params = SimulationParams::default();
    for _ in 0..100 {
        sparkler_core::simulation::step(&mut live_particles, &mut live_trails, &params, 0.1);
    }
    assert!(live_trails.is_empty());
    assert!(live_particles.is_empty());
    assert_eq!(timeline.current_frame(), &stored);
}

#[test]
fn execute_then_undo_restores_timeline() {
    let (trails, particles) = live_state();
    let mut timeline = Timeline::default();
    timeline.save_current_state(&trails, &particles);
    timeline.add_new_frame();
    timeline.go_to_frame(1);
    timeline.save_current_state(&trails[..1], &[]);
    let before: Vec<_> = timeline.frames().to_vec();

    let mut history = History::default();
    let actions = [
        Action::add_frame(1),
        Action::delete_frame(&timeline, 0),
        Action::clear_frame(&timeline, 1),
    ];
    for action in actions {
        history.execute(action, &mut timeline);
        history.undo(&mut timeline);
        assert_eq!(timeline.frames(), before.as_slice());
    }
}

#[test]
fn undo_then_redo_restores_post_execute_state() {
    let (trails, particles) = live_state();
    let mut timeline = Timeline::default();
    timeline.save_current_state(&trails, &particles);
    timeline.add_new_frame();

    let mut history = History::default();
    history.execute(Action::clear_frame(&timeline, 0), &mut timeline);
    history.execute(Action::add_frame(1), &mut timeline);
    history.execute(Action::delete_frame(&timeline, 2), &mut timeline);
    let after: Vec<_> = timeline.frames().to_vec();

    for _ in 0..3 {
        history.undo(&mut timeline);
    }
    assert!(!history.can_undo());
    for _ in 0..3 {
        history.redo(&mut timeline);
    }
    assert_eq!(timeline.frames(), after.as_slice());
}
