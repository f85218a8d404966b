mod common;

use bunnysim_lib::model::clock::{GenerationClock, MIN_STEPS_PER_GENERATION};
use bunnysim_lib::model::data::{CauseOfDeath, SimulationMode, TimeSpeed};
use bunnysim_lib::model::SimEvent;
use common::ModelBuilder;

#[test]
fn test_model_boundary_lands_on_twelve() {
    let mut model = ModelBuilder::new().with_population(2).playing().build();

    let mut boundary_times = Vec::new();
    for _ in 0..400 {
        let events = model.step(0.07).unwrap();
        if events
            .iter()
            .any(|e| matches!(e, SimEvent::GenerationChanged { .. }))
        {
            boundary_times.push(model.clock().time_in_seconds());
        }
    }

    assert_eq!(boundary_times.len(), model.current_generation() as usize);
    for (i, time) in boundary_times.iter().enumerate() {
        assert_eq!(*time, (i as f64 + 1.0) * 10.0);
    }
}

#[test]
fn test_oversized_dt_is_clamped() {
    let mut model = ModelBuilder::new().with_population(2).playing().build();
    let spg = model.clock().seconds_per_generation();

    model.step(1_000.0).unwrap();
    assert_eq!(model.clock().time_in_seconds(), spg / MIN_STEPS_PER_GENERATION);
    assert_eq!(model.current_generation(), 0);
}

#[test]
fn test_fast_speed_takes_fewer_frames() {
    let frames_for_one_generation = |speed: TimeSpeed| {
        let mut model = ModelBuilder::new().with_population(2).playing().build();
        model.set_time_speed(speed);
        let mut frames = 0;
        while model.current_generation() == 0 {
            model.step(0.1).unwrap();
            frames += 1;
        }
        frames
    };

    assert_eq!(frames_for_one_generation(TimeSpeed::Normal), 100);
    assert_eq!(frames_for_one_generation(TimeSpeed::Fast), 25);
}

#[test]
fn test_selection_windows_never_skipped_at_max_rate() {
    let mut model = ModelBuilder::new()
        .with_population(40)
        .with_wolves(0.1)
        .with_config(|c| {
            c.population.max_population = 100_000;
            c.clock.max_generations = 4;
        })
        .playing()
        .build();

    let mut hunted_in = Vec::new();
    for _ in 0..200 {
        for event in model.step(f64::MAX).unwrap() {
            if let SimEvent::BunnyDied {
                generation,
                cause: CauseOfDeath::Wolves,
                ..
            } = event
            {
                if !hunted_in.contains(&generation) {
                    hunted_in.push(generation);
                }
            }
        }
    }

    assert_eq!(model.mode(), SimulationMode::Completed);
    assert_eq!(hunted_in, vec![0, 1, 2, 3]);
    assert_eq!(model.wolves().agent().acted_generation(), Some(3));
}

#[test]
fn test_stopped_clock_ignores_steps() {
    let mut clock = GenerationClock::new(10.0);
    for _ in 0..5 {
        assert_eq!(clock.step(1.0).unwrap(), None);
    }
    assert_eq!(clock.time_in_seconds(), 0.0);
}
