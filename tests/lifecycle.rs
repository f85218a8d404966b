mod common;

use bunnysim_lib::app::{App, RunOptions};
use bunnysim_lib::model::config::SimConfig;
use bunnysim_lib::model::data::{CauseOfDeath, SimulationMode};
use bunnysim_lib::model::history::{RunHistory, RunOutcome};
use bunnysim_lib::model::SimEvent;
use common::{run_generations, ModelBuilder};

#[test]
fn test_overpopulation_ends_the_run_once() {
    let mut model = ModelBuilder::new()
        .with_population(4)
        .with_config(|c| c.population.max_population = 10)
        .playing()
        .build();

    let mut events = run_generations(&mut model, 1);
    // Further steps after completion are ignored.
    for _ in 0..30 {
        events.extend(model.step(1.0).unwrap());
    }

    assert_terminal_once!(
        events,
        SimEvent::BunniesTookOver {
            generation: 1,
            population: 12
        }
    );
    assert_population!(model, 12);
    assert_eq!(model.mode(), SimulationMode::Completed);
    assert!(!model.clock().is_running());
    assert_eq!(model.outcome(), Some(RunOutcome::BunniesTookOver));
    assert_eq!(count_events!(events, SimEvent::BunnyBorn { .. }), 8);
}

#[test]
fn test_everyone_dies_of_old_age() {
    let mut model = ModelBuilder::new()
        .with_population(6)
        .with_config(|c| c.population.max_age = 1)
        .playing()
        .build();
    let mut live_counts = vec![model.live_count()];
    let mut events = Vec::new();
    for _ in 0..30 {
        events.extend(model.step(1.0).unwrap());
        if live_counts.last() != Some(&model.live_count()) {
            live_counts.push(model.live_count());
        }
    }

    assert_terminal_once!(events, SimEvent::AllDied { generation: 1 });
    assert_eq!(live_counts, vec![6, 0]);
    assert_eq!(
        count_events!(
            events,
            SimEvent::BunnyDied {
                cause: CauseOfDeath::OldAge,
                age: 1,
                ..
            }
        ),
        6
    );
    // Generation-0 births were drained on the first step.
    assert_eq!(count_events!(events, SimEvent::BunnyBorn { generation: 1, .. }), 0);
    assert_eq!(model.mode(), SimulationMode::Completed);
    assert_eq!(model.metrics().deaths_by(CauseOfDeath::OldAge), 6);
    assert!(model
        .bunnies()
        .dead()
        .all(|b| b.death_generation == Some(1)));
}

#[test]
fn test_pedigree_reaches_dead_founders() {
    let mut model = ModelBuilder::new()
        .with_population(2)
        .with_config(|c| c.population.max_age = 2)
        .playing()
        .build();
    run_generations(&mut model, 2);
    assert_eq!(model.current_generation(), 2);

    let founders: Vec<_> = model.bunnies().all().iter().filter(|b| b.generation == 0).collect();
    assert!(founders.iter().all(|b| !b.is_alive));

    let grandchild = model
        .bunnies()
        .live()
        .find(|b| b.generation == 2)
        .expect("generation 2 litter");
    let tree = model.pedigree(&grandchild.id, 3).unwrap();
    assert_eq!(tree.depth(), 3);
    let father = tree.father.as_ref().unwrap();
    assert_eq!(model.bunnies().get(&father.bunny_id).unwrap().generation, 1);
    let grandfather = father.father.as_ref().unwrap();
    assert!(!grandfather.is_alive);
    assert_eq!(model.bunnies().get(&grandfather.bunny_id).unwrap().generation, 0);
}

#[test]
fn test_history_written_when_run_ends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json.gz");

    let mut config = SimConfig {
        seed: Some(11),
        ..SimConfig::default()
    };
    config.clock.max_generations = 2;
    let options = RunOptions {
        history_path: Some(path.clone()),
        ..Default::default()
    };
    let mut app = App::new(config, options).unwrap();
    assert_eq!(app.run().unwrap(), RunOutcome::GenerationLimitReached);

    let history = RunHistory::load(&path).unwrap();
    assert_eq!(history.outcome, RunOutcome::GenerationLimitReached);
    assert_eq!(history.final_generation, 2);
    assert_eq!(history.seed, Some(11));
    // 2 founders, 4 born at generation 1, 12 at generation 2.
    assert_eq!(history.total_bunnies, 18);
    assert_eq!(history.fingerprint, app.model.config().fingerprint());
    assert!(history.stats.proportions_for(2).is_some());
}
