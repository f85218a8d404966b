mod common;

use bunnysim_lib::model::data::{Allele, CauseOfDeath, Environment};
use bunnysim_lib::model::{NaturalSelectionModel, SimEvent};
use common::ModelBuilder;

fn deaths_showing(model: &NaturalSelectionModel, cause: CauseOfDeath, allele: Allele) -> usize {
    model
        .bunnies()
        .dead()
        .filter(|b| b.cause_of_death == Some(cause))
        .filter(|b| b.phenotype.trait_for(allele.gene()) == allele)
        .count()
}

/// Steps through most of generation 0 without reaching the boundary.
fn run_first_generation(model: &mut NaturalSelectionModel) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for _ in 0..9 {
        events.extend(model.step(1.0).unwrap());
    }
    assert_eq!(model.current_generation(), 0);
    events
}

#[test]
fn test_wolves_spot_brown_fur_in_the_arctic() {
    let mut model = ModelBuilder::new()
        .with_expressions("f", &["10ff", "10FF"])
        .with_environment(Environment::Arctic)
        .with_wolves(0.25)
        .playing()
        .build();
    run_first_generation(&mut model);

    // Brown stands out: 10 × 0.25 × 2. White: round(10 × 0.25).
    assert_eq!(deaths_showing(&model, CauseOfDeath::Wolves, Allele::BrownFur), 5);
    assert_eq!(deaths_showing(&model, CauseOfDeath::Wolves, Allele::WhiteFur), 3);
    assert_population!(model, 12);
}

#[test]
fn test_wolves_spot_white_fur_at_the_equator() {
    let mut model = ModelBuilder::new()
        .with_expressions("f", &["10ff", "10FF"])
        .with_environment(Environment::Equator)
        .with_wolves(0.25)
        .playing()
        .build();
    run_first_generation(&mut model);

    assert_eq!(deaths_showing(&model, CauseOfDeath::Wolves, Allele::WhiteFur), 5);
    assert_eq!(deaths_showing(&model, CauseOfDeath::Wolves, Allele::BrownFur), 3);
}

#[test]
fn test_wolves_hunt_once_per_generation() {
    let mut model = ModelBuilder::new()
        .with_population(20)
        .with_wolves(0.25)
        .playing()
        .build();
    let events = run_first_generation(&mut model);

    assert_eq!(
        count_events!(
            events,
            SimEvent::BunnyDied {
                cause: CauseOfDeath::Wolves,
                ..
            }
        ),
        5
    );
    assert_eq!(model.wolves().agent().acted_generation(), Some(0));
    assert_population!(model, 15);
}

#[test]
fn test_tough_food_favours_long_teeth() {
    let mut model = ModelBuilder::new()
        .with_expressions("t", &["10tt", "10TT"])
        .with_config(|c| c.food.tough = true)
        .playing()
        .build();
    run_first_generation(&mut model);

    let short = deaths_showing(&model, CauseOfDeath::ToughFood, Allele::ShortTeeth);
    let long = deaths_showing(&model, CauseOfDeath::ToughFood, Allele::LongTeeth);
    assert!((4..=5).contains(&short), "short-teeth deaths {short}");
    assert!(long <= 1, "long-teeth deaths {long}");
    assert_eq!(model.food().agent().acted_generation(), Some(0));
}

#[test]
fn test_limited_food_thins_everyone() {
    let mut model = ModelBuilder::new()
        .with_population(20)
        .with_config(|c| c.food.limited = true)
        .playing()
        .build();
    let events = run_first_generation(&mut model);

    // round(20 × [0.35, 0.40]) is 7 or 8.
    let starved = count_events!(
        events,
        SimEvent::BunnyDied {
            cause: CauseOfDeath::LimitedFood,
            ..
        }
    );
    assert!((7..=8).contains(&starved), "starved {starved}");
    assert_eq!(model.live_count(), 20 - starved);
}

#[test]
fn test_agents_idle_when_disabled() {
    let mut model = ModelBuilder::new()
        .with_population(20)
        .with_config(|c| c.population.max_population = 1000)
        .playing()
        .build();
    run_first_generation(&mut model);
    assert_population!(model, 20);
    assert_eq!(model.wolves().agent().acted_generation(), None);
    assert_eq!(model.food().agent().acted_generation(), None);
    assert_eq!(model.metrics().total_deaths(), 0);
}

#[test]
fn test_wolves_toggled_mid_run() {
    let mut model = ModelBuilder::new().with_population(20).playing().build();
    run_first_generation(&mut model);
    assert_population!(model, 20);

    model.set_wolves_enabled(true);
    // Boundary at 10.0, then into the wolves window of generation 1.
    let mut events = Vec::new();
    for _ in 0..3 {
        events.extend(model.step(1.0).unwrap());
    }
    assert_eq!(model.current_generation(), 1);
    assert!(count_events!(events, SimEvent::BunnyDied { cause: CauseOfDeath::Wolves, .. }) > 0);
    assert_eq!(model.wolves().agent().acted_generation(), Some(1));
}
