pub mod macros;

use bunnysim_lib::model::config::{PercentRange, PopulationSpec, SimConfig};
use bunnysim_lib::model::data::Environment;
use bunnysim_lib::model::{NaturalSelectionModel, SimEvent};

#[allow(dead_code)]
pub struct ModelBuilder {
    config: SimConfig,
    play: bool,
}

#[allow(dead_code)]
impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            config: SimConfig {
                seed: Some(42),
                ..SimConfig::default()
            },
            play: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SimConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_population(mut self, count: u32) -> Self {
        self.config.population.population = PopulationSpec::Count(count);
        self
    }

    pub fn with_expressions(mut self, mutations: &str, expressions: &[&str]) -> Self {
        self.config.population.mutations = mutations.to_string();
        self.config.population.population =
            PopulationSpec::Expressions(expressions.iter().map(|e| e.to_string()).collect());
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.config.environment = environment;
        self
    }

    pub fn with_wolves(mut self, percent: f64) -> Self {
        self.config.wolves.enabled = true;
        self.config.wolves.percent_to_eat = PercentRange::new(percent, percent);
        self
    }

    pub fn playing(mut self) -> Self {
        self.play = true;
        self
    }

    pub fn build(self) -> NaturalSelectionModel {
        let mut model =
            NaturalSelectionModel::new(self.config).expect("Failed to create model in test builder");
        if self.play {
            model.play();
        }
        model
    }
}

/// Steps with the largest dt the clock accepts until `generations` boundaries
/// were crossed or the run completed. Returns every event seen.
#[allow(dead_code)]
pub fn run_generations(model: &mut NaturalSelectionModel, generations: u32) -> Vec<SimEvent> {
    let target = model.current_generation() + generations;
    let dt = model.clock().seconds_per_generation() / 10.0;
    let mut events = Vec::new();
    for _ in 0..(generations as usize * 10 + 1) {
        events.extend(model.step(dt).expect("step failed"));
        if model.current_generation() >= target {
            break;
        }
    }
    events
}
