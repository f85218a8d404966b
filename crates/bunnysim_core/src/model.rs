//! The natural selection model.
//!
//! Owns the clock, the gene pool, every bunny and both selection agents, and
//! advances them together one `step(dt)` at a time. All randomness comes from
//! a single `ChaCha8Rng`, so a seeded run is reproducible.
//!
//! A run moves through [`SimulationMode::Staging`] (generation 0 exists, the
//! clock is stopped), [`SimulationMode::Active`] and finally
//! [`SimulationMode::Completed`] once a terminal state is reached.

use crate::clock::GenerationClock;
use crate::config::{PopulationSpec, SimConfig};
use crate::error::{Result, SimError};
use crate::events::{EventBus, ListenerId, SimEvent};
use crate::gene_pool::GenePool;
use crate::history::{RunHistory, RunOutcome};
use crate::initializer::{self, InitialPopulation};
use crate::metrics::Metrics;
use crate::population::{BunnyCollection, PedigreeNode};
use crate::selection::{Food, SelectionConditions, Wolves};
use crate::stats::PopulationStats;
use bunnysim_data::{Bunny, CauseOfDeath, Environment, GeneKind, Genotype, SimulationMode, TimeSpeed};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use uuid::Uuid;

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64)
}

#[derive(Debug)]
pub struct NaturalSelectionModel {
    config: SimConfig,
    clock: GenerationClock,
    gene_pool: GenePool,
    bunnies: BunnyCollection,
    wolves: Wolves,
    food: Food,
    environment: Environment,
    mode: SimulationMode,
    paused: bool,
    time_speed: TimeSpeed,
    rng: ChaCha8Rng,
    bus: EventBus,
    stats: PopulationStats,
    metrics: Metrics,
    warnings: Vec<String>,
    outcome: Option<RunOutcome>,
}

impl NaturalSelectionModel {
    /// Validates `config` and creates generation 0 in staging mode.
    ///
    /// A rejected mutations/population specifier is not an error: generation 0
    /// falls back to a single normal bunny and a warning is recorded.
    pub fn new(config: SimConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|err| SimError::config(err.to_string()))?;

        let mut model = Self {
            clock: GenerationClock::new(config.clock.seconds_per_generation),
            gene_pool: GenePool::new(),
            bunnies: BunnyCollection::new(),
            wolves: Wolves::new(&config.wolves),
            food: Food::new(&config.food),
            environment: config.environment,
            mode: SimulationMode::Staging,
            paused: false,
            time_speed: TimeSpeed::Normal,
            rng: seeded_rng(config.seed),
            bus: EventBus::new(),
            stats: PopulationStats::new(),
            metrics: Metrics::new(),
            warnings: Vec::new(),
            outcome: None,
            config,
        };
        model.create_generation_zero()?;
        Ok(model)
    }

    fn create_generation_zero(&mut self) -> Result<()> {
        let population = &self.config.population;
        let initial = match initializer::parse_initial_population(
            &population.mutations,
            &population.population,
            population.max_population,
            &self.gene_pool,
        ) {
            Ok(initial) => initial,
            Err(err) => {
                let message = format!("{err}; starting with a single bunny instead");
                tracing::warn!(error = %err, "Invalid initial population, using default");
                self.warnings.push(message.clone());
                self.bus.publish(SimEvent::ConfigurationWarning { message });
                InitialPopulation::fallback()
            }
        };

        for &(gene, allele) in &initial.dominance {
            let record = self.gene_pool.gene_mut(gene);
            // The parser already rejected conflicts with existing dominance.
            if record.dominant_allele().is_none() {
                record.set_dominant_allele(allele)?;
            }
        }

        let born = self
            .bunnies
            .populate(&initial, &self.gene_pool, &mut self.rng);
        for id in &born {
            self.publish_birth(id);
        }
        self.metrics.record_births(born.len());
        self.record_generation_zero();
        tracing::info!(
            bunnies = born.len(),
            varieties = initial.varieties.len(),
            "Generation 0 ready"
        );
        Ok(())
    }

    fn record_generation_zero(&mut self) {
        let counts = self.bunnies.counts();
        self.stats.clear();
        self.stats.begin_generation(0, None, counts);
        self.stats.record_sample(0.0, 0, counts);
    }

    fn publish_birth(&mut self, id: &Uuid) {
        if let Some(bunny) = self.bunnies.get(id) {
            self.bus.publish(SimEvent::BunnyBorn {
                id: bunny.id,
                father_id: bunny.father_id,
                mother_id: bunny.mother_id,
                generation: bunny.generation,
                is_original_mutant: bunny.is_original_mutant,
            });
        }
    }

    /// Starts the clock. Has no effect once the run completed.
    pub fn play(&mut self) {
        if self.mode == SimulationMode::Completed {
            return;
        }
        if self.mode == SimulationMode::Staging {
            tracing::info!(live = self.bunnies.live_count(), "Simulation started");
        }
        self.mode = SimulationMode::Active;
        self.clock.set_running(!self.paused);
    }

    /// Gives a lone generation-0 bunny a normal mate and starts the run.
    ///
    /// Returns `false` unless the model is staging exactly one bunny.
    pub fn add_a_mate(&mut self) -> bool {
        if self.mode != SimulationMode::Staging || self.bunnies.live_count() != 1 {
            return false;
        }
        let id = self
            .bunnies
            .add_root(Genotype::default(), &self.gene_pool, 0, &mut self.rng);
        self.publish_birth(&id);
        self.metrics.record_births(1);
        self.record_generation_zero();
        self.play();
        true
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        self.clock
            .set_running(!paused && self.mode == SimulationMode::Active);
    }

    pub fn set_time_speed(&mut self, speed: TimeSpeed) {
        self.time_speed = speed;
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
    }

    pub fn set_wolves_enabled(&mut self, enabled: bool) {
        self.wolves.enabled = enabled;
    }

    pub fn set_tough_food(&mut self, tough: bool) {
        self.food.is_tough = tough;
    }

    pub fn set_limited_food(&mut self, limited: bool) {
        self.food.is_limited = limited;
    }

    /// Introduces the mutant allele of `gene` into the next litters.
    ///
    /// Fixes the gene's dominance for the rest of the run; a second call for
    /// the same gene is rejected.
    pub fn add_mutation(&mut self, gene: GeneKind, mutant_is_dominant: bool) -> Result<()> {
        self.gene_pool.gene_mut(gene).add_mutation(mutant_is_dominant)
    }

    /// Replaces the generation-0 specifiers used by the next restart.
    pub fn set_initial_population(&mut self, mutations: &str, population: PopulationSpec) {
        self.config.population.mutations = mutations.to_string();
        self.config.population.population = population;
    }

    /// Discards every bunny and regenerates generation 0.
    ///
    /// Dominance, environment and agent settings are kept.
    pub fn play_again(&mut self) -> Result<()> {
        self.restart()?;
        tracing::info!("Playing again");
        Ok(())
    }

    /// Like [`Self::play_again`], but also restores dominance, environment,
    /// agent settings and the RNG seed from the configuration.
    pub fn reset(&mut self) -> Result<()> {
        self.gene_pool.reset();
        self.wolves = Wolves::new(&self.config.wolves);
        self.food = Food::new(&self.config.food);
        self.environment = self.config.environment;
        self.time_speed = TimeSpeed::Normal;
        self.rng = seeded_rng(self.config.seed);
        self.restart()?;
        tracing::info!("Simulation reset");
        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        // Undelivered events refer to bunnies that are about to be discarded.
        self.bus.clear_emitted();
        self.bunnies.clear();
        self.clock.reset();
        self.wolves.agent_mut().reset();
        self.food.agent_mut().reset();
        self.stats.clear();
        self.metrics.reset();
        self.warnings.clear();
        self.outcome = None;
        self.paused = false;
        self.mode = SimulationMode::Staging;
        self.create_generation_zero()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SimEvent) + Send + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Advances the run by `dt` seconds of wall time.
    ///
    /// `dt` is scaled by the time speed and clamped so a generation always
    /// takes at least ten steps. Returns every event published since the
    /// previous call, including those raised while the model was not active.
    pub fn step(&mut self, dt: f64) -> Result<Vec<SimEvent>> {
        if self.mode != SimulationMode::Active || self.paused {
            return Ok(self.bus.take_emitted());
        }
        let started = Instant::now();

        let dt = GenerationClock::clamp_dt(
            dt * self.time_speed.multiplier(),
            self.clock.seconds_per_generation(),
        );
        if let Some(generation) = self.clock.step(dt)? {
            self.advance_generation(generation)?;
        }
        if self.mode == SimulationMode::Active {
            self.run_selection()?;
        }

        self.metrics.record_step(
            started.elapsed(),
            self.bunnies.live_count(),
            self.clock.current_generation(),
        );
        Ok(self.bus.take_emitted())
    }

    fn advance_generation(&mut self, generation: u32) -> Result<()> {
        let end_of_previous = self.bunnies.counts();
        self.metrics.record_generation();
        self.bus.publish(SimEvent::GenerationChanged { generation });

        let expired = self
            .bunnies
            .age_bunnies(generation, self.config.population.max_age);
        for id in &expired {
            self.publish_death(id, CauseOfDeath::OldAge, generation);
        }

        let report = self.bunnies.mate_bunnies(
            generation,
            self.config.population.litter_size,
            self.config.genetics.mutation_percentage,
            &mut self.gene_pool,
            &mut self.rng,
        );
        for &(gene, count) in &report.mutations {
            self.bus.publish(SimEvent::MutationInjected {
                gene,
                count,
                generation,
            });
        }
        for id in &report.born {
            self.publish_birth(id);
        }
        self.metrics.record_births(report.born.len());

        let counts = self.bunnies.counts();
        self.stats
            .begin_generation(generation, Some(end_of_previous), counts);
        self.stats
            .record_sample(self.clock.time_in_generations(), generation, counts);
        tracing::info!(
            generation,
            died = expired.len(),
            born = report.born.len(),
            live = counts.total,
            "Generation boundary"
        );

        self.check_terminal(generation);
        Ok(())
    }

    fn run_selection(&mut self) -> Result<()> {
        let generation = self.clock.current_generation();
        let cycle_percent = self.clock.cycle_percent();
        let conditions = SelectionConditions {
            environment: self.environment,
            tough_food: self.food.is_tough,
            limited_food: self.food.is_limited,
        };

        let hunted = {
            let live: Vec<&Bunny> = self.bunnies.live().collect();
            self.wolves
                .hunt(generation, cycle_percent, &live, &conditions, &mut self.rng)
        };
        let mut culled = false;
        if let Some(victims) = hunted {
            self.apply_deaths(victims, generation)?;
            culled = true;
        }

        let starved = {
            let live: Vec<&Bunny> = self.bunnies.live().collect();
            self.food
                .feed(generation, cycle_percent, &live, &conditions, &mut self.rng)
        };
        if let Some(victims) = starved {
            self.apply_deaths(victims, generation)?;
            culled = true;
        }

        if culled {
            let counts = self.bunnies.counts();
            self.stats
                .record_sample(self.clock.time_in_generations(), generation, counts);
            self.check_terminal(generation);
        }
        Ok(())
    }

    fn apply_deaths(&mut self, victims: Vec<(Uuid, CauseOfDeath)>, generation: u32) -> Result<()> {
        for (id, cause) in victims {
            if self.bunnies.kill(&id, cause, generation)? {
                self.publish_death(&id, cause, generation);
            }
        }
        Ok(())
    }

    fn publish_death(&mut self, id: &Uuid, cause: CauseOfDeath, generation: u32) {
        if let Some(bunny) = self.bunnies.get(id) {
            self.bus.publish(SimEvent::BunnyDied {
                id: bunny.id,
                generation,
                age: bunny.age(generation),
                cause,
            });
            self.metrics.record_death(cause);
        }
    }

    fn check_terminal(&mut self, generation: u32) {
        let live = self.bunnies.live_count();
        let (outcome, event) = if live == 0 {
            (RunOutcome::AllDied, SimEvent::AllDied { generation })
        } else if live >= self.config.population.max_population as usize {
            (
                RunOutcome::BunniesTookOver,
                SimEvent::BunniesTookOver {
                    generation,
                    population: live,
                },
            )
        } else if generation >= self.config.clock.max_generations {
            (
                RunOutcome::GenerationLimitReached,
                SimEvent::GenerationLimitReached { generation },
            )
        } else {
            return;
        };

        self.mode = SimulationMode::Completed;
        self.clock.set_running(false);
        self.stats.end_generation(self.bunnies.counts());
        self.outcome = Some(outcome);
        tracing::info!(generation, live, outcome = %outcome, "Simulation completed");
        self.bus.publish(event);
    }

    /// Summary of the run so far, ready to be saved.
    #[must_use]
    pub fn history(&self) -> RunHistory {
        RunHistory {
            fingerprint: self.config.fingerprint(),
            created_at: chrono::Utc::now(),
            seed: self.config.seed,
            environment: self.environment,
            outcome: self.outcome.unwrap_or(RunOutcome::Interrupted),
            final_generation: self.clock.current_generation(),
            total_bunnies: self.bunnies.len(),
            stats: self.stats.clone(),
        }
    }

    #[must_use]
    pub fn pedigree(&self, id: &Uuid, depth: usize) -> Option<PedigreeNode> {
        self.bunnies.pedigree(id, depth)
    }

    #[must_use]
    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn time_speed(&self) -> TimeSpeed {
        self.time_speed
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &GenerationClock {
        &self.clock
    }

    #[must_use]
    pub fn current_generation(&self) -> u32 {
        self.clock.current_generation()
    }

    #[must_use]
    pub fn gene_pool(&self) -> &GenePool {
        &self.gene_pool
    }

    #[must_use]
    pub fn bunnies(&self) -> &BunnyCollection {
        &self.bunnies
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.bunnies.live_count()
    }

    #[must_use]
    pub fn wolves(&self) -> &Wolves {
        &self.wolves
    }

    /// Mutable access for installing a different [`crate::selection::CullPolicy`].
    pub fn wolves_mut(&mut self) -> &mut Wolves {
        &mut self.wolves
    }

    #[must_use]
    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn food_mut(&mut self) -> &mut Food {
        &mut self.food
    }

    #[must_use]
    pub fn stats(&self) -> &PopulationStats {
        &self.stats
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Configuration warnings raised while creating generation 0.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    #[must_use]
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }
}
