//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration that maps to a `bunnysim.toml` file. Every
//! section has defaults, so a file only needs the values it changes.
//!
//! ## Example `bunnysim.toml`
//!
//! ```toml
//! seed = 42
//! environment = "Arctic"
//!
//! [clock]
//! seconds_per_generation = 10.0
//! max_generations = 200
//!
//! [population]
//! mutations = "FeT"
//! population = ["35FFeEtt", "5ffEEtt"]
//! max_population = 750
//!
//! [wolves]
//! enabled = true
//! ```

use crate::clock::{ClockWindow, MIN_STEPS_PER_GENERATION};
use bunnysim_data::Environment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Generation clock timing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    pub seconds_per_generation: f64,
    /// Frame time used by the headless runner.
    pub seconds_per_step: f64,
    /// Generation at which the run stops to bound memory.
    pub max_generations: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            seconds_per_generation: 10.0,
            seconds_per_step: 0.1,
            max_generations: 1000,
        }
    }
}

/// Initial-population specifier: a plain count or genotype expressions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum PopulationSpec {
    Count(u32),
    Expressions(Vec<String>),
}

impl Default for PopulationSpec {
    fn default() -> Self {
        Self::Count(1)
    }
}

impl PopulationSpec {
    /// Individual expressions; whitespace inside an entry separates expressions.
    #[must_use]
    pub fn expressions(&self) -> Vec<String> {
        match self {
            Self::Count(count) => vec![count.to_string()],
            Self::Expressions(items) => items
                .iter()
                .flat_map(|item| item.split_whitespace())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Parses a command-line value such as `"5"` or `"35FFeEtt 5ffEEtt"`.
    #[must_use]
    pub fn from_cli(value: &str) -> Self {
        match value.trim().parse::<u32>() {
            Ok(count) => Self::Count(count),
            Err(_) => Self::Expressions(vec![value.to_string()]),
        }
    }
}

/// Population size limits and the generation-0 specifiers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PopulationConfig {
    /// Allele abbreviations of the mutations present at generation 0, e.g. `"FeT"`.
    pub mutations: String,
    pub population: PopulationSpec,
    pub max_population: u32,
    /// Age in generations at which a bunny dies.
    pub max_age: u32,
    pub litter_size: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            mutations: String::new(),
            population: PopulationSpec::default(),
            max_population: 750,
            max_age: 5,
            litter_size: 4,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneticsConfig {
    /// Fraction of a litter generation that receives a newly introduced mutation.
    pub mutation_percentage: f64,
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        Self {
            mutation_percentage: 0.25,
        }
    }
}

/// Closed probability range a selection agent samples from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PercentRange {
    pub min: f64,
    pub max: f64,
}

impl PercentRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &str) -> anyhow::Result<()> {
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.min) && (0.0..=1.0).contains(&self.max),
            "{name} must lie in [0.0, 1.0]"
        );
        anyhow::ensure!(self.min <= self.max, "{name} min must not exceed max");
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WolvesConfig {
    pub enabled: bool,
    pub window: ClockWindow,
    pub percent_to_eat: PercentRange,
    /// Applied to the eat percentage of bunnies whose fur stands out.
    pub visible_multiplier: f64,
}

impl Default for WolvesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            window: ClockWindow::new(0.125, 0.375),
            percent_to_eat: PercentRange::new(0.35, 0.40),
            visible_multiplier: 2.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FoodConfig {
    pub tough: bool,
    pub limited: bool,
    pub window: ClockWindow,
    pub limited_percent_to_die: PercentRange,
    pub short_teeth_percent_to_die: PercentRange,
    pub long_teeth_percent_to_die: PercentRange,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            tough: false,
            limited: false,
            window: ClockWindow::new(0.5, 0.75),
            limited_percent_to_die: PercentRange::new(0.35, 0.40),
            short_teeth_percent_to_die: PercentRange::new(0.40, 0.45),
            long_teeth_percent_to_die: PercentRange::new(0.05, 0.10),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the simulation RNG; entropy when absent.
    pub seed: Option<u64>,
    pub environment: Environment,
    pub clock: ClockConfig,
    pub population: PopulationConfig,
    pub genetics: GeneticsConfig,
    pub wolves: WolvesConfig,
    pub food: FoodConfig,
}

impl SimConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        let clock = &self.clock;
        anyhow::ensure!(
            clock.seconds_per_generation > 0.0 && clock.seconds_per_generation.is_finite(),
            "Seconds per generation must be positive"
        );
        anyhow::ensure!(
            clock.seconds_per_step > 0.0,
            "Seconds per step must be positive"
        );
        anyhow::ensure!(
            clock.seconds_per_step < clock.seconds_per_generation,
            "Seconds per step must be less than seconds per generation"
        );
        anyhow::ensure!(clock.max_generations > 0, "Max generations must be positive");

        let population = &self.population;
        anyhow::ensure!(
            population.max_population > 0,
            "Max population must be positive"
        );
        anyhow::ensure!(population.max_age > 0, "Max age must be positive");
        anyhow::ensure!(population.litter_size > 0, "Litter size must be positive");

        let mutation = self.genetics.mutation_percentage;
        anyhow::ensure!(
            mutation > 0.0 && mutation <= 1.0 / 3.0,
            "Mutation percentage must be in (0, 1/3]"
        );

        self.validate_window("Wolves window", self.wolves.window)?;
        self.validate_window("Food window", self.food.window)?;
        self.wolves.percent_to_eat.validate("Wolves percent to eat")?;
        anyhow::ensure!(
            self.wolves.visible_multiplier >= 1.0,
            "Wolves visible multiplier must be at least 1.0"
        );
        self.food
            .limited_percent_to_die
            .validate("Limited food percent to die")?;
        self.food
            .short_teeth_percent_to_die
            .validate("Short teeth percent to die")?;
        self.food
            .long_teeth_percent_to_die
            .validate("Long teeth percent to die")?;

        Ok(())
    }

    fn validate_window(&self, name: &str, window: ClockWindow) -> anyhow::Result<()> {
        anyhow::ensure!(
            window.min >= 0.0 && window.min < window.max && window.max <= 1.0,
            "{name} must satisfy 0 <= min < max <= 1"
        );
        anyhow::ensure!(
            window.width() >= 1.0 / MIN_STEPS_PER_GENERATION,
            "{name} must span at least 1/{MIN_STEPS_PER_GENERATION} of a generation"
        );
        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, falling back to defaults when the file is missing.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Hash of everything that shapes a run's outcome.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.seed).as_bytes());
        hasher.update(format!("{:?}", self.environment).as_bytes());
        hasher.update(format!("{:?}", self.clock).as_bytes());
        hasher.update(format!("{:?}", self.population).as_bytes());
        hasher.update(format!("{:?}", self.genetics).as_bytes());
        hasher.update(format!("{:?}", self.wolves).as_bytes());
        hasher.update(format!("{:?}", self.food).as_bytes());
        hex::encode(hasher.finalize())
    }
}
