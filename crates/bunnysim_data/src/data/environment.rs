use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Habitat the population lives in; decides which fur color stands out to wolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Environment {
    #[default]
    Equator,
    Arctic,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equator" => Ok(Environment::Equator),
            "arctic" => Ok(Environment::Arctic),
            other => anyhow::bail!("unknown environment '{other}' (expected equator or arctic)"),
        }
    }
}

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimulationMode {
    /// Generation 0 exists but the clock has not been started.
    #[default]
    Staging,
    /// The clock is advancing.
    Active,
    /// A terminal state was reached; the population is read-only.
    Completed,
}

/// Multiplier applied by the runner to its frame time before the model clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeSpeed {
    #[default]
    Normal,
    Fast,
}

impl TimeSpeed {
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            TimeSpeed::Normal => 1.0,
            TimeSpeed::Fast => 4.0,
        }
    }
}

impl FromStr for TimeSpeed {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(TimeSpeed::Normal),
            "fast" => Ok(TimeSpeed::Fast),
            other => anyhow::bail!("unknown time speed '{other}' (expected normal or fast)"),
        }
    }
}
