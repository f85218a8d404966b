//! Run history: the statistics of a finished run, stored as gzip-compressed JSON.

use crate::stats::PopulationStats;
use bunnysim_data::Environment;
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// How a run ended.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    AllDied,
    BunniesTookOver,
    GenerationLimitReached,
    /// Stopped by the caller before any terminal condition.
    Interrupted,
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RunOutcome::AllDied => "all of the bunnies died",
            RunOutcome::BunniesTookOver => "bunnies have taken over the world",
            RunOutcome::GenerationLimitReached => "generation limit reached",
            RunOutcome::Interrupted => "interrupted",
        };
        f.write_str(text)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunHistory {
    /// [`crate::config::SimConfig::fingerprint`] of the run's configuration.
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
    pub seed: Option<u64>,
    pub environment: Environment,
    pub outcome: RunOutcome,
    pub final_generation: u32,
    /// Every bunny ever created, dead ones included.
    pub total_bunnies: usize,
    pub stats: PopulationStats,
}

impl RunHistory {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let file = File::create(path.as_ref())?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        let json = serde_json::to_string(self)?;
        encoder.write_all(json.as_bytes())?;
        encoder.finish()?;
        tracing::info!(path = %path.as_ref().display(), "Run history saved");
        Ok(())
    }

    /// Loads a history written by [`RunHistory::save`]; plain JSON is accepted too.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut decoder = GzDecoder::new(file);
        let mut decoded = Vec::new();
        if decoder.read_to_end(&mut decoded).is_ok() {
            Ok(serde_json::from_slice(&decoded)?)
        } else {
            let data = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&data)?)
        }
    }
}
