//! Population statistics.
//!
//! Counts are taken from live bunnies only. Samples are appended whenever the
//! population changes in bulk (a generation boundary or a selection pass), and
//! proportions keep the counts at the start and the end of each generation.

use bunnysim_data::{Allele, Bunny, GeneKind};
use serde::{Deserialize, Serialize};

/// Live bunnies per visible trait and per allele copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhenotypeCounts {
    pub total: usize,
    pub white_fur: usize,
    pub brown_fur: usize,
    pub straight_ears: usize,
    pub floppy_ears: usize,
    pub short_teeth: usize,
    pub long_teeth: usize,
    /// Allele copies per allele, in [`ALLELE_ORDER`] order.
    pub allele_copies: [usize; 6],
}

/// Order of [`PhenotypeCounts::allele_copies`].
pub const ALLELE_ORDER: [Allele; 6] = [
    Allele::WhiteFur,
    Allele::BrownFur,
    Allele::StraightEars,
    Allele::FloppyEars,
    Allele::ShortTeeth,
    Allele::LongTeeth,
];

impl PhenotypeCounts {
    pub fn from_bunnies<'a>(bunnies: impl IntoIterator<Item = &'a Bunny>) -> Self {
        let mut counts = Self::default();
        for bunny in bunnies {
            counts.add(bunny);
        }
        counts
    }

    fn add(&mut self, bunny: &Bunny) {
        self.total += 1;
        match bunny.phenotype.fur {
            Allele::BrownFur => self.brown_fur += 1,
            _ => self.white_fur += 1,
        }
        match bunny.phenotype.ears {
            Allele::FloppyEars => self.floppy_ears += 1,
            _ => self.straight_ears += 1,
        }
        match bunny.phenotype.teeth {
            Allele::LongTeeth => self.long_teeth += 1,
            _ => self.short_teeth += 1,
        }
        for gene in GeneKind::ALL {
            let pair = bunny.genotype.pair(gene);
            for (slot, allele) in ALLELE_ORDER.iter().enumerate() {
                self.allele_copies[slot] += pair.count(*allele);
            }
        }
    }

    /// Live bunnies showing `allele`.
    #[must_use]
    pub fn showing(&self, allele: Allele) -> usize {
        match allele {
            Allele::WhiteFur => self.white_fur,
            Allele::BrownFur => self.brown_fur,
            Allele::StraightEars => self.straight_ears,
            Allele::FloppyEars => self.floppy_ears,
            Allele::ShortTeeth => self.short_teeth,
            Allele::LongTeeth => self.long_teeth,
        }
    }

    /// Share of the gene's allele copies that are `allele`.
    #[must_use]
    pub fn allele_frequency(&self, allele: Allele) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let slot = ALLELE_ORDER
            .iter()
            .position(|a| *a == allele)
            .unwrap_or_default();
        self.allele_copies[slot] as f64 / (2 * self.total) as f64
    }
}

/// One point of the population-over-time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationSample {
    pub time_in_generations: f64,
    pub generation: u32,
    pub counts: PhenotypeCounts,
}

/// Counts at the start and end of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProportionsRecord {
    pub generation: u32,
    pub start: PhenotypeCounts,
    pub end: Option<PhenotypeCounts>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub samples: Vec<PopulationSample>,
    pub proportions: Vec<ProportionsRecord>,
}

impl PopulationStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sample(&mut self, time_in_generations: f64, generation: u32, counts: PhenotypeCounts) {
        self.samples.push(PopulationSample {
            time_in_generations,
            generation,
            counts,
        });
    }

    /// Closes the previous generation with `end_of_previous` and opens `generation`.
    pub fn begin_generation(
        &mut self,
        generation: u32,
        end_of_previous: Option<PhenotypeCounts>,
        start: PhenotypeCounts,
    ) {
        if let (Some(last), Some(end)) = (self.proportions.last_mut(), end_of_previous) {
            last.end = Some(end);
        }
        self.proportions.push(ProportionsRecord {
            generation,
            start,
            end: None,
        });
    }

    /// Records the final counts of the generation in progress.
    pub fn end_generation(&mut self, counts: PhenotypeCounts) {
        if let Some(last) = self.proportions.last_mut() {
            if last.end.is_none() {
                last.end = Some(counts);
            }
        }
    }

    #[must_use]
    pub fn proportions_for(&self, generation: u32) -> Option<&ProportionsRecord> {
        self.proportions.iter().find(|p| p.generation == generation)
    }

    #[must_use]
    pub fn last_sample(&self) -> Option<&PopulationSample> {
        self.samples.last()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.proportions.clear();
    }
}
