use crate::app::state::App;
use crate::model::data::{CauseOfDeath, GeneKind};
use std::fmt::Write;

impl App {
    /// Plain-text report of the run: outcome, population and per-gene makeup.
    #[must_use]
    pub fn summary(&self) -> String {
        let model = &self.model;
        let metrics = model.metrics();
        let counts = model.bunnies().counts();
        let mut out = String::new();

        let outcome = match &self.terminal_event {
            Some(event) => event.to_string(),
            None => format!("stopped after {} frames", self.frame_count),
        };
        let _ = writeln!(out, "Outcome:      {outcome}");
        let _ = writeln!(
            out,
            "Generation:   {} ({:?}, {:?})",
            model.current_generation(),
            model.environment(),
            model.time_speed()
        );
        let _ = writeln!(
            out,
            "Population:   {} alive, {} dead, {} born in total",
            model.live_count(),
            model.bunnies().dead_count(),
            model.bunnies().len()
        );
        let _ = writeln!(
            out,
            "Deaths:       old age {}, wolves {}, tough food {}, limited food {}",
            metrics.deaths_by(CauseOfDeath::OldAge),
            metrics.deaths_by(CauseOfDeath::Wolves),
            metrics.deaths_by(CauseOfDeath::ToughFood),
            metrics.deaths_by(CauseOfDeath::LimitedFood)
        );

        for gene in GeneKind::ALL {
            let normal = gene.normal_allele();
            let mutant = gene.mutant_allele();
            let dominance = match model.gene_pool().gene(gene).dominant_allele() {
                Some(dominant) => format!("{dominant} dominant"),
                None => "no mutation".to_string(),
            };
            let _ = writeln!(
                out,
                "{:<13} {} {} / {} {} ({}; {} allele {:.1}%)",
                format!("{}:", gene.name()),
                counts.showing(normal),
                normal,
                counts.showing(mutant),
                mutant,
                dominance,
                mutant,
                percent(counts.allele_frequency(mutant))
            );
        }

        if let Some(started) = self.started_at {
            let _ = writeln!(
                out,
                "Elapsed:      {:.2?} over {} frames",
                started.elapsed(),
                self.frame_count
            );
        }
        out
    }
}

fn percent(frequency: f64) -> f64 {
    frequency * 100.0
}
