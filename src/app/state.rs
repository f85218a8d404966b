use anyhow::Result;
use std::path::PathBuf;
use std::time::Instant;

use crate::app::input::MutationRequest;
use crate::model::config::SimConfig;
use crate::model::data::{SimulationMode, TimeSpeed};
use crate::model::history::RunOutcome;
use crate::model::{NaturalSelectionModel, SimEvent};

/// How the headless runner drives a model.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub mutations: Vec<MutationRequest>,
    pub time_speed: TimeSpeed,
    /// Stop after this many frames even if no terminal state was reached.
    pub max_frames: Option<u64>,
    /// Where to write the gzip run history when the run ends.
    pub history_path: Option<PathBuf>,
}

pub struct App {
    pub model: NaturalSelectionModel,
    pub options: RunOptions,
    /// Seconds of simulated wall time per frame, before the speed multiplier.
    pub frame_dt: f64,
    pub frame_count: u64,
    pub terminal_event: Option<SimEvent>,
    pub started_at: Option<Instant>,
}

impl App {
    pub fn new(config: SimConfig, options: RunOptions) -> Result<Self> {
        let frame_dt = config.clock.seconds_per_step;
        let mut model = NaturalSelectionModel::new(config)?;
        for warning in model.warnings() {
            tracing::warn!("{warning}");
        }
        for request in &options.mutations {
            model.add_mutation(request.gene, request.mutant_is_dominant)?;
        }
        model.set_time_speed(options.time_speed);
        Ok(Self {
            model,
            options,
            frame_dt,
            frame_count: 0,
            terminal_event: None,
            started_at: None,
        })
    }

    /// Starts the model; a lone generation-0 bunny is given a mate first.
    pub fn start(&mut self) {
        if !self.model.add_a_mate() {
            self.model.play();
        }
        self.started_at = Some(Instant::now());
    }

    /// Steps until a terminal state or the frame limit, then saves the history if requested.
    pub fn run(&mut self) -> Result<RunOutcome> {
        if self.model.mode() == SimulationMode::Staging {
            self.start();
        }

        while self.model.mode() == SimulationMode::Active {
            if let Some(limit) = self.options.max_frames {
                if self.frame_count >= limit {
                    tracing::info!(frames = self.frame_count, "Frame limit reached");
                    break;
                }
            }
            let events = self.model.step(self.frame_dt)?;
            self.frame_count += 1;
            self.handle_events(events);
        }

        let history = self.model.history();
        if let Some(path) = &self.options.history_path {
            history.save(path)?;
        }
        Ok(history.outcome)
    }

    fn handle_events(&mut self, events: Vec<SimEvent>) {
        for event in events {
            if event.is_terminal() {
                tracing::info!("{event}");
                self.terminal_event = Some(event);
                continue;
            }
            match &event {
                SimEvent::GenerationChanged { generation } => {
                    tracing::debug!(generation, live = self.model.live_count(), "Generation");
                }
                SimEvent::MutationInjected { .. } => tracing::info!("{event}"),
                SimEvent::ConfigurationWarning { message } => tracing::warn!("{message}"),
                _ => {}
            }
        }
    }
}
