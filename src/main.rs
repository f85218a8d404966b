use anyhow::Result;
use bunnysim_lib::app::{App, CliOverrides, MutationRequest, RunOptions};
use bunnysim_lib::model::config::SimConfig;
use bunnysim_lib::model::data::{Environment, TimeSpeed};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "bunnysim.toml")]
    config: String,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Mutations present at generation 0, e.g. "FeT"
    #[arg(long)]
    mutations: Option<String>,

    /// Generation 0: a count, or expressions such as "35FFeEtt 5ffEEtt"
    #[arg(long)]
    population: Option<String>,

    /// Habitat (equator or arctic)
    #[arg(long)]
    environment: Option<Environment>,

    /// Turn wolves on
    #[arg(long)]
    wolves: bool,

    /// Turn tough food on
    #[arg(long)]
    tough_food: bool,

    /// Turn limited food on
    #[arg(long)]
    limited_food: bool,

    /// Introduce a mutation before the run, e.g. "fur:dominant" (repeatable)
    #[arg(long = "mutate", value_name = "GENE:DOMINANCE")]
    mutate: Vec<MutationRequest>,

    /// Time speed (normal or fast)
    #[arg(long, default_value = "normal")]
    speed: TimeSpeed,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Write the run history (gzip JSON) to this path
    #[arg(long)]
    history: Option<PathBuf>,

    /// Debug-level logging unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "bunnysim=debug,bunnysim_lib=debug,bunnysim_core=debug"
    } else {
        "bunnysim=info,bunnysim_lib=info,bunnysim_core=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = SimConfig::load(&args.config)?;
    let overrides = CliOverrides {
        seed: args.seed,
        mutations: args.mutations,
        population: args.population,
        environment: args.environment,
        wolves: args.wolves,
        tough_food: args.tough_food,
        limited_food: args.limited_food,
    };
    overrides.apply(&mut config);
    tracing::info!(fingerprint = %config.fingerprint(), "Configuration loaded");

    let options = RunOptions {
        mutations: args.mutate,
        time_speed: args.speed,
        max_frames: args.max_frames,
        history_path: args.history,
    };
    let mut app = App::new(config, options)?;
    app.run()?;
    println!("{}", app.summary());

    Ok(())
}
