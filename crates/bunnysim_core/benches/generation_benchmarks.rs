use bunnysim_core::config::{PopulationSpec, SimConfig};
use bunnysim_core::gene_pool::GenePool;
use bunnysim_core::initializer::parse_initial_population;
use bunnysim_core::model::NaturalSelectionModel;
use bunnysim_core::reproduction::produce_litter;
use bunnysim_data::{Allele, GenePair, Genotype};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn model(population: u32) -> NaturalSelectionModel {
    let mut config = SimConfig {
        seed: Some(42),
        ..SimConfig::default()
    };
    config.population.population = PopulationSpec::Count(population);
    config.population.max_population = 100_000;
    config.wolves.enabled = true;
    config.food.tough = true;
    config.food.limited = true;
    let mut model = NaturalSelectionModel::new(config).unwrap();
    model.play();
    model
}

/// Benchmark one full generation (ten steps) of a mid-sized population.
fn bench_generation(c: &mut Criterion) {
    c.bench_function("generation_200", |b| {
        b.iter_batched(
            || model(200),
            |mut model| {
                for _ in 0..10 {
                    black_box(model.step(1.0).unwrap());
                }
                model
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

/// Benchmark a single step inside a generation.
fn bench_step(c: &mut Criterion) {
    let mut model = model(500);

    c.bench_function("step_500", |b| {
        b.iter(|| {
            let events = model.step(black_box(0.01)).unwrap();
            black_box(events)
        })
    });
}

/// Benchmark litter production for heterozygous parents.
fn bench_litter(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let parent = Genotype {
        fur: GenePair::new(Allele::BrownFur, Allele::WhiteFur),
        ears: GenePair::new(Allele::FloppyEars, Allele::StraightEars),
        teeth: GenePair::new(Allele::LongTeeth, Allele::ShortTeeth),
    };

    c.bench_function("litter_of_4", |b| {
        b.iter(|| {
            let litter = produce_litter(&parent, &parent, 4, &mut rng);
            black_box(litter)
        })
    });
}

/// Benchmark parsing a multi-expression generation 0.
fn bench_initializer(c: &mut Criterion) {
    let pool = GenePool::new();
    let population =
        PopulationSpec::Expressions(vec!["35FFeEtt 5ffEEtt 12FfEeTt".to_string()]);

    c.bench_function("parse_initial_population", |b| {
        b.iter(|| {
            let parsed = parse_initial_population("FeT", black_box(&population), 750, &pool);
            black_box(parsed)
        })
    });
}

criterion_group!(
    benches,
    bench_generation,
    bench_step,
    bench_litter,
    bench_initializer
);
criterion_main!(benches);
