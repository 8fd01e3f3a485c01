//! Criterion benchmarks for the u-evolve GA engine.
//!
//! Uses synthetic problems (Sphere function, OneMax) to measure
//! pure engine and operator overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_evolve::ga::{
    BlendCrossover, Dna, GaConfig, GaussianMutation, GenePool, GeneticAlgorithm,
    MaximizeOnesFitness, OnePointCrossover, Population, RankSelection, SelectionStrategy,
    TournamentSelection,
};
use u_evolve::random::create_rng;

// ===========================================================================
// Problems
// ===========================================================================

fn sphere_dna() -> Dna<f64> {
    let alphabet: Vec<f64> = (-50..=50).map(|i| i as f64 / 10.0).collect();
    let pool = GenePool::new(alphabet).expect("non-empty alphabet");
    Dna::new(pool, |g: &[f64]| -g.iter().map(|x| x * x).sum::<f64>())
        .with_selection(TournamentSelection::new(3))
        .with_crossover(BlendCrossover::new(0.5))
        .with_mutation(GaussianMutation::new(0.1, 0.3))
}

fn onemax_dna() -> Dna<u8> {
    let pool = GenePool::new(vec![0u8, 1]).expect("non-empty alphabet");
    Dna::new(pool, MaximizeOnesFitness).with_crossover(OnePointCrossover)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_ga_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_sphere");
    group.sample_size(10);

    for (dim, pop, gen) in [(10usize, 50usize, 50usize), (50, 100, 30), (100, 100, 20)] {
        let config = GaConfig::default()
            .with_population_size(pop)
            .with_genome_size(dim)
            .with_generations(gen)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("d{}_p{}_g{}", dim, pop, gen), dim),
            &config,
            |b, c| {
                b.iter(|| {
                    let mut ga = GeneticAlgorithm::new(sphere_dna(), black_box(c.clone()))
                        .expect("valid config");
                    black_box(ga.run())
                })
            },
        );
    }
    group.finish();
}

fn bench_ga_onemax(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_onemax");
    group.sample_size(10);

    for &n in &[20, 50, 100] {
        let config = GaConfig::default()
            .with_population_size(100)
            .with_genome_size(n)
            .with_generations(50)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &config, |b, c| {
            b.iter(|| {
                let mut ga = GeneticAlgorithm::new(onemax_dna(), black_box(c.clone()))
                    .expect("valid config");
                black_box(ga.run())
            })
        });
    }
    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");
    let dna = onemax_dna();
    let mut rng = create_rng(42);

    for &size in &[100usize, 1000] {
        let mut population = Population::new(&dna, size, 32, &mut rng).expect("population");
        population.evaluate(dna.fitness());

        group.bench_with_input(BenchmarkId::new("roulette", size), &population, |b, p| {
            b.iter(|| black_box(dna.selection().select_parents(p, &mut rng).is_ok()))
        });
        group.bench_with_input(BenchmarkId::new("tournament", size), &population, |b, p| {
            let tournament = TournamentSelection::new(3);
            b.iter(|| black_box(tournament.select_parents(p, &mut rng).is_ok()))
        });
        group.bench_with_input(BenchmarkId::new("rank", size), &population, |b, p| {
            b.iter(|| black_box(RankSelection.select_parents(p, &mut rng).is_ok()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ga_sphere, bench_ga_onemax, bench_selection);
criterion_main!(benches);
