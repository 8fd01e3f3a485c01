//! End-to-end behaviour of the GA engine through the public API.

use proptest::prelude::*;
use std::collections::HashSet;
use u_evolve::ga::{
    CompareTargetFitness, Dna, ElementMutation, GaConfig, GenePool, GeneticAlgorithm,
    MaximizeOnesFitness, OnePointCrossover, RouletteWheelSelection, StochasticUniversalSampling,
    TournamentSelection, TwoPointCrossover, UniformCrossover,
};
use u_evolve::EvolveError;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn bits_dna() -> Dna<u8> {
    let pool = GenePool::new(vec![0u8, 1]).unwrap();
    Dna::new(pool, MaximizeOnesFitness)
        .with_selection(RouletteWheelSelection)
        .with_crossover(OnePointCrossover)
        .with_mutation(ElementMutation::default())
}

#[test]
fn onemax_scenario_does_not_regress() {
    init_logger();
    let config = GaConfig::default()
        .with_population_size(20)
        .with_genome_size(10)
        .with_generations(50)
        .with_mutation_rate(0.01)
        .with_seed(1);
    let mut ga = GeneticAlgorithm::new(bits_dna(), config).unwrap();
    let initial_best = ga.best_of_generation().fitness().unwrap();

    ga.run().unwrap();

    assert_eq!(ga.generation(), 50);
    assert_eq!(ga.fitness_history().len(), 51);
    assert!(ga.best_overall().fitness().unwrap() >= initial_best);
}

#[test]
fn duplicate_free_genomes_are_permutations() {
    let pool = GenePool::new(vec![0u8, 1, 2, 3])
        .unwrap()
        .with_duplicates(false);
    let dna = Dna::new(pool, MaximizeOnesFitness);
    let config = GaConfig::default()
        .with_population_size(30)
        .with_genome_size(4)
        .with_generations(0)
        .with_seed(3);
    let ga = GeneticAlgorithm::new(dna, config).unwrap();

    for ind in ga.population().individuals() {
        let distinct: HashSet<u8> = ind.genome().iter().copied().collect();
        assert_eq!(distinct.len(), 4, "duplicate gene in {:?}", ind.genome());
    }
}

#[test]
fn target_string_is_approached() {
    let target: Vec<char> = "hello world".chars().collect();
    let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz ".chars().collect();
    let pool = GenePool::new(alphabet).unwrap().with_target(target.clone());
    let dna = Dna::new(pool, CompareTargetFitness::new(target.clone()))
        .with_selection(TournamentSelection::new(4))
        .with_crossover(UniformCrossover);
    let config = GaConfig::default()
        .with_population_size(100)
        .with_genome_size(target.len())
        .with_generations(150)
        .with_mutation_rate(0.5)
        .with_seed(11);
    let mut ga = GeneticAlgorithm::new(dna, config).unwrap();
    let initial = ga.best_overall().fitness().unwrap();

    ga.run().unwrap();

    assert!(ga.best_overall().fitness().unwrap() > initial);
}

#[test]
fn target_length_must_match_genome_size() {
    let pool = GenePool::new(vec![0u8, 1]).unwrap().with_target(vec![1, 1, 1]);
    let dna = Dna::new(pool, MaximizeOnesFitness);
    let config = GaConfig::default().with_genome_size(4);
    assert!(matches!(
        GeneticAlgorithm::new(dna, config),
        Err(EvolveError::InvalidConfiguration(_))
    ));
}

#[test]
fn invalid_strategy_parameters_rejected_at_construction() {
    let dna = bits_dna().with_selection(TournamentSelection::new(0));
    let result = GeneticAlgorithm::new(dna, GaConfig::default());
    assert!(matches!(result, Err(EvolveError::InvalidConfiguration(_))));
}

#[test]
fn run_single_generation_steps_the_counter() {
    let config = GaConfig::default()
        .with_population_size(10)
        .with_genome_size(8)
        .with_seed(5);
    let mut ga = GeneticAlgorithm::new(bits_dna(), config).unwrap();

    let best = ga.run_single_generation().unwrap();

    assert_eq!(ga.generation(), 1);
    assert_eq!(ga.best_of_generation(), &best);
    assert_eq!(ga.fitness_history()[1], best.fitness().unwrap());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn population_size_is_conserved(
        population_size in 1usize..25,
        genome_size in 1usize..12,
        generations in 0usize..6,
        seed in any::<u64>(),
    ) {
        let dna = bits_dna()
            .with_selection(TournamentSelection::new(2))
            .with_crossover(TwoPointCrossover);
        let config = GaConfig::default()
            .with_population_size(population_size)
            .with_genome_size(genome_size)
            .with_generations(generations)
            .with_mutation_rate(0.2)
            .with_seed(seed);
        let mut ga = GeneticAlgorithm::new(dna, config).unwrap();

        ga.run().unwrap();

        prop_assert_eq!(ga.population().len(), population_size);
        prop_assert!(ga.population().is_evaluated());
        for ind in ga.population().individuals() {
            prop_assert_eq!(ind.len(), genome_size);
        }
        let history = ga.fitness_history();
        prop_assert_eq!(history.len(), generations + 1);
    }

    #[test]
    fn same_seed_same_run(seed in any::<u64>()) {
        let config = GaConfig::default()
            .with_population_size(12)
            .with_genome_size(16)
            .with_generations(10)
            .with_seed(seed);
        let dna = || bits_dna()
            .with_selection(StochasticUniversalSampling)
            .with_crossover(UniformCrossover);
        let a = GeneticAlgorithm::new(dna(), config.clone()).unwrap().run();
        let b = GeneticAlgorithm::new(dna(), config).unwrap().run();
        prop_assert_eq!(a, b);
    }
}
