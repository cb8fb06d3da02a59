use melogen::engines::generation::{
    crossover, crossover_at, mutate, random_population, selection_pair, Genome, Scored,
};
use melogen::MelogenError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn ones(genome: &Genome) -> usize {
    genome.iter().filter(|bit| **bit == 1).count()
}

/// Genomes that encode their own index, so draws can be told apart.
fn indexed_population(size: usize, fitness: impl Fn(usize) -> u32) -> Vec<Scored> {
    (0..size)
        .map(|i| {
            let genome: Genome = (0..8).map(|bit| ((i >> bit) & 1) as u8).collect();
            (genome, fitness(i))
        })
        .collect()
}

fn index_of(population: &[Scored], genome: &Genome) -> usize {
    population
        .iter()
        .position(|(g, _)| g == genome)
        .expect("drawn genome comes from the population")
}

#[test]
fn test_self_crossover_is_identity() {
    let mut rng = StdRng::seed_from_u64(1);

    for length in 2..40 {
        let population = random_population(5, length, &mut rng);
        for genome in &population {
            let (c1, c2) = crossover(genome, genome, &mut rng).unwrap();
            assert_eq!(c1.len(), length);
            assert_eq!(&c1, genome);
            assert_eq!(&c2, genome);
        }
    }
}

#[test]
fn test_crossover_conserves_bits_per_position() {
    let mut rng = StdRng::seed_from_u64(2);

    for _ in 0..200 {
        let parents = random_population(2, 24, &mut rng);
        let (a, b) = (&parents[0], &parents[1]);
        let (c1, c2) = crossover(a, b, &mut rng).unwrap();

        assert_eq!(c1.len(), a.len());
        assert_eq!(c2.len(), b.len());
        assert_eq!(ones(&c1) + ones(&c2), ones(a) + ones(b));
        // every column keeps the same pair of bits
        for i in 0..a.len() {
            let mut before = [a[i], b[i]];
            let mut after = [c1[i], c2[i]];
            before.sort();
            after.sort();
            assert_eq!(before, after);
        }
    }
}

#[test]
fn test_crossover_split_is_interior_and_uniform() {
    let mut rng = StdRng::seed_from_u64(3);
    let a: Genome = vec![1; 6];
    let b: Genome = vec![0; 6];
    let mut seen = [0usize; 6];

    for _ in 0..3000 {
        let (c1, _) = crossover(&a, &b, &mut rng).unwrap();
        // split point = number of leading ones from `a`
        let point = c1.iter().take_while(|bit| **bit == 1).count();
        seen[point] += 1;
    }

    assert_eq!(seen[0], 0);
    for count in &seen[1..] {
        // 600 expected per split point
        assert!((450..750).contains(count), "split counts {:?}", seen);
    }
}

#[test]
fn test_crossover_length_mismatch() {
    let mut rng = StdRng::seed_from_u64(4);

    for (left, right) in [(0, 1), (1, 2), (3, 8), (8, 3), (16, 15)] {
        let a = vec![0; left];
        let b = vec![1; right];
        match crossover(&a, &b, &mut rng) {
            Err(MelogenError::LengthMismatch { left: l, right: r }) => {
                assert_eq!((l, r), (left, right));
            }
            other => panic!("expected length mismatch, got {:?}", other),
        }
    }
}

#[test]
fn test_crossover_tiny_genomes_unchanged() {
    let mut rng = StdRng::seed_from_u64(5);

    let (c1, c2) = crossover(&vec![], &vec![], &mut rng).unwrap();
    assert_eq!((c1, c2), (vec![], vec![]));

    let (c1, c2) = crossover(&vec![0], &vec![1], &mut rng).unwrap();
    assert_eq!((c1, c2), (vec![0], vec![1]));
}

#[test]
fn test_fixed_split_scenario() {
    let a = vec![1, 0, 1, 0, 1, 0, 1, 0];
    let b = vec![0, 1, 0, 1, 0, 1, 0, 1];

    let (c1, c2) = crossover_at(&a, &b, 4).unwrap();

    assert_eq!(c1, vec![1, 0, 1, 0, 0, 1, 0, 1]);
    assert_eq!(c2, vec![0, 1, 0, 1, 1, 0, 1, 0]);
    // parents untouched
    assert_eq!(a, vec![1, 0, 1, 0, 1, 0, 1, 0]);
}

#[test]
fn test_mutation_zero_probability_never_changes() {
    let mut rng = StdRng::seed_from_u64(6);

    for num in [0, 1, 10, 1000] {
        let mut genome = random_population(1, 32, &mut rng).remove(0);
        let original = genome.clone();
        mutate(&mut genome, num, 0.0, &mut rng);
        assert_eq!(genome, original);
    }
}

#[test]
fn test_mutation_certain_probability_flips_each_draw() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..100 {
        let mut genome = random_population(1, 16, &mut rng).remove(0);
        let original = genome.clone();
        mutate(&mut genome, 1, 1.0, &mut rng);

        let changed = genome.iter().zip(&original).filter(|(x, y)| x != y).count();
        assert_eq!(changed, 1);
    }

    // Two attempts on a one-bit genome always hit the same index and cancel
    let mut genome = vec![1];
    mutate(&mut genome, 2, 1.0, &mut rng);
    assert_eq!(genome, vec![1]);
}

#[test]
fn test_mutation_changes_parity_per_flip() {
    let mut rng = StdRng::seed_from_u64(8);

    // With p = 1 every attempt flips one bit, so the number of differing bits
    // has the same parity as the number of attempts.
    for num in 1..10 {
        let mut genome = vec![0; 12];
        mutate(&mut genome, num, 1.0, &mut rng);
        assert_eq!(ones(&genome) % 2, num % 2);
    }
}

#[test]
fn test_weighted_selection_favours_dominant_genome() {
    let mut rng = StdRng::seed_from_u64(9);
    // weights 100 : 1 : 1 : 1
    let population = indexed_population(4, |i| if i == 0 { 99 } else { 0 });

    let trials = 1000;
    let mut dominant = 0;
    for _ in 0..trials {
        let (first, _) = selection_pair(&population, &mut rng).unwrap();
        if index_of(&population, first) == 0 {
            dominant += 1;
        }
    }

    assert!(dominant >= 900, "dominant genome drawn {} / {}", dominant, trials);
}

#[test]
fn test_weighted_selection_zero_fitness_is_uniform() {
    let mut rng = StdRng::seed_from_u64(10);
    let size = 5;
    let population = indexed_population(size, |_| 0);

    let trials = 5000;
    let mut counts = vec![0usize; size];
    for _ in 0..trials {
        let (a, b) = selection_pair(&population, &mut rng).unwrap();
        let (ia, ib) = (index_of(&population, a), index_of(&population, b));
        // distinct slots, and with one slot per genome that means distinct genomes
        assert_ne!(ia, ib);
        counts[ia] += 1;
        counts[ib] += 1;
    }

    let expected = (2 * trials) as f64 / size as f64;
    let chi_square: f64 = counts
        .iter()
        .map(|&observed| (observed as f64 - expected).powi(2) / expected)
        .sum();

    // df = 4, p = 0.001
    assert!(chi_square < 18.47, "chi-square {} for counts {:?}", chi_square, counts);
}

#[test]
fn test_weighted_selection_can_repeat_heavy_genome() {
    let mut rng = StdRng::seed_from_u64(11);
    let population = indexed_population(2, |i| if i == 0 { 50 } else { 0 });

    let repeats = (0..200)
        .filter(|_| {
            let (a, b) = selection_pair(&population, &mut rng).unwrap();
            a == b
        })
        .count();

    assert!(repeats > 0);
}

#[test]
fn test_initializer_structure_is_seed_independent() {
    let mut contents = Vec::new();

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let population = random_population(12, 40, &mut rng);

        assert_eq!(population.len(), 12);
        assert!(population.iter().all(|g| g.len() == 40));
        assert!(population.iter().flatten().all(|bit| *bit <= 1));
        contents.push(population);
    }

    assert_ne!(contents[0], contents[1]);
}
