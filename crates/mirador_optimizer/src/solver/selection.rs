use rand::{rngs::SmallRng, seq::IteratorRandom};

use super::solution::itinerary::Itinerary;

/// Tournament selection: sample `k` individuals uniformly, keep the
/// highest-scoring one.
pub fn tournament_select<'a>(
    population: &'a [Itinerary],
    scores: &[f64],
    k: usize,
    rng: &mut SmallRng,
) -> &'a Itinerary {
    let contenders = (0..population.len()).choose_multiple(rng, k.min(population.len()));

    let winner = contenders
        .into_iter()
        .max_by(|&first, &second| scores[first].total_cmp(&scores[second]))
        .expect("tournament over a non-empty population");

    &population[winner]
}
