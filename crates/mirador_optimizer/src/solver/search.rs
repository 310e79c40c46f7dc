use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use jiff::Timestamp;
use parking_lot::{MappedRwLockReadGuard, Mutex, RwLock, RwLockReadGuard};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::problem::{
    catalog::ActivityCatalog, preferences::UserPreferences, weather::WeatherCondition,
};

use super::{
    construction::random_itinerary,
    crossover::day_wise_crossover,
    evaluator::ItineraryEvaluator,
    mutation::MutationOperator,
    selection::tournament_select,
    solution::itinerary::Itinerary,
    solver_params::SolverParams,
};

/// Best individual found so far, with the score it was ranked by.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredItinerary {
    pub itinerary: Itinerary,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TerminationCause {
    Iterations,
    Deadline,
    Converged,
    Stopped,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchSummary {
    pub generations: usize,
    pub termination: TerminationCause,
}

type BestItineraryHandler = Arc<Mutex<dyn FnMut(&ScoredItinerary) + Send + Sync + 'static>>;

/// Generational genetic search over candidate itineraries:
/// Initialize → {Evaluate → UpdateBest → Breed} → Terminate.
pub struct GeneticSearch {
    catalog: Arc<ActivityCatalog>,
    preferences: UserPreferences,
    weather_by_day: Vec<WeatherCondition>,
    params: SolverParams,
    best: RwLock<Option<ScoredItinerary>>,
    is_stopped: AtomicBool,
    on_best_handler: Option<BestItineraryHandler>,
}

impl GeneticSearch {
    pub fn new(
        params: SolverParams,
        catalog: Arc<ActivityCatalog>,
        preferences: UserPreferences,
        weather_by_day: Vec<WeatherCondition>,
    ) -> Self {
        if params.terminations.is_empty() {
            panic!(
                "At least one termination condition must be specified in the solver parameters."
            );
        }

        if params.population_size == 0 {
            panic!("Population size must be positive.");
        }

        GeneticSearch {
            catalog,
            preferences,
            weather_by_day,
            params,
            best: RwLock::new(None),
            is_stopped: AtomicBool::new(false),
            on_best_handler: None,
        }
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn on_best_itinerary<F>(&mut self, callback: F)
    where
        F: FnMut(&ScoredItinerary) + Send + Sync + 'static,
    {
        self.on_best_handler = Some(Arc::new(Mutex::new(callback)));
    }

    pub fn stop(&self) {
        self.is_stopped.store(true, Ordering::Relaxed);
    }

    pub fn best_itinerary(&self) -> Option<MappedRwLockReadGuard<'_, ScoredItinerary>> {
        RwLockReadGuard::try_map(self.best.read(), |best| best.as_ref()).ok()
    }

    fn best_score(&self) -> f64 {
        self.best.read().as_ref().map_or(0.0, |best| best.score)
    }

    fn create_evaluation_thread_pool(&self) -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.params.evaluation_threads.number_of_threads())
            .build()
            .unwrap()
    }

    pub fn run(&self) -> SearchSummary {
        self.is_stopped.store(false, Ordering::Relaxed);

        let mut rng = match self.params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let start = Timestamp::now();
        let evaluator = ItineraryEvaluator::new(&self.catalog, &self.preferences);
        let thread_pool = self.create_evaluation_thread_pool();
        let max_iterations = self.params.max_iterations().unwrap_or(usize::MAX);

        debug!(
            "starting genetic search: population {}, catalog {} activities",
            self.params.population_size,
            self.catalog.len()
        );

        let mut population: Vec<Itinerary> = (0..self.params.population_size)
            .map(|_| {
                random_itinerary(
                    &self.catalog,
                    &self.preferences,
                    &self.weather_by_day,
                    &mut rng,
                )
            })
            .collect();

        let mut generation = 0;
        let termination = loop {
            if generation >= max_iterations {
                break TerminationCause::Iterations;
            }

            // Evaluation of distinct individuals shares no mutable state.
            let scores: Vec<f64> = thread_pool.install(|| {
                population
                    .par_iter()
                    .map(|individual| evaluator.evaluate(individual))
                    .collect()
            });

            for (individual, &score) in population.iter_mut().zip(&scores) {
                individual.fitness_score = score;
            }

            self.update_best(&population, &scores);

            if generation % 50 == 0 {
                debug!(
                    "generation {generation}: avg = {:.3}, best = {:.3}",
                    mean(&scores),
                    self.best_score()
                );
            }

            generation += 1;

            if self.is_stopped.load(Ordering::Relaxed) {
                break TerminationCause::Stopped;
            }

            if let Some(max_duration) = self.params.max_duration()
                && Timestamp::now().duration_since(start) > max_duration
            {
                break TerminationCause::Deadline;
            }

            if generation > self.params.convergence_after_generation
                && std_deviation(&scores) < self.params.convergence_std_dev
            {
                debug!("converged at generation {generation}");
                break TerminationCause::Converged;
            }

            population = self.breed(&population, &scores, &mut rng);
        };

        debug!(
            "search finished after {generation} generations ({termination:?}), best = {:.3}",
            self.best_score()
        );

        SearchSummary {
            generations: generation,
            termination,
        }
    }

    /// Best-ever tracking; monotonically non-decreasing across the run.
    fn update_best(&self, population: &[Itinerary], scores: &[f64]) {
        let Some(max_index) = scores
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(index, _)| index)
        else {
            return;
        };
        let max_score = scores[max_index];

        let mut guard = self.best.write();
        let improved = guard.as_ref().is_none_or(|best| max_score > best.score);
        if !improved {
            return;
        }

        *guard = Some(ScoredItinerary {
            itinerary: population[max_index].clone(),
            score: max_score,
        });

        if let Some(handler) = &self.on_best_handler
            && let Some(best) = guard.as_ref()
        {
            handler.lock()(best);
        }
    }

    /// Produces the next generation: elite clones, then tournament-selected
    /// parents crossed and occasionally mutated. Each child builds its own
    /// used-activity scratch state, so breeding is free of shared mutation.
    fn breed(&self, population: &[Itinerary], scores: &[f64], rng: &mut SmallRng) -> Vec<Itinerary> {
        let mut next_generation = Vec::with_capacity(self.params.population_size);

        let mut ranked: Vec<usize> = (0..population.len()).collect();
        ranked.sort_unstable_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        next_generation.extend(
            ranked
                .iter()
                .take(self.params.elite_count())
                .map(|&index| population[index].clone()),
        );

        while next_generation.len() < self.params.population_size {
            let first = tournament_select(population, scores, self.params.tournament_size, rng);
            let second = tournament_select(population, scores, self.params.tournament_size, rng);

            let mut child = day_wise_crossover(first, second, rng);
            if rng.random_bool(self.params.mutation_rate) {
                MutationOperator::choose(rng).apply(&mut child, &self.catalog, rng);
            }

            next_generation.push(child);
        }

        next_generation.truncate(self.params.population_size);
        next_generation
    }
}

fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }

    scores.iter().sum::<f64>() / scores.len() as f64
}

fn std_deviation(scores: &[f64]) -> f64 {
    if scores.len() < 2 {
        return 0.0;
    }

    let mean = mean(scores);
    let variance = scores
        .iter()
        .map(|score| (score - mean).powi(2))
        .sum::<f64>()
        / scores.len() as f64;

    variance.sqrt()
}
