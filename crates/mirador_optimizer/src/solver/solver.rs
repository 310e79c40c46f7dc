use std::sync::Arc;

use jiff::Timestamp;
use parking_lot::{MappedRwLockReadGuard, RwLock};
use serde::Serialize;

use crate::problem::{
    catalog::ActivityCatalog, preferences::UserPreferences, weather::WeatherCondition,
};

use super::{
    search::{GeneticSearch, ScoredItinerary, SearchSummary},
    solution::{day_plan::DayPlan, itinerary::Itinerary},
    solver_params::SolverParams,
};

#[derive(Copy, Clone, Debug, Serialize)]
pub enum SolverStatus {
    Pending,
    Running,
    Completed,
}

/// Public face of one optimization run. Planning is invoked synchronously
/// inside interactive requests, so the solver exposes a stop signal and the
/// best-so-far plan while running.
pub struct Solver {
    search: GeneticSearch,
    status: RwLock<SolverStatus>,
    created_at: Timestamp,
}

impl Solver {
    pub fn new(
        catalog: Arc<ActivityCatalog>,
        preferences: UserPreferences,
        weather_by_day: Vec<WeatherCondition>,
        params: SolverParams,
    ) -> Self {
        let search = GeneticSearch::new(params, catalog, preferences, weather_by_day);

        Solver {
            status: RwLock::new(SolverStatus::Pending),
            search,
            created_at: Timestamp::now(),
        }
    }

    pub fn on_best_itinerary<F>(&mut self, callback: F)
    where
        F: FnMut(&ScoredItinerary) + Send + Sync + 'static,
    {
        self.search.on_best_itinerary(callback);
    }

    pub fn solve(&self) -> SearchSummary {
        *self.status.write() = SolverStatus::Running;
        let summary = self.search.run();
        *self.status.write() = SolverStatus::Completed;
        summary
    }

    pub fn stop(&self) {
        self.search.stop();
    }

    pub fn status(&self) -> SolverStatus {
        *self.status.read()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn best_itinerary(&self) -> Option<MappedRwLockReadGuard<'_, ScoredItinerary>> {
        self.search.best_itinerary()
    }
}

/// One-call optimization surface: runs a full search and returns the winning
/// itinerary with its fitness score. An empty candidate pool degrades to a
/// plan of empty days with score zero rather than an error.
pub fn optimize(
    catalog: Arc<ActivityCatalog>,
    preferences: UserPreferences,
    weather_by_day: Vec<WeatherCondition>,
    params: SolverParams,
) -> (Itinerary, f64) {
    let empty_days = preferences
        .date_range
        .days()
        .enumerate()
        .map(|(day_index, date)| {
            DayPlan::new(
                date,
                weather_by_day.get(day_index).copied().unwrap_or_default(),
            )
        })
        .collect();
    let fallback = Itinerary::new(empty_days);

    let solver = Solver::new(catalog, preferences, weather_by_day, params);
    solver.solve();

    match solver.best_itinerary() {
        Some(best) => (best.itinerary.clone(), best.score),
        None => (fallback, 0.0),
    }
}
