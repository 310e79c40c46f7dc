use serde::Serialize;

use crate::problem::catalog::{ActivityCatalog, UsedActivities};

use super::day_plan::{DayPlan, ItineraryItem};

/// A full candidate multi-day plan; the unit of selection in the search.
/// Cloned, mutated and ranked by the genetic engine.
#[derive(Debug, Clone, Serialize)]
pub struct Itinerary {
    pub(crate) days: Vec<DayPlan>,
    pub(crate) fitness_score: f64,
}

impl Itinerary {
    pub fn new(days: Vec<DayPlan>) -> Self {
        Itinerary {
            days,
            fitness_score: 0.0,
        }
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    /// Fitness cached by the last evaluation of this individual.
    pub fn fitness_score(&self) -> f64 {
        self.fitness_score
    }

    pub fn items(&self) -> impl Iterator<Item = &ItineraryItem> {
        self.days.iter().flat_map(|day| day.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.days.iter().map(|day| day.items.len()).sum()
    }

    /// True when no day has any scheduled activity.
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|day| day.is_empty())
    }

    pub fn total_cost(&self, catalog: &ActivityCatalog) -> f64 {
        self.days.iter().map(|day| day.cost(catalog)).sum()
    }

    pub fn average_rating(&self, catalog: &ActivityCatalog) -> f64 {
        let count = self.item_count();
        if count == 0 {
            return 0.0;
        }

        let total: f64 = self
            .items()
            .map(|item| catalog.activity(item.activity_id).rating())
            .sum();
        total / count as f64
    }

    /// Snapshot of every activity referenced by this plan, used as the
    /// scratch set for mutation operators.
    pub fn used_activities(&self) -> UsedActivities {
        let mut used = UsedActivities::default();
        for item in self.items() {
            used.insert(item.activity_id);
        }
        used
    }
}
