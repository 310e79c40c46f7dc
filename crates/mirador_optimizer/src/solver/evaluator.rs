use crate::problem::{catalog::ActivityCatalog, preferences::UserPreferences};

use super::solution::itinerary::Itinerary;

const DAILY_DURATION_PENALTY: f64 = 0.5;
const WALKING_DISTANCE_PENALTY: f64 = 0.3;
const SERVICE_WINDOW_PENALTY: f64 = 0.2;
const BUDGET_PENALTY: f64 = 1.0;

/// Multi-criteria fitness evaluator. Sub-scores are each normalized to
/// roughly `[0, 1]` before weighting; constraint violations subtract
/// additive penalties. The final score is floored at zero.
pub struct ItineraryEvaluator<'a> {
    catalog: &'a ActivityCatalog,
    preferences: &'a UserPreferences,
}

impl<'a> ItineraryEvaluator<'a> {
    pub fn new(catalog: &'a ActivityCatalog, preferences: &'a UserPreferences) -> Self {
        ItineraryEvaluator {
            catalog,
            preferences,
        }
    }

    pub fn evaluate(&self, itinerary: &Itinerary) -> f64 {
        // A plan with nothing scheduled carries no signal; callers treat it
        // as "insufficient data".
        if itinerary.is_empty() {
            return 0.0;
        }

        let weights = &self.preferences.weights;
        let score = weights.cost * self.cost_score(itinerary)
            + weights.rating * self.rating_score(itinerary)
            + weights.time * self.time_score(itinerary)
            + weights.weather * self.weather_score(itinerary)
            + weights.interest * self.interest_score(itinerary)
            - self.violation_penalty(itinerary);

        score.max(0.0)
    }

    fn cost_score(&self, itinerary: &Itinerary) -> f64 {
        // Unlimited budget is full marks, never a division.
        if !self.preferences.is_budget_limited() {
            return 1.0;
        }

        (1.0 - itinerary.total_cost(self.catalog) / self.preferences.max_budget).max(0.0)
    }

    fn rating_score(&self, itinerary: &Itinerary) -> f64 {
        itinerary.average_rating(self.catalog) / 5.0
    }

    /// Share of scheduled time spent in activities rather than in transit.
    fn time_score(&self, itinerary: &Itinerary) -> f64 {
        let activity_minutes: i64 = itinerary
            .items()
            .map(|item| self.catalog.activity(item.activity_id).duration_minutes())
            .sum();
        let transport_minutes: i64 = itinerary
            .items()
            .map(|item| item.transport_time_minutes)
            .sum();

        let total = activity_minutes + transport_minutes;
        if total == 0 {
            return 0.0;
        }

        activity_minutes as f64 / total as f64
    }

    fn weather_score(&self, itinerary: &Itinerary) -> f64 {
        let mut penalties = 0.0;
        let mut count = 0usize;

        for day in itinerary.days() {
            for item in day.items() {
                penalties += self
                    .catalog
                    .activity(item.activity_id)
                    .weather_penalty(day.weather());
                count += 1;
            }
        }

        if count == 0 {
            return 1.0;
        }

        1.0 - penalties / count as f64
    }

    fn interest_score(&self, itinerary: &Itinerary) -> f64 {
        let user_interests = &self.preferences.interest_categories;
        // No stated preference is fully satisfied by anything.
        if user_interests.is_empty() {
            return 1.0;
        }

        let mut ratio_sum = 0.0;
        let mut count = 0usize;

        for item in itinerary.items() {
            let matches = self
                .catalog
                .activity(item.activity_id)
                .interest_categories()
                .intersection(user_interests)
                .count();
            ratio_sum += matches as f64 / user_interests.len() as f64;
            count += 1;
        }

        if count == 0 {
            return 0.0;
        }

        ratio_sum / count as f64
    }

    fn violation_penalty(&self, itinerary: &Itinerary) -> f64 {
        let mut penalty = 0.0;

        for day in itinerary.days() {
            if day.duration_minutes(self.catalog) > self.preferences.max_daily_duration_minutes {
                penalty += DAILY_DURATION_PENALTY;
            }

            if day.walking_distance_km(self.catalog) > self.preferences.max_walking_distance_km {
                penalty += WALKING_DISTANCE_PENALTY;
            }

            for item in day.items() {
                if !self
                    .catalog
                    .activity(item.activity_id)
                    .is_available_at(item.start_time)
                {
                    penalty += SERVICE_WINDOW_PENALTY;
                }
            }
        }

        if self.preferences.is_budget_limited()
            && itinerary.total_cost(self.catalog) > self.preferences.max_budget
        {
            penalty += BUDGET_PENALTY;
        }

        penalty
    }
}
