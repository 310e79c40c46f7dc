use jiff::{ToSpan, civil::Date};
use rand::{Rng, rngs::SmallRng, seq::IndexedRandom};

use crate::problem::{
    catalog::{ActivityCatalog, UsedActivities},
    preferences::UserPreferences,
    weather::WeatherCondition,
};

use super::solution::{
    day_plan::{DayPlan, ItineraryItem},
    itinerary::Itinerary,
};

const MIN_TRANSPORT_MINUTES: i64 = 10;
const MAX_TRANSPORT_MINUTES: i64 = 20;
const MIN_TRANSPORT_COST: f64 = 3.0;
const MAX_TRANSPORT_COST: f64 = 8.0;

/// Builds one random individual: one day plan per date in the preference
/// range, all days drawing from a single run-scoped used-activity set.
pub fn random_itinerary(
    catalog: &ActivityCatalog,
    preferences: &UserPreferences,
    weather_by_day: &[WeatherCondition],
    rng: &mut SmallRng,
) -> Itinerary {
    let mut used = UsedActivities::default();
    let budget_slice = preferences.daily_budget_slice();

    let days = preferences
        .date_range
        .days()
        .enumerate()
        .map(|(day_index, date)| {
            let weather = weather_by_day.get(day_index).copied().unwrap_or_default();
            random_day_plan(
                catalog,
                preferences,
                date,
                weather,
                budget_slice,
                &mut used,
                rng,
            )
        })
        .collect();

    Itinerary::new(days)
}

/// Greedy-random day builder. Picks activities with probability
/// proportional to rating, appends those that fit the remaining day budget,
/// and advances the scheduling clock by activity duration plus a sampled
/// transport leg. A picked activity counts as used even when the budget
/// check then rejects it.
pub fn random_day_plan(
    catalog: &ActivityCatalog,
    preferences: &UserPreferences,
    date: Date,
    weather: WeatherCondition,
    budget_slice: f64,
    used: &mut UsedActivities,
    rng: &mut SmallRng,
) -> DayPlan {
    let mut day = DayPlan::new(date, weather);

    let mut available = catalog.available_activities(budget_slice, used);
    if available.is_empty() {
        return day;
    }

    let mut current_time = date.at(preferences.daily_start_hour, 0, 0, 0);
    let mut spent = 0.0;

    while current_time.hour() < preferences.daily_end_hour - 1 && !available.is_empty() {
        let Ok(&choice) = available.choose_weighted(rng, |&index| catalog.activity(index).rating())
        else {
            break;
        };

        available.retain(|&index| index != choice);
        used.insert(choice);

        let activity = catalog.activity(choice);
        if budget_slice <= 0.0 || spent + activity.cost() <= budget_slice {
            let transport_time_minutes =
                rng.random_range(MIN_TRANSPORT_MINUTES..=MAX_TRANSPORT_MINUTES);
            let transport_cost = rng.random_range(MIN_TRANSPORT_COST..MAX_TRANSPORT_COST);

            day.items.push(ItineraryItem {
                activity_id: choice,
                start_time: current_time,
                transport_time_minutes,
                transport_cost,
            });

            spent += activity.cost() + transport_cost;
            current_time = current_time
                .saturating_add((activity.duration_minutes() + transport_time_minutes).minutes());
        }
    }

    day
}
