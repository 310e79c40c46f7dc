use rand::{Rng, rngs::SmallRng};
use tracing::warn;

use crate::problem::catalog::UsedActivities;

use super::solution::{day_plan::DayPlan, itinerary::Itinerary};

/// Day-wise uniform crossover: each day of the child is taken wholesale
/// from one parent, then filtered against a fresh used-activity set so the
/// first occurrence of an activity wins and the child never schedules an
/// activity twice.
///
/// Parents always span the same date range by construction; a day-count
/// mismatch is an internal inconsistency, degraded to cloning one parent.
pub fn day_wise_crossover(
    first: &Itinerary,
    second: &Itinerary,
    rng: &mut SmallRng,
) -> Itinerary {
    if first.days().len() != second.days().len() {
        warn!(
            "crossover parents with mismatched day counts ({} vs {}), cloning a parent",
            first.days().len(),
            second.days().len()
        );

        return if rng.random_bool(0.5) {
            first.clone()
        } else {
            second.clone()
        };
    }

    let mut used = UsedActivities::default();

    let days = first
        .days()
        .iter()
        .zip(second.days())
        .map(|(first_day, second_day)| {
            let source = if rng.random_bool(0.5) {
                first_day
            } else {
                second_day
            };

            let mut day = DayPlan::new(source.date(), source.weather());
            for item in source.items() {
                if used.insert(item.activity_id) {
                    day.items.push(item.clone());
                }
            }
            day
        })
        .collect();

    Itinerary::new(days)
}
