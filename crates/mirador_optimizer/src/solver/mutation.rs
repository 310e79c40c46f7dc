use rand::{
    Rng,
    rngs::SmallRng,
    seq::{IndexedRandom, IteratorRandom, SliceRandom},
};

use crate::problem::catalog::ActivityCatalog;

use super::solution::itinerary::Itinerary;

const REPLACEMENT_COST_FACTOR: f64 = 1.2;

/// The mutation operators of the search. A mutation event applies exactly
/// one of them, chosen uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOperator {
    /// Exchange one random item between two random days.
    Swap,
    /// Swap a random item's activity for an unused one of similar cost,
    /// keeping the item's timing fields.
    Replace,
    /// Reorder a random day's items. Start times are left as scheduled;
    /// reordering only changes the day's walking distance.
    Shuffle,
}

impl MutationOperator {
    pub fn choose(rng: &mut SmallRng) -> Self {
        match rng.random_range(0..3) {
            0 => MutationOperator::Swap,
            1 => MutationOperator::Replace,
            _ => MutationOperator::Shuffle,
        }
    }

    pub fn apply(self, itinerary: &mut Itinerary, catalog: &ActivityCatalog, rng: &mut SmallRng) {
        if itinerary.days().is_empty() {
            return;
        }

        match self {
            MutationOperator::Swap => swap_between_days(itinerary, rng),
            MutationOperator::Replace => replace_activity(itinerary, catalog, rng),
            MutationOperator::Shuffle => shuffle_day(itinerary, rng),
        }
    }
}

fn swap_between_days(itinerary: &mut Itinerary, rng: &mut SmallRng) {
    if itinerary.days().len() < 2 {
        return;
    }

    let picked = (0..itinerary.days().len()).choose_multiple(rng, 2);
    let (first, second) = (picked[0], picked[1]);

    if itinerary.days[first].is_empty() || itinerary.days[second].is_empty() {
        return;
    }

    let first_index = rng.random_range(0..itinerary.days[first].len());
    let second_index = rng.random_range(0..itinerary.days[second].len());

    let from_first = itinerary.days[first].items.remove(first_index);
    let from_second = itinerary.days[second].items.remove(second_index);
    itinerary.days[first].items.push(from_second);
    itinerary.days[second].items.push(from_first);
}

fn replace_activity(itinerary: &mut Itinerary, catalog: &ActivityCatalog, rng: &mut SmallRng) {
    let day_index = rng.random_range(0..itinerary.days().len());
    if itinerary.days[day_index].is_empty() {
        return;
    }

    let item_index = rng.random_range(0..itinerary.days[day_index].len());
    let old_id = itinerary.days[day_index].items[item_index].activity_id;

    let mut used = itinerary.used_activities();
    used.release(old_id);

    let cost_ceiling = catalog.activity(old_id).cost() * REPLACEMENT_COST_FACTOR;
    let available = catalog.available_activities(cost_ceiling, &used);

    if let Some(&replacement) = available.choose(rng) {
        itinerary.days[day_index].items[item_index].activity_id = replacement;
    }
    // No affordable unused activity: the item keeps its original activity.
}

fn shuffle_day(itinerary: &mut Itinerary, rng: &mut SmallRng) {
    let day_index = rng.random_range(0..itinerary.days().len());
    let items = &mut itinerary.days[day_index].items;
    if items.len() > 1 {
        items.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rand::SeedableRng;

    use crate::{
        problem::{
            activity::{ActivityType, TourismActivity},
            catalog::{ActivityCatalog, UsedActivities},
            weather::WeatherCondition,
        },
        solver::solution::day_plan::{DayPlan, ItineraryItem},
        test_utils::{item_at, located_catalog},
    };

    use super::*;

    fn assert_unique(itinerary: &Itinerary) {
        let mut seen = UsedActivities::default();
        for item in itinerary.items() {
            assert!(seen.insert(item.activity_id), "duplicate activity");
        }
    }

    fn two_day_itinerary() -> (ActivityCatalog, Itinerary) {
        let catalog = located_catalog();
        let mut first = DayPlan::new(date(2026, 6, 10), WeatherCondition::Sunny);
        first.items.push(item_at(&catalog, "museum", 9, 15, 5.0));
        first.items.push(item_at(&catalog, "unlocated", 12, 10, 4.0));
        let mut second = DayPlan::new(date(2026, 6, 11), WeatherCondition::Sunny);
        second.items.push(item_at(&catalog, "tour", 10, 10, 4.0));
        (catalog, Itinerary::new(vec![first, second]))
    }

    #[test]
    fn test_swap_preserves_items_and_uniqueness() {
        let (catalog, mut itinerary) = two_day_itinerary();
        let before = itinerary.item_count();

        for seed in 0..16 {
            let mut rng = SmallRng::seed_from_u64(seed);
            MutationOperator::Swap.apply(&mut itinerary, &catalog, &mut rng);
        }

        assert_eq!(itinerary.item_count(), before);
        assert_unique(&itinerary);
    }

    #[test]
    fn test_swap_single_day_is_noop() {
        let catalog = located_catalog();
        let mut day = DayPlan::new(date(2026, 6, 10), WeatherCondition::Sunny);
        day.items.push(item_at(&catalog, "museum", 9, 15, 5.0));
        let mut itinerary = Itinerary::new(vec![day]);
        let mut rng = SmallRng::seed_from_u64(7);

        MutationOperator::Swap.apply(&mut itinerary, &catalog, &mut rng);
        assert_eq!(itinerary.item_count(), 1);
    }

    #[test]
    fn test_replace_respects_cost_ceiling_and_uniqueness() {
        for seed in 0..32 {
            let (catalog, mut itinerary) = two_day_itinerary();
            let before: Vec<_> = itinerary
                .items()
                .map(|item| (item.activity_id, item.start_time, item.transport_time_minutes))
                .collect();

            let mut rng = SmallRng::seed_from_u64(seed);
            MutationOperator::Replace.apply(&mut itinerary, &catalog, &mut rng);
            assert_unique(&itinerary);

            let after: Vec<_> = itinerary
                .items()
                .map(|item| (item.activity_id, item.start_time, item.transport_time_minutes))
                .collect();
            assert_eq!(before.len(), after.len());

            for ((old_id, old_start, old_transport), (new_id, new_start, new_transport)) in
                before.into_iter().zip(after)
            {
                // Timing fields survive replacement untouched.
                assert_eq!(old_start, new_start);
                assert_eq!(old_transport, new_transport);

                if old_id != new_id {
                    let ceiling = catalog.activity(old_id).cost() * 1.2;
                    assert!(catalog.activity(new_id).cost() <= ceiling + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_replace_with_no_alternative_keeps_activity() {
        // Catalog with a single activity: releasing it leaves nothing else
        // to pick, so the item must retain its original activity.
        let catalog = ActivityCatalog::from_activities(vec![
            TourismActivity::builder("only", "Única", ActivityType::Tour)
                .with_cost(10.0)
                .with_rating(4.0)
                .build(),
        ])
        .unwrap();

        let mut day = DayPlan::new(date(2026, 6, 10), WeatherCondition::Sunny);
        day.items.push(ItineraryItem {
            activity_id: catalog.lookup("only").unwrap(),
            start_time: date(2026, 6, 10).at(9, 0, 0, 0),
            transport_time_minutes: 12,
            transport_cost: 4.0,
        });
        let mut itinerary = Itinerary::new(vec![day]);
        let mut rng = SmallRng::seed_from_u64(7);

        MutationOperator::Replace.apply(&mut itinerary, &catalog, &mut rng);

        let item = itinerary.items().next().unwrap();
        assert_eq!(item.activity_id, catalog.lookup("only").unwrap());
    }

    #[test]
    fn test_shuffle_leaves_start_times_untouched() {
        // Legacy semantics: a shuffled day is reordered as whole records,
        // no start time is recomputed afterwards.
        let catalog = located_catalog();
        let mut day = DayPlan::new(date(2026, 6, 10), WeatherCondition::Sunny);
        day.items.push(item_at(&catalog, "museum", 9, 15, 5.0));
        day.items.push(item_at(&catalog, "tour", 11, 10, 4.0));
        day.items.push(item_at(&catalog, "unlocated", 14, 10, 4.0));
        let mut itinerary = Itinerary::new(vec![day]);

        let before: Vec<_> = itinerary
            .items()
            .map(|item| (item.activity_id, item.start_time))
            .collect();

        let mut rng = SmallRng::seed_from_u64(7);
        MutationOperator::Shuffle.apply(&mut itinerary, &catalog, &mut rng);

        let mut after: Vec<_> = itinerary
            .items()
            .map(|item| (item.activity_id, item.start_time))
            .collect();

        // Each item keeps its own scheduled start time through the reorder.
        let mut expected = before.clone();
        expected.sort();
        after.sort();
        assert_eq!(after, expected);
    }

    #[test]
    fn test_mutation_on_empty_itinerary_is_noop() {
        let catalog = located_catalog();
        let mut itinerary = Itinerary::new(vec![DayPlan::new(
            date(2026, 6, 10),
            WeatherCondition::Sunny,
        )]);
        let mut rng = SmallRng::seed_from_u64(7);

        for operator in [
            MutationOperator::Swap,
            MutationOperator::Replace,
            MutationOperator::Shuffle,
        ] {
            operator.apply(&mut itinerary, &catalog, &mut rng);
            assert!(itinerary.is_empty());
        }
    }
}
