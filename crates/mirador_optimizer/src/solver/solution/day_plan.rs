use jiff::civil::{Date, DateTime};
use serde::Serialize;
use smallvec::SmallVec;

use crate::problem::{
    catalog::{ActivityCatalog, ActivityIdx},
    weather::WeatherCondition,
};

/// One scheduled activity. References the catalog by index, never by
/// ownership.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryItem {
    pub activity_id: ActivityIdx,
    pub start_time: DateTime,
    pub transport_time_minutes: i64,
    pub transport_cost: f64,
}

/// One calendar day's ordered activities within an itinerary.
#[derive(Debug, Clone, Serialize)]
pub struct DayPlan {
    pub(crate) date: Date,
    pub(crate) items: SmallVec<[ItineraryItem; 6]>,
    pub(crate) weather: WeatherCondition,
}

impl DayPlan {
    pub fn new(date: Date, weather: WeatherCondition) -> Self {
        DayPlan {
            date,
            items: SmallVec::new(),
            weather,
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn weather(&self) -> WeatherCondition {
        self.weather
    }

    pub fn items(&self) -> &[ItineraryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total of activity and transport minutes for the day.
    pub fn duration_minutes(&self, catalog: &ActivityCatalog) -> i64 {
        self.items
            .iter()
            .map(|item| {
                catalog.activity(item.activity_id).duration_minutes() + item.transport_time_minutes
            })
            .sum()
    }

    /// Total of activity and transport costs for the day.
    pub fn cost(&self, catalog: &ActivityCatalog) -> f64 {
        self.items
            .iter()
            .map(|item| catalog.activity(item.activity_id).cost() + item.transport_cost)
            .sum()
    }

    /// Sum of great-circle distances between consecutive located activities,
    /// in schedule order. Items without a location are skipped.
    pub fn walking_distance_km(&self, catalog: &ActivityCatalog) -> f64 {
        let locations: Vec<_> = self
            .items
            .iter()
            .filter_map(|item| catalog.activity(item.activity_id).location())
            .collect();

        locations
            .windows(2)
            .map(|pair| pair[0].distance_to(pair[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::test_utils::{item_at, located_catalog};

    use super::*;

    #[test]
    fn test_day_totals() {
        let catalog = located_catalog();
        let mut day = DayPlan::new(date(2026, 6, 10), WeatherCondition::Sunny);
        day.items.push(item_at(&catalog, "museum", 9, 15, 5.0));
        day.items.push(item_at(&catalog, "tour", 11, 10, 4.0));

        // museum: 120 min / 10.0, tour: 90 min / 15.0
        assert_eq!(day.duration_minutes(&catalog), 120 + 15 + 90 + 10);
        assert_eq!(day.cost(&catalog), 10.0 + 5.0 + 15.0 + 4.0);
    }

    #[test]
    fn test_walking_distance_skips_unlocated_items() {
        let catalog = located_catalog();
        let mut day = DayPlan::new(date(2026, 6, 10), WeatherCondition::Sunny);
        day.items.push(item_at(&catalog, "museum", 9, 15, 5.0));
        day.items.push(item_at(&catalog, "unlocated", 11, 10, 4.0));
        day.items.push(item_at(&catalog, "tour", 13, 10, 4.0));

        let museum = catalog
            .activity(catalog.lookup("museum").unwrap())
            .location()
            .unwrap()
            .clone();
        let tour = catalog
            .activity(catalog.lookup("tour").unwrap())
            .location()
            .unwrap()
            .clone();

        assert_eq!(day.walking_distance_km(&catalog), museum.distance_to(&tour));
    }

    #[test]
    fn test_walking_distance_empty_day() {
        let catalog = located_catalog();
        let day = DayPlan::new(date(2026, 6, 10), WeatherCondition::Sunny);
        assert_eq!(day.walking_distance_km(&catalog), 0.0);
    }
}
