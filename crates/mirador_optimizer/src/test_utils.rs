use jiff::civil::date;

use crate::{
    problem::{
        activity::{ActivityType, TourismActivity},
        catalog::ActivityCatalog,
        location::Location,
        preferences::{DateRange, UserPreferences},
    },
    solver::solution::day_plan::ItineraryItem,
};

pub(crate) fn located_catalog() -> ActivityCatalog {
    let activities = vec![
        TourismActivity::builder("museum", "Museo Nacional", ActivityType::Museum)
            .with_location(Location::new("Habana Vieja", 23.1380, -82.3589))
            .with_duration_minutes(120)
            .with_cost(10.0)
            .with_rating(4.0)
            .with_indoor(true)
            .with_interests(["culture", "history"])
            .build(),
        TourismActivity::builder("tour", "Paseo del Malecón", ActivityType::Tour)
            .with_location(Location::new("Malecón", 23.1446, -82.3667))
            .with_duration_minutes(90)
            .with_cost(15.0)
            .with_rating(4.5)
            .with_indoor(false)
            .with_interests(["culture"])
            .build(),
        TourismActivity::builder("unlocated", "Espectáculo nocturno", ActivityType::Entertainment)
            .with_duration_minutes(60)
            .with_cost(5.0)
            .with_rating(3.5)
            .build(),
        TourismActivity::builder("garden", "Jardín Botánico", ActivityType::Nature)
            .with_location(Location::new("Vedado", 23.1330, -82.3830))
            .with_duration_minutes(75)
            .with_cost(11.0)
            .with_rating(4.2)
            .with_indoor(false)
            .with_interests(["nature"])
            .build(),
    ];

    ActivityCatalog::from_activities(activities).expect("fixture catalog is valid")
}

pub(crate) fn item_at(
    catalog: &ActivityCatalog,
    id: &str,
    hour: i8,
    transport_time_minutes: i64,
    transport_cost: f64,
) -> ItineraryItem {
    ItineraryItem {
        activity_id: catalog.lookup(id).expect("fixture activity exists"),
        start_time: date(2026, 6, 10).at(hour, 0, 0, 0),
        transport_time_minutes,
        transport_cost,
    }
}

pub(crate) fn test_preferences(num_days: usize, max_budget: f64) -> UserPreferences {
    let start = date(2026, 6, 10);
    let end = start.saturating_add(jiff::Span::new().days(num_days as i64 - 1));

    UserPreferences {
        date_range: DateRange::new(start, end),
        max_budget,
        daily_start_hour: 9,
        daily_end_hour: 18,
        max_daily_duration_minutes: 480,
        max_walking_distance_km: 5.0,
        interest_categories: ["culture"].into_iter().map(String::from).collect(),
        ..UserPreferences::default()
    }
}
