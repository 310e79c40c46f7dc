use jiff::civil::date;
use mirador_optimizer::problem::{
    activity::{ActivityType, TourismActivity},
    catalog::ActivityCatalog,
    location::Location,
    preferences::{CriteriaWeights, DateRange, UserPreferences},
};

/// The five-activity scenario catalog: ratings 3.0–4.8, costs 0–30,
/// durations 60–240 minutes, spread around Havana.
pub fn five_activity_catalog() -> ActivityCatalog {
    let activities = vec![
        TourismActivity::builder("A1", "Museo Nacional de Bellas Artes", ActivityType::Museum)
            .with_location(Location::new("Centro Habana", 23.1392, -82.3573))
            .with_duration_minutes(120)
            .with_cost(10.0)
            .with_rating(4.5)
            .with_indoor(true)
            .with_interests(["culture"])
            .build(),
        TourismActivity::builder("A2", "Paseo por Habana Vieja", ActivityType::Tour)
            .with_location(Location::new("Habana Vieja", 23.1367, -82.3505))
            .with_duration_minutes(90)
            .with_cost(0.0)
            .with_rating(4.8)
            .with_indoor(false)
            .with_interests(["culture", "history"])
            .build(),
        TourismActivity::builder("A3", "Paladar La Guarida", ActivityType::Restaurant)
            .with_location(Location::new("Centro Habana", 23.1406, -82.3666))
            .with_duration_minutes(60)
            .with_cost(25.0)
            .with_rating(4.2)
            .with_indoor(true)
            .with_service_hours(12, 23)
            .with_interests(["gastronomy"])
            .build(),
        TourismActivity::builder("A4", "Excursión al Valle de Viñales", ActivityType::Excursion)
            .with_location(Location::new("Viñales", 22.6167, -83.7167))
            .with_duration_minutes(240)
            .with_cost(30.0)
            .with_rating(3.9)
            .with_indoor(false)
            .with_interests(["nature"])
            .build(),
        TourismActivity::builder("A5", "Cabaret Tropicana", ActivityType::Entertainment)
            .with_location(Location::new("Marianao", 23.0922, -82.4375))
            .with_duration_minutes(120)
            .with_cost(15.0)
            .with_rating(3.0)
            .with_service_hours(10, 24)
            .build(),
    ];

    ActivityCatalog::from_activities(activities).expect("scenario catalog is valid")
}

pub fn two_day_preferences(max_budget: f64) -> UserPreferences {
    UserPreferences {
        date_range: DateRange::new(date(2026, 6, 10), date(2026, 6, 11)),
        max_budget,
        daily_start_hour: 9,
        daily_end_hour: 18,
        max_daily_duration_minutes: 480,
        max_walking_distance_km: 5.0,
        interest_categories: ["culture", "gastronomy"]
            .into_iter()
            .map(String::from)
            .collect(),
        weights: CriteriaWeights::default(),
    }
}
