use fxhash::FxHashSet;
use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::{location::Location, weather::WeatherCondition};

const INDOOR_WEATHER_PENALTY: f64 = 0.1;
const OUTDOOR_ADVERSE_WEATHER_PENALTY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Tour,
    Cultural,
    Museum,
    Excursion,
    Restaurant,
    Transport,
    Nature,
    Entertainment,
    Shopping,
    Accommodation,
}

/// One bookable thing to do, supplied by the catalog collaborator with
/// coordinates already resolved and duration/cost already estimated.
/// Immutable for the duration of an optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourismActivity {
    id: String,
    name: String,
    activity_type: ActivityType,
    #[serde(default)]
    location: Option<Location>,
    duration_minutes: i64,
    cost: f64,
    rating: f64,
    #[serde(default)]
    description: String,
    #[serde(default = "default_service_start_hour")]
    service_start_hour: i8,
    #[serde(default = "default_service_end_hour")]
    service_end_hour: i8,
    #[serde(default = "default_indoor")]
    indoor: bool,
    #[serde(default)]
    interest_categories: FxHashSet<String>,
}

fn default_service_start_hour() -> i8 {
    9
}

fn default_service_end_hour() -> i8 {
    17
}

fn default_indoor() -> bool {
    true
}

impl TourismActivity {
    pub fn builder(
        id: impl Into<String>,
        name: impl Into<String>,
        activity_type: ActivityType,
    ) -> TourismActivityBuilder {
        TourismActivityBuilder::new(id, name, activity_type)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn service_start_hour(&self) -> i8 {
        self.service_start_hour
    }

    pub fn service_end_hour(&self) -> i8 {
        self.service_end_hour
    }

    pub fn indoor(&self) -> bool {
        self.indoor
    }

    pub fn interest_categories(&self) -> &FxHashSet<String> {
        &self.interest_categories
    }

    /// Whether the activity's own service window covers the given time.
    /// The window is half-open: `[service_start_hour, service_end_hour)`.
    pub fn is_available_at(&self, at: DateTime) -> bool {
        self.service_start_hour <= at.hour() && at.hour() < self.service_end_hour
    }

    /// Penalty in `[0, 1]` for scheduling this activity under the given
    /// weather. Indoor activities are nearly weather-proof.
    pub fn weather_penalty(&self, weather: WeatherCondition) -> f64 {
        if self.indoor {
            return INDOOR_WEATHER_PENALTY;
        }

        if weather.is_adverse() {
            OUTDOOR_ADVERSE_WEATHER_PENALTY
        } else {
            INDOOR_WEATHER_PENALTY
        }
    }
}

pub struct TourismActivityBuilder {
    activity: TourismActivity,
}

impl TourismActivityBuilder {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        activity_type: ActivityType,
    ) -> Self {
        TourismActivityBuilder {
            activity: TourismActivity {
                id: id.into(),
                name: name.into(),
                activity_type,
                location: None,
                duration_minutes: 60,
                cost: 0.0,
                rating: 3.0,
                description: String::new(),
                service_start_hour: default_service_start_hour(),
                service_end_hour: default_service_end_hour(),
                indoor: default_indoor(),
                interest_categories: FxHashSet::default(),
            },
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.activity.location = Some(location);
        self
    }

    pub fn with_duration_minutes(mut self, duration_minutes: i64) -> Self {
        self.activity.duration_minutes = duration_minutes;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.activity.cost = cost;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.activity.rating = rating;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.activity.description = description.into();
        self
    }

    pub fn with_service_hours(mut self, start_hour: i8, end_hour: i8) -> Self {
        self.activity.service_start_hour = start_hour;
        self.activity.service_end_hour = end_hour;
        self
    }

    pub fn with_indoor(mut self, indoor: bool) -> Self {
        self.activity.indoor = indoor;
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activity.interest_categories = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> TourismActivity {
        self.activity
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_service_window_is_half_open() {
        let museum = TourismActivity::builder("m1", "Museo de la Revolución", ActivityType::Museum)
            .with_service_hours(9, 17)
            .build();

        assert!(museum.is_available_at(date(2026, 6, 10).at(9, 0, 0, 0)));
        assert!(museum.is_available_at(date(2026, 6, 10).at(16, 59, 0, 0)));
        assert!(!museum.is_available_at(date(2026, 6, 10).at(17, 0, 0, 0)));
        assert!(!museum.is_available_at(date(2026, 6, 10).at(8, 30, 0, 0)));
    }

    #[test]
    fn test_weather_penalty() {
        let indoor = TourismActivity::builder("m1", "Museo", ActivityType::Museum)
            .with_indoor(true)
            .build();
        let outdoor = TourismActivity::builder("e1", "Excursión", ActivityType::Excursion)
            .with_indoor(false)
            .build();

        assert_eq!(indoor.weather_penalty(WeatherCondition::Stormy), 0.1);
        assert_eq!(outdoor.weather_penalty(WeatherCondition::Sunny), 0.1);
        assert_eq!(outdoor.weather_penalty(WeatherCondition::Rainy), 0.8);
        assert_eq!(outdoor.weather_penalty(WeatherCondition::Stormy), 0.8);
    }

    #[test]
    fn test_deserialization_applies_defaults() {
        let json = r#"{
            "id": "t1",
            "name": "Habana Vieja walking tour",
            "activity_type": "tour",
            "duration_minutes": 120,
            "cost": 15.0,
            "rating": 4.5
        }"#;

        let activity: TourismActivity = serde_json::from_str(json).unwrap();
        assert!(activity.location().is_none());
        assert_eq!(activity.service_start_hour(), 9);
        assert_eq!(activity.service_end_hour(), 17);
        assert!(activity.indoor());
        assert!(activity.interest_categories().is_empty());
    }
}
