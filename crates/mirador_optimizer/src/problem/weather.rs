use serde::{Deserialize, Serialize};

/// Per-day weather label, assigned by an external forecast collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
}

impl WeatherCondition {
    /// Weather that makes outdoor activities unattractive.
    pub fn is_adverse(&self) -> bool {
        matches!(self, WeatherCondition::Rainy | WeatherCondition::Stormy)
    }
}
