use fxhash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::define_index_newtype;

use super::activity::TourismActivity;

define_index_newtype!(ActivityIdx, TourismActivity);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("activity id must not be empty")]
    EmptyId,
    #[error("duplicate activity id: {0}")]
    DuplicateId(String),
    #[error("activity {id}: rating {rating} outside [1, 5]")]
    RatingOutOfRange { id: String, rating: f64 },
    #[error("activity {id}: invalid service hours {start}..{end}")]
    InvalidServiceHours { id: String, start: i8, end: i8 },
    #[error("activity {id}: negative cost {cost}")]
    NegativeCost { id: String, cost: f64 },
    #[error("activity {id}: non-positive duration {duration_minutes}")]
    NonPositiveDuration { id: String, duration_minutes: i64 },
}

/// Read-only catalog of candidate activities for one optimization run.
///
/// This is the normalization boundary: heterogeneous source records are
/// deserialized into [`TourismActivity`], validated once here, and interned
/// behind [`ActivityIdx`]. The rest of the crate never sees source shapes
/// and never holds owned activities.
#[derive(Debug, Default)]
pub struct ActivityCatalog {
    activities: Vec<TourismActivity>,
    index_by_id: FxHashMap<String, ActivityIdx>,
}

impl ActivityCatalog {
    pub fn from_activities(activities: Vec<TourismActivity>) -> Result<Self, CatalogError> {
        let mut index_by_id = FxHashMap::default();

        for (index, activity) in activities.iter().enumerate() {
            Self::validate(activity)?;

            let previous = index_by_id.insert(activity.id().to_string(), ActivityIdx::new(index));
            if previous.is_some() {
                return Err(CatalogError::DuplicateId(activity.id().to_string()));
            }
        }

        Ok(ActivityCatalog {
            activities,
            index_by_id,
        })
    }

    /// Ingests a JSON array of activity records, applying the documented
    /// field defaults for anything the source omitted.
    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        let activities: Vec<TourismActivity> = serde_json::from_str(json)?;
        Ok(Self::from_activities(activities)?)
    }

    fn validate(activity: &TourismActivity) -> Result<(), CatalogError> {
        if activity.id().is_empty() {
            return Err(CatalogError::EmptyId);
        }

        if !(1.0..=5.0).contains(&activity.rating()) {
            return Err(CatalogError::RatingOutOfRange {
                id: activity.id().to_string(),
                rating: activity.rating(),
            });
        }

        let (start, end) = (activity.service_start_hour(), activity.service_end_hour());
        if start < 0 || end > 24 || start >= end {
            return Err(CatalogError::InvalidServiceHours {
                id: activity.id().to_string(),
                start,
                end,
            });
        }

        if activity.cost() < 0.0 {
            return Err(CatalogError::NegativeCost {
                id: activity.id().to_string(),
                cost: activity.cost(),
            });
        }

        if activity.duration_minutes() <= 0 {
            return Err(CatalogError::NonPositiveDuration {
                id: activity.id().to_string(),
                duration_minutes: activity.duration_minutes(),
            });
        }

        Ok(())
    }

    pub fn activity(&self, index: ActivityIdx) -> &TourismActivity {
        &self.activities[index]
    }

    pub fn lookup(&self, id: &str) -> Option<ActivityIdx> {
        self.index_by_id.get(id).copied()
    }

    pub fn activities(&self) -> &[TourismActivity] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Candidate pool query: activities not yet used in the plan being
    /// built, within the budget ceiling. A non-positive ceiling means
    /// unlimited.
    pub fn available_activities(
        &self,
        budget_ceiling: f64,
        used: &UsedActivities,
    ) -> Vec<ActivityIdx> {
        self.activities
            .iter()
            .enumerate()
            .filter(|(index, activity)| {
                !used.contains(ActivityIdx::new(*index))
                    && (budget_ceiling <= 0.0 || activity.cost() <= budget_ceiling)
            })
            .map(|(index, _)| ActivityIdx::new(index))
            .collect()
    }
}

/// Scoped tracker of activities already placed in the plan under
/// construction. One instance per optimization run and one per crossover
/// child; always caller-owned and passed down explicitly.
#[derive(Debug, Clone, Default)]
pub struct UsedActivities(FxHashSet<ActivityIdx>);

impl UsedActivities {
    /// Returns false if the activity was already marked used.
    pub fn insert(&mut self, index: ActivityIdx) -> bool {
        self.0.insert(index)
    }

    /// Releases an activity back to the pool.
    pub fn release(&mut self, index: ActivityIdx) -> bool {
        self.0.remove(&index)
    }

    pub fn contains(&self, index: ActivityIdx) -> bool {
        self.0.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
