use fxhash::FxHashSet;
use jiff::{civil::Date, ToSpan, Zoned};
use serde::{Deserialize, Serialize};

/// Inclusive range of calendar days the plan must span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Self {
        if start > end {
            panic!("date range start {start} is after end {end}");
        }

        DateRange { start, end }
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    pub fn num_days(&self) -> usize {
        (self.end - self.start).get_days() as usize + 1
    }

    pub fn days(&self) -> impl Iterator<Item = Date> {
        let start = self.start;
        (0..self.num_days()).map(move |offset| start.saturating_add((offset as i64).days()))
    }
}

/// Relative importance of each fitness criterion. Weights are expected to
/// sum to roughly 1.0 but are not renormalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriteriaWeights {
    pub cost: f64,
    pub time: f64,
    pub rating: f64,
    pub weather: f64,
    pub interest: f64,
}

impl Default for CriteriaWeights {
    fn default() -> Self {
        CriteriaWeights {
            cost: 0.25,
            time: 0.20,
            rating: 0.25,
            weather: 0.15,
            interest: 0.15,
        }
    }
}

/// The optimization's constraint and weighting configuration, assembled by
/// an external preference-extraction collaborator. Read-only during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    pub date_range: DateRange,
    /// Total budget in currency units; zero or negative means unlimited.
    pub max_budget: f64,
    pub daily_start_hour: i8,
    pub daily_end_hour: i8,
    pub max_daily_duration_minutes: i64,
    pub max_walking_distance_km: f64,
    pub interest_categories: FxHashSet<String>,
    pub weights: CriteriaWeights,
}

impl UserPreferences {
    pub fn is_budget_limited(&self) -> bool {
        self.max_budget > 0.0
    }

    /// Per-day share of the total budget, or zero when unlimited (the pool
    /// query treats a non-positive ceiling as unlimited).
    pub fn daily_budget_slice(&self) -> f64 {
        if self.is_budget_limited() {
            self.max_budget / self.date_range.num_days() as f64
        } else {
            0.0
        }
    }
}

impl Default for UserPreferences {
    /// Fallback configuration used when preference extraction is
    /// inconclusive: three days starting today, budget 300, a small varied
    /// interest set.
    fn default() -> Self {
        let today = Zoned::now().date();

        UserPreferences {
            date_range: DateRange::new(today, today.saturating_add(2.days())),
            max_budget: 300.0,
            daily_start_hour: 9,
            daily_end_hour: 18,
            max_daily_duration_minutes: 480,
            max_walking_distance_km: 5.0,
            interest_categories: ["culture", "nature", "gastronomy"]
                .into_iter()
                .map(String::from)
                .collect(),
            weights: CriteriaWeights::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_date_range_day_count() {
        let range = DateRange::new(date(2026, 6, 10), date(2026, 6, 12));
        assert_eq!(range.num_days(), 3);

        let days: Vec<Date> = range.days().collect();
        assert_eq!(
            days,
            vec![date(2026, 6, 10), date(2026, 6, 11), date(2026, 6, 12)]
        );
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date(2026, 6, 10), date(2026, 6, 10));
        assert_eq!(range.num_days(), 1);
    }

    #[test]
    #[should_panic]
    fn test_inverted_range_panics() {
        DateRange::new(date(2026, 6, 12), date(2026, 6, 10));
    }

    #[test]
    fn test_defaults() {
        let preferences = UserPreferences::default();
        assert_eq!(preferences.date_range.num_days(), 3);
        assert_eq!(preferences.max_budget, 300.0);
        assert_eq!(preferences.interest_categories.len(), 3);
    }

    #[test]
    fn test_daily_budget_slice() {
        let preferences = UserPreferences {
            date_range: DateRange::new(date(2026, 6, 10), date(2026, 6, 12)),
            max_budget: 300.0,
            ..UserPreferences::default()
        };
        assert_eq!(preferences.daily_budget_slice(), 100.0);

        let unlimited = UserPreferences {
            max_budget: 0.0,
            ..preferences
        };
        assert!(!unlimited.is_budget_limited());
        assert_eq!(unlimited.daily_budget_slice(), 0.0);
    }
}
