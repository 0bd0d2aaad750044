use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One weigh-in. Records are appended in logging order; consumers that need
/// chronological order sort by `date` themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub date: NaiveDate,
    pub kg: f64,
}

impl WeightRecord {
    pub fn new(date: NaiveDate, kg: f64) -> Self {
        Self { date, kg }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    /// Ear-tag style identifier. Uniqueness is enforced by the application
    /// layer, not here.
    pub id: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub breed: String,
    pub target_daily_gain_kg: f64,
    #[serde(default)]
    pub weights: Vec<WeightRecord>,
}

impl Animal {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        birth_date: NaiveDate,
        breed: impl Into<String>,
        target_daily_gain_kg: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth_date,
            breed: breed.into(),
            target_daily_gain_kg,
            weights: Vec::new(),
        }
    }

    /// Most recent weigh-in by date. Ties on date go to the later logged
    /// record, matching a stable date sort of the log.
    pub fn latest_weight(&self) -> Option<&WeightRecord> {
        let mut latest: Option<&WeightRecord> = None;
        for record in &self.weights {
            match latest {
                Some(current) if record.date < current.date => {}
                _ => latest = Some(record),
            }
        }
        latest
    }

    /// Whole days since birth; negative when the birth date lies ahead of
    /// `today`.
    pub fn age_days(&self, today: NaiveDate) -> i64 {
        (today - self.birth_date).num_days()
    }
}
