pub mod breeding_window;
pub mod engine;
pub mod hoof_check;
pub mod vaccination;

pub use breeding_window::BreedingWindowRule;
pub use engine::SchedulerEngine;
pub use hoof_check::HoofCheckRule;
pub use vaccination::VaccinationRule;

use crate::models::{Animal, DueTask, TaskKind};
use chrono::{Duration, NaiveDate};

/// Trait for husbandry scheduling rules.
///
/// Rules are pure: the reference date is always an explicit argument, never
/// the system clock, so every evaluation is reproducible.
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule for one animal against the window
    /// `[today, today + horizon_days]`, inclusive on both ends.
    fn evaluate(&self, animal: &Animal, today: NaiveDate, horizon_days: i64) -> Option<DueTask>;
}

/// Next occurrence of a task recurring every `interval_days` from birth.
///
/// An age that is an exact multiple of the interval is due today. A birth
/// date in the future schedules the first occurrence at birth + interval.
pub(crate) fn next_occurrence(
    birth: NaiveDate,
    interval_days: i64,
    today: NaiveDate,
) -> NaiveDate {
    let age_days = (today - birth).num_days();

    if age_days < 0 {
        birth + Duration::days(interval_days)
    } else if age_days % interval_days == 0 {
        today
    } else {
        let periods_passed = age_days / interval_days;
        birth + Duration::days((periods_passed + 1) * interval_days)
    }
}

/// Shared emission logic for the recurring rules: a point task when the next
/// occurrence lands inside the horizon.
pub(crate) fn recurring_task(
    kind: TaskKind,
    animal: &Animal,
    interval_days: i64,
    today: NaiveDate,
    horizon_days: i64,
) -> Option<DueTask> {
    let due_date = next_occurrence(animal.birth_date, interval_days, today);
    let days_out = (due_date - today).num_days();

    if days_out >= 0 && days_out <= horizon_days {
        Some(DueTask::Point {
            kind,
            animal_id: animal.id.clone(),
            animal_name: animal.name.clone(),
            due_date,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_occurrence_exact_multiple_is_today() {
        let birth = date(2025, 1, 1);
        let today = birth + Duration::days(180);
        assert_eq!(next_occurrence(birth, 180, today), today);
    }

    #[test]
    fn next_occurrence_rolls_to_next_multiple() {
        let birth = date(2025, 1, 1);
        let today = birth + Duration::days(200);
        assert_eq!(next_occurrence(birth, 180, today), birth + Duration::days(360));
    }

    #[test]
    fn next_occurrence_future_birth() {
        let birth = date(2025, 9, 1);
        let today = date(2025, 7, 1);
        assert_eq!(next_occurrence(birth, 90, today), birth + Duration::days(90));
    }

    #[test]
    fn next_occurrence_on_birth_day() {
        // Age 0 is a multiple of any interval.
        let birth = date(2025, 7, 1);
        assert_eq!(next_occurrence(birth, 90, birth), birth);
    }
}
