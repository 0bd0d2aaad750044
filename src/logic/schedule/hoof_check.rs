use super::{recurring_task, Rule};
use crate::models::{Animal, DueTask, TaskKind};
use chrono::NaiveDate;

/// Hoof check rule, every 90 days from birth.
pub struct HoofCheckRule;

pub const HOOF_CHECK_INTERVAL_DAYS: i64 = 90;

impl Rule for HoofCheckRule {
    fn id(&self) -> &'static str {
        "hoof_check"
    }

    fn name(&self) -> &'static str {
        "Hoof check"
    }

    fn evaluate(&self, animal: &Animal, today: NaiveDate, horizon_days: i64) -> Option<DueTask> {
        recurring_task(
            TaskKind::HoofCheck,
            animal,
            HOOF_CHECK_INTERVAL_DAYS,
            today,
            horizon_days,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn quarterly_cycle_from_birth() {
        let today = date(2025, 7, 1);
        // 100 days old: next check at day 180, i.e. in 80 days.
        let animal = Animal::new("A-1", "Bella", today - Duration::days(100), "SRB", 0.8);

        assert!(HoofCheckRule.evaluate(&animal, today, 79).is_none());
        let task = HoofCheckRule.evaluate(&animal, today, 80).unwrap();
        assert_eq!(task.kind(), TaskKind::HoofCheck);
        assert_eq!(task.sort_date(), today + Duration::days(80));
    }

    #[test]
    fn horizon_monotonic() {
        let today = date(2025, 7, 1);
        let animal = Animal::new("A-1", "Bella", today - Duration::days(35), "SRB", 0.8);

        // Due at age 90, i.e. 55 days out.
        for horizon in 0..55 {
            assert!(HoofCheckRule.evaluate(&animal, today, horizon).is_none());
        }
        for horizon in 55..120 {
            assert!(HoofCheckRule.evaluate(&animal, today, horizon).is_some());
        }
    }
}
