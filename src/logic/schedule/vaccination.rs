use super::{recurring_task, Rule};
use crate::models::{Animal, DueTask, TaskKind};
use chrono::NaiveDate;

/// Vaccination booster rule
///
/// Boosters repeat on a fixed 180-day cycle counted from birth. An animal
/// whose age lands exactly on a cycle boundary is due today.
pub struct VaccinationRule;

pub const VACCINATION_INTERVAL_DAYS: i64 = 180;

impl Rule for VaccinationRule {
    fn id(&self) -> &'static str {
        "vaccination"
    }

    fn name(&self) -> &'static str {
        "Vaccination"
    }

    fn evaluate(&self, animal: &Animal, today: NaiveDate, horizon_days: i64) -> Option<DueTask> {
        recurring_task(
            TaskKind::Vaccination,
            animal,
            VACCINATION_INTERVAL_DAYS,
            today,
            horizon_days,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn animal_born(birth: NaiveDate) -> Animal {
        Animal::new("A-1", "Bella", birth, "SRB", 0.8)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn due_today_on_exact_cycle_with_zero_horizon() {
        let today = date(2025, 7, 1);
        let animal = animal_born(today - Duration::days(180));

        let task = VaccinationRule.evaluate(&animal, today, 0).unwrap();
        match task {
            DueTask::Point { kind, due_date, .. } => {
                assert_eq!(kind, TaskKind::Vaccination);
                assert_eq!(due_date, today);
            }
            DueTask::Window { .. } => panic!("expected a point task"),
        }
    }

    #[test]
    fn upcoming_cycle_inside_horizon() {
        let today = date(2025, 7, 1);
        // 170 days old: next booster in 10 days.
        let animal = animal_born(today - Duration::days(170));

        let task = VaccinationRule.evaluate(&animal, today, 30).unwrap();
        assert_eq!(task.sort_date(), today + Duration::days(10));
    }

    #[test]
    fn outside_horizon_is_silent() {
        let today = date(2025, 7, 1);
        let animal = animal_born(today - Duration::days(170));

        assert!(VaccinationRule.evaluate(&animal, today, 9).is_none());
    }

    #[test]
    fn future_birth_first_occurrence() {
        let today = date(2025, 7, 1);
        let birth = today + Duration::days(5);
        let animal = animal_born(birth);

        let task = VaccinationRule.evaluate(&animal, today, 365).unwrap();
        assert_eq!(task.sort_date(), birth + Duration::days(180));
    }

    #[test]
    fn carries_animal_identity() {
        let today = date(2025, 7, 1);
        let animal = animal_born(today - Duration::days(180));

        let task = VaccinationRule.evaluate(&animal, today, 0).unwrap();
        assert_eq!(task.animal_id(), "A-1");
        assert_eq!(task.animal_name(), "Bella");
    }
}
