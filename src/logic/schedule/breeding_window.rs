use super::Rule;
use crate::models::{Animal, DueTask, TaskKind};
use chrono::{Duration, NaiveDate};

/// Breeding readiness check, once per animal at 13-15 months of age
/// (395-456 days). Emitted while any part of that age window overlaps the
/// evaluation horizon, with the reported range clipped to the horizon.
pub struct BreedingWindowRule;

pub const BREEDING_WINDOW_START_DAYS: i64 = 395;
pub const BREEDING_WINDOW_END_DAYS: i64 = 456;

impl Rule for BreedingWindowRule {
    fn id(&self) -> &'static str {
        "breeding_check"
    }

    fn name(&self) -> &'static str {
        "Breeding check"
    }

    fn evaluate(&self, animal: &Animal, today: NaiveDate, horizon_days: i64) -> Option<DueTask> {
        let window_start = animal.birth_date + Duration::days(BREEDING_WINDOW_START_DAYS);
        let window_end = animal.birth_date + Duration::days(BREEDING_WINDOW_END_DAYS);
        let horizon_end = today + Duration::days(horizon_days);

        if window_start > horizon_end || window_end < today {
            return None;
        }

        Some(DueTask::Window {
            kind: TaskKind::BreedingCheck,
            animal_id: animal.id.clone(),
            animal_name: animal.name.clone(),
            window_start: window_start.max(today),
            window_end: window_end.min(horizon_end),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn animal_born(birth: NaiveDate) -> Animal {
        Animal::new("A-1", "Bella", birth, "SRB", 0.8)
    }

    #[test]
    fn open_window_clipped_to_horizon() {
        let today = date(2025, 7, 1);
        // Born 400 days ago: window opened 5 days back, closes at age 456.
        let animal = animal_born(today - Duration::days(400));

        let task = BreedingWindowRule.evaluate(&animal, today, 30).unwrap();
        match task {
            DueTask::Window {
                window_start,
                window_end,
                ..
            } => {
                // Start clipped up to today, end clipped down to the horizon.
                assert_eq!(window_start, today);
                assert_eq!(window_end, today + Duration::days(30));
            }
            DueTask::Point { .. } => panic!("expected a window task"),
        }
    }

    #[test]
    fn closed_window_is_silent() {
        let today = date(2025, 7, 1);
        // 500 days old: the 456-day end already passed.
        let animal = animal_born(today - Duration::days(500));
        assert!(BreedingWindowRule.evaluate(&animal, today, 30).is_none());
    }

    #[test]
    fn window_beyond_horizon_is_silent() {
        let today = date(2025, 7, 1);
        // 300 days old: window opens in 95 days.
        let animal = animal_born(today - Duration::days(300));
        assert!(BreedingWindowRule.evaluate(&animal, today, 94).is_none());
    }

    #[test]
    fn window_entirely_inside_horizon_unclipped() {
        let today = date(2025, 7, 1);
        let birth = today - Duration::days(300);
        let animal = animal_born(birth);

        let task = BreedingWindowRule.evaluate(&animal, today, 365).unwrap();
        match task {
            DueTask::Window {
                window_start,
                window_end,
                ..
            } => {
                assert_eq!(window_start, birth + Duration::days(395));
                assert_eq!(window_end, birth + Duration::days(456));
            }
            DueTask::Point { .. } => panic!("expected a window task"),
        }
    }

    #[test]
    fn boundary_overlap_on_last_window_day() {
        let today = date(2025, 7, 1);
        // 456 days old: today is the final day of the window.
        let animal = animal_born(today - Duration::days(456));

        let task = BreedingWindowRule.evaluate(&animal, today, 0).unwrap();
        match task {
            DueTask::Window {
                window_start,
                window_end,
                ..
            } => {
                assert_eq!(window_start, today);
                assert_eq!(window_end, today);
            }
            DueTask::Point { .. } => panic!("expected a window task"),
        }
    }
}
