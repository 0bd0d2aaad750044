use super::{BreedingWindowRule, HoofCheckRule, Rule, VaccinationRule};
use crate::models::{Animal, DueTask, Herd};
use chrono::NaiveDate;

pub struct SchedulerEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl SchedulerEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(VaccinationRule),
            Box::new(HoofCheckRule),
            Box::new(BreedingWindowRule),
        ];

        Self { rules }
    }

    /// All tasks for one animal due within `[today, today + horizon_days]`.
    pub fn evaluate(&self, animal: &Animal, today: NaiveDate, horizon_days: i64) -> Vec<DueTask> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(animal, today, horizon_days))
            .collect()
    }

    /// Tasks across the whole herd, ordered by due date (window start for
    /// window tasks), then animal id for a stable listing.
    pub fn evaluate_herd(&self, herd: &Herd, today: NaiveDate, horizon_days: i64) -> Vec<DueTask> {
        let mut tasks: Vec<DueTask> = herd
            .animals
            .iter()
            .flat_map(|animal| self.evaluate(animal, today, horizon_days))
            .collect();

        tasks.sort_by(|a, b| {
            a.sort_date()
                .cmp(&b.sort_date())
                .then_with(|| a.animal_id().cmp(b.animal_id()))
        });
        tasks
    }

    pub fn evaluate_rule(
        &self,
        rule_id: &str,
        animal: &Animal,
        today: NaiveDate,
        horizon_days: i64,
    ) -> Option<DueTask> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .and_then(|rule| rule.evaluate(animal, today, horizon_days))
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for SchedulerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskKind;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn animal_aged(days: i64, today: NaiveDate) -> Animal {
        Animal::new("A-1", "Bella", today - Duration::days(days), "SRB", 0.8)
    }

    #[test]
    fn exact_half_year_age_due_today() {
        let today = date(2025, 7, 1);
        let animal = animal_aged(180, today);

        let tasks = SchedulerEngine::new().evaluate(&animal, today, 1);

        // 180 is a multiple of both intervals: one vaccination and one hoof
        // check, both dated today, and no breeding window yet.
        let vaccinations: Vec<_> = tasks
            .iter()
            .filter(|t| t.kind() == TaskKind::Vaccination)
            .collect();
        assert_eq!(vaccinations.len(), 1);
        assert_eq!(vaccinations[0].sort_date(), today);

        let hoof_checks: Vec<_> = tasks
            .iter()
            .filter(|t| t.kind() == TaskKind::HoofCheck)
            .collect();
        assert_eq!(hoof_checks.len(), 1);
        assert_eq!(hoof_checks[0].sort_date(), today);

        assert!(tasks.iter().all(|t| t.kind() != TaskKind::BreedingCheck));
    }

    #[test]
    fn breeding_window_only_when_overlapping() {
        let today = date(2025, 7, 1);
        let engine = SchedulerEngine::new();

        let in_window = engine.evaluate(&animal_aged(400, today), today, 30);
        assert_eq!(
            in_window
                .iter()
                .filter(|t| t.kind() == TaskKind::BreedingCheck)
                .count(),
            1
        );

        let past_window = engine.evaluate(&animal_aged(500, today), today, 30);
        assert!(past_window
            .iter()
            .all(|t| t.kind() != TaskKind::BreedingCheck));
    }

    #[test]
    fn wider_horizon_keeps_narrower_point_tasks() {
        let today = date(2025, 7, 1);
        let animal = animal_aged(130, today);
        let engine = SchedulerEngine::new();

        let narrow = engine.evaluate(&animal, today, 60);
        let wide = engine.evaluate(&animal, today, 200);

        for task in narrow.iter().filter(|t| matches!(t, DueTask::Point { .. })) {
            assert!(wide.contains(task), "missing at wider horizon: {:?}", task);
        }
        assert!(wide.len() >= narrow.len());
    }

    #[test]
    fn herd_aggregation_sorted_by_due_date() {
        let today = date(2025, 7, 1);
        let herd = Herd {
            animals: vec![
                // Next hoof check at age 270, 20 days out.
                Animal::new("B-2", "Stella", today - Duration::days(250), "SRB", 0.8),
                // Hoof check and vaccination due today.
                Animal::new("A-1", "Bella", today - Duration::days(180), "SRB", 0.8),
            ],
        };

        let tasks = SchedulerEngine::new().evaluate_herd(&herd, today, 30);

        assert!(!tasks.is_empty());
        for pair in tasks.windows(2) {
            assert!(pair[0].sort_date() <= pair[1].sort_date());
        }
        assert_eq!(tasks[0].animal_id(), "A-1");
    }

    #[test]
    fn evaluate_rule_by_id() {
        let today = date(2025, 7, 1);
        let animal = animal_aged(90, today);
        let engine = SchedulerEngine::new();

        let task = engine.evaluate_rule("hoof_check", &animal, today, 0).unwrap();
        assert_eq!(task.kind(), TaskKind::HoofCheck);
        assert!(engine.evaluate_rule("unknown", &animal, today, 0).is_none());
    }

    #[test]
    fn lists_all_rules() {
        let rules = SchedulerEngine::new().list_rules();
        assert_eq!(rules.len(), 3);
        assert!(rules.iter().any(|(id, _)| *id == "vaccination"));
        assert!(rules.iter().any(|(id, _)| *id == "hoof_check"));
        assert!(rules.iter().any(|(id, _)| *id == "breeding_check"));
    }
}
