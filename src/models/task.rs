use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    Vaccination,
    HoofCheck,
    BreedingCheck,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Vaccination => "Vaccination",
            TaskKind::HoofCheck => "Hoof check",
            TaskKind::BreedingCheck => "Breeding check",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' '], "").as_str() {
            "vaccination" => Some(TaskKind::Vaccination),
            "hoofcheck" => Some(TaskKind::HoofCheck),
            "breedingcheck" => Some(TaskKind::BreedingCheck),
            _ => None,
        }
    }

    pub fn all() -> &'static [TaskKind] {
        &[
            TaskKind::Vaccination,
            TaskKind::HoofCheck,
            TaskKind::BreedingCheck,
        ]
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            TaskKind::Vaccination => Color::Yellow,
            TaskKind::HoofCheck => Color::Cyan,
            TaskKind::BreedingCheck => Color::Magenta,
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A husbandry task falling due inside the evaluated horizon. Point tasks
/// carry a single due date; window tasks carry a date range already clipped
/// to the evaluation horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DueTask {
    Point {
        kind: TaskKind,
        animal_id: String,
        animal_name: String,
        due_date: NaiveDate,
    },
    Window {
        kind: TaskKind,
        animal_id: String,
        animal_name: String,
        window_start: NaiveDate,
        window_end: NaiveDate,
    },
}

impl DueTask {
    pub fn kind(&self) -> TaskKind {
        match self {
            DueTask::Point { kind, .. } | DueTask::Window { kind, .. } => *kind,
        }
    }

    pub fn animal_id(&self) -> &str {
        match self {
            DueTask::Point { animal_id, .. } | DueTask::Window { animal_id, .. } => animal_id,
        }
    }

    pub fn animal_name(&self) -> &str {
        match self {
            DueTask::Point { animal_name, .. } | DueTask::Window { animal_name, .. } => animal_name,
        }
    }

    /// Aggregation key: the due date, or the window start for window tasks.
    pub fn sort_date(&self) -> NaiveDate {
        match self {
            DueTask::Point { due_date, .. } => *due_date,
            DueTask::Window { window_start, .. } => *window_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_kind_from_str_valid() {
        assert_eq!(TaskKind::from_str("Vaccination"), Some(TaskKind::Vaccination));
        assert_eq!(TaskKind::from_str("hoof check"), Some(TaskKind::HoofCheck));
        assert_eq!(TaskKind::from_str("HoofCheck"), Some(TaskKind::HoofCheck));
        assert_eq!(
            TaskKind::from_str("breeding-check"),
            Some(TaskKind::BreedingCheck)
        );
    }

    #[test]
    fn task_kind_from_str_invalid() {
        assert_eq!(TaskKind::from_str("worming"), None);
        assert_eq!(TaskKind::from_str(""), None);
    }

    #[test]
    fn task_kind_round_trip() {
        for kind in TaskKind::all() {
            let debug_str = format!("{:?}", kind);
            assert_eq!(
                TaskKind::from_str(&debug_str),
                Some(*kind),
                "Round-trip failed for {:?}",
                kind
            );
        }
    }

    #[test]
    fn sort_date_uses_window_start() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();

        let point = DueTask::Point {
            kind: TaskKind::Vaccination,
            animal_id: "A-1".into(),
            animal_name: "Bella".into(),
            due_date: date,
        };
        let window = DueTask::Window {
            kind: TaskKind::BreedingCheck,
            animal_id: "A-1".into(),
            animal_name: "Bella".into(),
            window_start: date,
            window_end: end,
        };

        assert_eq!(point.sort_date(), date);
        assert_eq!(window.sort_date(), date);
        assert_eq!(window.kind(), TaskKind::BreedingCheck);
        assert_eq!(window.animal_id(), "A-1");
        assert_eq!(window.animal_name(), "Bella");
    }
}
