use crate::config::Config;
use crate::db::Database;
use crate::error::{HerdOpsError, Result};
use crate::logic::calculations::herd_summary;
use crate::logic::SchedulerEngine;
use crate::models::{Animal, DueTask, Herd, HerdSummary, WeightRecord};
use crate::ui::screens::{AnimalForm, WeightForm};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Animals,
    Weights,
    Tasks,
    Feed,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Animals),
            '3' => Some(Screen::Weights),
            '4' => Some(Screen::Tasks),
            '5' => Some(Screen::Feed),
            _ => None,
        }
    }
}

pub struct AnimalsState {
    pub selected_index: usize,
    pub form: Option<AnimalForm>,
}

impl AnimalsState {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            form: None,
        }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }
}

pub struct WeightsState {
    pub selected_animal: usize,
    pub form: Option<WeightForm>,
}

impl WeightsState {
    pub fn new() -> Self {
        Self {
            selected_animal: 0,
            form: None,
        }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_animal < max - 1 {
            self.selected_animal += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_animal > 0 {
            self.selected_animal -= 1;
        }
    }
}

pub struct TasksState {
    pub horizon_days: i64,
    pub selected_index: usize,
}

impl TasksState {
    pub fn new(horizon_days: i64) -> Self {
        Self {
            horizon_days,
            selected_index: 0,
        }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn widen(&mut self) {
        self.horizon_days += 7;
    }

    pub fn narrow(&mut self) {
        self.horizon_days = (self.horizon_days - 7).max(0);
    }
}

pub struct FeedState {
    pub selected_animal: usize,
}

impl FeedState {
    pub fn new() -> Self {
        Self { selected_animal: 0 }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_animal < max - 1 {
            self.selected_animal += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_animal > 0 {
            self.selected_animal -= 1;
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,
    pub db: Database,

    // Data
    pub herd: Herd,
    pub tasks: Vec<DueTask>,

    // Screen states
    pub animals_state: AnimalsState,
    pub weights_state: WeightsState,
    pub tasks_state: TasksState,
    pub feed_state: FeedState,

    // Services
    pub scheduler: SchedulerEngine,

    // UI state
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Config, db: Database, today: NaiveDate) -> Result<Self> {
        let herd = db.load_herd()?;
        let scheduler = SchedulerEngine::new();
        let horizon = config.herd.default_horizon_days;
        let tasks = scheduler.evaluate_herd(&herd, today, horizon);

        Ok(Self {
            screen: Screen::Dashboard,
            should_quit: false,
            config,
            db,
            herd,
            tasks,
            animals_state: AnimalsState::new(),
            weights_state: WeightsState::new(),
            tasks_state: TasksState::new(horizon),
            feed_state: FeedState::new(),
            scheduler,
            status_message: None,
        })
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    /// True while a form owns the keyboard.
    pub fn in_form(&self) -> bool {
        self.animals_state.form.is_some() || self.weights_state.form.is_some()
    }

    pub fn refresh_tasks(&mut self, today: NaiveDate) {
        self.tasks =
            self.scheduler
                .evaluate_herd(&self.herd, today, self.tasks_state.horizon_days);
        let count = self.tasks.len();
        if self.tasks_state.selected_index >= count {
            self.tasks_state.selected_index = count.saturating_sub(1);
        }
    }

    pub fn reload_herd(&mut self, today: NaiveDate) -> Result<()> {
        self.herd = self.db.load_herd()?;

        let count = self.herd.len();
        if self.animals_state.selected_index >= count {
            self.animals_state.selected_index = count.saturating_sub(1);
        }
        if self.weights_state.selected_animal >= count {
            self.weights_state.selected_animal = count.saturating_sub(1);
        }
        if self.feed_state.selected_animal >= count {
            self.feed_state.selected_animal = count.saturating_sub(1);
        }

        self.refresh_tasks(today);
        Ok(())
    }

    pub fn add_animal(&mut self, animal: Animal, today: NaiveDate) -> Result<()> {
        if self.db.animal_exists(&animal.id)? {
            return Err(HerdOpsError::InvalidData(format!(
                "Animal with id '{}' already exists",
                animal.id
            )));
        }
        self.db.create_animal(&animal)?;
        self.reload_herd(today)
    }

    pub fn log_weight(
        &mut self,
        animal_id: &str,
        record: WeightRecord,
        today: NaiveDate,
    ) -> Result<()> {
        if self.herd.find(animal_id).is_none() {
            return Err(HerdOpsError::NotFound(format!("animal '{}'", animal_id)));
        }
        self.db.insert_weight(animal_id, &record)?;
        self.reload_herd(today)
    }

    pub fn delete_animal(&mut self, animal_id: &str, today: NaiveDate) -> Result<()> {
        if self.herd.find(animal_id).is_none() {
            return Err(HerdOpsError::NotFound(format!("animal '{}'", animal_id)));
        }
        self.db.delete_animal(animal_id)?;
        self.reload_herd(today)
    }

    pub fn summary(&self) -> HerdSummary {
        herd_summary(&self.herd)
    }

    /// Latest weigh-ins across the herd, newest first, paired with the
    /// animal's name for display.
    pub fn recent_weighins(&self, count: usize) -> Vec<(String, WeightRecord)> {
        let mut all: Vec<(String, WeightRecord)> = self
            .herd
            .animals
            .iter()
            .flat_map(|animal| {
                animal
                    .weights
                    .iter()
                    .map(move |record| (animal.name.clone(), *record))
            })
            .collect();

        all.sort_by(|a, b| b.1.date.cmp(&a.1.date));
        all.truncate(count);
        all
    }
}
