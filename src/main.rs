mod app;
mod cli;
mod config;
mod db;
mod error;
mod logic;
mod models;
mod ui;

use anyhow::Context;
use app::{App, Screen};
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use db::Database;
use logic::calculations::{compute_adg, compute_feed_plan, herd_summary};
use logic::SchedulerEngine;
use models::{Animal, DueTask, Herd, WeightRecord};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{
    AnimalForm, AnimalsScreen, DashboardScreen, FeedScreen, TasksScreen, WeightForm,
    WeightsScreen,
};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup runs before config/database so it works on a clean machine.
    if let Some(Commands::Init) = cli.command {
        Config::setup_interactive().context("running interactive setup")?;
        return Ok(());
    }

    let config = Config::load(cli.config.clone()).context("loading configuration")?;
    let db = Database::open(cli.data_dir.as_ref()).context("opening herd database")?;

    match cli.command {
        Some(command) => run_command(command, &config, &db),
        None => run_tui(config, db),
    }
}

fn init_tracing(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

// Headless subcommands

fn run_command(command: Commands, config: &Config, db: &Database) -> anyhow::Result<()> {
    let today = Local::now().date_naive();

    match command {
        Commands::Init => unreachable!("handled before database setup"),

        Commands::AddAnimal {
            id,
            name,
            birth_date,
            breed,
            target_gain,
        } => {
            if db.animal_exists(&id)? {
                anyhow::bail!("animal with id '{}' already exists", id);
            }
            let animal = Animal::new(
                id,
                name,
                birth_date,
                breed,
                target_gain.unwrap_or(config.herd.default_target_gain_kg),
            );
            db.create_animal(&animal)?;
            println!(
                "Added {} ({}), breed {}, born {}",
                animal.name, animal.id, animal.breed, animal.birth_date
            );
        }

        Commands::LogWeight { id, kg, date } => {
            if kg <= 0.0 {
                anyhow::bail!("weight must be positive");
            }
            let animal = db
                .get_animal(&id)?
                .ok_or_else(|| anyhow::anyhow!("animal '{}' not found", id))?;

            let record = WeightRecord::new(date.unwrap_or(today), kg);
            db.insert_weight(&id, &record)?;

            println!(
                "Logged {} kg on {} for {}",
                record.kg, record.date, animal.name
            );

            let mut weights = animal.weights;
            weights.push(record);
            match compute_adg(&weights) {
                Some(adg) => println!("  ADG from last two weigh-ins: {:.3} kg/day", adg),
                None => println!("  (at least 2 weigh-ins needed to compute ADG)"),
            }
        }

        Commands::DueTasks { days } => {
            let horizon = days.unwrap_or(config.herd.default_horizon_days);
            let herd = db.load_herd()?;
            let tasks = SchedulerEngine::new().evaluate_herd(&herd, today, horizon);

            if tasks.is_empty() {
                println!("No tasks due within {} days.", horizon);
                return Ok(());
            }

            println!("Tasks due within {} days (from {}):", horizon, today);
            println!("{}", "-".repeat(60));
            for task in &tasks {
                match task {
                    DueTask::Point {
                        kind,
                        animal_name,
                        animal_id,
                        due_date,
                    } => println!(
                        "  {}  {:<16}  {} ({})",
                        due_date,
                        kind.as_str(),
                        animal_name,
                        animal_id
                    ),
                    DueTask::Window {
                        kind,
                        animal_name,
                        animal_id,
                        window_start,
                        window_end,
                    } => println!(
                        "  {} - {}  {:<16}  {} ({})",
                        window_start,
                        window_end,
                        kind.as_str(),
                        animal_name,
                        animal_id
                    ),
                }
            }
        }

        Commands::FeedPlan { id } => {
            let animal = db
                .get_animal(&id)?
                .ok_or_else(|| anyhow::anyhow!("animal '{}' not found", id))?;
            let latest = animal
                .latest_weight()
                .ok_or_else(|| anyhow::anyhow!("no weights recorded for {}", animal.name))?;

            let plan = compute_feed_plan(latest.kg);
            println!("Feed plan for {} (weight {} kg):", animal.name, plan.body_weight_kg);
            println!("  Daily dry matter intake (DMI): {:.2} kg", plan.daily_dmi_kg);
            println!("  Forage (60%):                  {:.2} kg", plan.forage_kg);
            println!("  Concentrate (40%):             {:.2} kg", plan.concentrate_kg);
        }

        Commands::Summary => {
            let herd = db.load_herd()?;
            if herd.is_empty() {
                println!("The herd is empty.");
                return Ok(());
            }

            let summary = herd_summary(&herd);
            println!("Herd summary");
            println!("{}", "=".repeat(40));
            println!("  Head count:      {}", summary.head_count);
            match summary.average_weight_kg {
                Some(avg) => println!("  Average weight:  {:.1} kg", avg),
                None => println!("  Average weight:  (no weigh-ins)"),
            }

            if summary.below_target.is_empty() {
                println!();
                println!("  All animals with growth data meet their target gain.");
            } else {
                println!();
                println!("  Animals below target gain:");
                for shortfall in &summary.below_target {
                    println!(
                        "    {} ({}): ADG {:.3} kg/day (target {:.3})",
                        shortfall.animal_name,
                        shortfall.animal_id,
                        shortfall.adg_kg,
                        shortfall.target_daily_gain_kg
                    );
                }
            }
        }

        Commands::Export { file } => {
            let herd = db.load_herd()?;
            let json = serde_json::to_string_pretty(&herd).context("serializing herd")?;
            match file {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Exported {} animals to {}", herd.len(), path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let herd: Herd = serde_json::from_str(&json).context("parsing herd dataset")?;
            db.replace_herd(&herd)?;
            println!("Imported {} animals from {}", herd.len(), file.display());
        }
    }

    Ok(())
}

// TUI

fn run_tui(config: Config, db: Database) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let mut app = App::new(config, db, today).context("initializing application")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> anyhow::Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        // Draw UI
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Dashboard => {
                    let summary = app.summary();
                    let recent = app.recent_weighins(5);
                    let screen = DashboardScreen::new(
                        &app.config.herd.name,
                        &summary,
                        &app.tasks,
                        &recent,
                        app.config.herd.default_target_gain_kg,
                    )
                    .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Animals => {
                    let screen = AnimalsScreen::new(&app.herd.animals)
                        .with_selection(app.animals_state.selected_index)
                        .with_form(app.animals_state.form.as_ref())
                        .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Weights => {
                    let screen = WeightsScreen::new(&app.herd.animals)
                        .with_selection(app.weights_state.selected_animal)
                        .with_form(app.weights_state.form.as_ref())
                        .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Tasks => {
                    let screen = TasksScreen::new(&app.tasks, app.tasks_state.horizon_days)
                        .with_selection(app.tasks_state.selected_index);
                    f.render_widget(screen, area);
                }
                Screen::Feed => {
                    let screen = FeedScreen::new(&app.herd.animals)
                        .with_selection(app.feed_state.selected_animal);
                    f.render_widget(screen, area);
                }
            }
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Global key handling
                match key.code {
                    KeyCode::Char('q') if !app.in_form() => {
                        app.quit();
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Esc if !app.in_form() => {
                        // Go back to dashboard
                        app.switch_screen(Screen::Dashboard);
                    }
                    KeyCode::Char(c) if !app.in_form() => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        } else {
                            handle_screen_input(app, key.code);
                        }
                    }
                    _ => {
                        handle_screen_input(app, key.code);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    match app.screen {
        Screen::Dashboard => handle_dashboard_input(app, code),
        Screen::Animals => handle_animals_input(app, code),
        Screen::Weights => handle_weights_input(app, code),
        Screen::Tasks => handle_tasks_input(app, code),
        Screen::Feed => handle_feed_input(app, code),
    }
}

fn handle_dashboard_input(app: &mut App, code: KeyCode) {
    if let KeyCode::Char('r') = code {
        let today = Local::now().date_naive();
        match app.reload_herd(today) {
            Ok(()) => app.set_status("Data refreshed"),
            Err(e) => app.set_status(&format!("Error: {}", e)),
        }
    }
}

fn handle_animals_input(app: &mut App, code: KeyCode) {
    let today = Local::now().date_naive();

    if app.animals_state.form.is_some() {
        handle_animal_form_input(app, code, today);
        return;
    }

    match code {
        KeyCode::Up => app.animals_state.prev(),
        KeyCode::Down => {
            let count = app.herd.len();
            app.animals_state.next(count);
        }
        KeyCode::Char('a') => {
            let default_gain = app.config.herd.default_target_gain_kg;
            app.animals_state.form = Some(AnimalForm::new(default_gain));
        }
        KeyCode::Char('d') => {
            if let Some(animal) = app.herd.animals.get(app.animals_state.selected_index) {
                let id = animal.id.clone();
                let name = animal.name.clone();
                match app.delete_animal(&id, today) {
                    Ok(()) => app.set_status(&format!("Deleted {}", name)),
                    Err(e) => app.set_status(&format!("Error: {}", e)),
                }
            }
        }
        _ => {}
    }
}

fn handle_animal_form_input(app: &mut App, code: KeyCode, today: NaiveDate) {
    match code {
        KeyCode::Esc => {
            app.animals_state.form = None;
        }
        KeyCode::Enter => {
            let parsed = app.animals_state.form.as_ref().map(|f| f.to_animal());
            match parsed {
                Some(Ok(animal)) => {
                    let name = animal.name.clone();
                    match app.add_animal(animal, today) {
                        Ok(()) => {
                            app.animals_state.form = None;
                            app.set_status(&format!("Added {}", name));
                        }
                        Err(e) => {
                            let msg = format!("Error: {}", e);
                            app.set_status(&msg);
                        }
                    }
                }
                Some(Err(msg)) => app.set_status(&msg),
                None => {}
            }
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.animals_state.form.as_mut() {
                form.focused = form.focused.next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.animals_state.form.as_mut() {
                form.focused = form.focused.prev();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.animals_state.form.as_mut() {
                form.buffer_mut().pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.animals_state.form.as_mut() {
                form.buffer_mut().push(c);
            }
        }
        _ => {}
    }
}

fn handle_weights_input(app: &mut App, code: KeyCode) {
    let today = Local::now().date_naive();

    if app.weights_state.form.is_some() {
        handle_weight_form_input(app, code, today);
        return;
    }

    match code {
        KeyCode::Up => app.weights_state.prev(),
        KeyCode::Down => {
            let count = app.herd.len();
            app.weights_state.next(count);
        }
        KeyCode::Char('a') => {
            if app
                .herd
                .animals
                .get(app.weights_state.selected_animal)
                .is_some()
            {
                app.weights_state.form = Some(WeightForm::new(today));
            } else {
                app.set_status("Register an animal first");
            }
        }
        _ => {}
    }
}

fn handle_weight_form_input(app: &mut App, code: KeyCode, today: NaiveDate) {
    match code {
        KeyCode::Esc => {
            app.weights_state.form = None;
        }
        KeyCode::Enter => {
            let parsed = app.weights_state.form.as_ref().map(|f| f.to_record());
            let animal_id = app
                .herd
                .animals
                .get(app.weights_state.selected_animal)
                .map(|a| a.id.clone());

            match (parsed, animal_id) {
                (Some(Ok(record)), Some(id)) => match app.log_weight(&id, record, today) {
                    Ok(()) => {
                        app.weights_state.form = None;
                        let status = match app
                            .herd
                            .find(&id)
                            .and_then(|a| compute_adg(&a.weights))
                        {
                            Some(adg) => {
                                format!("Logged {} kg (ADG {:+.3} kg/day)", record.kg, adg)
                            }
                            None => format!(
                                "Logged {} kg (at least 2 weigh-ins needed for ADG)",
                                record.kg
                            ),
                        };
                        app.set_status(&status);
                    }
                    Err(e) => app.set_status(&format!("Error: {}", e)),
                },
                (Some(Err(msg)), _) => app.set_status(&msg),
                _ => {}
            }
        }
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
            if let Some(form) = app.weights_state.form.as_mut() {
                form.focused = form.focused.toggle();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.weights_state.form.as_mut() {
                form.buffer_mut().pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.weights_state.form.as_mut() {
                form.buffer_mut().push(c);
            }
        }
        _ => {}
    }
}

fn handle_tasks_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up => app.tasks_state.prev(),
        KeyCode::Down => {
            let count = app.tasks.len();
            app.tasks_state.next(count);
        }
        KeyCode::Char('+') => {
            app.tasks_state.widen();
            app.refresh_tasks(Local::now().date_naive());
        }
        KeyCode::Char('-') => {
            app.tasks_state.narrow();
            app.refresh_tasks(Local::now().date_naive());
        }
        _ => {}
    }
}

fn handle_feed_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up => app.feed_state.prev(),
        KeyCode::Down => {
            let count = app.herd.len();
            app.feed_state.next(count);
        }
        _ => {}
    }
}
