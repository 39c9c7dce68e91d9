use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use crossterm::cursor::SetCursorStyle;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

mod agent;
mod app;
mod config;
mod demo;
mod events;
mod llm;
mod planner;
mod text_layout;
mod theme;
mod tutorial;
mod ui;

use agent::{AgentService, AgentStep, StepKind};
use app::{App, Tab};
use config::AppConfig;
use events::AppEvent;
use planner::{Priority, TaskPlanner, TaskStatus};
use theme::{DEFAULT_THEME_FILE, Theme};

const MAX_AGENT_EVENTS_PER_LOOP: usize = 128;
const DEFAULT_LOG_FILTER: &str = "warn";

/// Terminal demo of an agent's Thought/Action/Response loop and a
/// self-driving task planner.
#[derive(Debug, Parser)]
#[command(name = "agentic-demo", version)]
struct Cli {
    /// Config file (defaults to ./agentic-demo.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Theme file (defaults to ./theme.toml when present).
    #[arg(long, value_name = "PATH")]
    theme: Option<PathBuf>,
    /// Write TUI logs to this file. Without it the TUI does not log.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// View shown at startup.
    #[arg(long, value_enum, default_value_t = Tab::Tutorial)]
    tab: Tab,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one agent request and print each step.
    Ask {
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
        /// Print one JSON object per step.
        #[arg(long)]
        json: bool,
    },
    /// Queue tasks in the planner and let its timers run out.
    Plan {
        #[arg(required = true, num_args = 1..)]
        tasks: Vec<String>,
        /// Also start tasks the agent would leave pending.
        #[arg(long)]
        start_all: bool,
    },
}

enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Disabled,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let target = match (&cli.command, cli.log_file.as_deref()) {
        (Some(_), _) => LogTarget::Stderr,
        (None, Some(path)) => LogTarget::File(path),
        (None, None) => LogTarget::Disabled,
    };
    init_tracing(target)?;

    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let config = AppConfig::load(cli.config.as_deref(), &cwd)?;

    match &cli.command {
        Some(Command::Ask { prompt, json }) => run_ask(&config, &prompt.join(" "), *json),
        Some(Command::Plan { tasks, start_all }) => {
            run_plan(&config, tasks, *start_all)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            run_tui(&cli, &config, &cwd)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(target: LogTarget<'_>) -> Result<()> {
    let env_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    let init_result = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .try_init()
        }
    };
    if let Err(err) = init_result {
        tracing::warn!(error = %err, "tracing already initialized");
    }
    Ok(())
}

fn build_agent(config: &AppConfig) -> Result<AgentService> {
    let backend = llm::backend_for(&config.llm).context("failed to build LLM backend")?;
    Ok(AgentService::new(Arc::from(backend), config.agent.clone()))
}

fn run_ask(config: &AppConfig, prompt: &str, json: bool) -> Result<ExitCode> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        bail!("prompt is empty");
    }
    let agent = build_agent(config)?;
    tracing::info!(provider = agent.provider_label(), "running headless request");

    let mut out = io::stdout().lock();
    let mut failed = false;
    let mut write_error = None;
    agent.process_request(prompt.to_string());
    agent.wait_for_completion(|step| {
        failed |= step.kind == StepKind::Error;
        if write_error.is_none() {
            write_error = print_step(&mut out, step, json).err();
        }
    });
    if let Some(err) = write_error {
        return Err(err);
    }
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_step(out: &mut impl Write, step: &AgentStep, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, step).context("failed to encode step")?;
        writeln!(out)?;
    } else {
        writeln!(out, "[{}] {}", step.kind.as_str(), step.content)?;
    }
    Ok(())
}

/// Runs the planner on a simulated clock that jumps straight to each due
/// transition, so the output matches the TUI without the waiting.
fn run_plan(config: &AppConfig, tasks: &[String], start_all: bool) -> Result<()> {
    let mut planner = TaskPlanner::new(config.planner.clone());
    let mut now = Instant::now();

    for description in tasks {
        planner
            .add_task(description, now)
            .with_context(|| format!("cannot queue task {description:?}"))?;
        while planner.is_thinking() {
            let Some(due) = planner.next_due() else {
                break;
            };
            now = now.max(due);
            planner.poll(now);
        }
    }

    if start_all {
        let pending: Vec<u64> = planner
            .tasks()
            .iter()
            .filter(|task| task.status == TaskStatus::Pending && task.priority != Priority::High)
            .map(|task| task.id)
            .collect();
        for id in pending {
            planner.start_task(id, now)?;
        }
    }

    while let Some(due) = planner.next_due() {
        now = now.max(due);
        planner.poll(now);
    }

    let mut out = io::stdout().lock();
    writeln!(out, "Agent actions:")?;
    for action in planner.actions() {
        match &action.task {
            Some(task) => writeln!(
                out,
                "  [{}] {}: #{} {}",
                action.timestamp.format("%H:%M:%S"),
                action.action,
                task.id,
                task.description
            )?,
            None => writeln!(
                out,
                "  [{}] {}",
                action.timestamp.format("%H:%M:%S"),
                action.action
            )?,
        }
    }
    writeln!(out)?;
    writeln!(out, "{:<4} {:<12} {:<9} DESCRIPTION", "ID", "STATUS", "PRIORITY")?;
    for task in planner.tasks() {
        writeln!(
            out,
            "{:<4} {:<12} {:<9} {}",
            task.id,
            task.status.to_string(),
            task.priority.to_string(),
            task.description
        )?;
    }
    Ok(())
}

fn run_tui(cli: &Cli, config: &AppConfig, cwd: &Path) -> Result<()> {
    let agent = build_agent(config)?;
    let theme_path = cli
        .theme
        .clone()
        .unwrap_or_else(|| cwd.join(DEFAULT_THEME_FILE));
    let theme = Theme::load_or_default(&theme_path);
    let app = App::new(TaskPlanner::new(config.planner.clone()), cli.tab);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetCursorStyle::SteadyBar
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    let result = run_app(&mut terminal, app, &theme, &agent);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        SetCursorStyle::DefaultUserShape,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result.map_err(Into::into)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    theme: &Theme,
    agent: &AgentService,
) -> io::Result<()> {
    tracing::info!(provider = agent.provider_label(), "tui started");

    while app.running {
        let mut chat_updated = false;
        for event in agent.drain_events_limited(MAX_AGENT_EVENTS_PER_LOOP) {
            chat_updated |= app.apply_agent_event(event);
        }
        app.tick_planner(Instant::now());

        let size = terminal.size()?;
        let screen = Rect::new(0, 0, size.width, size.height);
        if chat_updated {
            app.set_chat_scroll(ui::chat_max_scroll(screen, &app));
        }

        terminal.draw(|frame| ui::render(frame, &app, theme))?;

        match events::next_event()? {
            AppEvent::Tick => app.on_tick(),
            AppEvent::Quit => app.quit(),
            AppEvent::NextTab => {
                if app.active_tab() == Tab::Chat && app.autocomplete_top_command() {
                    // completed a slash command in place
                } else {
                    app.next_tab();
                }
            }
            AppEvent::PrevTab => app.prev_tab(),
            AppEvent::SelectTab(tab) => app.select_tab(tab),
            AppEvent::MoveUp => app.move_up(ui::chat_input_text_width(screen)),
            AppEvent::MoveDown => app.move_down(
                ui::chat_input_text_width(screen),
                max_scroll(screen, &app),
            ),
            AppEvent::CursorLeft => app.move_cursor_left(),
            AppEvent::CursorRight => app.move_cursor_right(),
            AppEvent::CursorHome => app.move_cursor_home(),
            AppEvent::CursorEnd => app.move_cursor_end(),
            AppEvent::ScrollUp | AppEvent::MouseScrollUp => app.scroll_up(1),
            AppEvent::ScrollDown | AppEvent::MouseScrollDown => {
                app.scroll_down(1, max_scroll(screen, &app));
            }
            AppEvent::PageUp => app.scroll_up(ui::page_size(screen)),
            AppEvent::PageDown => app.scroll_down(ui::page_size(screen), max_scroll(screen, &app)),
            AppEvent::InputChar(c) => app.input_char(c),
            AppEvent::Backspace => app.backspace_input(),
            AppEvent::Submit => {
                if let Some(message) = app.submit(Instant::now()) {
                    tracing::debug!(chars = message.chars().count(), "sending chat message");
                    agent.process_request(message);
                }
            }
            AppEvent::StartSelected => {
                if app.active_tab() == Tab::Planner {
                    app.start_selected_task(Instant::now());
                }
            }
            AppEvent::CompleteSelected => {
                if app.active_tab() == Tab::Planner {
                    app.complete_selected_task();
                }
            }
            AppEvent::DeleteSelected => {
                if app.active_tab() == Tab::Planner {
                    app.delete_selected_task();
                }
            }
            AppEvent::MouseLeftClick(column, row) => {
                if let Some(tab) = ui::tab_hit_test(screen, column, row) {
                    app.select_tab(tab);
                }
            }
        }
    }

    tracing::info!("tui stopped");
    Ok(())
}

fn max_scroll(screen: Rect, app: &App) -> u16 {
    match app.active_tab() {
        Tab::Tutorial => ui::tutorial_max_scroll(screen),
        Tab::Chat => ui::chat_max_scroll(screen, app),
        Tab::Planner => 0,
    }
}
