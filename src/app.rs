use std::time::Instant;

use crate::agent::{AgentEvent, AgentStep, StepKind};
use crate::planner::{PlannerError, Task, TaskPlanner};
use crate::text_layout::wrap_word_with_positions;

const COMMAND_INDEX: [(&str, &str); 5] = [
    ("/clear", "Clear the chat transcript"),
    ("/tutorial", "Show the tutorial"),
    ("/planner", "Show the task planner"),
    ("/quit", "Quit app"),
    ("/exit", "Quit app"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Tab {
    Tutorial,
    Chat,
    Planner,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Tutorial, Tab::Chat, Tab::Planner];

    pub fn title(self) -> &'static str {
        match self {
            Self::Tutorial => "Tutorial",
            Self::Chat => "Agent Chat",
            Self::Planner => "Task Planner",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Tutorial => 0,
            Self::Chat => 1,
            Self::Planner => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSuggestion {
    pub command: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Clear,
    ShowTutorial,
    ShowPlanner,
    Quit,
}

impl ChatCommand {
    pub fn parse(message: &str) -> Option<Self> {
        let normalized = message.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "/clear" => Some(Self::Clear),
            "/tutorial" => Some(Self::ShowTutorial),
            "/planner" => Some(Self::ShowPlanner),
            "/quit" | "/exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Single editable line of text with a char-indexed cursor.
#[derive(Debug, Clone, Default)]
pub struct InputLine {
    text: String,
    cursor: usize,
    goal_col: Option<u16>,
}

impl InputLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, c: char) {
        let byte_idx = char_to_byte_idx(&self.text, self.cursor);
        self.text.insert(byte_idx, c);
        self.cursor = self.cursor.saturating_add(1);
        self.goal_col = None;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = char_to_byte_idx(&self.text, self.cursor - 1);
        let end = char_to_byte_idx(&self.text, self.cursor);
        self.text.drain(start..end);
        self.cursor -= 1;
        self.goal_col = None;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.goal_col = None;
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
        self.goal_col = None;
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
        self.goal_col = None;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
        self.goal_col = None;
    }

    /// Moves to the wrapped line above, keeping the column the user started
    /// from. Returns false when already on the first line.
    pub fn move_up(&mut self, width: u16) -> bool {
        let positions = wrap_word_with_positions(&self.text, width.max(1)).positions;
        let (line, col) = positions[self.cursor.min(positions.len() - 1)];
        if line == 0 {
            return false;
        }
        let goal_col = self.goal_col.unwrap_or(col);
        self.cursor = nearest_index_for_line_col(&positions, line - 1, goal_col);
        self.goal_col = Some(goal_col);
        true
    }

    pub fn move_down(&mut self, width: u16) -> bool {
        let positions = wrap_word_with_positions(&self.text, width.max(1)).positions;
        let (line, col) = positions[self.cursor.min(positions.len() - 1)];
        let max_line = positions.iter().map(|(l, _)| *l).max().unwrap_or(0);
        if line >= max_line {
            return false;
        }
        let goal_col = self.goal_col.unwrap_or(col);
        self.cursor = nearest_index_for_line_col(&positions, line + 1, goal_col);
        self.goal_col = Some(goal_col);
        true
    }

    pub fn line_col(&self, width: u16) -> (u16, u16) {
        wrap_word_with_positions(&self.text, width.max(1)).cursor_line_col(self.cursor)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
        self.goal_col = None;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.goal_col = None;
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub ticks: u64,
    active_tab: Tab,
    transcript: Vec<AgentStep>,
    processing: bool,
    chat_input: InputLine,
    chat_scroll: u16,
    tutorial_scroll: u16,
    task_input: InputLine,
    planner: TaskPlanner,
    selected_task: usize,
    notice: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(TaskPlanner::default(), Tab::Tutorial)
    }
}

impl App {
    pub fn new(planner: TaskPlanner, initial_tab: Tab) -> Self {
        Self {
            running: true,
            ticks: 0,
            active_tab: initial_tab,
            transcript: Vec::new(),
            processing: false,
            chat_input: InputLine::default(),
            chat_scroll: 0,
            tutorial_scroll: 0,
            task_input: InputLine::default(),
            planner,
            selected_task: 0,
            notice: None,
        }
    }

    pub fn on_tick(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.active_tab = self.active_tab.prev();
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    fn active_input_mut(&mut self) -> Option<&mut InputLine> {
        match self.active_tab {
            Tab::Tutorial => None,
            Tab::Chat => Some(&mut self.chat_input),
            Tab::Planner => Some(&mut self.task_input),
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(input) = self.active_input_mut() {
            input.insert(c);
        }
    }

    pub fn backspace_input(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.backspace();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.move_left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.move_right();
        }
    }

    pub fn move_cursor_home(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.move_home();
        }
    }

    pub fn move_cursor_end(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.move_end();
        }
    }

    /// Up arrow: moves the chat cursor, the planner selection, or scrolls the
    /// tutorial, depending on the tab.
    pub fn move_up(&mut self, chat_input_width: u16) {
        match self.active_tab {
            Tab::Tutorial => self.scroll_tutorial_up(),
            Tab::Chat => {
                if !self.chat_input.move_up(chat_input_width) {
                    self.scroll_chat_up();
                }
            }
            Tab::Planner => self.select_prev_task(),
        }
    }

    pub fn move_down(&mut self, chat_input_width: u16, max_scroll: u16) {
        match self.active_tab {
            Tab::Tutorial => self.scroll_tutorial_down(max_scroll),
            Tab::Chat => {
                if !self.chat_input.move_down(chat_input_width) {
                    self.scroll_chat_down(max_scroll);
                }
            }
            Tab::Planner => self.select_next_task(),
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        match self.active_tab {
            Tab::Tutorial => self.tutorial_scroll = self.tutorial_scroll.saturating_sub(lines),
            Tab::Chat => self.chat_scroll = self.chat_scroll.saturating_sub(lines),
            Tab::Planner => {
                for _ in 0..lines {
                    self.select_prev_task();
                }
            }
        }
    }

    pub fn scroll_down(&mut self, lines: u16, max_scroll: u16) {
        match self.active_tab {
            Tab::Tutorial => {
                self.tutorial_scroll = self.tutorial_scroll.saturating_add(lines).min(max_scroll);
            }
            Tab::Chat => {
                self.chat_scroll = self.chat_scroll.saturating_add(lines).min(max_scroll);
            }
            Tab::Planner => {
                for _ in 0..lines {
                    self.select_next_task();
                }
            }
        }
    }

    pub fn submit(&mut self, now: Instant) -> Option<String> {
        match self.active_tab {
            Tab::Tutorial => None,
            Tab::Chat => self.submit_chat(),
            Tab::Planner => {
                self.submit_task(now);
                None
            }
        }
    }

    // ---- chat ----

    pub fn transcript(&self) -> &[AgentStep] {
        &self.transcript
    }

    pub fn chat_input(&self) -> &str {
        self.chat_input.text()
    }

    pub fn chat_cursor_line_col(&self, width: u16) -> (u16, u16) {
        self.chat_input.line_col(width)
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn chat_scroll(&self) -> u16 {
        self.chat_scroll
    }

    pub fn set_chat_scroll(&mut self, scroll: u16) {
        self.chat_scroll = scroll;
    }

    pub fn scroll_chat_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_chat_down(&mut self, max_scroll: u16) {
        self.chat_scroll = (self.chat_scroll + 1).min(max_scroll);
    }

    /// Handles the chat input line. Slash commands run in place; anything
    /// else becomes a `User` step and is returned for the agent service.
    pub fn submit_chat(&mut self) -> Option<String> {
        let pending = self.chat_input.text().trim().to_string();
        if pending.is_empty() {
            return None;
        }
        if let Some(command) = ChatCommand::parse(&pending) {
            self.chat_input.clear();
            self.run_chat_command(command);
            return None;
        }
        if pending.starts_with('/') && !pending.contains(char::is_whitespace) {
            self.set_notice(format!("Unknown command: {pending}"));
            return None;
        }
        if self.processing {
            self.set_notice("The agent is still working on the previous request.");
            return None;
        }
        self.send_message(&pending)
    }

    pub fn send_message(&mut self, raw_message: &str) -> Option<String> {
        let message = raw_message.trim().to_string();
        if message.is_empty() || self.processing {
            return None;
        }
        self.chat_input.clear();
        self.notice = None;
        self.processing = true;
        self.transcript
            .push(AgentStep::new(StepKind::User, message.clone()));
        Some(message)
    }

    fn run_chat_command(&mut self, command: ChatCommand) {
        match command {
            ChatCommand::Clear => {
                if self.processing {
                    self.set_notice("Cannot clear while the agent is working.");
                } else {
                    self.transcript.clear();
                    self.chat_scroll = 0;
                    self.notice = None;
                }
            }
            ChatCommand::ShowTutorial => self.select_tab(Tab::Tutorial),
            ChatCommand::ShowPlanner => self.select_tab(Tab::Planner),
            ChatCommand::Quit => self.quit(),
        }
    }

    /// Applies one agent event. Returns true when the transcript changed.
    pub fn apply_agent_event(&mut self, event: AgentEvent) -> bool {
        match event {
            AgentEvent::Step(step) => {
                self.transcript.push(step);
                true
            }
            AgentEvent::Completed => {
                self.processing = false;
                false
            }
        }
    }

    pub fn should_show_command_index(&self) -> bool {
        self.active_tab == Tab::Chat
            && self.chat_input.text().starts_with('/')
            && !self.chat_input.text().contains(char::is_whitespace)
    }

    pub fn command_suggestions(&self) -> Vec<CommandSuggestion> {
        if !self.should_show_command_index() {
            return Vec::new();
        }
        let query = self.chat_input.text().to_ascii_lowercase();
        COMMAND_INDEX
            .iter()
            .filter(|(command, _)| command.starts_with(&query))
            .map(|&(command, description)| CommandSuggestion {
                command,
                description,
            })
            .collect()
    }

    /// Completes the input to the first matching command. Returns true when
    /// the input changed.
    pub fn autocomplete_top_command(&mut self) -> bool {
        let Some(top) = self.command_suggestions().into_iter().next() else {
            return false;
        };
        if self.chat_input.text() == top.command {
            return false;
        }
        self.chat_input.set_text(top.command);
        true
    }

    // ---- planner ----

    pub fn planner(&self) -> &TaskPlanner {
        &self.planner
    }

    pub fn task_input(&self) -> &str {
        self.task_input.text()
    }

    pub fn task_cursor(&self) -> usize {
        self.task_input.cursor()
    }

    pub fn selected_task_index(&self) -> Option<usize> {
        (!self.planner.tasks().is_empty()).then_some(self.selected_task)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.planner.tasks().get(self.selected_task)
    }

    pub fn select_next_task(&mut self) {
        let len = self.planner.tasks().len();
        if len > 0 {
            self.selected_task = (self.selected_task + 1).min(len - 1);
        }
    }

    pub fn select_prev_task(&mut self) {
        self.selected_task = self.selected_task.saturating_sub(1);
    }

    pub fn submit_task(&mut self, now: Instant) {
        let description = self.task_input.text().to_string();
        match self.planner.add_task(&description, now) {
            Ok(()) => {
                self.task_input.clear();
                self.notice = None;
            }
            Err(PlannerError::EmptyDescription) => {}
            Err(err) => self.set_notice(capitalize(&err.to_string())),
        }
    }

    pub fn start_selected_task(&mut self, now: Instant) {
        let Some(id) = self.selected_task().map(|task| task.id) else {
            return;
        };
        let result = self.planner.start_task(id, now);
        self.report_planner_result(result);
    }

    pub fn complete_selected_task(&mut self) {
        let Some(id) = self.selected_task().map(|task| task.id) else {
            return;
        };
        let result = self.planner.complete_task(id);
        self.report_planner_result(result);
    }

    pub fn delete_selected_task(&mut self) {
        let Some(id) = self.selected_task().map(|task| task.id) else {
            return;
        };
        let result = self.planner.delete_task(id).map(|_| ());
        self.report_planner_result(result);
        self.clamp_selection();
    }

    /// Fires due planner timers. Returns true when anything changed.
    pub fn tick_planner(&mut self, now: Instant) -> bool {
        let fired = self.planner.poll(now);
        self.clamp_selection();
        fired > 0
    }

    pub fn is_planner_thinking(&self) -> bool {
        self.planner.is_thinking()
    }

    fn report_planner_result(&mut self, result: Result<(), PlannerError>) {
        match result {
            Ok(()) => self.notice = None,
            Err(err) => self.set_notice(capitalize(&err.to_string())),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.planner.tasks().len();
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
    }

    // ---- tutorial ----

    pub fn tutorial_scroll(&self) -> u16 {
        self.tutorial_scroll
    }

    pub fn scroll_tutorial_up(&mut self) {
        self.tutorial_scroll = self.tutorial_scroll.saturating_sub(1);
    }

    pub fn scroll_tutorial_down(&mut self, max_scroll: u16) {
        self.tutorial_scroll = (self.tutorial_scroll + 1).min(max_scroll);
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn nearest_index_for_line_col(positions: &[(u16, u16)], line: u16, goal_col: u16) -> usize {
    positions
        .iter()
        .enumerate()
        .filter(|(_, (l, _))| *l == line)
        .min_by_key(|(_, (_, col))| col.abs_diff(goal_col))
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

#[cfg(test)]
#[path = "../tests/unit/app_tests.rs"]
mod tests;
