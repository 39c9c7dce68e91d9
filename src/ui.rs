use ratatui::prelude::*;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Clear, Padding, Paragraph, Wrap};

use crate::agent::{AgentStep, StepKind};
use crate::app::{App, CommandSuggestion, Tab};
use crate::planner::{AgentAction, Task, TaskStatus};
use crate::text_layout::{wrap_lines, wrap_word_with_positions};
use crate::theme::{Theme, priority_color, status_color};
use crate::tutorial::{TUTORIAL_TEXT, TutorialLineKind, classify_line, display_text};

const MAX_INPUT_TEXT_LINES: u16 = 5;
const TEXT_PADDING: u16 = 1;
const STATUS_HEIGHT: u16 = 3;
const TAB_BAR_HEIGHT: u16 = 3;
const TITLE_BAR_HEIGHT: u16 = 3;
const TASK_INPUT_HEIGHT: u16 = 3;
const TAB_GAP: u16 = 1;
const BODY_INDENT: &str = "   ";
const ACTIVE_TITLE_BG: Color = Color::Rgb(90, 145, 200);
const ACTIVE_TITLE_FG: Color = Color::Black;
const CHAT_PLACEHOLDER: &str =
    "Ask the agent a question to watch its Thought, Action and Response steps. Type / for commands.";
const TASK_PLACEHOLDER: &str = "Describe a task and press Enter (urgent/asap/critical = high, important/soon = medium)";

fn screen_areas(screen: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(TAB_BAR_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(screen)
}

fn body_area(screen: Rect) -> Rect {
    let [_tabs, body, _status] = screen_areas(screen);
    body
}

fn padded_width(area: Rect) -> u16 {
    area.width.saturating_sub(TEXT_PADDING * 2).max(1)
}

pub fn chat_input_text_width(screen: Rect) -> u16 {
    padded_width(body_area(screen))
}

/// Half a body height, used for PgUp/PgDn.
pub fn page_size(screen: Rect) -> u16 {
    (body_area(screen).height / 2).max(1)
}

struct ChatLayout {
    messages: Rect,
    input: Rect,
    input_scroll: u16,
    cursor_line: u16,
    cursor_col: u16,
}

fn chat_layout(body: Rect, app: &App) -> ChatLayout {
    let input_text_width = padded_width(body);
    let input_text_lines = wrap_word_with_positions(app.chat_input(), input_text_width).line_count;
    let (cursor_line, cursor_col) = app.chat_cursor_line_col(input_text_width);
    let max_input_height = body.height.saturating_sub(1).max(1);
    let (input_height, input_scroll) =
        input_box_metrics(input_text_lines, cursor_line, max_input_height);
    let [messages, input] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(input_height)]).areas(body);
    ChatLayout {
        messages,
        input,
        input_scroll,
        cursor_line,
        cursor_col,
    }
}

pub fn chat_max_scroll(screen: Rect, app: &App) -> u16 {
    let body = body_area(screen);
    if body.width < 1 || body.height < 2 {
        return 0;
    }
    let layout = chat_layout(body, app);
    let visible_lines = layout.messages.height.saturating_sub(TEXT_PADDING * 2);
    let total_lines =
        line_count(chat_display_lines(app.transcript(), padded_width(layout.messages)).len());
    total_lines.saturating_sub(visible_lines)
}

pub fn tutorial_max_scroll(screen: Rect) -> u16 {
    let body = body_area(screen);
    let visible_lines = body.height.saturating_sub(TEXT_PADDING * 2);
    let total_lines = line_count(tutorial_lines(padded_width(body), &Theme::default()).len());
    total_lines.saturating_sub(visible_lines)
}

fn line_count(lines: usize) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX)
}

pub fn tab_hit_test(screen: Rect, x: u16, y: u16) -> Option<Tab> {
    let [tab_bar, _body, _status] = screen_areas(screen);
    tab_label_areas(tab_bar)
        .into_iter()
        .find(|(_, rect)| point_in_rect(*rect, x, y))
        .map(|(tab, _)| tab)
}

pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let [tab_bar, body, status] = screen_areas(frame.area());

    render_tab_bar(frame, tab_bar, app.active_tab(), theme);
    match app.active_tab() {
        Tab::Tutorial => render_tutorial(frame, body, app, theme),
        Tab::Chat => render_chat(frame, body, app, theme),
        Tab::Planner => render_planner(frame, body, app, theme),
    }

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.status_bg)),
        status,
    );
    let help = Paragraph::new(status_line_text(app))
        .style(Style::default().bg(theme.status_bg).fg(theme.muted_fg))
        .block(
            Block::default()
                .style(Style::default().bg(theme.status_bg))
                .padding(Padding::uniform(TEXT_PADDING)),
        );
    frame.render_widget(help, status);
}

fn tab_label(tab: Tab, index: usize) -> String {
    format!(" F{} {} ", index + 1, tab.title())
}

fn tab_label_areas(tab_bar: Rect) -> Vec<(Tab, Rect)> {
    let inner = tab_bar.inner(Margin {
        horizontal: TEXT_PADDING,
        vertical: TEXT_PADDING,
    });
    let mut x = inner.x;
    let mut out = Vec::with_capacity(Tab::ALL.len());
    for (index, tab) in Tab::ALL.into_iter().enumerate() {
        let width = tab_label(tab, index).chars().count() as u16;
        out.push((tab, Rect::new(x, inner.y, width, 1)));
        x = x.saturating_add(width).saturating_add(TAB_GAP);
    }
    out
}

fn render_tab_bar(frame: &mut Frame, area: Rect, active: Tab, theme: &Theme) {
    let mut spans = Vec::with_capacity(Tab::ALL.len() * 2);
    for (index, tab) in Tab::ALL.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" ".repeat(TAB_GAP as usize)));
        }
        let style = if tab == active {
            Style::default()
                .bg(ACTIVE_TITLE_BG)
                .fg(ACTIVE_TITLE_FG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted_fg)
        };
        spans.push(Span::styled(tab_label(tab, index), style));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.tab_bar_bg))
            .block(
                Block::default()
                    .style(Style::default().bg(theme.tab_bar_bg))
                    .padding(Padding::uniform(TEXT_PADDING)),
            ),
        area,
    );
}

fn status_line_text(app: &App) -> String {
    let mut parts = Vec::new();
    if let Some(notice) = app.notice() {
        parts.push(notice.to_string());
    }
    parts.push(help_text(app.active_tab()).to_string());
    if app.is_processing() {
        parts.push(format!("Agent working {}", working_dots(app.ticks)));
    }
    if app.is_planner_thinking() {
        parts.push(format!("Analyzing task {}", working_dots(app.ticks)));
    }
    parts.join(" | ")
}

fn help_text(tab: Tab) -> &'static str {
    match tab {
        Tab::Tutorial => "F1-F3 or Tab switch view | Up/Down or wheel scroll | Ctrl+C quit",
        Tab::Chat => {
            "Enter send | / commands | Shift+Up/Down or wheel scroll | Tab switch view | Ctrl+C quit"
        }
        Tab::Planner => {
            "Enter add | Up/Down select | Ctrl+S start | Ctrl+F complete | Del remove | Ctrl+C quit"
        }
    }
}

fn working_dots(ticks: u64) -> &'static str {
    const FRAMES: [&str; 6] = ["[   ]", "[.  ]", "[.. ]", "[...]", "[ ..]", "[  .]"];
    FRAMES[((ticks / 2) as usize) % FRAMES.len()]
}

fn render_center_overlay(frame: &mut Frame, area: Rect, text: &str) {
    let width = 32u16.min(area.width.saturating_sub(2)).max(20);
    let height = 3u16;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height).intersection(area);
    frame.render_widget(Clear, overlay);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Rgb(255, 165, 0)))
            .block(
                Block::default()
                    .style(Style::default().bg(Color::Rgb(20, 20, 20)))
                    .padding(Padding::uniform(1)),
            ),
        overlay,
    );
}

fn render_title_bar(frame: &mut Frame, area: Rect, title: &str, active: bool, theme: &Theme) {
    let title_bg = title_bar_bg(theme.panel_bg, active);
    let title_fg = if active {
        ACTIVE_TITLE_FG
    } else {
        theme.muted_fg
    };
    frame.render_widget(
        Paragraph::new(title.to_string())
            .style(Style::default().bg(title_bg).fg(title_fg))
            .block(
                Block::default()
                    .style(Style::default().bg(title_bg))
                    .padding(Padding::uniform(TEXT_PADDING)),
            ),
        area,
    );
}

// ---- tutorial ----

fn render_tutorial(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let lines = tutorial_lines(padded_width(area), theme);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .style(Style::default().bg(theme.body_bg).fg(theme.text_fg))
            .scroll((app.tutorial_scroll().min(tutorial_max_scroll(frame.area())), 0))
            .block(
                Block::default()
                    .style(Style::default().bg(theme.body_bg))
                    .padding(Padding::uniform(TEXT_PADDING)),
            ),
        area,
    );
}

fn tutorial_lines(width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    for raw in TUTORIAL_TEXT.lines() {
        let kind = classify_line(raw);
        let style = match kind {
            TutorialLineKind::Title => Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            TutorialLineKind::Heading => Style::default()
                .fg(theme.active_fg)
                .add_modifier(Modifier::BOLD),
            TutorialLineKind::Bullet | TutorialLineKind::Numbered | TutorialLineKind::Body => {
                Style::default().fg(theme.text_fg)
            }
            TutorialLineKind::Blank => {
                out.push(Line::default());
                continue;
            }
        };
        let (first_indent, rest_indent) = match kind {
            TutorialLineKind::Bullet | TutorialLineKind::Numbered => ("  ", "    "),
            _ => ("", ""),
        };
        let wrap_width = width.saturating_sub(rest_indent.len() as u16).max(1);
        for (idx, piece) in wrap_lines(&display_text(raw), wrap_width)
            .into_iter()
            .enumerate()
        {
            let indent = if idx == 0 { first_indent } else { rest_indent };
            out.push(Line::from(vec![
                Span::raw(indent),
                Span::styled(piece, style),
            ]));
        }
    }
    out
}

// ---- chat ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChatLineRole {
    Header,
    Body,
    Separator,
}

#[derive(Debug, Clone)]
struct ChatDisplayLine {
    kind: StepKind,
    role: ChatLineRole,
    text: String,
    timestamp: String,
}

fn chat_display_lines(steps: &[AgentStep], width: u16) -> Vec<ChatDisplayLine> {
    let body_width = width.saturating_sub(BODY_INDENT.len() as u16).max(1);
    let mut out = Vec::new();
    for (idx, step) in steps.iter().enumerate() {
        out.push(ChatDisplayLine {
            kind: step.kind,
            role: ChatLineRole::Header,
            text: format!("{} {}", step.kind.icon(), step.kind.label()),
            timestamp: step.timestamp.format("%H:%M:%S").to_string(),
        });
        for line in wrap_lines(&step.content, body_width) {
            out.push(ChatDisplayLine {
                kind: step.kind,
                role: ChatLineRole::Body,
                text: line,
                timestamp: String::new(),
            });
        }
        if idx + 1 < steps.len() {
            out.push(ChatDisplayLine {
                kind: step.kind,
                role: ChatLineRole::Separator,
                text: String::new(),
                timestamp: String::new(),
            });
        }
    }
    out
}

fn chat_text(lines: &[ChatDisplayLine], theme: &Theme) -> Text<'static> {
    let mut out_lines = Vec::with_capacity(lines.len());
    for line in lines {
        let color = theme.step_color(line.kind);
        match line.role {
            ChatLineRole::Separator => out_lines.push(Line::default()),
            ChatLineRole::Header => out_lines.push(Line::from(vec![
                Span::styled(
                    line.text.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    line.timestamp.clone(),
                    Style::default()
                        .fg(theme.muted_fg)
                        .add_modifier(Modifier::DIM),
                ),
            ])),
            ChatLineRole::Body => {
                let body_style = if line.kind == StepKind::Error {
                    Style::default().fg(color)
                } else {
                    Style::default().fg(theme.text_fg)
                };
                out_lines.push(Line::from(vec![
                    Span::styled(BODY_INDENT, Style::default().fg(color)),
                    Span::styled(line.text.clone(), body_style),
                ]));
            }
        }
    }
    Text::from(out_lines)
}

fn render_chat(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.body_bg)),
        area,
    );
    if area.width < 1 || area.height < 2 {
        return;
    }

    let layout = chat_layout(area, app);
    let messages = if app.transcript().is_empty() {
        Paragraph::new(CHAT_PLACEHOLDER)
            .style(Style::default().bg(theme.body_bg).fg(theme.muted_fg))
            .wrap(Wrap { trim: true })
    } else {
        let message_lines = chat_display_lines(app.transcript(), padded_width(layout.messages));
        Paragraph::new(chat_text(&message_lines, theme))
            .style(Style::default().bg(theme.body_bg).fg(theme.text_fg))
            .scroll((app.chat_scroll().min(chat_max_scroll(frame.area(), app)), 0))
    };
    frame.render_widget(
        messages.block(
            Block::default()
                .style(Style::default().bg(theme.body_bg))
                .padding(Padding::uniform(TEXT_PADDING)),
        ),
        layout.messages,
    );

    let input_text = wrap_word_with_positions(app.chat_input(), padded_width(area)).rendered;
    let input = Paragraph::new(input_text)
        .block(
            Block::default()
                .style(Style::default().bg(theme.input_bg))
                .padding(Padding::uniform(TEXT_PADDING)),
        )
        .style(Style::default().bg(theme.input_bg).fg(theme.text_fg))
        .scroll((layout.input_scroll, 0));
    frame.render_widget(input, layout.input);
    if app.should_show_command_index() {
        render_command_index(
            frame,
            app.command_suggestions(),
            layout.messages,
            layout.input,
            theme,
        );
    }

    let input_inner = layout.input.inner(Margin {
        horizontal: TEXT_PADDING,
        vertical: TEXT_PADDING,
    });
    if input_inner.width > 0 && input_inner.height > 0 {
        let visible_cursor_line = layout.cursor_line.saturating_sub(layout.input_scroll);
        if visible_cursor_line < input_inner.height {
            frame.set_cursor_position((
                input_inner.x.saturating_add(
                    layout
                        .cursor_col
                        .min(input_inner.width.saturating_sub(1)),
                ),
                input_inner.y.saturating_add(visible_cursor_line),
            ));
        }
    }
}

fn render_command_index(
    frame: &mut Frame,
    suggestions: Vec<CommandSuggestion>,
    messages_area: Rect,
    input_area: Rect,
    theme: &Theme,
) {
    if suggestions.is_empty() || messages_area.height == 0 || input_area.width == 0 {
        return;
    }
    let max_items = messages_area.height.saturating_sub(2).max(1) as usize;
    let shown = suggestions.into_iter().take(max_items).collect::<Vec<_>>();
    let overlay_height = (shown.len() as u16)
        .saturating_add(2)
        .min(messages_area.height.max(1));
    let y = input_area
        .y
        .saturating_sub(overlay_height)
        .max(messages_area.y);
    let overlay = Rect::new(input_area.x, y, input_area.width, overlay_height);

    let lines = shown
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let style = if idx == 0 {
                Style::default().fg(theme.active_fg)
            } else {
                Style::default().fg(theme.text_fg)
            };
            Line::from(vec![
                Span::styled(format!("{:<10}", item.command), style),
                Span::styled(
                    item.description.to_string(),
                    Style::default().fg(theme.muted_fg),
                ),
            ])
        })
        .collect::<Vec<_>>();

    frame.render_widget(Clear, overlay);
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(theme.panel_bg))
            .block(
                Block::default()
                    .style(Style::default().bg(theme.panel_bg))
                    .padding(Padding::uniform(TEXT_PADDING)),
            ),
        overlay,
    );
}

// ---- planner ----

fn render_planner(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);
    let [tasks_title, tasks_area, input_area] = Layout::vertical([
        Constraint::Length(TITLE_BAR_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(TASK_INPUT_HEIGHT),
    ])
    .areas(left);
    let [log_title, log_area] =
        Layout::vertical([Constraint::Length(TITLE_BAR_HEIGHT), Constraint::Min(0)]).areas(right);

    render_title_bar(frame, tasks_title, &task_list_title(app), true, theme);
    render_task_list(frame, tasks_area, app, theme);
    render_task_input(frame, input_area, app, theme);
    render_title_bar(frame, log_title, "Agent Action Log", false, theme);
    render_action_log(frame, log_area, app.planner().actions(), theme);

    if app.is_planner_thinking() {
        render_center_overlay(frame, tasks_area, "Analyzing task...");
    }
}

fn task_list_title(app: &App) -> String {
    let planner = app.planner();
    format!(
        "Tasks  {} pending  {} in progress  {} done",
        planner.count_with_status(TaskStatus::Pending),
        planner.count_with_status(TaskStatus::InProgress),
        planner.count_with_status(TaskStatus::Completed)
    )
}

fn render_task_list(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .style(Style::default().bg(theme.body_bg))
        .padding(Padding::uniform(TEXT_PADDING));
    let tasks = app.planner().tasks();
    if tasks.is_empty() {
        frame.render_widget(
            Paragraph::new("No tasks yet. Describe one below and press Enter.")
                .style(Style::default().bg(theme.body_bg).fg(theme.muted_fg))
                .wrap(Wrap { trim: true })
                .block(block),
            area,
        );
        return;
    }

    let selected = app.selected_task_index();
    let visible = area.height.saturating_sub(TEXT_PADDING * 2).max(1) as usize;
    let offset = selected
        .map(|idx| (idx + 1).saturating_sub(visible))
        .unwrap_or(0);
    let lines = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| task_line(task, selected == Some(idx), theme))
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .style(Style::default().bg(theme.body_bg).fg(theme.text_fg))
            .scroll((offset as u16, 0))
            .block(block),
        area,
    );
}

fn task_line(task: &Task, selected: bool, theme: &Theme) -> Line<'static> {
    let marker = if selected { "▶ " } else { "  " };
    let description_style = if task.status == TaskStatus::Completed {
        Style::default()
            .fg(theme.muted_fg)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.text_fg)
    };
    let line = Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.accent)),
        Span::styled(
            format!("#{:<3} ", task.id),
            Style::default().fg(theme.muted_fg),
        ),
        Span::styled(
            format!("{:<14}", format!("[{}]", task.status)),
            Style::default().fg(status_color(task.status)),
        ),
        Span::styled(
            format!("{:<7}", task.priority),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::styled(task.description.clone(), description_style),
    ]);
    if selected {
        line.style(Style::default().bg(theme.input_bg))
    } else {
        line
    }
}

fn render_task_input(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let inner_width = padded_width(area);
    let cursor = app.task_cursor() as u16;
    let scroll_x = cursor.saturating_sub(inner_width.saturating_sub(1));
    let (text, fg) = if app.task_input().is_empty() {
        (TASK_PLACEHOLDER, theme.muted_fg)
    } else {
        (app.task_input(), theme.text_fg)
    };
    frame.render_widget(
        Paragraph::new(text.to_string())
            .style(Style::default().bg(theme.input_bg).fg(fg))
            .scroll((0, scroll_x))
            .block(
                Block::default()
                    .style(Style::default().bg(theme.input_bg))
                    .padding(Padding::uniform(TEXT_PADDING)),
            ),
        area,
    );

    let inner = area.inner(Margin {
        horizontal: TEXT_PADDING,
        vertical: TEXT_PADDING,
    });
    if inner.width > 0 && inner.height > 0 {
        frame.set_cursor_position((
            inner.x.saturating_add(cursor.saturating_sub(scroll_x)),
            inner.y,
        ));
    }
}

fn render_action_log(frame: &mut Frame, area: Rect, actions: &[AgentAction], theme: &Theme) {
    let block = Block::default()
        .style(Style::default().bg(theme.panel_bg))
        .padding(Padding::uniform(TEXT_PADDING));
    if actions.is_empty() {
        frame.render_widget(
            Paragraph::new("The agent has not done anything yet.")
                .style(Style::default().bg(theme.panel_bg).fg(theme.muted_fg))
                .wrap(Wrap { trim: true })
                .block(block),
            area,
        );
        return;
    }
    frame.render_widget(
        Paragraph::new(Text::from(action_log_lines(actions, theme)))
            .style(Style::default().bg(theme.panel_bg).fg(theme.text_fg))
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

/// Newest entry first.
fn action_log_lines(actions: &[AgentAction], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(actions.len() * 2);
    for action in actions.iter().rev() {
        lines.push(Line::from(vec![
            Span::styled(
                action.timestamp.format("%H:%M:%S").to_string(),
                Style::default().fg(theme.muted_fg),
            ),
            Span::raw(" "),
            Span::styled(action.action.clone(), Style::default().fg(theme.text_fg)),
        ]));
        if let Some(task) = &action.task {
            lines.push(Line::from(vec![
                Span::raw("         "),
                Span::styled(
                    format!("#{} {}", task.id, task.description),
                    Style::default().fg(priority_color(task.priority)),
                ),
            ]));
        }
    }
    lines
}

fn input_box_metrics(input_text_lines: u16, cursor_line: u16, max_input_height: u16) -> (u16, u16) {
    let capped_text_lines = input_text_lines.clamp(1, MAX_INPUT_TEXT_LINES);
    let desired_height = capped_text_lines.saturating_add(TEXT_PADDING * 2);
    let input_height = desired_height.clamp(1, max_input_height.max(1));
    let visible_text_lines = input_height.saturating_sub(TEXT_PADDING * 2).max(1);
    let max_scroll = input_text_lines.saturating_sub(visible_text_lines);
    let middle_line = visible_text_lines / 2;
    let input_scroll = cursor_line.saturating_sub(middle_line).min(max_scroll);
    (input_height, input_scroll)
}

fn title_bar_bg(base: Color, active: bool) -> Color {
    if active {
        return ACTIVE_TITLE_BG;
    }
    match base {
        Color::Rgb(r, g, b) => Color::Rgb(
            adjust_channel(r, -12),
            adjust_channel(g, -12),
            adjust_channel(b, -12),
        ),
        _ => base,
    }
}

fn point_in_rect(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

fn adjust_channel(channel: u8, delta: i16) -> u8 {
    let value = channel as i16 + delta;
    value.clamp(0, 255) as u8
}

#[cfg(test)]
#[path = "../tests/unit/ui_tests.rs"]
mod tests;
