use super::*;
use crate::planner::TaskStatus;
use std::time::Duration;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.input_char(c);
    }
}

fn chat_app() -> App {
    App::new(TaskPlanner::default(), Tab::Chat)
}

fn planner_app() -> App {
    App::new(TaskPlanner::default(), Tab::Planner)
}

fn add_task_now(app: &mut App, text: &str, t0: Instant) {
    type_text(app, text);
    app.submit(t0);
    assert!(app.tick_planner(t0 + ms(800)));
}

#[test]
fn starts_on_tutorial_and_cycles_tabs() {
    let mut app = App::default();
    assert_eq!(app.active_tab(), Tab::Tutorial);
    app.next_tab();
    assert_eq!(app.active_tab(), Tab::Chat);
    app.next_tab();
    assert_eq!(app.active_tab(), Tab::Planner);
    app.next_tab();
    assert_eq!(app.active_tab(), Tab::Tutorial);
    app.prev_tab();
    assert_eq!(app.active_tab(), Tab::Planner);
    app.select_tab(Tab::Chat);
    assert_eq!(app.active_tab(), Tab::Chat);
}

#[test]
fn typing_on_tutorial_tab_is_ignored() {
    let mut app = App::default();
    type_text(&mut app, "abc");
    assert!(app.chat_input().is_empty());
    assert!(app.task_input().is_empty());
}

#[test]
fn each_tab_keeps_its_own_input() {
    let mut app = chat_app();
    type_text(&mut app, "question");
    app.select_tab(Tab::Planner);
    type_text(&mut app, "task");
    assert_eq!(app.chat_input(), "question");
    assert_eq!(app.task_input(), "task");
}

#[test]
fn cursor_editing_handles_multibyte_chars() {
    let mut app = chat_app();
    type_text(&mut app, "añb");
    app.move_cursor_left();
    app.backspace_input();
    assert_eq!(app.chat_input(), "ab");
    app.move_cursor_home();
    app.input_char('>');
    assert_eq!(app.chat_input(), ">ab");
    app.move_cursor_end();
    app.input_char('!');
    assert_eq!(app.chat_input(), ">ab!");
}

#[test]
fn input_line_moves_between_wrapped_lines() {
    let mut line = InputLine::default();
    for c in "abcd efgh".chars() {
        line.insert(c);
    }
    assert_eq!(line.line_col(5), (1, 4));
    assert!(line.move_up(5));
    assert_eq!(line.line_col(5), (0, 4));
    assert!(!line.move_up(5));
    assert!(line.move_down(5));
    assert_eq!(line.cursor(), 9);
    assert!(!line.move_down(5));
}

#[test]
fn submit_chat_records_user_step_and_clears_input() {
    let mut app = chat_app();
    type_text(&mut app, "  hello agent  ");
    let sent = app.submit(Instant::now());
    assert_eq!(sent.as_deref(), Some("hello agent"));
    assert!(app.chat_input().is_empty());
    assert!(app.is_processing());
    assert_eq!(app.transcript().len(), 1);
    assert_eq!(app.transcript()[0].kind, StepKind::User);
    assert_eq!(app.transcript()[0].content, "hello agent");
}

#[test]
fn blank_chat_submit_is_ignored() {
    let mut app = chat_app();
    type_text(&mut app, "   ");
    assert_eq!(app.submit(Instant::now()), None);
    assert!(app.transcript().is_empty());
    assert!(!app.is_processing());
}

#[test]
fn submit_while_processing_keeps_input() {
    let mut app = chat_app();
    assert!(app.send_message("first").is_some());
    type_text(&mut app, "second");
    assert_eq!(app.submit_chat(), None);
    assert_eq!(app.chat_input(), "second");
    assert_eq!(app.transcript().len(), 1);
    assert!(app.notice().is_some());
}

#[test]
fn agent_events_extend_transcript_until_completed() {
    let mut app = chat_app();
    app.send_message("hi");
    assert!(app.apply_agent_event(AgentEvent::Step(AgentStep::new(
        StepKind::Thought,
        "Analyzing request..."
    ))));
    assert!(app.apply_agent_event(AgentEvent::Step(AgentStep::new(
        StepKind::Response,
        "Hello"
    ))));
    assert!(app.is_processing());
    assert!(!app.apply_agent_event(AgentEvent::Completed));
    assert!(!app.is_processing());
    let kinds: Vec<StepKind> = app.transcript().iter().map(|step| step.kind).collect();
    assert_eq!(
        kinds,
        vec![StepKind::User, StepKind::Thought, StepKind::Response]
    );
}

#[test]
fn parses_chat_commands_case_insensitively() {
    assert_eq!(ChatCommand::parse("/clear"), Some(ChatCommand::Clear));
    assert_eq!(ChatCommand::parse(" /QUIT "), Some(ChatCommand::Quit));
    assert_eq!(ChatCommand::parse("/exit"), Some(ChatCommand::Quit));
    assert_eq!(ChatCommand::parse("/planner"), Some(ChatCommand::ShowPlanner));
    assert_eq!(ChatCommand::parse("/tutorial"), Some(ChatCommand::ShowTutorial));
    assert_eq!(ChatCommand::parse("clear"), None);
}

#[test]
fn clear_command_empties_transcript() {
    let mut app = chat_app();
    app.send_message("hi");
    app.apply_agent_event(AgentEvent::Completed);
    type_text(&mut app, "/clear");
    assert_eq!(app.submit_chat(), None);
    assert!(app.transcript().is_empty());
    assert!(app.chat_input().is_empty());
}

#[test]
fn clear_command_is_refused_while_processing() {
    let mut app = chat_app();
    app.send_message("hi");
    type_text(&mut app, "/clear");
    app.submit_chat();
    assert_eq!(app.transcript().len(), 1);
    assert!(app.notice().is_some());
}

#[test]
fn navigation_and_quit_commands() {
    let mut app = chat_app();
    type_text(&mut app, "/planner");
    app.submit_chat();
    assert_eq!(app.active_tab(), Tab::Planner);

    app.select_tab(Tab::Chat);
    type_text(&mut app, "/tutorial");
    app.submit_chat();
    assert_eq!(app.active_tab(), Tab::Tutorial);

    app.select_tab(Tab::Chat);
    type_text(&mut app, "/quit");
    app.submit_chat();
    assert!(!app.running);
}

#[test]
fn unknown_slash_command_is_not_sent() {
    let mut app = chat_app();
    type_text(&mut app, "/nope");
    assert_eq!(app.submit_chat(), None);
    assert!(app.transcript().is_empty());
    assert_eq!(app.notice(), Some("Unknown command: /nope"));
}

#[test]
fn slash_text_with_spaces_goes_to_the_agent() {
    let mut app = chat_app();
    type_text(&mut app, "/usr/bin is where?");
    assert_eq!(app.submit_chat().as_deref(), Some("/usr/bin is where?"));
}

#[test]
fn command_suggestions_filter_by_prefix() {
    let mut app = chat_app();
    type_text(&mut app, "/");
    assert_eq!(app.command_suggestions().len(), 5);
    app.input_char('q');
    let suggestions = app.command_suggestions();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].command, "/quit");
    assert!(app.autocomplete_top_command());
    assert_eq!(app.chat_input(), "/quit");
    assert!(!app.autocomplete_top_command());
}

#[test]
fn command_index_hidden_outside_chat() {
    let mut app = planner_app();
    type_text(&mut app, "/");
    assert!(!app.should_show_command_index());
    assert!(app.command_suggestions().is_empty());
}

#[test]
fn planner_submit_queues_task_and_clears_input() {
    let t0 = Instant::now();
    let mut app = planner_app();
    type_text(&mut app, "write docs");
    assert_eq!(app.submit(t0), None);
    assert!(app.task_input().is_empty());
    assert!(app.is_planner_thinking());
    assert!(!app.tick_planner(t0 + ms(100)));
    assert!(app.tick_planner(t0 + ms(800)));
    assert_eq!(app.planner().tasks().len(), 1);
    assert_eq!(app.selected_task_index(), Some(0));
}

#[test]
fn planner_submit_while_thinking_keeps_input() {
    let t0 = Instant::now();
    let mut app = planner_app();
    type_text(&mut app, "one");
    app.submit(t0);
    type_text(&mut app, "two");
    app.submit(t0 + ms(10));
    assert_eq!(app.task_input(), "two");
    assert_eq!(
        app.notice(),
        Some("Agent is still analyzing the previous task")
    );
}

#[test]
fn start_complete_and_delete_selected_task() {
    let t0 = Instant::now();
    let mut app = planner_app();
    add_task_now(&mut app, "first", t0);
    add_task_now(&mut app, "second", t0 + ms(1000));
    app.select_next_task();
    assert_eq!(app.selected_task().map(|task| task.id), Some(2));

    app.start_selected_task(t0 + ms(2000));
    assert_eq!(
        app.selected_task().map(|task| task.status),
        Some(TaskStatus::InProgress)
    );
    app.complete_selected_task();
    assert_eq!(
        app.selected_task().map(|task| task.status),
        Some(TaskStatus::Completed)
    );

    app.delete_selected_task();
    assert_eq!(app.planner().tasks().len(), 1);
    assert_eq!(app.selected_task().map(|task| task.id), Some(1));
}

#[test]
fn invalid_transition_sets_notice() {
    let t0 = Instant::now();
    let mut app = planner_app();
    add_task_now(&mut app, "first", t0);
    app.complete_selected_task();
    assert_eq!(
        app.notice(),
        Some("Task 1 is pending; cannot move it to completed")
    );
    app.start_selected_task(t0 + ms(900));
    assert_eq!(app.notice(), None);
}

#[test]
fn selection_stays_in_bounds() {
    let mut app = planner_app();
    app.select_next_task();
    app.select_prev_task();
    assert_eq!(app.selected_task_index(), None);
    app.delete_selected_task();
    app.start_selected_task(Instant::now());
    assert!(app.planner().actions().is_empty());
}

#[test]
fn arrow_keys_follow_the_active_tab() {
    let t0 = Instant::now();
    let mut app = planner_app();
    add_task_now(&mut app, "a", t0);
    add_task_now(&mut app, "b", t0 + ms(1000));
    app.move_down(40, 0);
    assert_eq!(app.selected_task_index(), Some(1));
    app.move_up(40);
    assert_eq!(app.selected_task_index(), Some(0));

    app.select_tab(Tab::Tutorial);
    app.move_down(40, 2);
    app.move_down(40, 2);
    app.move_down(40, 2);
    assert_eq!(app.tutorial_scroll(), 2);
    app.scroll_up(5);
    assert_eq!(app.tutorial_scroll(), 0);
}

#[test]
fn chat_arrows_scroll_when_input_is_single_line() {
    let mut app = chat_app();
    app.move_down(40, 3);
    app.move_down(40, 3);
    assert_eq!(app.chat_scroll(), 2);
    app.move_up(40);
    assert_eq!(app.chat_scroll(), 1);
    app.scroll_down(10, 3);
    assert_eq!(app.chat_scroll(), 3);
}
