use super::*;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn planner_with_task(description: &str, t0: Instant) -> TaskPlanner {
    let mut planner = TaskPlanner::default();
    planner.add_task(description, t0).expect("task should queue");
    assert_eq!(planner.poll(t0 + ms(800)), 1);
    planner
}

fn action_texts(planner: &TaskPlanner) -> Vec<&str> {
    planner
        .actions()
        .iter()
        .map(|action| action.action.as_str())
        .collect()
}

#[test]
fn priority_keywords() {
    assert_eq!(determine_priority("Fix prod outage ASAP"), Priority::High);
    assert_eq!(determine_priority("critical bug"), Priority::High);
    assert_eq!(determine_priority("URGENT: call back"), Priority::High);
    assert_eq!(determine_priority("Important review"), Priority::Medium);
    assert_eq!(determine_priority("finish report soon"), Priority::Medium);
    assert_eq!(determine_priority("water the plants"), Priority::Low);
}

#[test]
fn high_keywords_win_over_medium() {
    assert_eq!(
        determine_priority("important and urgent"),
        Priority::High
    );
}

#[test]
fn blank_description_is_rejected() {
    let mut planner = TaskPlanner::default();
    assert_eq!(
        planner.add_task("   ", Instant::now()),
        Err(PlannerError::EmptyDescription)
    );
    assert!(!planner.is_thinking());
}

#[test]
fn task_appears_only_after_analysis_delay() {
    let t0 = Instant::now();
    let mut planner = TaskPlanner::default();
    planner.add_task("  write docs  ", t0).expect("queue");
    assert!(planner.is_thinking());
    assert_eq!(planner.poll(t0 + ms(799)), 0);
    assert!(planner.tasks().is_empty());

    assert_eq!(planner.poll(t0 + ms(800)), 1);
    assert!(!planner.is_thinking());
    let task = &planner.tasks()[0];
    assert_eq!(task.id, 1);
    assert_eq!(task.description, "write docs");
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.priority, Priority::Low);
    assert_eq!(
        action_texts(&planner),
        vec!["Analyzed and created task with low priority"]
    );
    assert!(!planner.has_scheduled());
}

#[test]
fn second_add_while_thinking_is_rejected() {
    let t0 = Instant::now();
    let mut planner = TaskPlanner::default();
    planner.add_task("one", t0).expect("queue");
    assert_eq!(
        planner.add_task("two", t0 + ms(10)),
        Err(PlannerError::AgentThinking)
    );
    planner.poll(t0 + ms(800));
    planner.add_task("two", t0 + ms(900)).expect("queue after analysis");
}

#[test]
fn high_priority_task_runs_to_completion_on_its_own() {
    let t0 = Instant::now();
    let mut planner = planner_with_task("urgent deploy", t0);
    let id = planner.tasks()[0].id;
    assert_eq!(planner.tasks()[0].priority, Priority::High);

    planner.poll(t0 + ms(1299));
    assert_eq!(planner.task(id).map(|t| t.status), Some(TaskStatus::Pending));
    planner.poll(t0 + ms(1300));
    assert_eq!(
        planner.task(id).map(|t| t.status),
        Some(TaskStatus::InProgress)
    );
    planner.poll(t0 + ms(3299));
    assert_eq!(
        planner.task(id).map(|t| t.status),
        Some(TaskStatus::InProgress)
    );
    planner.poll(t0 + ms(3300));
    assert_eq!(
        planner.task(id).map(|t| t.status),
        Some(TaskStatus::Completed)
    );
    assert_eq!(
        action_texts(&planner),
        vec![
            "Analyzed and created task with high priority",
            "Started working on task",
            "Completed task successfully",
        ]
    );
}

#[test]
fn auto_start_is_dropped_when_task_was_started_by_hand() {
    let t0 = Instant::now();
    let mut planner = planner_with_task("urgent deploy", t0);
    let id = planner.tasks()[0].id;
    planner.start_task(id, t0 + ms(1000)).expect("manual start");

    assert_eq!(planner.poll(t0 + ms(1300)), 1);
    assert_eq!(
        planner.task(id).map(|t| t.status),
        Some(TaskStatus::InProgress)
    );
    let starts = action_texts(&planner)
        .into_iter()
        .filter(|text| *text == "Started working on task")
        .count();
    assert_eq!(starts, 1);

    planner.poll(t0 + ms(3000));
    assert_eq!(
        planner.task(id).map(|t| t.status),
        Some(TaskStatus::Completed)
    );
    assert!(!planner.has_scheduled());
}

#[test]
fn late_poll_fires_whole_chain_using_due_times() {
    let t0 = Instant::now();
    let mut planner = TaskPlanner::default();
    planner.add_task("critical fix", t0).expect("queue");
    assert_eq!(planner.poll(t0 + ms(10_000)), 3);
    assert_eq!(planner.tasks()[0].status, TaskStatus::Completed);
    assert!(!planner.has_scheduled());
}

#[test]
fn low_and_medium_tasks_wait_for_manual_start() {
    let t0 = Instant::now();
    let mut planner = planner_with_task("important email", t0);
    let id = planner.tasks()[0].id;
    planner.poll(t0 + ms(60_000));
    assert_eq!(planner.task(id).map(|t| t.status), Some(TaskStatus::Pending));

    let started = t0 + ms(60_000);
    planner.start_task(id, started).expect("start");
    assert_eq!(planner.next_due(), Some(started + ms(3000)));
    planner.poll(started + ms(3000));
    assert_eq!(
        planner.task(id).map(|t| t.status),
        Some(TaskStatus::Completed)
    );
}

#[test]
fn low_priority_completion_takes_four_seconds() {
    let t0 = Instant::now();
    let mut planner = planner_with_task("tidy desk", t0);
    let id = planner.tasks()[0].id;
    planner.start_task(id, t0).expect("start");
    assert_eq!(planner.next_due(), Some(t0 + ms(4000)));
}

#[test]
fn start_is_only_allowed_from_pending() {
    let t0 = Instant::now();
    let mut planner = planner_with_task("tidy desk", t0);
    let id = planner.tasks()[0].id;
    planner.start_task(id, t0).expect("first start");
    assert_eq!(
        planner.start_task(id, t0),
        Err(PlannerError::InvalidTransition {
            id,
            from: TaskStatus::InProgress,
            to: TaskStatus::InProgress,
        })
    );
    assert_eq!(
        planner.start_task(99, t0),
        Err(PlannerError::UnknownTask(99))
    );
}

#[test]
fn complete_requires_in_progress_and_cancels_timer() {
    let t0 = Instant::now();
    let mut planner = planner_with_task("tidy desk", t0);
    let id = planner.tasks()[0].id;
    assert!(matches!(
        planner.complete_task(id),
        Err(PlannerError::InvalidTransition { .. })
    ));
    planner.start_task(id, t0).expect("start");
    planner.complete_task(id).expect("manual complete");
    assert!(!planner.has_scheduled());
    assert_eq!(planner.poll(t0 + ms(60_000)), 0);
    assert_eq!(
        planner
            .actions()
            .iter()
            .filter(|a| a.action == "Completed task successfully")
            .count(),
        1
    );
}

#[test]
fn delete_drops_pending_timers_and_logs_snapshot() {
    let t0 = Instant::now();
    let mut planner = planner_with_task("asap patch", t0);
    let id = planner.tasks()[0].id;
    assert!(planner.has_scheduled());

    let removed = planner.delete_task(id).expect("delete");
    assert_eq!(removed.description, "asap patch");
    assert!(planner.tasks().is_empty());
    assert!(!planner.has_scheduled());
    let last = planner.actions().last().expect("action");
    assert_eq!(last.action, "Removed task from queue");
    assert_eq!(last.task.as_ref().map(|t| t.id), Some(id));

    assert_eq!(planner.delete_task(id), Err(PlannerError::UnknownTask(id)));
}

#[test]
fn ids_are_never_reused_after_delete() {
    let t0 = Instant::now();
    let mut planner = planner_with_task("first", t0);
    planner.delete_task(1).expect("delete");
    planner.add_task("second", t0 + ms(1000)).expect("queue");
    planner.poll(t0 + ms(1800));
    assert_eq!(planner.tasks()[0].id, 2);
}

#[test]
fn action_snapshot_reflects_state_at_time_of_action() {
    let t0 = Instant::now();
    let mut planner = planner_with_task("urgent", t0);
    planner.poll(t0 + ms(5000));
    let statuses: Vec<_> = planner
        .actions()
        .iter()
        .filter_map(|a| a.task.as_ref().map(|t| t.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed
        ]
    );
}

#[test]
fn status_counts() {
    let t0 = Instant::now();
    let mut planner = planner_with_task("a", t0);
    planner.add_task("b", t0 + ms(900)).expect("queue");
    planner.poll(t0 + ms(1700));
    planner.start_task(1, t0 + ms(1700)).expect("start");
    assert_eq!(planner.count_with_status(TaskStatus::Pending), 1);
    assert_eq!(planner.count_with_status(TaskStatus::InProgress), 1);
    assert_eq!(planner.count_with_status(TaskStatus::Completed), 0);
}

#[test]
fn display_names_match_wire_names() {
    assert_eq!(TaskStatus::InProgress.to_string(), "in-progress");
    assert_eq!(Priority::Medium.to_string(), "medium");
    let value = serde_json::to_value(TaskStatus::InProgress).expect("serialize");
    assert_eq!(value, "in-progress");
}
