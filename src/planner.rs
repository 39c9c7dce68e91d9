use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::PlannerTimingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: u64,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub created_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentAction {
    pub timestamp: DateTime<Local>,
    pub action: String,
    pub task: Option<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlannerError {
    #[error("task description is empty")]
    EmptyDescription,
    #[error("agent is still analyzing the previous task")]
    AgentThinking,
    #[error("no task with id {0}")]
    UnknownTask(u64),
    #[error("task {id} is {from}; cannot move it to {to}")]
    InvalidTransition {
        id: u64,
        from: TaskStatus,
        to: TaskStatus,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Transition {
    Create(String),
    Start(u64),
    Complete(u64),
}

impl Transition {
    fn task_id(&self) -> Option<u64> {
        match self {
            Self::Create(_) => None,
            Self::Start(id) | Self::Complete(id) => Some(*id),
        }
    }
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: Instant,
    seq: u64,
    transition: Transition,
}

pub fn determine_priority(description: &str) -> Priority {
    let lower = description.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|word| lower.contains(word));
    if mentions(&["urgent", "asap", "critical"]) {
        Priority::High
    } else if mentions(&["important", "soon"]) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Task list plus the agent's action log. Timed transitions sit in a queue
/// and fire from `poll`, so callers decide what "now" is.
#[derive(Debug)]
pub struct TaskPlanner {
    timing: PlannerTimingConfig,
    tasks: Vec<Task>,
    actions: Vec<AgentAction>,
    scheduled: Vec<Scheduled>,
    next_task_id: u64,
    next_seq: u64,
}

impl Default for TaskPlanner {
    fn default() -> Self {
        Self::new(PlannerTimingConfig::default())
    }
}

impl TaskPlanner {
    pub fn new(timing: PlannerTimingConfig) -> Self {
        Self {
            timing,
            tasks: Vec::new(),
            actions: Vec::new(),
            scheduled: Vec::new(),
            next_task_id: 1,
            next_seq: 0,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn actions(&self) -> &[AgentAction] {
        &self.actions
    }

    #[cfg(test)]
    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn is_thinking(&self) -> bool {
        self.scheduled
            .iter()
            .any(|entry| matches!(entry.transition, Transition::Create(_)))
    }

    #[cfg(test)]
    pub fn has_scheduled(&self) -> bool {
        !self.scheduled.is_empty()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.scheduled.iter().map(|entry| entry.due).min()
    }

    pub fn count_with_status(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|task| task.status == status).count()
    }

    /// Queues analysis of a new task; the task appears once the analysis
    /// delay has elapsed.
    pub fn add_task(&mut self, description: &str, now: Instant) -> Result<(), PlannerError> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(PlannerError::EmptyDescription);
        }
        if self.is_thinking() {
            return Err(PlannerError::AgentThinking);
        }
        self.schedule(
            now + Duration::from_millis(self.timing.analyze_delay_ms),
            Transition::Create(trimmed.to_string()),
        );
        Ok(())
    }

    pub fn start_task(&mut self, id: u64, now: Instant) -> Result<(), PlannerError> {
        let task = self.transition(id, TaskStatus::Pending, TaskStatus::InProgress)?;
        let completion = self.completion_delay(task.priority);
        self.log("Started working on task", Some(task));
        self.schedule(now + completion, Transition::Complete(id));
        tracing::debug!(task_id = id, "task started");
        Ok(())
    }

    pub fn complete_task(&mut self, id: u64) -> Result<(), PlannerError> {
        let task = self.transition(id, TaskStatus::InProgress, TaskStatus::Completed)?;
        self.log("Completed task successfully", Some(task));
        self.scheduled
            .retain(|entry| entry.transition != Transition::Complete(id));
        tracing::debug!(task_id = id, "task completed");
        Ok(())
    }

    pub fn delete_task(&mut self, id: u64) -> Result<Task, PlannerError> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(PlannerError::UnknownTask(id))?;
        let removed = self.tasks.remove(index);
        self.scheduled
            .retain(|entry| entry.transition.task_id() != Some(id));
        self.log("Removed task from queue", Some(removed.clone()));
        tracing::debug!(task_id = id, "task removed");
        Ok(removed)
    }

    /// Fires every transition due at or before `now`, in due order. Returns
    /// how many fired.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some(index) = self.next_due_index(now) {
            let entry = self.scheduled.remove(index);
            self.fire(entry, now);
            fired += 1;
        }
        fired
    }

    fn next_due_index(&self, now: Instant) -> Option<usize> {
        self.scheduled
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= now)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(index, _)| index)
    }

    fn fire(&mut self, entry: Scheduled, now: Instant) {
        // Timed follow-ups run against the instant they were due, so a late
        // poll does not stretch the simulated durations.
        let at = entry.due.min(now);
        match entry.transition {
            Transition::Create(description) => self.create_task(description, at),
            Transition::Start(id) => {
                if let Err(err) = self.start_task(id, at) {
                    tracing::debug!(task_id = id, error = %err, "dropped scheduled start");
                }
            }
            Transition::Complete(id) => {
                if let Err(err) = self.complete_task(id) {
                    tracing::debug!(task_id = id, error = %err, "dropped scheduled completion");
                }
            }
        }
    }

    fn create_task(&mut self, description: String, at: Instant) {
        let priority = determine_priority(&description);
        let task = Task {
            id: self.next_task_id,
            description,
            status: TaskStatus::Pending,
            priority,
            created_at: Local::now(),
        };
        self.next_task_id += 1;
        let id = task.id;
        self.tasks.push(task.clone());
        self.log(
            format!("Analyzed and created task with {priority} priority"),
            Some(task),
        );
        tracing::info!(task_id = id, %priority, "task created");
        if priority == Priority::High {
            self.schedule(
                at + Duration::from_millis(self.timing.auto_start_delay_ms),
                Transition::Start(id),
            );
        }
    }

    fn transition(
        &mut self,
        id: u64,
        from: TaskStatus,
        to: TaskStatus,
    ) -> Result<Task, PlannerError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(PlannerError::UnknownTask(id))?;
        if task.status != from {
            return Err(PlannerError::InvalidTransition {
                id,
                from: task.status,
                to,
            });
        }
        task.status = to;
        Ok(task.clone())
    }

    fn completion_delay(&self, priority: Priority) -> Duration {
        Duration::from_millis(match priority {
            Priority::High => self.timing.high_ms,
            Priority::Medium => self.timing.medium_ms,
            Priority::Low => self.timing.low_ms,
        })
    }

    fn schedule(&mut self, due: Instant, transition: Transition) {
        self.scheduled.push(Scheduled {
            due,
            seq: self.next_seq,
            transition,
        });
        self.next_seq += 1;
    }

    fn log(&mut self, action: impl Into<String>, task: Option<Task>) {
        self.actions.push(AgentAction {
            timestamp: Local::now(),
            action: action.into(),
            task,
        });
    }
}

#[cfg(test)]
#[path = "../tests/unit/planner_tests.rs"]
mod tests;
