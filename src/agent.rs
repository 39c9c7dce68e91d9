use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::AgentTimingConfig;
use crate::demo::demo_response;
use crate::llm::CompletionBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Thought,
    Action,
    Response,
    User,
    Error,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Thought => "thought",
            Self::Action => "action",
            Self::Response => "response",
            Self::User => "user",
            Self::Error => "error",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Thought => "Thought",
            Self::Action => "Action",
            Self::Response => "Response",
            Self::User => "You",
            Self::Error => "Error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Thought => "💭",
            Self::Action => "⚡",
            Self::Response => "💬",
            Self::User => "👤",
            Self::Error => "⚠",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentStep {
    pub kind: StepKind,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl AgentStep {
    pub fn new(kind: StepKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            timestamp: Local::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    Step(AgentStep),
    Completed,
}

/// Runs one request at a time on a worker thread and hands its steps back
/// through a channel the render loop drains.
pub struct AgentService {
    backend: Arc<dyn CompletionBackend>,
    timing: AgentTimingConfig,
    event_tx: Sender<AgentEvent>,
    event_rx: Receiver<AgentEvent>,
}

impl AgentService {
    pub fn new(backend: Arc<dyn CompletionBackend>, timing: AgentTimingConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            backend,
            timing,
            event_tx,
            event_rx,
        }
    }

    pub fn provider_label(&self) -> &str {
        self.backend.provider_label()
    }

    pub fn process_request(&self, request: String) {
        let backend = Arc::clone(&self.backend);
        let timing = self.timing.clone();
        let tx = self.event_tx.clone();
        let _ = tx.send(AgentEvent::Step(AgentStep::new(
            StepKind::Thought,
            format!("Analyzing request: \"{request}\""),
        )));
        thread::spawn(move || {
            let _completion = CompletionGuard { tx: tx.clone() };
            run_request(backend.as_ref(), &timing, &request, &tx);
        });
    }

    #[cfg(test)]
    pub fn drain_events(&self) -> Vec<AgentEvent> {
        self.drain_events_limited(usize::MAX)
    }

    pub fn drain_events_limited(&self, max_events: usize) -> Vec<AgentEvent> {
        let mut events = Vec::new();
        while events.len() < max_events {
            let Ok(event) = self.event_rx.try_recv() else {
                break;
            };
            events.push(event);
        }
        events
    }

    /// Blocks until the in-flight request completes, forwarding each step.
    /// Used by the headless `ask` command.
    pub fn wait_for_completion(&self, mut on_step: impl FnMut(&AgentStep)) {
        while let Ok(event) = self.event_rx.recv() {
            match event {
                AgentEvent::Step(step) => on_step(&step),
                AgentEvent::Completed => break,
            }
        }
    }
}

fn run_request(
    backend: &dyn CompletionBackend,
    timing: &AgentTimingConfig,
    request: &str,
    tx: &Sender<AgentEvent>,
) {
    let emit = |kind: StepKind, content: String| {
        let _ = tx.send(AgentEvent::Step(AgentStep::new(kind, content)));
    };
    let provider = backend.provider_label();

    pause(timing.think_delay());
    emit(StepKind::Action, format!("Connecting to {provider} API..."));

    match backend.complete(request) {
        Ok(response) => {
            tracing::info!(chars = response.len(), "agent request answered");
            emit(
                StepKind::Thought,
                "Processing response from AI model...".to_string(),
            );
            pause(timing.respond_delay());
            emit(StepKind::Response, response);
        }
        Err(err) if err.is_fallback_eligible() => {
            tracing::warn!(error = %err, "provider refused request; using demo reply");
            emit(
                StepKind::Thought,
                format!("{provider} rate limit reached. Switching to demo mode..."),
            );
            pause(timing.respond_delay());
            emit(
                StepKind::Response,
                format!(
                    "📝 Demo Mode Response:\n\n{}\n\n⚠️ {err}",
                    demo_response(request)
                ),
            );
        }
        Err(err) => {
            tracing::error!(error = %err, "agent request failed");
            emit(StepKind::Error, format!("Error: {err}"));
        }
    }
}

/// Sends the `Completed` sentinel when the worker exits, including by panic,
/// so nothing waiting on the channel is left blocked.
struct CompletionGuard {
    tx: Sender<AgentEvent>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if thread::panicking() {
            tracing::error!("agent worker panicked");
            let _ = self.tx.send(AgentEvent::Step(AgentStep::new(
                StepKind::Error,
                "Error: agent worker stopped unexpectedly",
            )));
        }
        let _ = self.tx.send(AgentEvent::Completed);
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

#[cfg(test)]
#[path = "../tests/unit/agent_tests.rs"]
mod tests;
