
pub const TUTORIAL_TEXT: &str = "\
# What is Agentic AI?

Understanding autonomous AI agents and what they can do.

## Definition

Agentic AI describes systems that **take actions on their own**, make decisions, \
and work toward goals with little human intervention. Instead of only answering \
a query, an agent can plan, reason, and carry out multi-step tasks.

## Key components

- 💭 Thought: the agent analyzes the problem and plans its approach
- ⚡ Action: the agent runs a task or queries an external system
- 💬 Response: the agent combines the results into an answer

## How this demo works

1. User input: you ask a question in the Chat tab
2. Thought: the agent analyzes the request
3. Action: the agent calls the configured chat-completion API
4. Response: the agent delivers the result

Without an API key, or when the provider reports a rate limit or an exhausted \
quota, the agent answers from canned demo replies so the loop still runs.

The Planner tab shows the same idea applied to a task queue: the agent reads each \
task, assigns a priority from its wording, starts urgent work by itself, and \
reports every step in its action log.

## Real-world applications

- Research assistants: gather and summarize information
- Code generation: write, test, and debug code
- Data analysis: explore datasets and report findings
- Task automation: run multi-step workflows unattended

## Technical stack

- Rust, ratatui, crossterm
- reqwest for the chat-completion call
- tracing for logs

## Try it yourself

Ask the agent things like:

- \"Explain quantum computing in simple terms\"
- \"Write a Rust function to sort a vector\"
- \"How does an agentic loop work?\"
- \"Help me debug a CORS error\"
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialLineKind {
    Title,
    Heading,
    Bullet,
    Numbered,
    Body,
    Blank,
}

pub fn classify_line(line: &str) -> TutorialLineKind {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        TutorialLineKind::Blank
    } else if trimmed.starts_with("## ") {
        TutorialLineKind::Heading
    } else if trimmed.starts_with("# ") {
        TutorialLineKind::Title
    } else if trimmed.starts_with("- ") {
        TutorialLineKind::Bullet
    } else if trimmed
        .split_once(". ")
        .is_some_and(|(index, _)| !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()))
    {
        TutorialLineKind::Numbered
    } else {
        TutorialLineKind::Body
    }
}

/// Strips markdown markers that the terminal renders as styling instead.
pub fn display_text(line: &str) -> String {
    let trimmed = line.trim_start();
    let body = trimmed
        .strip_prefix("## ")
        .or_else(|| trimmed.strip_prefix("# "))
        .unwrap_or(trimmed);
    let body = match classify_line(line) {
        TutorialLineKind::Bullet => format!("• {}", &body[2..]),
        _ => body.to_string(),
    };
    body.replace("**", "")
}
