//! Canned replies used when no API key is configured or the provider refuses
//! the request for rate/quota reasons.

const GREETING: &str = "Hello! I'm a demo AI agent and this reply is simulated. To talk to a real model:\n\n\
1. Create an API key at https://platform.openai.com/api-keys\n\
2. Put it in agentic-demo.toml under [llm] api_key, or export OPENAI_API_KEY\n\
3. Restart the app\n\n\
Ask me something technical to see more demo replies.";

const LANGUAGE: &str = "Good question! In demo mode I can still walk through the agentic pattern:\n\n\
1. **Thought**: I read your question about programming languages\n\
2. **Action**: I would query a model for an up-to-date answer\n\
3. **Response**: Strongly typed languages catch whole classes of bugs before the program runs, which pays off as a codebase grows.\n\n\
Configure an API key to get real answers.";

const CODE: &str = "Here's a demo reply for your coding question:\n\n\
```rust\n\
fn greet(name: &str) -> String {\n    \
format!(\"Hello, {name}!\")\n\
}\n\
```\n\n\
**Demo mode is active.** Configure an API key for real code generation and explanations.";

const AGENTIC: &str = "Here's how this agent works:\n\n\
**Thought**\n\
- Work out what the user wants\n\
- Break the request into steps\n\n\
**Action**\n\
- Call external services (an LLM API, databases, tools)\n\
- Process what comes back\n\n\
**Response**\n\
- Put the results together\n\
- Answer clearly\n\n\
This reply is simulated. Configure an API key to see the real thing.";

/// Picks a canned reply by plain substring checks on the lowercased prompt.
pub fn demo_response(prompt: &str) -> String {
    let lower = prompt.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|word| lower.contains(word));

    if mentions(&["hello", "hi"]) {
        return GREETING.to_string();
    }
    if mentions(&["typescript", "angular", "rust"]) {
        return LANGUAGE.to_string();
    }
    if mentions(&["code", "function"]) {
        return CODE.to_string();
    }
    if mentions(&["agentic", "agent"]) {
        return AGENTIC.to_string();
    }
    default_response(prompt)
}

fn default_response(prompt: &str) -> String {
    format!(
        "📝 **Demo reply for:** \"{prompt}\"\n\n\
         I'm running in demo mode. Here's what I understood:\n\
         - You asked: {prompt}\n\
         - With a real key I would forward this to the configured model\n\
         - The Thought → Action → Response loop works the same either way\n\n\
         🔑 **To enable real replies:**\n\
         1. Get an API key: https://platform.openai.com/api-keys\n\
         2. Set [llm] api_key in agentic-demo.toml or export OPENAI_API_KEY\n\
         3. Restart the app"
    )
}
