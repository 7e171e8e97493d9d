//! Prompt construction for code explanations.

use crate::llm_client::ChatMessage;

pub const SYSTEM_PROMPT: &str = "You are a friendly teacher and programming assistant. \
Explain code clearly and simply, find likely errors, and suggest improvements.";

const INSTRUCTIONS: &str = "Please:
1) Explain the following code in simple terms (line by line or high-level).
2) Point out any obvious bugs or errors.
3) Suggest improvements or better practices.";

/// Backtick fence guaranteed not to appear inside `code`.
///
/// Markdown closes a fenced block on a backtick run at least as long as the
/// opener, so the fence is one longer than the longest run in the code.
pub fn fence_for(code: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in code.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

pub fn user_prompt(code: &str) -> String {
    let fence = fence_for(code);
    format!("{INSTRUCTIONS}\n\nCode:\n{fence}\n{code}\n{fence}")
}

/// System + user messages for one explanation request
pub fn build_messages(code: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(&user_prompt(code)),
    ]
}
