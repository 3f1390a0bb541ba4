//! Completion invoker: prompt construction plus the provider call.
//!
//! This is the boundary between the provider and the display layer, so it
//! always yields a displayable string. Provider failures are rendered as
//! `"<prefix>: <Category>: <message>"`.

use tracing::{debug, warn};

use crate::llm::{LlmProvider, Prompt, ProviderError};

/// Wraps the trimmed user text in the answer-style instructions.
pub const HUMAN_TEMPLATE: &str = "ユーザー入力: {question}\n要点を整理して日本語で回答してください。";

/// Prefix on every rendered provider failure.
pub const FAILURE_PREFIX: &str = "エラーが発生しました";

/// Build the system + human prompt for one submission.
pub fn build_prompt(instructions: &str, user_text: &str) -> Prompt {
    Prompt {
        system: instructions.to_string(),
        human: HUMAN_TEMPLATE.replace("{question}", user_text.trim()),
    }
}

/// Render a provider failure for display.
pub fn render_failure(err: &ProviderError) -> String {
    format!("{FAILURE_PREFIX}: {}: {err}", err.category())
}

/// Run one completion. Never fails; errors come back as text.
///
/// Callers must reject blank `user_text` first.
pub async fn complete(provider: &LlmProvider, instructions: &str, user_text: &str) -> String {
    let prompt = build_prompt(instructions, user_text);
    match provider.complete(&prompt).await {
        Ok(text) => {
            debug!(provider = provider.name(), reply_len = text.len(), "completion ok");
            text
        }
        Err(e) => {
            warn!(provider = provider.name(), category = e.category(), "completion failed: {e}");
            render_failure(&e)
        }
    }
}
