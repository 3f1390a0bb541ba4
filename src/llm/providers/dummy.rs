//! Dummy LLM provider: echoes the human message back prefixed with `[echo]`.
//! Lets the form run end to end without a hosted model.

use crate::llm::{Prompt, ProviderError};

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        Ok(format!("[echo] {}", prompt.human))
    }
}
