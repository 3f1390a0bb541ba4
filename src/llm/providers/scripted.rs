//! Test stand-in: returns a fixed reply and records every prompt it sees.

use std::sync::{Arc, Mutex};

use crate::llm::{Prompt, ProviderError};

#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    reply: Result<String, ProviderError>,
    calls: Arc<Mutex<Vec<Prompt>>>,
}

impl ScriptedProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self { reply: Ok(text.into()), calls: Arc::default() }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self { reply: Err(error), calls: Arc::default() }
    }

    pub async fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(prompt.clone());
        self.reply.clone()
    }

    pub fn calls(&self) -> Vec<Prompt> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}
