//! Per-persona chains, memoized for the life of the process.
//!
//! A chain is a persona's instruction paired with the shared provider. Chains
//! are built on first use and never change afterwards, so a `OnceLock` per
//! persona is all the synchronisation the multi-threaded server needs.

use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::invoker;
use crate::llm::LlmProvider;
use crate::persona::Persona;

#[derive(Debug)]
pub struct ExpertChain {
    persona: Persona,
    provider: LlmProvider,
}

impl ExpertChain {
    pub fn new(persona: Persona, provider: LlmProvider) -> Self {
        Self { persona, provider }
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn instructions(&self) -> &'static str {
        self.persona.instructions()
    }

    /// Answer `user_text` as this persona. Always returns display text.
    pub async fn run(&self, user_text: &str) -> String {
        invoker::complete(&self.provider, self.instructions(), user_text).await
    }
}

pub struct ChainCache {
    provider: LlmProvider,
    slots: [OnceLock<Arc<ExpertChain>>; Persona::COUNT],
}

impl ChainCache {
    pub fn new(provider: LlmProvider) -> Self {
        Self { provider, slots: Default::default() }
    }

    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    pub fn get(&self, persona: Persona) -> Arc<ExpertChain> {
        self.slots[persona.index()]
            .get_or_init(|| {
                debug!(persona = persona.slug(), "building expert chain");
                Arc::new(ExpertChain::new(persona, self.provider.clone()))
            })
            .clone()
    }
}
