//! LLM provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations. Each
//! exposes one operation: submit a [`Prompt`], get text or a
//! [`ProviderError`]. Provider instances are shared immutable capabilities,
//! so clone them freely.

pub mod providers;

use thiserror::Error;

// ── Prompt ────────────────────────────────────────────────────────────────────

/// The two-message prompt sent on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub human: String,
}

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
    #[error("{0}")]
    Transport(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("{0}")]
    Status(String),
    #[error("failed to parse response body: {0}")]
    Decode(String),
    #[error("empty or missing content in response")]
    EmptyCompletion,
}

impl ProviderError {
    /// Stable category name shown next to the message on the form.
    pub fn category(&self) -> &'static str {
        match self {
            ProviderError::UnknownProvider(_) => "UnknownProvider",
            ProviderError::ClientBuild(_) => "ClientBuildError",
            ProviderError::Transport(_) => "TransportError",
            ProviderError::Timeout(_) => "TimeoutError",
            ProviderError::Status(_) => "HttpStatusError",
            ProviderError::Decode(_) => "DecodeError",
            ProviderError::EmptyCompletion => "EmptyCompletionError",
        }
    }
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Enum dispatch avoids `dyn` trait objects and the `async-trait` dependency.
/// Adding a backend = new module + new variant + new `complete` arm.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    OpenAiCompatible(providers::openai_compatible::OpenAiCompatibleProvider),
    Dummy(providers::dummy::DummyProvider),
    #[cfg(test)]
    Scripted(providers::scripted::ScriptedProvider),
}

impl LlmProvider {
    /// Send `prompt` to the provider and return its text reply.
    pub async fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        match self {
            LlmProvider::OpenAiCompatible(p) => p.complete(prompt).await,
            LlmProvider::Dummy(p) => p.complete(prompt).await,
            #[cfg(test)]
            LlmProvider::Scripted(p) => p.complete(prompt).await,
        }
    }

    /// Short provider name for logs and the health endpoint.
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::OpenAiCompatible(_) => "openai",
            LlmProvider::Dummy(_) => "dummy",
            #[cfg(test)]
            LlmProvider::Scripted(_) => "scripted",
        }
    }

    /// Model identifier, if the backend has one.
    pub fn model(&self) -> Option<&str> {
        match self {
            LlmProvider::OpenAiCompatible(p) => Some(p.model()),
            LlmProvider::Dummy(_) => None,
            #[cfg(test)]
            LlmProvider::Scripted(_) => None,
        }
    }
}
