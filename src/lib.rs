//! expert-ask: ask a question, pick an expert persona, get the model's answer.
//!
//! Request path: [`orchestrator`] (credential + empty-input checks) →
//! [`persona`] (system instruction) → [`chain`] (memoized per persona) →
//! [`invoker`] (prompt + provider call, failures rendered as text) →
//! [`llm`] provider.

pub mod chain;
pub mod config;
pub mod credential;
pub mod error;
pub mod invoker;
pub mod llm;
pub mod logger;
pub mod orchestrator;
pub mod persona;
pub mod server;
