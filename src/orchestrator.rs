//! Request orchestration: credential check, empty-input guard, then
//! persona resolution and invocation.

use tracing::{info, warn};

use crate::chain::ChainCache;
use crate::credential::API_KEY_NAME;
use crate::llm::LlmProvider;
use crate::persona::Persona;

/// Shown instead of calling the provider when the text is blank.
pub const EMPTY_INPUT_MESSAGE: &str = "入力が空です。質問を入力してください。";

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Provider text, or a rendered provider failure.
    Answer(String),
    EmptyInput,
    MissingCredential,
}

impl Reply {
    pub fn text(&self) -> String {
        match self {
            Reply::Answer(text) => text.clone(),
            Reply::EmptyInput => EMPTY_INPUT_MESSAGE.to_string(),
            Reply::MissingCredential => missing_credential_message(),
        }
    }

    /// Machine-readable kind for the JSON API.
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Answer(_) => "answer",
            Reply::EmptyInput => "empty_input",
            Reply::MissingCredential => "missing_credential",
        }
    }
}

pub fn missing_credential_message() -> String {
    format!("{API_KEY_NAME} が未設定です。シークレットファイルまたは環境変数に設定してください。")
}

pub struct Orchestrator {
    api_key_present: bool,
    chains: ChainCache,
}

impl Orchestrator {
    /// `api_key` is only checked for presence here; the provider already
    /// holds the key it sends.
    pub fn new(provider: LlmProvider, api_key: Option<&str>) -> Self {
        Self {
            api_key_present: api_key.is_some_and(|k| !k.trim().is_empty()),
            chains: ChainCache::new(provider),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key_present
    }

    pub fn provider(&self) -> &LlmProvider {
        self.chains.provider()
    }

    pub async fn ask(&self, persona_label: &str, user_text: &str) -> Reply {
        if !self.api_key_present {
            warn!("rejecting request: {API_KEY_NAME} is not set");
            return Reply::MissingCredential;
        }

        let question = user_text.trim();
        if question.is_empty() {
            return Reply::EmptyInput;
        }

        let persona = Persona::from_label(persona_label);
        info!(persona = persona.slug(), question_len = question.len(), "answering");
        let chain = self.chains.get(persona);
        Reply::Answer(chain.run(question).await)
    }
}
