//! Tests for the shipped config/default.toml

use std::path::Path;

use expert_ask::config;
use expert_ask::llm::providers;
use expert_ask::orchestrator::{Orchestrator, Reply, EMPTY_INPUT_MESSAGE};

fn load_default() -> config::Config {
    config::load_from(Path::new(config::DEFAULT_CONFIG_PATH), None, None)
        .expect("config/default.toml should parse")
}

#[test]
fn test_default_config_uses_hosted_provider() {
    let cfg = load_default();
    assert_eq!(cfg.llm.provider, "openai");
    assert_eq!(cfg.llm.openai.model, "gpt-5");
    assert_eq!(cfg.llm.openai.temperature, 1.0);
    assert_eq!(cfg.llm.openai.max_tokens, 512);
    assert_eq!(cfg.llm.openai.timeout_seconds, 30);
}

#[test]
fn test_default_config_names_secrets_file() {
    let cfg = load_default();
    assert_eq!(cfg.secrets_file.as_deref(), Some(Path::new(".secrets.toml")));
}

#[tokio::test]
async fn test_dummy_provider_round_trip() {
    let mut cfg = load_default();
    cfg.llm.provider = "dummy".into();
    let provider = providers::build(&cfg.llm, None).unwrap();
    let orchestrator = Orchestrator::new(provider, Some("sk-local"));

    let reply = orchestrator.ask("engineer", "  Explain caching ").await;
    assert_eq!(
        reply,
        Reply::Answer("[echo] ユーザー入力: Explain caching\n要点を整理して日本語で回答してください。".into())
    );

    let blank = orchestrator.ask("engineer", "").await;
    assert_eq!(blank.text(), EMPTY_INPUT_MESSAGE);
}
