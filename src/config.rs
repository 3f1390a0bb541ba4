//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` (or an explicit `-f` path), then applies
//! `EXPERT_ASK_LOG_LEVEL` and `EXPERT_ASK_BIND`. Provider settings are fixed
//! for the life of the process; nothing here is adjustable per request.
//!
//! The API credential is never part of this file. See [`crate::credential`].

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// OpenAI / OpenAI-compatible provider configuration (`[llm.openai]`).
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    /// Model name passed in the request body.
    pub model: String,
    /// Sampling temperature. gpt-5 only accepts `1.0`.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// LLM configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Active provider, `"openai"` or `"dummy"`. `default` in the TOML.
    pub provider: String,
    pub openai: OpenAiConfig,
}

/// Web form listener.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub log_level: String,
    /// Deployment secrets file, `~` already expanded.
    pub secrets_file: Option<PathBuf>,
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

// ── Raw TOML shape ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    app: RawApp,
    #[serde(default)]
    server: RawServer,
    #[serde(default)]
    llm: RawLlm,
}

#[derive(Deserialize)]
struct RawApp {
    #[serde(default = "default_app_name")]
    name: String,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default)]
    secrets_file: Option<String>,
}

impl Default for RawApp {
    fn default() -> Self {
        Self { name: default_app_name(), log_level: default_log_level(), secrets_file: None }
    }
}

#[derive(Deserialize)]
struct RawServer {
    #[serde(default = "default_bind")]
    bind: String,
}

impl Default for RawServer {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Deserialize)]
struct RawLlm {
    #[serde(rename = "default", default = "default_llm_provider")]
    provider: String,
    #[serde(default)]
    openai: RawOpenAiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self { provider: default_llm_provider(), openai: RawOpenAiConfig::default() }
    }
}

#[derive(Deserialize)]
struct RawOpenAiConfig {
    #[serde(default = "default_openai_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_openai_model")]
    model: String,
    #[serde(default = "default_openai_temperature")]
    temperature: f32,
    #[serde(default = "default_openai_max_tokens")]
    max_tokens: u32,
    #[serde(default = "default_openai_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawOpenAiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
            temperature: default_openai_temperature(),
            max_tokens: default_openai_max_tokens(),
            timeout_seconds: default_openai_timeout_seconds(),
        }
    }
}

fn default_app_name() -> String { "expert-ask".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_bind() -> String { "127.0.0.1:8501".to_string() }
fn default_llm_provider() -> String { "openai".to_string() }
fn default_openai_api_base_url() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_openai_model() -> String { "gpt-5".to_string() }
fn default_openai_temperature() -> f32 { 1.0 }
fn default_openai_max_tokens() -> u32 { 512 }
fn default_openai_timeout_seconds() -> u64 { 30 }

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load config from `path` (default `config/default.toml`), then apply
/// env-var overrides.
pub fn load(path: Option<&str>) -> Result<Config, AppError> {
    let log_level_override = env::var("EXPERT_ASK_LOG_LEVEL").ok();
    let bind_override = env::var("EXPERT_ASK_BIND").ok();
    load_from(
        Path::new(path.unwrap_or(DEFAULT_CONFIG_PATH)),
        log_level_override.as_deref(),
        bind_override.as_deref(),
    )
}

/// Internal loader. Tests pass overrides directly instead of mutating env.
/// Blank overrides are ignored.
pub fn load_from(
    path: &Path,
    log_level_override: Option<&str>,
    bind_override: Option<&str>,
) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
    let non_blank = |v: &&str| !v.trim().is_empty();
    parse(&raw, log_level_override.filter(non_blank), bind_override.filter(non_blank))
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))
}

fn parse(
    raw: &str,
    log_level_override: Option<&str>,
    bind_override: Option<&str>,
) -> Result<Config, String> {
    let parsed: RawConfig = toml::from_str(raw).map_err(|e| e.to_string())?;

    let o = parsed.llm.openai;
    if o.timeout_seconds == 0 {
        return Err("llm.openai.timeout_seconds must be greater than zero".into());
    }
    if o.max_tokens == 0 {
        return Err("llm.openai.max_tokens must be greater than zero".into());
    }

    Ok(Config {
        app_name: parsed.app.name,
        log_level: log_level_override.unwrap_or(&parsed.app.log_level).to_string(),
        secrets_file: parsed
            .app
            .secrets_file
            .filter(|s| !s.trim().is_empty())
            .map(|s| expand_home(&s)),
        server: ServerConfig {
            bind: bind_override.unwrap_or(&parsed.server.bind).to_string(),
        },
        llm: LlmConfig {
            provider: parsed.llm.provider,
            openai: OpenAiConfig {
                api_base_url: o.api_base_url,
                model: o.model,
                temperature: o.temperature,
                max_tokens: o.max_tokens,
                timeout_seconds: o.timeout_seconds,
            },
        },
    })
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Safe `Config` for unit tests: dummy provider, no secrets file.
#[cfg(test)]
impl Config {
    pub fn test_default() -> Self {
        Self {
            app_name: "test".into(),
            log_level: "info".into(),
            secrets_file: None,
            server: ServerConfig { bind: "127.0.0.1:0".into() },
            llm: LlmConfig {
                provider: "dummy".into(),
                openai: OpenAiConfig {
                    api_base_url: "http://localhost:0/v1/chat/completions".into(),
                    model: "test-model".into(),
                    temperature: 1.0,
                    max_tokens: 64,
                    timeout_seconds: 1,
                },
            },
        }
    }
}
