//! API credential lookup.
//!
//! The key is looked up under [`API_KEY_NAME`]: first as a top-level key in
//! the deployment secrets file, then in the process environment (which
//! includes `.env` once `dotenvy` has run). Blank values count as absent. A
//! key present in the secrets file shadows the environment even when blank.

use std::{env, fs, path::Path};

use tracing::{debug, warn};

pub const API_KEY_NAME: &str = "OPENAI_API_KEY";

/// Resolve the credential from the secrets file at `secrets_file` and the
/// environment. A missing or unreadable secrets file is not an error.
pub fn resolve(secrets_file: Option<&Path>) -> Option<String> {
    let secrets = secrets_file.and_then(|path| match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            debug!(path = %path.display(), "secrets file not read: {e}");
            None
        }
    });
    from_sources(secrets.as_deref(), env::var(API_KEY_NAME).ok())
}

/// Pure lookup over already-read sources. The secrets file wins.
pub fn from_sources(secrets_toml: Option<&str>, env_value: Option<String>) -> Option<String> {
    match secrets_toml.and_then(secrets_entry) {
        Some(value) => non_blank(Some(value)),
        None => non_blank(env_value),
    }
}

/// The raw string under [`API_KEY_NAME`], if the file has one.
fn secrets_entry(text: &str) -> Option<String> {
    let table = match toml::from_str::<toml::Table>(text) {
        Ok(t) => t,
        Err(e) => {
            warn!("ignoring malformed secrets file: {e}");
            return None;
        }
    };
    table.get(API_KEY_NAME)?.as_str().map(str::to_string)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn secrets_file_wins_over_env() {
        let key = from_sources(
            Some("OPENAI_API_KEY = \"sk-secret\"\n"),
            Some("sk-env".into()),
        );
        assert_eq!(key.as_deref(), Some("sk-secret"));
    }

    #[test]
    fn env_used_when_secrets_lack_key() {
        let key = from_sources(Some("OTHER = \"x\"\n"), Some("sk-env".into()));
        assert_eq!(key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn blank_values_are_absent() {
        assert!(from_sources(Some("OPENAI_API_KEY = \"  \"\n"), Some(String::new())).is_none());
        assert!(from_sources(None, Some("   ".into())).is_none());
        assert!(from_sources(None, None).is_none());
    }

    #[test]
    fn blank_secret_shadows_env() {
        let key = from_sources(Some("OPENAI_API_KEY = \"\"\n"), Some("sk-env".into()));
        assert!(key.is_none());
    }

    #[test]
    fn malformed_secrets_fall_back_to_env() {
        let key = from_sources(Some("not = [toml"), Some("sk-env".into()));
        assert_eq!(key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn non_string_key_ignored() {
        assert!(from_sources(Some("OPENAI_API_KEY = 42\n"), None).is_none());
    }

    #[test]
    fn reads_secrets_from_disk() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"OPENAI_API_KEY = \"sk-from-file\"\n").unwrap();
        assert_eq!(resolve(Some(f.path())).as_deref(), Some("sk-from-file"));
    }
}
