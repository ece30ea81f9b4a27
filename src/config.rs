use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "wiki_quiz";
const ENV_PREFIX: &str = "WIKI_QUIZ";

/// Runtime settings, layered as defaults < `wiki_quiz.toml` < `WIKI_QUIZ_*` env.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database_path: PathBuf,
    pub bind_address: String,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    /// Host articles must be served from.
    pub source_host: String,
    /// Port articles must be served from; any port when unset.
    pub source_port: Option<u16>,
    pub article_path: String,
    pub question_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/wiki_quiz.sqlite"),
            bind_address: "127.0.0.1:8000".to_string(),
            fetch_timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; WikiQuizBot/1.0)".to_string(),
            source_host: "en.wikipedia.org".to_string(),
            source_port: None,
            article_path: "/wiki/".to_string(),
            question_count: crate::quiz::DEFAULT_QUESTION_COUNT,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(env: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn with_database_path(mut self, path: PathBuf) -> Self {
        self.database_path = path;
        self
    }

    pub fn with_bind_address(mut self, address: String) -> Self {
        self.bind_address = address;
        self
    }
}
