use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Settings;
use crate::error::{QuizError, Result};
use crate::parser::{self, Article};

/// Which URLs count as article addresses.
#[derive(Debug, Clone)]
pub struct SourcePolicy {
    pub host: String,
    pub port: Option<u16>,
    pub article_path: String,
}

impl SourcePolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            host: settings.source_host.clone(),
            port: settings.source_port,
            article_path: settings.article_path.clone(),
        }
    }

    /// Accept only `http(s)://<host>[:port]<article_path><name>`.
    pub fn validate(&self, raw: &str) -> Result<Url> {
        let reject = || {
            QuizError::InvalidSource(format!(
                "Only {}{} article URLs are supported.",
                self.host, self.article_path
            ))
        };

        let url = Url::parse(raw.trim()).map_err(|_| reject())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(reject());
        }
        if url.host_str() != Some(self.host.as_str()) {
            return Err(reject());
        }
        if self.port.is_some() && url.port_or_known_default() != self.port {
            return Err(reject());
        }
        let has_article_name = url
            .path()
            .strip_prefix(self.article_path.as_str())
            .is_some_and(|name| !name.is_empty());
        if !has_article_name {
            return Err(reject());
        }
        Ok(url)
    }
}

/// Fetches article pages and turns them into [`Article`]s.
#[derive(Debug, Clone)]
pub struct Extractor {
    client: reqwest::Client,
    policy: SourcePolicy,
}

impl Extractor {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&settings.user_agent)
            .map_err(|e| QuizError::Internal(format!("invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, agent);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.fetch_timeout())
            .build()?;

        Ok(Self {
            client,
            policy: SourcePolicy::from_settings(settings),
        })
    }

    pub fn policy(&self) -> &SourcePolicy {
        &self.policy
    }

    /// One GET, no retry. Non-success statuses and timeouts are fetch errors.
    pub async fn extract(&self, raw_url: &str) -> Result<Article> {
        let url = self.policy.validate(raw_url)?;

        info!("Fetching article: {}", url);
        let start = Instant::now();
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!("Fetch failed for {}: {}", url, e);
            QuizError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Fetch for {} returned {}", url, status);
            return Err(QuizError::Fetch(format!("{} returned HTTP {}", url, status)));
        }
        let html = response.text().await?;

        let article = parser::parse_article(&html);
        debug!(
            "Parsed {} in {}ms: {} paragraphs, {} sections",
            url,
            start.elapsed().as_millis(),
            article.paragraphs.len(),
            article.sections.len()
        );
        Ok(article)
    }
}

// ── Tests ──
