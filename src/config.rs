use std::time::Duration;

use anyhow::{Context, Result};

use crate::scrapers::ScraperConfig;

pub const DEFAULT_LISTING_PORTAL: &str = "https://www.zonaprop.com.ar";
pub const MASTER_WEBHOOK_NAME: &str = "Todos los Portales";

/// Runtime configuration loaded from the environment (and `.env` if present)
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_anon_key: String,
    pub scrapers: Vec<ScraperConfig>,
    /// Workflow that runs every portal in sequence
    pub master_webhook: Option<ScraperConfig>,
    pub listing_portal_url: String,
    /// Wait between a finished scraping call and the refetch
    pub refetch_delay: Duration,
    pub profile_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let scrapers = match std::env::var("SCRAPER_WEBHOOKS") {
            Ok(raw) => parse_scrapers(&raw)?,
            Err(_) => Vec::new(),
        };

        let master_webhook = std::env::var("MASTER_WEBHOOK_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| ScraperConfig {
                name: MASTER_WEBHOOK_NAME.to_string(),
                url,
            });

        Ok(Config {
            backend_url: require_env("BACKEND_URL")?.trim_end_matches('/').to_string(),
            backend_anon_key: require_env("BACKEND_ANON_KEY")?,
            scrapers,
            master_webhook,
            listing_portal_url: std::env::var("LISTING_PORTAL_URL")
                .unwrap_or_else(|_| DEFAULT_LISTING_PORTAL.to_string()),
            refetch_delay: Duration::from_millis(
                env_or("REFETCH_DELAY_MS", "1000")
                    .parse()
                    .context("REFETCH_DELAY_MS must be a number of milliseconds")?,
            ),
            profile_timeout: Duration::from_secs(
                env_or("PROFILE_TIMEOUT_SECS", "10")
                    .parse()
                    .context("PROFILE_TIMEOUT_SECS must be a number of seconds")?,
            ),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Configured scrapers plus the master webhook, if any.
    pub fn all_scrapers(&self) -> Vec<ScraperConfig> {
        self.scrapers
            .iter()
            .cloned()
            .chain(self.master_webhook.clone())
            .collect()
    }
}

/// Parse `Name|url;Name|url`.
pub fn parse_scrapers(raw: &str) -> Result<Vec<ScraperConfig>> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, url) = entry
                .split_once('|')
                .with_context(|| format!("scraper entry '{entry}' must look like Name|url"))?;
            Ok(ScraperConfig {
                name: name.trim().to_string(),
                url: url.trim().to_string(),
            })
        })
        .collect()
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
