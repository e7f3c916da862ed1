use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::ScrapeError;
use crate::scrapers::traits::ScrapeTrigger;
use crate::scrapers::types::{ScraperConfig, ScrapingPayload};

/// Posts scraping payloads to workflow webhooks over HTTP
///
/// No request timeout is set: a workflow may hold the connection open for the
/// whole scrape.
#[derive(Clone)]
pub struct WebhookTrigger {
    client: Client,
}

impl WebhookTrigger {
    pub fn new() -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ScrapeTrigger for WebhookTrigger {
    async fn trigger(
        &self,
        scraper: &ScraperConfig,
        payload: &ScrapingPayload,
    ) -> Result<(), ScrapeError> {
        info!(
            "Triggering {} scraper for {} zone(s)",
            scraper.name,
            payload.zones.len()
        );
        debug!("Webhook URL: {}", scraper.url);

        let response = self.client.post(&scraper.url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("{} webhook returned {}: {}", scraper.name, status, message);
            return Err(ScrapeError::Webhook {
                status: status.as_u16(),
                message,
            });
        }

        info!("{} scraper accepted the request", scraper.name);
        Ok(())
    }
}
