use async_trait::async_trait;

use crate::error::ScrapeError;
use crate::scrapers::types::{ScraperConfig, ScrapingPayload};

/// Starts an external scraping workflow.
///
/// The workflow writes listings to the backend on its own schedule; a
/// successful trigger only means the request was accepted.
#[async_trait]
pub trait ScrapeTrigger: Send + Sync {
    async fn trigger(
        &self,
        scraper: &ScraperConfig,
        payload: &ScrapingPayload,
    ) -> Result<(), ScrapeError>;
}
