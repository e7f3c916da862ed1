use serde::{Deserialize, Serialize};

use crate::scrapers::slug::slugify;

/// Zone label used when the user picks no zones
pub const DEFAULT_ZONE: &str = "Default";

/// A named scraping workflow and the webhook that starts it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScraperConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneScrapingInfo {
    pub zona: String,
    pub url: String,
}

/// Body posted to a scraper webhook
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrapingPayload {
    pub source: String,
    pub zones: Vec<ZoneScrapingInfo>,
}

/// Sale listing page for a zone on the portal.
pub fn zone_listing_url(portal: &str, zone: &str) -> String {
    format!(
        "{}/departamentos-venta-{}.html",
        portal.trim_end_matches('/'),
        slugify(zone)
    )
}

/// Build the webhook payload for the selected zones.
///
/// With nothing selected the workflow gets a single default entry pointing at
/// the scraper's own URL.
pub fn build_payload(scraper: &ScraperConfig, zones: &[String], portal: &str) -> ScrapingPayload {
    let mut entries: Vec<ZoneScrapingInfo> = zones
        .iter()
        .map(|zone| ZoneScrapingInfo {
            zona: zone.clone(),
            url: zone_listing_url(portal, zone),
        })
        .collect();

    if entries.is_empty() {
        entries.push(ZoneScrapingInfo {
            zona: DEFAULT_ZONE.to_string(),
            url: scraper.url.clone(),
        });
    }

    ScrapingPayload {
        source: scraper.name.clone(),
        zones: entries,
    }
}
