pub mod slug;
pub mod traits;
pub mod types;
pub mod webhook;

pub use slug::slugify;
pub use traits::ScrapeTrigger;
pub use types::{build_payload, zone_listing_url, ScraperConfig, ScrapingPayload, ZoneScrapingInfo};
pub use webhook::WebhookTrigger;
