use std::sync::Arc;

use anyhow::Context;
use sourcing_scout::models::{Role, UserProfile};
use sourcing_scout::store::{DataStore, RestStore};
use sourcing_scout::{Config, Dashboard};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .init();

    info!("🏠 Sourcing Scout v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn DataStore> = Arc::new(
        RestStore::new(&config.backend_url, &config.backend_anon_key)
            .context("Failed to create backend client")?,
    );

    // Read-only report with the anon key
    let viewer = UserProfile {
        id: "cli".to_string(),
        email: "cli@localhost".to_string(),
        role: Role::User,
    };
    let mut dashboard = Dashboard::new(store, viewer).with_config(&config);
    dashboard
        .load_properties()
        .await
        .context("Failed to load properties")?;

    let metrics = dashboard.metrics();
    info!(
        "{} properties, {} active, {} opportunities",
        metrics.total, metrics.active, metrics.opportunities
    );
    for (status, count) in &metrics.by_status {
        println!("{:<16} {}", status.as_str(), count);
    }
    println!();

    println!("Zones:");
    for zone in dashboard.zone_summaries() {
        match zone.average_price_per_sqm {
            Some(avg) => println!(
                "  {}: {} listings, avg {:.0}/m², {} opportunities",
                zone.zone, zone.properties, avg, zone.opportunities
            ),
            None => println!("  {}: {} listings, not enough comparables", zone.zone, zone.properties),
        }
    }
    println!();

    println!("Opportunities:");
    for (i, property) in dashboard.opportunities().iter().enumerate() {
        let m = &property.metrics;
        println!(
            "{}. {} ({} {:.0})",
            i + 1,
            property.title,
            property.currency,
            property.price
        );
        println!(
            "   {} · {} · {:.0}/m² vs {:.0}/m² ({:+.1}%)",
            property.location,
            property.zone().unwrap_or("-"),
            m.price_per_sqm.unwrap_or_default(),
            m.zone_average_price_per_sqm.unwrap_or_default(),
            m.discount_percentage.unwrap_or_default()
        );
        println!("   {}", property.link);
    }

    if !config.all_scrapers().is_empty() {
        info!(
            "Configured scrapers: {}",
            config
                .all_scrapers()
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(())
}
