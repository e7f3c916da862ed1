//! Opportunity scoring: price per weighted m² and discount against the zone
//! reference price.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Property, PropertyMetrics};

/// Uncovered and balcony space count at half the value of covered space.
pub const SECONDARY_AREA_WEIGHT: f64 = 0.5;

/// A zone needs this many priced peers before it has a reference average.
pub const MIN_ZONE_PEERS: usize = 2;

/// Area-only metrics for a single property.
pub fn area_metrics(property: &Property) -> PropertyMetrics {
    let covered = property.covered_area.unwrap_or(0.0);
    let uncovered = property.uncovered_area.unwrap_or(0.0);
    let balcony = property.balcony_area.unwrap_or(0.0);

    let total_area = covered + uncovered + balcony;
    let weighted_sqm =
        covered + SECONDARY_AREA_WEIGHT * uncovered + SECONDARY_AREA_WEIGHT * balcony;

    let price_per_sqm = if property.price > 0.0 && weighted_sqm > 0.0 {
        Some(property.price / weighted_sqm)
    } else {
        None
    };

    PropertyMetrics {
        total_area,
        weighted_sqm,
        price_per_sqm,
        zone_average_price_per_sqm: None,
        discount_percentage: None,
    }
}

/// Mean price per m² for every zone with at least [`MIN_ZONE_PEERS`] priced
/// properties. Values are summed in input order.
pub fn zone_averages(scored: &[Property]) -> BTreeMap<String, f64> {
    let mut by_zone: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for property in scored {
        if let (Some(zone), Some(ppsqm)) = (property.zone(), property.metrics.price_per_sqm) {
            by_zone.entry(zone).or_default().push(ppsqm);
        }
    }

    by_zone
        .into_iter()
        .filter(|(_, prices)| prices.len() >= MIN_ZONE_PEERS)
        .map(|(zone, prices)| {
            let sum: f64 = prices.iter().sum();
            (zone.to_string(), sum / prices.len() as f64)
        })
        .collect()
}

/// Run the full pipeline over the current property set.
///
/// Pure and deterministic: the same input always produces the same output.
/// Any metrics already present on the input are discarded and recomputed.
pub fn score(properties: &[Property]) -> Vec<Property> {
    let mut scored: Vec<Property> = properties
        .iter()
        .map(|p| Property {
            metrics: area_metrics(p),
            ..p.clone()
        })
        .collect();

    let averages = zone_averages(&scored);

    for property in &mut scored {
        let Some(zone) = property.zone() else { continue };
        let Some(&average) = averages.get(zone) else { continue };
        let Some(ppsqm) = property.metrics.price_per_sqm else { continue };

        property.metrics.zone_average_price_per_sqm = Some(average);
        property.metrics.discount_percentage = Some((ppsqm - average) / average * 100.0);
    }

    scored
}

/// Opportunities ordered deepest discount first, ties by id.
pub fn ranked_opportunities(scored: &[Property]) -> Vec<&Property> {
    let mut opportunities: Vec<&Property> =
        scored.iter().filter(|p| p.metrics.is_opportunity()).collect();
    opportunities.sort_by(|a, b| {
        let da = a.metrics.discount_percentage.unwrap_or(0.0);
        let db = b.metrics.discount_percentage.unwrap_or(0.0);
        da.total_cmp(&db).then_with(|| a.id.cmp(&b.id))
    });
    opportunities
}

/// Per-zone roll-up for the comparative analysis view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSummary {
    pub zone: String,
    pub properties: usize,
    pub priced: usize,
    pub average_price_per_sqm: Option<f64>,
    pub opportunities: usize,
    pub best_discount: Option<f64>,
}

pub fn zone_summaries(scored: &[Property]) -> Vec<ZoneSummary> {
    let mut summaries: BTreeMap<&str, ZoneSummary> = BTreeMap::new();

    for property in scored {
        let Some(zone) = property.zone() else { continue };
        let summary = summaries.entry(zone).or_insert_with(|| ZoneSummary {
            zone: zone.to_string(),
            properties: 0,
            priced: 0,
            average_price_per_sqm: None,
            opportunities: 0,
            best_discount: None,
        });

        summary.properties += 1;
        if property.metrics.price_per_sqm.is_some() {
            summary.priced += 1;
        }
        if summary.average_price_per_sqm.is_none() {
            summary.average_price_per_sqm = property.metrics.zone_average_price_per_sqm;
        }
        if property.metrics.is_opportunity() {
            summary.opportunities += 1;
        }
        if let Some(discount) = property.metrics.discount_percentage {
            summary.best_discount = Some(match summary.best_discount {
                Some(best) => best.min(discount),
                None => discount,
            });
        }
    }

    summaries.into_values().collect()
}
