use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Property, PropertyStatus};

/// Pipeline counts for the metrics and strategy views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineMetrics {
    pub total: usize,
    pub by_status: BTreeMap<PropertyStatus, usize>,
    /// Listings not yet discarded or acquired
    pub active: usize,
    pub opportunities: usize,
    pub average_opportunity_discount: Option<f64>,
    /// Sum of asking prices per currency
    pub listed_value: BTreeMap<String, f64>,
}

impl PipelineMetrics {
    pub fn from_scored(scored: &[Property]) -> Self {
        let mut by_status: BTreeMap<PropertyStatus, usize> =
            PropertyStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        let mut listed_value: BTreeMap<String, f64> = BTreeMap::new();
        let mut discounts = Vec::new();

        for property in scored {
            *by_status.entry(property.status).or_default() += 1;
            *listed_value.entry(property.currency.clone()).or_default() += property.price;
            if property.metrics.is_opportunity() {
                discounts.extend(property.metrics.discount_percentage);
            }
        }

        let active = scored.iter().filter(|p| !p.status.is_terminal()).count();
        let average_opportunity_discount = if discounts.is_empty() {
            None
        } else {
            Some(discounts.iter().sum::<f64>() / discounts.len() as f64)
        };

        Self {
            total: scored.len(),
            by_status,
            active,
            opportunities: discounts.len(),
            average_opportunity_discount,
            listed_value,
        }
    }
}
