use serde::{Deserialize, Serialize};

use crate::access::View;
use crate::models::{Property, PropertyStatus};

/// Inventory filter form
///
/// Price bounds are kept as the raw text the user typed; a blank bound is
/// open-ended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    /// `None` means all zones
    pub zone: Option<String>,
    pub min_price: String,
    pub max_price: String,
    /// `None` means all statuses
    pub status: Option<PropertyStatus>,
    pub show_only_opportunities: bool,
}

/// Parse a price bound, falling back to `default` when blank or not a number.
fn parse_bound(raw: &str, default: f64) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return default;
    }
    match raw.parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => default,
    }
}

impl Filters {
    pub fn price_range(&self) -> (f64, f64) {
        (
            parse_bound(&self.min_price, f64::NEG_INFINITY),
            parse_bound(&self.max_price, f64::INFINITY),
        )
    }

    /// The opportunities view always narrows to opportunities.
    pub fn opportunities_only(&self, view: View) -> bool {
        self.show_only_opportunities || view == View::Opportunities
    }

    pub fn matches(&self, property: &Property, view: View) -> bool {
        self.matches_within(property, view, self.price_range())
    }

    fn matches_within(&self, property: &Property, view: View, (min, max): (f64, f64)) -> bool {
        if self.opportunities_only(view) && !property.metrics.is_opportunity() {
            return false;
        }

        if property.price < min || property.price > max {
            return false;
        }

        if let Some(zone) = &self.zone {
            if property.zone.as_deref() != Some(zone.as_str()) {
                return false;
            }
        }

        if let Some(status) = self.status {
            if property.status != status {
                return false;
            }
        }

        true
    }

    /// Filter an already scored set, keeping input order.
    pub fn apply<'a>(&self, scored: &'a [Property], view: View) -> Vec<&'a Property> {
        let range = self.price_range();
        scored
            .iter()
            .filter(|p| self.matches_within(p, view, range))
            .collect()
    }
}
