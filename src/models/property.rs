use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a sourced listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyStatus {
    New,
    Contacted,
    #[serde(rename = "Visit Scheduled")]
    VisitScheduled,
    Negotiating,
    Discarded,
    Acquired,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 6] = [
        PropertyStatus::New,
        PropertyStatus::Contacted,
        PropertyStatus::VisitScheduled,
        PropertyStatus::Negotiating,
        PropertyStatus::Discarded,
        PropertyStatus::Acquired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::New => "New",
            PropertyStatus::Contacted => "Contacted",
            PropertyStatus::VisitScheduled => "Visit Scheduled",
            PropertyStatus::Negotiating => "Negotiating",
            PropertyStatus::Discarded => "Discarded",
            PropertyStatus::Acquired => "Acquired",
        }
    }

    /// Discarded and Acquired close the pipeline.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PropertyStatus::Discarded | PropertyStatus::Acquired)
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values derived from a property's own areas and its zone peers.
///
/// Recomputed on every load by [`crate::scoring::score`]; never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PropertyMetrics {
    pub total_area: f64,
    pub weighted_sqm: f64,
    pub price_per_sqm: Option<f64>,
    pub zone_average_price_per_sqm: Option<f64>,
    pub discount_percentage: Option<f64>,
}

impl PropertyMetrics {
    /// Cheaper per m² than the zone reference.
    pub fn is_opportunity(&self) -> bool {
        matches!(self.discount_percentage, Some(d) if d < 0.0)
    }
}

/// A scraped listing as stored in the `propiedades` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "moneda")]
    pub currency: String,
    /// Street address
    #[serde(rename = "ubicacion")]
    pub location: String,
    /// Neighborhood used for comparative pricing
    #[serde(rename = "zona", default)]
    pub zone: Option<String>,
    pub link: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: PropertyStatus,
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(rename = "dias_en_mercado", default)]
    pub days_on_market: Option<u32>,
    /// Total area as reported by the portal
    #[serde(rename = "total_area", default)]
    pub listed_total_area: Option<f64>,
    #[serde(default)]
    pub covered_area: Option<f64>,
    #[serde(default)]
    pub uncovered_area: Option<f64>,
    #[serde(default)]
    pub balcony_area: Option<f64>,
    #[serde(rename = "visualizaciones", default)]
    pub views: Option<u64>,

    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(skip)]
    pub metrics: PropertyMetrics,
}

impl Property {
    /// Zone label, treating an empty label as missing.
    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref().filter(|z| !z.is_empty())
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_backend_row() {
        let row = json!({
            "id": "p-1",
            "created_at": "2025-03-01T10:00:00+00:00",
            "titulo": "Depto 2 amb",
            "precio": 120000,
            "moneda": "USD",
            "ubicacion": "Honduras 5000",
            "zona": "Palermo",
            "link": "https://example.com/p-1",
            "image_url": null,
            "bedrooms": 1,
            "bathrooms": 1,
            "description": null,
            "status": "Visit Scheduled",
            "seller_name": "Inmobiliaria Sur",
            "dias_en_mercado": 12,
            "total_area": 55,
            "covered_area": 48,
            "uncovered_area": null,
            "balcony_area": 7,
            "visualizaciones": 340,
            "latitude": null,
            "longitude": null
        });

        let property: Property = serde_json::from_value(row).unwrap();
        assert_eq!(property.title, "Depto 2 amb");
        assert_eq!(property.status, PropertyStatus::VisitScheduled);
        assert_eq!(property.zone(), Some("Palermo"));
        assert_eq!(property.balcony_area, Some(7.0));
        assert_eq!(property.metrics, PropertyMetrics::default());
        assert_eq!(property.coordinates(), None);
    }

    #[test]
    fn metrics_are_not_serialized() {
        let row = json!({
            "id": "p-2",
            "created_at": "2025-03-01T10:00:00Z",
            "titulo": "PH",
            "precio": 90000,
            "moneda": "USD",
            "ubicacion": "Acoyte 100",
            "link": "https://example.com/p-2",
            "status": "New"
        });
        let mut property: Property = serde_json::from_value(row).unwrap();
        property.metrics.discount_percentage = Some(-10.0);

        let value = serde_json::to_value(&property).unwrap();
        assert!(value.get("metrics").is_none());
        assert_eq!(value["precio"], json!(90000.0));
    }

    #[test]
    fn empty_zone_counts_as_missing() {
        let row = json!({
            "id": "p-3",
            "created_at": "2025-03-01T10:00:00Z",
            "titulo": "Monoambiente",
            "precio": 50000,
            "moneda": "USD",
            "ubicacion": "Salguero 10",
            "zona": "",
            "link": "https://example.com/p-3",
            "status": "New"
        });
        let property: Property = serde_json::from_value(row).unwrap();
        assert_eq!(property.zone(), None);
    }
}
