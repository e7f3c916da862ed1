use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Property;

/// Stage of a CRM lead
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OwnerStatus {
    #[serde(rename = "Nuevo Lead")]
    NuevoLead,
    #[serde(rename = "Tasación Agendada")]
    TasacionAgendada,
    #[serde(rename = "Tasación Entregada")]
    TasacionEntregada,
    #[serde(rename = "En Seguimiento")]
    EnSeguimiento,
    Captado,
    Descartado,
}

impl OwnerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerStatus::NuevoLead => "Nuevo Lead",
            OwnerStatus::TasacionAgendada => "Tasación Agendada",
            OwnerStatus::TasacionEntregada => "Tasación Entregada",
            OwnerStatus::EnSeguimiento => "En Seguimiento",
            OwnerStatus::Captado => "Captado",
            OwnerStatus::Descartado => "Descartado",
        }
    }
}

impl Default for OwnerStatus {
    fn default() -> Self {
        OwnerStatus::NuevoLead
    }
}

impl fmt::Display for OwnerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRM lead stored in the `propietarios` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Owner {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "nombre_propietario")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "direccion_propiedad")]
    pub property_address: String,
    #[serde(rename = "estado")]
    pub status: OwnerStatus,
    #[serde(rename = "notas", default)]
    pub notes: Option<String>,
    #[serde(rename = "fecha_visita", default)]
    pub visit_date: Option<String>,
    #[serde(rename = "valor_tasacion", default)]
    pub appraisal_value: Option<f64>,
}

/// Insert payload for a new lead
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewOwner {
    #[serde(rename = "nombre_propietario")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "direccion_propiedad")]
    pub property_address: String,
    #[serde(rename = "estado")]
    pub status: OwnerStatus,
    #[serde(rename = "notas", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "fecha_visita", skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<String>,
    #[serde(rename = "valor_tasacion", skip_serializing_if = "Option::is_none")]
    pub appraisal_value: Option<f64>,
}

impl NewOwner {
    /// Snapshot a listing into a fresh lead.
    ///
    /// The lead keeps no reference to the property; later edits to either side
    /// do not propagate.
    pub fn from_property(property: &Property, name: Option<String>) -> Self {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| property.seller_name.clone())
            .unwrap_or_default();

        let notes = format!(
            "{}\nPrecio publicado: {} {:.0}\n{}",
            property.title, property.currency, property.price, property.link
        );

        Self {
            name,
            email: None,
            phone: None,
            property_address: property.location.clone(),
            status: OwnerStatus::NuevoLead,
            notes: Some(notes),
            visit_date: None,
            appraisal_value: None,
        }
    }
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct OwnerUpdate {
    #[serde(rename = "nombre_propietario", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "direccion_propiedad", skip_serializing_if = "Option::is_none")]
    pub property_address: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<OwnerStatus>,
    #[serde(rename = "notas", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "fecha_visita", skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<String>,
    #[serde(rename = "valor_tasacion", skip_serializing_if = "Option::is_none")]
    pub appraisal_value: Option<f64>,
}
