use thiserror::Error;

use crate::access::View;

/// Failures talking to the hosted backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{table} row not found: {id}")]
    NotFound { table: &'static str, id: String },
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Auth API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook returned status {status}: {message}")]
    Webhook { status: u16, message: String },
}

/// Reasons a signed-in session could not be turned into a user
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("profile not found for {email}")]
    ProfileMissing { email: String },

    #[error("profile lookup failed: {0}")]
    Store(#[from] StoreError),

    #[error("profile lookup timed out after {0:?}")]
    Timeout(std::time::Duration),
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Error al actualizar el estado: {source}")]
    StatusUpdateFailed {
        property_id: String,
        #[source]
        source: StoreError,
    },

    #[error("property {0} is not loaded")]
    PropertyNotFound(String),

    #[error("view {0:?} is not available for this role")]
    Forbidden(View),
}
