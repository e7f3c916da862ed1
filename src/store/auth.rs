use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::AuthError;
use crate::session::Session;

/// External identity provider
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Invalidate the session on the provider side.
    async fn sign_out(&self, session: &Session) -> Result<(), AuthError>;
}

/// Auth endpoint of the hosted backend
#[derive(Clone)]
pub struct RestAuth {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl RestAuth {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self, AuthError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }
}

#[async_trait]
impl AuthGateway for RestAuth {
    async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        let response = self
            .client
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Sign out for {} failed with {}", session.email, status);
            return Err(AuthError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!("Signed out {}", session.email);
        Ok(())
    }
}
