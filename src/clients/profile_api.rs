use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use tracing::instrument;

use super::{read_envelope, with_auth};
use crate::core::AppError;
use crate::models::profile::{ProfileUpdate, RemoteService, SalonProfile};

#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn get_profile(&self) -> Result<SalonProfile, AppError>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<SalonProfile, AppError>;

    async fn get_services(&self) -> Result<Vec<RemoteService>, AppError>;
}

pub struct HttpProfileApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<Secret<String>>,
}

impl HttpProfileApi {
    pub fn new(http: reqwest::Client, base_url: &str, token: Option<Secret<String>>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose_secret().as_str())
    }
}

#[async_trait]
impl ProfileApi for HttpProfileApi {
    #[instrument(name = "Fetch Salon Profile", skip(self))]
    async fn get_profile(&self) -> Result<SalonProfile, AppError> {
        let response = with_auth(self.http.get(self.url("/profile")), self.token())
            .send()
            .await?;
        read_envelope(response).await
    }

    #[instrument(name = "Update Salon Profile", skip(self, update))]
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<SalonProfile, AppError> {
        let response = with_auth(self.http.put(self.url("/profile")), self.token())
            .json(update)
            .send()
            .await?;
        read_envelope(response).await
    }

    #[instrument(name = "Fetch Services", skip(self))]
    async fn get_services(&self) -> Result<Vec<RemoteService>, AppError> {
        let response = with_auth(self.http.get(self.url("/services")), self.token())
            .send()
            .await?;
        read_envelope(response).await
    }
}
