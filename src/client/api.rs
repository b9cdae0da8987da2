use reqwest::Client;
use serde_json::Value;

use crate::{entities::profile::ProfilePayload, errors::ClientError};

/// HTTP client for the profile API. Responses are returned as raw JSON
/// values; shape reconciliation lives in [`crate::client::view_state`]
/// because the server is not the only thing this client may talk to.
#[derive(Clone)]
pub struct ProfileApi {
    http: Client,
    base_url: String,
}

impl ProfileApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        ProfileApi {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn list(&self, page: u32, limit: u32) -> Result<Value, ClientError> {
        let url = format!("{}/api/profiles?page={}&limit={}", self.base_url, page, limit);
        self.get_json(&url).await
    }

    pub async fn search(&self, term: &str) -> Result<Value, ClientError> {
        let url = format!("{}/api/profiles/search/{}", self.base_url, term);
        self.get_json(&url).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Value, ClientError> {
        let url = format!("{}/api/profiles/{}", self.base_url, id);
        self.get_json(&url).await
    }

    pub async fn create(&self, payload: &ProfilePayload) -> Result<Value, ClientError> {
        let url = format!("{}/api/profiles", self.base_url);
        let response = self.http.post(url).json(payload).send().await?;
        Self::into_json(response).await
    }

    pub async fn update(&self, id: i64, payload: &ProfilePayload) -> Result<Value, ClientError> {
        let url = format!("{}/api/profiles/{}", self.base_url, id);
        let response = self.http.put(url).json(payload).send().await?;
        Self::into_json(response).await
    }

    async fn get_json(&self, url: &str) -> Result<Value, ClientError> {
        let response = self.http.get(url).send().await?;
        Self::into_json(response).await
    }

    async fn into_json(response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus(status.as_u16(), detail));
        }
        response.json::<Value>().await.map_err(ClientError::from)
    }
}
