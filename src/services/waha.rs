use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::models::poll::Poll;
use crate::services::sessions::SessionClient;

#[derive(Debug, Serialize)]
struct WahaPollOut {
    pub session: String,
    #[serde(rename = "chatId")]
    pub chat_id: String,
    pub poll: Poll,
}

/// WAHA-backed client for a single session; sends go through the shared WAHA
/// HTTP API with the session name in the body.
pub struct WahaClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    session: String,
}

impl WahaClient {
    pub fn new(
        http: reqwest::Client,
        base_url: Url,
        api_key: Option<String>,
        session: String,
    ) -> Self {
        Self {
            http,
            base_url,
            api_key,
            session,
        }
    }
}

#[async_trait]
impl SessionClient for WahaClient {
    async fn send_poll(&self, chat_id: &str, poll: &Poll) -> Result<(), String> {
        let url = self
            .base_url
            .join("/api/sendPoll")
            .map_err(|e| e.to_string())?;

        let payload = WahaPollOut {
            session: self.session.clone(),
            chat_id: chat_id.to_string(),
            poll: poll.clone(),
        };

        let mut req = self.http.post(url).json(&payload);
        if let Some(api_key) = &self.api_key {
            req = req.header("X-Api-Key", api_key);
        }

        let res = req
            .send()
            .await
            .map_err(|e| format!("request error: {e}"))?;
        if !res.status().is_success() {
            return Err(format!("waha status {}", res.status()));
        }
        Ok(())
    }
}
