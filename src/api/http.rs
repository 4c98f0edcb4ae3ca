use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;

use super::F1Api;
use crate::PitwallError;
use crate::config::ApiConfig;
use crate::model::{ChampionRecord, RaceRecord, Season};

/// `F1Api` backed by the REST backend described by an [`ApiConfig`].
pub struct HttpF1Api {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpF1Api {
    pub fn new(config: ApiConfig) -> Result<Self, PitwallError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_s))
            .user_agent(concat!("pitwall/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PitwallError::HttpClientError { source: e })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, PitwallError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PitwallError::RequestError {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PitwallError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PitwallError::DecodeError { url, source: e })
    }
}

#[async_trait]
impl F1Api for HttpF1Api {
    async fn champions(&self) -> Result<Vec<ChampionRecord>, PitwallError> {
        self.get_json(self.config.champions_url()).await
    }

    async fn races(&self, season: Season) -> Result<Vec<RaceRecord>, PitwallError> {
        self.get_json(self.config.races_url(season)).await
    }
}
