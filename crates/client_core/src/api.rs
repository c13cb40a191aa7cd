//! HTTP access to the streak backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    error::ErrorBody,
    protocol::{
        AchievementsResponse, SessionLogRequest, StatisticsResponse, StreakBonus,
        StreaksResponse, TimeResponse, WeeklyActivity,
    },
};
use tracing::debug;
use url::Url;

use crate::{config::ClientSettings, error::ClientError};

pub const TIME_PATH: &str = "api/time";
pub const LOG_SESSION_PATH: &str = "api/log_session";
pub const OVERALL_STATISTICS_PATH: &str = "api/statistics/overall";
pub const WEEKLY_TREND_PATH: &str = "api/statistics/weekly_trend";
pub const ACHIEVEMENTS_PATH: &str = "api/statistics/achievements";
pub const STREAKS_PATH: &str = "api/statistics/streaks";
pub const STREAK_BONUSES_PATH: &str = "api/bonuses/streaks";

/// The two calls the state controller depends on.
#[async_trait]
pub trait StreakApi: Send + Sync {
    async fn fetch_time(&self) -> Result<TimeResponse, ClientError>;
    async fn log_session(&self, request: &SessionLogRequest)
        -> Result<TimeResponse, ClientError>;
}

#[async_trait]
impl<T: StreakApi + ?Sized> StreakApi for std::sync::Arc<T> {
    async fn fetch_time(&self) -> Result<TimeResponse, ClientError> {
        (**self).fetch_time().await
    }

    async fn log_session(
        &self,
        request: &SessionLogRequest,
    ) -> Result<TimeResponse, ClientError> {
        (**self).log_session(request).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpStreakApi {
    http: Client,
    base_url: Url,
}

impl HttpStreakApi {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        Self::with_client(server_url, Client::new())
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|source| ClientError::Transport {
            endpoint: settings.server_url.clone(),
            source,
        })?;
        Self::with_client(&settings.server_url, http)
    }

    pub fn with_client(server_url: &str, http: Client) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base_url: validate_server_url(server_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ClientError::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                reason: err.to_string(),
            })
    }

    pub async fn overall_statistics(&self) -> Result<StatisticsResponse, ClientError> {
        self.get_json(OVERALL_STATISTICS_PATH).await
    }

    pub async fn weekly_trend(&self) -> Result<Vec<WeeklyActivity>, ClientError> {
        self.get_json(WEEKLY_TREND_PATH).await
    }

    pub async fn achievements(&self) -> Result<AchievementsResponse, ClientError> {
        self.get_json(ACHIEVEMENTS_PATH).await
    }

    pub async fn streaks(&self) -> Result<StreaksResponse, ClientError> {
        self.get_json(STREAKS_PATH).await
    }

    pub async fn streak_bonuses(&self) -> Result<Vec<StreakBonus>, ClientError> {
        self.get_json(STREAK_BONUSES_PATH).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        debug!(endpoint = %url, "GET");
        let request = self.http.get(url.clone());
        read_json(url, request).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(endpoint = %url, "POST");
        let request = self.http.post(url.clone()).json(body);
        read_json(url, request).await
    }
}

#[async_trait]
impl StreakApi for HttpStreakApi {
    async fn fetch_time(&self) -> Result<TimeResponse, ClientError> {
        self.get_json(TIME_PATH).await
    }

    async fn log_session(
        &self,
        request: &SessionLogRequest,
    ) -> Result<TimeResponse, ClientError> {
        self.post_json(LOG_SESSION_PATH, request).await
    }
}

async fn read_json<T: DeserializeOwned>(
    url: Url,
    request: reqwest::RequestBuilder,
) -> Result<T, ClientError> {
    let endpoint = url.to_string();
    let res = request
        .send()
        .await
        .map_err(|source| ClientError::Transport {
            endpoint: endpoint.clone(),
            source,
        })?;
    let status = res.status();
    let body = res.bytes().await.map_err(|source| ClientError::Transport {
        endpoint: endpoint.clone(),
        source,
    })?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .map(|err| err.error)
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).trim().to_string());
        return Err(ClientError::Status {
            endpoint,
            status,
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|source| ClientError::Decode { endpoint, source })
}

/// Parses `server_url` and guarantees a trailing slash so relative endpoint
/// paths append to any path prefix instead of replacing it.
pub fn validate_server_url(server_url: &str) -> Result<Url, ClientError> {
    let trimmed = server_url.trim();
    let invalid = |reason: String| ClientError::InvalidUrl {
        url: trimmed.to_string(),
        reason,
    };

    let mut url = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("url cannot be used as a base".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
