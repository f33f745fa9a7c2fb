use crate::constants::{ALL_FOLDER_ID, API_BASE_URL, USER_AGENT};
use crate::error::{AppError, Result};
use crate::models::{
    CollectionPage, CollectionValue, Folder, FolderList, MarketStats, StatsEnvelope,
};
use async_trait::async_trait;
use isahc::{config::Configurable, prelude::*, HttpClient};
use serde::de::DeserializeOwned;
use std::time::Duration as StdDuration;

const RATELIMIT_REMAINING_HEADER: &str = "x-discogs-ratelimit-remaining";

/// The slice of the Discogs API the sync loop consumes. Kept behind a
/// trait so the pagination, pricing and reconciliation logic can run
/// against a scripted in-memory host in tests.
#[async_trait]
pub trait DiscogsApi: Send + Sync {
    /// All collection folders of the user.
    async fn list_folders(&self, username: &str) -> Result<Vec<Folder>>;

    /// One page of the "All" folder listing.
    async fn collection_page(&self, username: &str, page: u32, per_page: u32)
        -> Result<CollectionPage>;

    /// Create a new folder and return it with its assigned id.
    async fn create_folder(&self, username: &str, name: &str) -> Result<Folder>;

    /// Move one release instance from its current folder to another.
    async fn move_instance(
        &self,
        username: &str,
        folder_id: u64,
        release_id: u64,
        instance_id: u64,
        target_folder_id: u64,
    ) -> Result<()>;

    /// Marketplace stats for a release, with the response's remaining
    /// rate-limit quota.
    async fn marketplace_stats(&self, release_id: u64, currency_code: &str)
        -> Result<StatsEnvelope>;

    /// Estimated min/median/max value of the whole collection.
    async fn collection_value(&self, username: &str) -> Result<CollectionValue>;
}

/// Authenticated Discogs REST client.
pub struct DiscogsClient {
    client: HttpClient,
    base_url: String,
    token: String,
}

impl DiscogsClient {
    pub fn new(token: &str) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(StdDuration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
            token: token.to_string(),
        })
    }

    /// Override the API root, used by network-backed tests.
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn request(&self, method: &str, path: &str) -> isahc::http::request::Builder {
        isahc::Request::builder()
            .uri(format!("{}{}", self.base_url, path))
            .method(method)
            .header("Authorization", format!("Discogs token={}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
    }

    /// Send a request and decode the JSON body, surfacing HTTP-level
    /// failures as API errors with status context.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: isahc::Request<String>,
    ) -> Result<(T, Option<u64>)> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        tracing::debug!("DISCOGS_REQUEST: {} {}", method, uri);

        let mut response = self.client.send_async(request).await?;
        let status = response.status();
        let remaining = response
            .headers()
            .get(RATELIMIT_REMAINING_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());

        tracing::debug!(
            "DISCOGS_RESPONSE: {} {} -> {} (ratelimit remaining: {:?})",
            method,
            uri,
            status,
            remaining
        );

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown");
            if status == 404 {
                return Err(AppError::NotFound(format!("{} {}", method, uri)));
            }
            return Err(AppError::Api(format!(
                "{} {} failed: {} {}",
                method,
                uri,
                status.as_u16(),
                reason
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Response body error: {}", e)))?;
        let body = serde_json::from_str::<T>(&text)?;
        Ok((body, remaining))
    }

    /// Send a request where only the status matters (Discogs answers the
    /// move-instance POST with 204 No Content).
    async fn send_expect_success(&self, request: isahc::Request<String>) -> Result<()> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        tracing::debug!("DISCOGS_REQUEST: {} {}", method, uri);

        let response = self.client.send_async(request).await?;
        let status = response.status();

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown");
            return Err(AppError::Api(format!(
                "{} {} failed: {} {}",
                method,
                uri,
                status.as_u16(),
                reason
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DiscogsApi for DiscogsClient {
    async fn list_folders(&self, username: &str) -> Result<Vec<Folder>> {
        let request = self
            .request("GET", &format!("/users/{}/collection/folders", username))
            .body(String::new())
            .map_err(|e| AppError::Other(format!("Request build error: {}", e)))?;

        let (list, _) = self.send_json::<FolderList>(request).await?;
        Ok(list.folders)
    }

    async fn collection_page(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<CollectionPage> {
        let request = self
            .request(
                "GET",
                &format!(
                    "/users/{}/collection/folders/{}/releases?page={}&per_page={}",
                    username, ALL_FOLDER_ID, page, per_page
                ),
            )
            .body(String::new())
            .map_err(|e| AppError::Other(format!("Request build error: {}", e)))?;

        let (body, _) = self.send_json::<CollectionPage>(request).await?;
        Ok(body)
    }

    async fn create_folder(&self, username: &str, name: &str) -> Result<Folder> {
        let body = serde_json::to_string(&serde_json::json!({ "name": name }))?;
        let request = self
            .request("POST", &format!("/users/{}/collection/folders", username))
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|e| AppError::Other(format!("Request build error: {}", e)))?;

        let (folder, _) = self.send_json::<Folder>(request).await?;
        Ok(folder)
    }

    async fn move_instance(
        &self,
        username: &str,
        folder_id: u64,
        release_id: u64,
        instance_id: u64,
        target_folder_id: u64,
    ) -> Result<()> {
        let body = serde_json::to_string(&serde_json::json!({ "folder_id": target_folder_id }))?;
        let request = self
            .request(
                "POST",
                &format!(
                    "/users/{}/collection/folders/{}/releases/{}/instances/{}",
                    username, folder_id, release_id, instance_id
                ),
            )
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|e| AppError::Other(format!("Request build error: {}", e)))?;

        self.send_expect_success(request).await
    }

    async fn marketplace_stats(
        &self,
        release_id: u64,
        currency_code: &str,
    ) -> Result<StatsEnvelope> {
        let request = self
            .request(
                "GET",
                &format!(
                    "/marketplace/stats/{}?curr_abbr={}",
                    release_id, currency_code
                ),
            )
            .body(String::new())
            .map_err(|e| AppError::Other(format!("Request build error: {}", e)))?;

        let (stats, remaining) = self.send_json::<MarketStats>(request).await?;
        Ok(StatsEnvelope {
            stats,
            requests_remaining: remaining,
        })
    }

    async fn collection_value(&self, username: &str) -> Result<CollectionValue> {
        let request = self
            .request("GET", &format!("/users/{}/collection/value", username))
            .body(String::new())
            .map_err(|e| AppError::Other(format!("Request build error: {}", e)))?;

        let (value, _) = self.send_json::<CollectionValue>(request).await?;
        Ok(value)
    }
}
