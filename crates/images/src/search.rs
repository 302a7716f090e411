use std::time::Duration;

use serde::Deserialize;

use tw_domain::config::ImagesConfig;

use crate::error::ImageError;

/// An image lookup backend.
#[async_trait::async_trait]
pub trait ImageSearch: Send + Sync {
    /// Candidate image URLs for `query`, best first. At most `limit`.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, ImageError>;

    /// Whether `url` currently serves an image. Never errors; an
    /// unreachable, slow or non-image URL is simply `false`.
    async fn verify(&self, url: &str) -> bool;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Google Custom Search
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Custom Search JSON API in image mode.
pub struct GoogleImageSearch {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    engine_id: String,
    verify_timeout: Duration,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    link: String,
}

impl GoogleImageSearch {
    /// Build a client from the env vars named in `config`. `None` when
    /// either credential is missing, which turns enrichment off.
    pub fn from_config(config: &ImagesConfig) -> Result<Option<Self>, ImageError> {
        let key = non_empty_env(&config.api_key_env);
        let cx = non_empty_env(&config.engine_id_env);
        let (Some(api_key), Some(engine_id)) = (key, cx) else {
            tracing::warn!(
                api_key_env = %config.api_key_env,
                engine_id_env = %config.engine_id_env,
                "image search credentials not set, images will be skipped"
            );
            return Ok(None);
        };

        Self::new(
            &config.search_base_url,
            api_key,
            engine_id,
            Duration::from_secs(config.verify_timeout_secs),
        )
        .map(Some)
    }

    pub fn new(
        base_url: &str,
        api_key: String,
        engine_id: String,
        verify_timeout: Duration,
    ) -> Result<Self, ImageError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            engine_id,
            verify_timeout,
        })
    }

    async fn probe(&self, method: reqwest::Method, url: &str) -> Option<reqwest::Response> {
        match self
            .client
            .request(method, url)
            .timeout(self.verify_timeout)
            .send()
            .await
        {
            Ok(resp) => Some(resp),
            Err(e) => {
                tracing::debug!(url, error = %e, "image url check failed");
                None
            }
        }
    }
}

/// A successful response whose `Content-Type` is `image/*`.
pub fn is_image_response(status: reqwest::StatusCode, content_type: Option<&str>) -> bool {
    status.is_success()
        && content_type.is_some_and(|ct| {
            ct.trim_start()
                .get(..6)
                .is_some_and(|p| p.eq_ignore_ascii_case("image/"))
        })
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[async_trait::async_trait]
impl ImageSearch for GoogleImageSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, ImageError> {
        // The API caps `num` at 10.
        let num = limit.clamp(1, 10).to_string();
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("searchType", "image"),
                ("num", num.as_str()),
                ("safe", "active"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ImageError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let parsed: SearchResponse = resp.json().await?;
        Ok(parsed
            .items
            .into_iter()
            .map(|i| i.link)
            .filter(|l| l.starts_with("http"))
            .take(limit)
            .collect())
    }

    async fn verify(&self, url: &str) -> bool {
        let Some(mut resp) = self.probe(reqwest::Method::HEAD, url).await else {
            return false;
        };
        // Some hosts refuse HEAD; ask again with GET under the same timeout.
        if resp.status() == reqwest::StatusCode::METHOD_NOT_ALLOWED {
            match self.probe(reqwest::Method::GET, url).await {
                Some(r) => resp = r,
                None => return false,
            }
        }
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        let ok = is_image_response(resp.status(), content_type);
        if !ok {
            tracing::debug!(url, status = %resp.status(), ?content_type, "not an image");
        }
        ok
    }
}
