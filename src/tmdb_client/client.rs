/// TMDB HTTP 客户端
/// 内置超时、有限重试与退避；只发 GET，不做缓存

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::RemoteFetchError;
use crate::types::tmdb::TmdbErrorBody;

/// 客户端选项
#[derive(Debug, Clone)]
pub struct TmdbClientOptions {
    pub timeout_ms: u64,
    pub max_retries: u32,
    /// 首次重试延迟，之后逐次翻倍
    pub retry_delay_ms: u64,
}

impl Default for TmdbClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10000,
            max_retries: 3,
            retry_delay_ms: 300,
        }
    }
}

#[derive(Debug)]
pub struct TmdbClient {
    base_url: String,
    api_key: String,
    language: String,
    region: String,
    options: TmdbClientOptions,
    http: Client,
}

impl TmdbClient {
    pub fn new(config: &AppConfig, options: TmdbClientOptions) -> Self {
        let http = Client::builder()
            .timeout(std::time::Duration::from_millis(options.timeout_ms))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            region: config.region.clone(),
            options,
            http,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// GET 请求，自动附带 api_key 与 language
    /// 传输错误与 5xx 退避后重试，4xx 与解析失败立即返回
    pub async fn get<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, RemoteFetchError> {
        let url = format!("{}{}", self.base_url, path);
        let mut delay_ms = self.options.retry_delay_ms;
        let mut attempt: u32 = 0;

        loop {
            debug!("[TMDB] GET {} (attempt={})", url, attempt);
            let result = self
                .http
                .get(&url)
                .query(&[
                    ("api_key", self.api_key.as_str()),
                    ("language", self.language.as_str()),
                ])
                .query(params)
                .send()
                .await;

            match result {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let text = resp.text().await.map_err(|e| RemoteFetchError::Network {
                            resource,
                            message: e.to_string(),
                        })?;
                        return serde_json::from_str::<T>(&text).map_err(|e| {
                            RemoteFetchError::Decode {
                                resource,
                                message: e.to_string(),
                            }
                        });
                    }

                    // 5xx 重试，4xx 直接失败
                    if status.is_server_error() && attempt < self.options.max_retries {
                        warn!("[TMDB] {} 返回 {}，{}ms 后重试", resource, status, delay_ms);
                    } else {
                        let message = resp
                            .text()
                            .await
                            .ok()
                            .and_then(|t| serde_json::from_str::<TmdbErrorBody>(&t).ok())
                            .map(|b| b.status_message)
                            .unwrap_or_default();
                        if !message.is_empty() {
                            debug!("[TMDB] {} 上游消息: {}", resource, message);
                        }
                        return Err(RemoteFetchError::Http {
                            resource,
                            status: status.as_u16(),
                        });
                    }
                }
                Err(err) => {
                    if attempt >= self.options.max_retries {
                        if err.is_timeout() {
                            return Err(RemoteFetchError::Timeout { resource });
                        }
                        return Err(RemoteFetchError::Network {
                            resource,
                            message: err.to_string(),
                        });
                    }
                    warn!("[TMDB] {} 请求失败: {}，{}ms 后重试", resource, err, delay_ms);
                }
            }

            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
            delay_ms *= 2;
            attempt += 1;
        }
    }
}
