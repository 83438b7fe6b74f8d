// 絵文字 API クライアント
// emoji.add へのアップロード（429 時は上限付きでリトライ）と emoji.remove

pub mod transport;

use crate::core::PublishOutcome;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use transport::{ApiRequest, ApiResponse, HttpTransport, ImagePart};

pub use transport::ReqwestTransport;

/// Slack Web API のベース URL
pub const SLACK_API_BASE: &str = "https://slack.com/api";

/// アップロード設定
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    base_url: String,
    max_attempts: u32,
    default_retry_after: Duration,
}

impl PublisherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 試行回数の上限（初回を含む、最低1回）
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Retry-After がない場合の初回待機時間
    pub fn with_default_retry_after(mut self, default_retry_after: Duration) -> Self {
        self.default_retry_after = default_retry_after;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn default_retry_after(&self) -> Duration {
        self.default_retry_after
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            base_url: SLACK_API_BASE.to_string(),
            max_attempts: 3,
            default_retry_after: Duration::from_secs(30),
        }
    }
}

/// API レスポンス本文の共通部分
#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl ApiStatus {
    /// JSON として読めない本文は失敗扱い
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or(Self {
            ok: false,
            error: None,
        })
    }
}

/// Retry-After ヘッダ（秒）を解釈する
fn parse_retry_after(value: Option<&str>) -> Option<Duration> {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// 絵文字 API クライアント
pub struct EmojiClient<T: HttpTransport> {
    transport: T,
    token: String,
    config: PublisherConfig,
}

impl<T: HttpTransport> EmojiClient<T> {
    pub fn new(transport: T, token: impl Into<String>, config: PublisherConfig) -> Self {
        Self {
            transport,
            token: token.into(),
            config,
        }
    }

    /// 断片を絵文字としてアップロードする
    ///
    /// 429 の場合は `Retry-After`（なければ直前の既定値）だけ待って再送し、
    /// 実際に待った時間の2倍を次の既定値にする。失敗はすべて戻り値で返す。
    pub async fn publish(&self, bytes: &[u8], name: &str) -> PublishOutcome {
        let max_attempts = self.config.max_attempts;
        let mut default_wait = self.config.default_retry_after;
        let mut attempt = 1;

        loop {
            let response = match self.transport.post(self.add_request(bytes, name)).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("アップロード失敗 {name}: {e:#}");
                    return PublishOutcome::TransportFailed {
                        message: format!("{e:#}"),
                    };
                }
            };

            match response.status {
                200 => return Self::interpret_add(name, response),
                429 if attempt < max_attempts => {
                    let wait =
                        parse_retry_after(response.retry_after.as_deref()).unwrap_or(default_wait);
                    warn!(
                        "Rate limit exceeded. Retrying in {} seconds... ({attempt} / {max_attempts})",
                        wait.as_secs()
                    );
                    tokio::time::sleep(wait).await;
                    default_wait = wait * 2;
                    attempt += 1;
                }
                429 => {
                    warn!("Rate limit retry failed: {name}");
                    return PublishOutcome::RateLimited {
                        attempts: attempt,
                        body: response.body,
                    };
                }
                status => {
                    debug!("emoji.add {name} returned HTTP {status}");
                    return PublishOutcome::Rejected {
                        status,
                        body: response.body,
                    };
                }
            }
        }
    }

    /// 登録済みの絵文字を削除する。成功したかどうかを返す
    pub async fn remove(&self, name: &str) -> bool {
        let request = ApiRequest {
            url: self.config.endpoint("emoji.remove"),
            token: self.token.clone(),
            fields: vec![("name".to_string(), name.to_string())],
            image: None,
        };

        match self.transport.post(request).await {
            Ok(response) => {
                let status = ApiStatus::parse(&response.body);
                if status.ok {
                    info!("削除しました: {name}");
                } else {
                    warn!(
                        "Remove {name} failed ({})",
                        status.error.as_deref().unwrap_or("unknown error")
                    );
                }
                status.ok
            }
            Err(e) => {
                warn!("Remove {name} failed: {e:#}");
                false
            }
        }
    }

    fn add_request(&self, bytes: &[u8], name: &str) -> ApiRequest {
        ApiRequest {
            url: self.config.endpoint("emoji.add"),
            token: self.token.clone(),
            fields: vec![
                ("mode".to_string(), "data".to_string()),
                ("name".to_string(), name.to_string()),
            ],
            image: Some(ImagePart {
                file_name: name.to_string(),
                bytes: bytes.to_vec(),
            }),
        }
    }

    fn interpret_add(name: &str, response: ApiResponse) -> PublishOutcome {
        if ApiStatus::parse(&response.body).ok {
            info!("アップロードしました: {name}");
            PublishOutcome::Published
        } else {
            warn!("Upload {name} failed:\n{}", response.body);
            PublishOutcome::Rejected {
                status: response.status,
                body: response.body,
            }
        }
    }
}
