// HTTP 送信層の抽象化と reqwest による実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use mockall::automock;
use reqwest::header::RETRY_AFTER;
use reqwest::multipart::{Form, Part};

/// multipart で送る画像パート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// API へのリクエスト
///
/// `image` があれば multipart/form-data、なければ url-encoded フォームで送る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub token: String,
    pub fields: Vec<(String, String)>,
    pub image: Option<ImagePart>,
}

impl ApiRequest {
    /// フィールド値を名前で取得
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// API からのレスポンス（ステータス・Retry-After・本文のみ保持）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub retry_after: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    pub fn with_retry_after(mut self, retry_after: impl Into<String>) -> Self {
        self.retry_after = Some(retry_after.into());
        self
    }
}

/// HTTP 送信バックエンドのトレイト
#[automock]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST を1回送信する（リトライしない）
    async fn post(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// reqwest による送信実装
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: ApiRequest) -> Result<ApiResponse> {
        let builder = self
            .client
            .post(&request.url)
            .bearer_auth(&request.token);

        let builder = match request.image {
            Some(image) => {
                let form = request
                    .fields
                    .into_iter()
                    .fold(Form::new(), |form, (key, value)| form.text(key, value));
                let part = Part::bytes(image.bytes).file_name(image.file_name);
                builder.multipart(form.part("image", part))
            }
            None => builder.form(&request.fields),
        };

        let response = builder
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", request.url))?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", request.url))?;

        Ok(ApiResponse {
            status,
            retry_after,
            body,
        })
    }
}
