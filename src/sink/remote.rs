use crate::core::{DepositOutcome, FragResult, FragmentSink};
use crate::publisher::transport::HttpTransport;
use crate::publisher::EmojiClient;
use async_trait::async_trait;

/// 断片を絵文字としてアップロードするシンク
///
/// アップロードの失敗は `Err` にせず `DepositOutcome::Published` で返すため、
/// 1枚の失敗で後続の断片が止まることはない。
pub struct PublishingSink<T: HttpTransport> {
    client: EmojiClient<T>,
}

impl<T: HttpTransport> PublishingSink<T> {
    pub fn new(client: EmojiClient<T>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T: HttpTransport> FragmentSink for PublishingSink<T> {
    async fn deposit(&self, name: &str, bytes: &[u8]) -> FragResult<DepositOutcome> {
        Ok(DepositOutcome::Published(
            self.client.publish(bytes, name).await,
        ))
    }

    fn sink_name(&self) -> &'static str {
        "publish"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PublishOutcome;
    use crate::publisher::transport::{ApiResponse, MockHttpTransport};
    use crate::publisher::PublisherConfig;

    #[tokio::test]
    async fn test_deposit_publishes_fragment() {
        let mut mock = MockHttpTransport::new();
        mock.expect_post()
            .times(1)
            .withf(|request| request.field("name") == Some("img_0_0"))
            .returning(|_| Ok(ApiResponse::new(200, r#"{"ok":true}"#)));
        let sink = PublishingSink::new(EmojiClient::new(
            mock,
            "xoxp-test",
            PublisherConfig::default(),
        ));

        let outcome = sink.deposit("img_0_0", &[1, 2]).await.unwrap();
        assert_eq!(outcome, DepositOutcome::Published(PublishOutcome::Published));
        assert_eq!(sink.sink_name(), "publish");
    }

    #[tokio::test]
    async fn test_rejected_upload_is_not_an_error() {
        let mut mock = MockHttpTransport::new();
        mock.expect_post()
            .returning(|_| Ok(ApiResponse::new(403, "forbidden")));
        let sink = PublishingSink::new(EmojiClient::new(
            mock,
            "xoxp-test",
            PublisherConfig::default(),
        ));

        let outcome = sink.deposit("img_0_0", &[1]).await.unwrap();
        assert!(!outcome.is_success());
    }
}
