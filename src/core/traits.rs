// 断片の出力先の抽象化

use super::error::FragResult;
use super::types::DepositOutcome;
use async_trait::async_trait;
use mockall::automock;

/// エンコード済みの断片を受け取る出力先のトレイト
///
/// ディスク書き込み・リモート公開・メモリ保持を同じ呼び出しで切り替える。
/// `Err` は実行全体を中断するエラーのみ。アップロードの失敗は
/// `DepositOutcome::Published` の中身で表す。
#[automock]
#[async_trait]
pub trait FragmentSink: Send + Sync {
    /// 断片を出力先へ渡す
    async fn deposit(&self, name: &str, bytes: &[u8]) -> FragResult<DepositOutcome>;

    /// 出力先の名前（ログ用）
    fn sink_name(&self) -> &'static str;
}

// FragmentSink for Box<dyn FragmentSink>
#[async_trait]
impl FragmentSink for Box<dyn FragmentSink> {
    async fn deposit(&self, name: &str, bytes: &[u8]) -> FragResult<DepositOutcome> {
        self.as_ref().deposit(name, bytes).await
    }

    fn sink_name(&self) -> &'static str {
        self.as_ref().sink_name()
    }
}
