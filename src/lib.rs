pub mod cli;
pub mod composer;
pub mod core;
pub mod fragmenter;
pub mod geometry;
pub mod image_loader;
pub mod logging;
pub mod publisher;
pub mod sink;

use crate::core::{DepositOutcome, FragResult, FragmentSink, GridSpec};
use composer::MarkupComposer;
use fragmenter::Fragmenter;
use image_loader::SourceImage;
use tracing::{info, warn};

/// 1断片の処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRecord {
    pub name: String,
    pub outcome: DepositOutcome,
}

/// 実行全体の結果
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub fragments: Vec<FragmentRecord>,
    pub markup: MarkupComposer,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.fragments.len()
    }

    /// 失敗した断片の名前
    pub fn failed(&self) -> Vec<&str> {
        self.fragments
            .iter()
            .filter(|record| !record.outcome.is_success())
            .map(|record| record.name.as_str())
            .collect()
    }
}

// 出力先を注入するアプリケーション本体
// 断片は1つずつ順番に処理し、次の断片の前に出力を完了させる
pub struct App<S>
where
    S: FragmentSink,
{
    pub sink: S,
}

impl<S> App<S>
where
    S: FragmentSink,
{
    /// 新しいAppインスタンスを作成（コンストラクタインジェクション）
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// 検証 → (セルごとに 切り出し → エンコード → 出力 → マークアップ追加)
    ///
    /// グリッドが不正な場合は何も出力せずにエラーを返す。
    /// 出力先が返す失敗（アップロード失敗など）は記録するだけで処理を続ける。
    pub async fn run(&self, source: &SourceImage, grid: GridSpec) -> FragResult<RunReport> {
        let fragmenter = Fragmenter::new(source, grid)?;
        let layout = fragmenter.layout();

        info!(
            "{}x{} の画像を {}x{} に分割します ({}px, {} frames, sink: {})",
            source.width(),
            source.height(),
            layout.rows(),
            layout.cols(),
            layout.cell_size(),
            source.frame_count(),
            self.sink.sink_name()
        );

        let mut report = RunReport::default();
        for id in layout.cells() {
            let fragment = fragmenter.render(id)?;
            let outcome = self.sink.deposit(fragment.name(), fragment.bytes()).await?;

            report.markup.push(fragment.id(), fragment.name());
            report.fragments.push(FragmentRecord {
                name: fragment.name().to_string(),
                outcome,
            });
        }

        let failed = report.failed();
        if !failed.is_empty() {
            warn!("{}/{} 個の断片が失敗しました: {}", failed.len(), report.total(), failed.join(", "));
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FragError, PublishOutcome};
    use crate::sink::{MemorySink, MockFragmentSink};
    use image::RgbImage;
    use tempfile::TempDir;

    fn square_source(temp_dir: &TempDir, name: &str, size: u32) -> SourceImage {
        let path = temp_dir.path().join(name);
        RgbImage::new(size, size).save(&path).unwrap();
        SourceImage::open(&path).unwrap()
    }

    #[tokio::test]
    async fn test_run_with_memory_sink() {
        let temp_dir = TempDir::new().unwrap();
        let source = square_source(&temp_dir, "img.png", 400);
        let app = App::new(MemorySink::new());

        let report = app.run(&source, GridSpec::new(4, 4)).await.unwrap();

        assert_eq!(report.total(), 16);
        assert!(report.failed().is_empty());
        assert_eq!(app.sink.len(), 16);
        assert_eq!(app.sink.names()[0], "img_0_0");
        assert_eq!(app.sink.names()[15], "img_3_3");

        let lines: Vec<&str> = report.markup.rows().iter().map(String::as_str).collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], ":img_0_0::img_0_1::img_0_2::img_0_3:");
        assert_eq!(lines[3], ":img_3_0::img_3_1::img_3_2::img_3_3:");
    }

    #[tokio::test]
    async fn test_invalid_grid_deposits_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let source = square_source(&temp_dir, "img.png", 400);

        let mut mock_sink = MockFragmentSink::new();
        mock_sink.expect_deposit().times(0);
        mock_sink.expect_sink_name().return_const("mock");
        let app = App::new(mock_sink);

        let result = app.run(&source, GridSpec::new(3, 3)).await;
        assert!(matches!(result, Err(FragError::InvalidGrid { .. })));
    }

    #[tokio::test]
    async fn test_failed_deposit_does_not_stop_the_batch() {
        let temp_dir = TempDir::new().unwrap();
        let source = square_source(&temp_dir, "img.png", 20);

        let mut mock_sink = MockFragmentSink::new();
        mock_sink.expect_sink_name().return_const("mock");
        mock_sink.expect_deposit().times(4).returning(|name, _| {
            if name == "img_0_1" {
                Ok(DepositOutcome::Published(PublishOutcome::RateLimited {
                    attempts: 3,
                    body: String::new(),
                }))
            } else {
                Ok(DepositOutcome::Published(PublishOutcome::Published))
            }
        });
        let app = App::new(mock_sink);

        let report = app.run(&source, GridSpec::new(2, 2)).await.unwrap();

        assert_eq!(report.total(), 4);
        assert_eq!(report.failed(), vec!["img_0_1"]);
        // 失敗した断片もマークアップには含める
        assert_eq!(report.markup.render(), ":img_0_0::img_0_1:\n:img_1_0::img_1_1:");
    }

    #[tokio::test]
    async fn test_sink_error_aborts_the_run() {
        let temp_dir = TempDir::new().unwrap();
        let source = square_source(&temp_dir, "img.png", 20);

        let mut mock_sink = MockFragmentSink::new();
        mock_sink.expect_sink_name().return_const("mock");
        mock_sink.expect_deposit().times(1).returning(|name, _| {
            Err(FragError::write(
                name,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ))
        });
        let app = App::new(mock_sink);

        let result = app.run(&source, GridSpec::new(2, 2)).await;
        assert!(matches!(result, Err(FragError::WriteError { .. })));
    }
}
