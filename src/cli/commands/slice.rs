use crate::core::{FragmentSink, GridSpec};
use crate::image_loader::SourceImage;
use crate::publisher::{EmojiClient, PublisherConfig, ReqwestTransport};
use crate::sink::{DiskSink, PublishingSink};
use crate::{App, RunReport};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Configuration for the slice command
pub struct SliceConfig {
    pub path: PathBuf,
    pub grid: GridSpec,
    /// When present, fragments are uploaded instead of written to disk
    pub token: Option<String>,
    pub publisher: PublisherConfig,
}

/// Slice the image, deposit every fragment and print the emoji markup
pub async fn execute_slice(config: SliceConfig) -> Result<RunReport> {
    let source = SourceImage::open(&config.path)?;

    let report = match config.token {
        Some(token) => {
            let client = EmojiClient::new(ReqwestTransport::new(), token, config.publisher);
            run_with_sink(PublishingSink::new(client), &source, config.grid).await?
        }
        None => run_with_sink(DiskSink::beside(&source), &source, config.grid).await?,
    };

    println!("{}", report.markup);
    Ok(report)
}

/// Run the pipeline against an arbitrary sink
pub async fn run_with_sink<S: FragmentSink>(
    sink: S,
    source: &SourceImage,
    grid: GridSpec,
) -> Result<RunReport> {
    let report = App::new(sink)
        .run(source, grid)
        .await
        .with_context(|| format!("Failed to slice {}", source.path().display()))?;

    info!(
        "✅ 完了: {} 個中 {} 個成功",
        report.total(),
        report.total() - report.failed().len()
    );
    Ok(report)
}
