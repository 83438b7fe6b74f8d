use crate::core::{FragError, GridSpec};
use crate::fragmenter::Fragmenter;
use crate::image_loader::SourceImage;
use crate::publisher::transport::HttpTransport;
use crate::publisher::{EmojiClient, PublisherConfig, ReqwestTransport};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

/// Configuration for the remove command
pub struct RemoveConfig {
    pub path: PathBuf,
    pub grid: GridSpec,
    pub token: Option<String>,
    pub publisher: PublisherConfig,
}

/// Result of a removal run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalSummary {
    pub removed: usize,
    pub failed: Vec<String>,
}

/// Remove every emoji previously created for this image and grid
pub async fn execute_remove(config: RemoveConfig) -> Result<RemovalSummary> {
    let token = config
        .token
        .ok_or_else(|| FragError::configuration("--remove requires --token"))?;
    let source = SourceImage::open(&config.path)?;

    let client = EmojiClient::new(ReqwestTransport::new(), token, config.publisher);
    remove_fragments(&client, &source, config.grid).await
}

/// Remove `{base}_{row}_{col}` for every cell of the grid, one request at a time
pub async fn remove_fragments<T: HttpTransport>(
    client: &EmojiClient<T>,
    source: &SourceImage,
    grid: GridSpec,
) -> Result<RemovalSummary> {
    let fragmenter = Fragmenter::new(source, grid)?;

    let mut summary = RemovalSummary::default();
    for name in fragmenter.fragment_names() {
        if client.remove(&name).await {
            summary.removed += 1;
        } else {
            summary.failed.push(name);
        }
    }

    if summary.failed.is_empty() {
        info!("🗑️  {} 個の絵文字を削除しました", summary.removed);
    } else {
        warn!(
            "{} 個を削除、{} 個は削除できませんでした",
            summary.removed,
            summary.failed.len()
        );
    }

    Ok(summary)
}
