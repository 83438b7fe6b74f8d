use crate::core::{DepositOutcome, FragError, FragResult, FragmentSink};
use crate::image_loader::SourceImage;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 断片を `{name}.{extension}` としてディレクトリへ書き出す
#[derive(Debug, Clone)]
pub struct DiskSink {
    directory: PathBuf,
    extension: String,
}

impl DiskSink {
    pub fn new(directory: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.into(),
        }
    }

    /// 元画像と同じディレクトリ・同じ拡張子で書き出すシンク
    pub fn beside(source: &SourceImage) -> Self {
        Self::new(source.directory(), source.extension())
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.{}", self.extension))
    }
}

#[async_trait]
impl FragmentSink for DiskSink {
    async fn deposit(&self, name: &str, bytes: &[u8]) -> FragResult<DepositOutcome> {
        let path = self.path_for(name);

        // 既存ファイルは上書きする
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| FragError::write(path.display().to_string(), e))?;

        debug!("wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(DepositOutcome::Written { path })
    }

    fn sink_name(&self) -> &'static str {
        "disk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_deposit_writes_named_file() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DiskSink::new(temp_dir.path(), "png");

        let outcome = sink.deposit("img_1_2", b"fragment").await.unwrap();

        let expected = temp_dir.path().join("img_1_2.png");
        assert_eq!(outcome, DepositOutcome::Written { path: expected.clone() });
        assert_eq!(std::fs::read(&expected).unwrap(), b"fragment");
    }

    #[tokio::test]
    async fn test_deposit_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DiskSink::new(temp_dir.path(), "gif");
        let path = sink.path_for("img_0_0");
        std::fs::write(&path, b"old contents that are longer").unwrap();

        sink.deposit("img_0_0", b"new").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_deposit_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DiskSink::new(temp_dir.path().join("missing"), "png");

        let result = sink.deposit("img_0_0", b"data").await;
        assert!(matches!(result, Err(FragError::WriteError { .. })));
    }

    #[test]
    fn test_beside_uses_source_directory_and_extension() {
        let temp_dir = TempDir::new().unwrap();
        let image_path = temp_dir.path().join("logo.png");
        image::RgbImage::new(8, 8).save(&image_path).unwrap();
        let source = SourceImage::open(&image_path).unwrap();

        let sink = DiskSink::beside(&source);

        assert_eq!(sink.directory(), temp_dir.path());
        assert_eq!(sink.path_for("logo_0_0"), temp_dir.path().join("logo_0_0.png"));
        assert_eq!(sink.sink_name(), "disk");
    }
}
