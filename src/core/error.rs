// 断片化処理のエラー型定義
// ここに含まれるエラーは全て実行全体を中断する（アップロード失敗は PublishOutcome で扱う）

use thiserror::Error;

/// 実行を中断するエラー型
#[derive(Error, Debug)]
pub enum FragError {
    #[error("グリッド指定エラー: {reason}")]
    InvalidGrid { reason: String },

    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("画像読み込みエラー: {path} - {source}")]
    SourceLoadError {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("エンコードエラー: {name} - {source}")]
    EncodeError {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("書き込みエラー: {path} - {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FragError {
    /// グリッド指定エラーの作成
    pub fn invalid_grid(reason: impl Into<String>) -> Self {
        Self::InvalidGrid {
            reason: reason.into(),
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// 画像読み込みエラーの作成
    pub fn source_load(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::SourceLoadError {
            path: path.into(),
            source,
        }
    }

    /// エンコードエラーの作成
    pub fn encode(name: impl Into<String>, source: image::ImageError) -> Self {
        Self::EncodeError {
            name: name.into(),
            source,
        }
    }

    /// 書き込みエラーの作成
    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    /// 処理開始前に検出される設定系のエラーかどうか
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidGrid { .. } | Self::ConfigurationError { .. }
        )
    }
}

/// 断片化処理用のResult型エイリアス
pub type FragResult<T> = Result<T, FragError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_grid_message() {
        let error = FragError::invalid_grid("rows must divide the image height");
        assert!(error.to_string().contains("rows must divide the image height"));
        assert!(error.is_configuration_error());
    }

    #[test]
    fn test_source_load_keeps_source_chain() {
        let error = FragError::source_load("/tmp/missing.png", anyhow::anyhow!("not found"));
        let message = error.to_string();
        assert!(message.contains("/tmp/missing.png"));
        assert!(message.contains("not found"));
        assert!(!error.is_configuration_error());
    }

    #[test]
    fn test_write_error_is_not_configuration() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = FragError::write("/readonly/img_0_0.png", io_error);
        assert!(matches!(error, FragError::WriteError { .. }));
        assert!(!error.is_configuration_error());
    }

    #[test]
    fn test_result_alias_with_question_mark() {
        fn inner() -> FragResult<u32> {
            Err(FragError::configuration("--remove requires --token"))
        }

        fn outer() -> FragResult<u32> {
            let value = inner()?;
            Ok(value + 1)
        }

        assert!(matches!(
            outer(),
            Err(FragError::ConfigurationError { .. })
        ));
    }
}
