// CLI層 - 引数定義と slice / remove コマンド
// 画像の読み込み・出力先の選択・マークアップの表示を担当

pub mod args;
pub mod commands;

use crate::core::FragError;

// 公開API
pub use args::*;
pub use commands::*;

/// 入力を直せば再実行できるエラーなら、終了前に表示するヒントを返す
pub fn usage_hint(error: &anyhow::Error) -> Option<&'static str> {
    match error.downcast_ref::<FragError>() {
        Some(FragError::InvalidGrid { .. }) => {
            Some("--rows must divide the image height and --cols the width into square cells")
        }
        Some(error) if error.is_configuration_error() => {
            Some("check the image path and the flags passed on the command line")
        }
        _ => None,
    }
}
