use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// ロガーを初期化する
///
/// 標準出力は絵文字マークアップ専用のため、ログは標準エラーへ出す。
pub fn init_logger(verbose: bool) -> Result<()> {
    let filter_level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::from_default_env().add_directive(filter_level.into()))
        .try_init()?;

    Ok(())
}
