use anyhow::Result;
use clap::Parser;
use tracing::error;

use emoji_frag::{
    cli::{execute_remove, execute_slice, usage_hint, Cli, RemoveConfig, SliceConfig},
    core::GridSpec,
    logging::init_logger,
    publisher::PublisherConfig,
};

// アップロードは1件ずつ順番に行う
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    let grid = GridSpec::new(cli.rows, cli.cols);

    let result = if cli.remove {
        execute_remove(RemoveConfig {
            path: cli.path,
            grid,
            token: cli.token,
            publisher: PublisherConfig::default(),
        })
        .await
        .map(|_| ())
    } else {
        execute_slice(SliceConfig {
            path: cli.path,
            grid,
            token: cli.token,
            publisher: PublisherConfig::default(),
        })
        .await
        .map(|_| ())
    };

    // 入力ミスの場合は直し方を添えて終了する
    if let Err(e) = &result {
        if let Some(hint) = usage_hint(e) {
            error!("{hint}");
        }
    }
    result
}
