use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "emoji_frag")]
#[command(about = "Slice an image into a grid of square emoji fragments")]
#[command(version)]
pub struct Cli {
    /// Path to the source image
    pub path: PathBuf,

    /// Number of grid rows
    #[arg(long, default_value = "4")]
    pub rows: u32,

    /// Number of grid columns
    #[arg(long, default_value = "4")]
    pub cols: u32,

    /// API token; when given, fragments are uploaded instead of written to disk
    #[arg(long, env = "EMOJI_FRAG_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Remove the uploaded fragments of this image instead of creating them
    #[arg(long)]
    pub remove: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
