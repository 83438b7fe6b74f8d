// 統合テスト用の画像生成ヘルパー

use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// 各セルを (row, col) に応じた色で塗った PNG を書き出す
pub fn write_grid_png(dir: &Path, name: &str, rows: u32, cols: u32, cell: u32) -> PathBuf {
    let path = dir.join(name);
    let image = RgbImage::from_fn(cols * cell, rows * cell, |x, y| cell_color(y / cell, x / cell));
    image.save(&path).unwrap();
    path
}

/// セル (row, col) の色
pub fn cell_color(row: u32, col: u32) -> Rgb<u8> {
    Rgb([(row * 50) as u8, (col * 50) as u8, 100])
}

/// 単色フレームを並べたアニメーション GIF を書き出す
pub fn write_animated_gif(dir: &Path, name: &str, size: u32, colors: &[[u8; 4]]) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = GifEncoder::new(file);
    let frames = colors.iter().map(|color| {
        Frame::from_parts(
            RgbaImage::from_pixel(size, size, Rgba(*color)),
            0,
            0,
            Delay::from_numer_denom_ms(50, 1),
        )
    });
    encoder.encode_frames(frames).unwrap();
    path
}
