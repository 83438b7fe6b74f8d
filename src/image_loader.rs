use crate::core::{FragError, FragResult};
use anyhow::{anyhow, Context, Result};
use image::codecs::gif::GifDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, DynamicImage, Frame, ImageFormat, ImageReader};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// デコード済みのフレーム列
pub enum FrameSet {
    /// 静止画（1フレーム）
    Still(DynamicImage),
    /// アニメーション（元の順序・遅延を保持した全フレーム）
    Animated(Vec<Frame>),
}

impl FrameSet {
    pub fn len(&self) -> usize {
        match self {
            Self::Still(_) => 1,
            Self::Animated(frames) => frames.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 切り出し元の画像。起動時に一度だけ開き、以降は読み取り専用
pub struct SourceImage {
    path: PathBuf,
    base_name: String,
    extension: String,
    format: ImageFormat,
    dimensions: (u32, u32),
    frames: FrameSet,
}

impl SourceImage {
    /// ファイルから画像を開き、全フレームをデコードする
    pub fn open(path: &Path) -> FragResult<Self> {
        let (base_name, extension) = split_file_name(path)?;

        let format = detect_format(path, &extension)
            .map_err(|e| FragError::source_load(path.display().to_string(), e))?;
        let frames = load_frames(path, format)
            .map_err(|e| FragError::source_load(path.display().to_string(), e))?;

        let dimensions = match &frames {
            FrameSet::Still(image) => (image.width(), image.height()),
            FrameSet::Animated(frames) => frames[0].buffer().dimensions(),
        };

        Ok(Self {
            path: path.to_path_buf(),
            base_name,
            extension,
            format,
            dimensions,
            frames,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 出力先ディレクトリ（元画像と同じ場所）
    pub fn directory(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// 最後のドットより前のファイル名
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.dimensions.0
    }

    pub fn height(&self) -> u32 {
        self.dimensions.1
    }

    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// 拡張子がアニメーション形式を示し、複数フレームで書き出すべきかどうか
    pub fn wants_animated_output(&self) -> bool {
        self.extension.eq_ignore_ascii_case("gif") && self.format == ImageFormat::Gif
    }
}

/// `dir/name.ext` を ("name", "ext") に分割する
fn split_file_name(path: &Path) -> FragResult<(String, String)> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            FragError::configuration(format!("invalid image path: {}", path.display()))
        })?;

    match file_name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() && !ext.is_empty() => {
            Ok((base.to_string(), ext.to_string()))
        }
        _ => Err(FragError::configuration(format!(
            "image file name must have an extension: {file_name}"
        ))),
    }
}

fn open_buffered(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// 内容から形式を推定し、判別できなければ拡張子から決める
fn detect_format(path: &Path, extension: &str) -> Result<ImageFormat> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read image header: {}", path.display()))?;

    reader
        .format()
        .or_else(|| ImageFormat::from_extension(extension))
        .ok_or_else(|| anyhow!("Unsupported image format: {}", path.display()))
}

fn load_frames(path: &Path, format: ImageFormat) -> Result<FrameSet> {
    match format {
        ImageFormat::Gif => {
            let decoder = GifDecoder::new(open_buffered(path)?)
                .with_context(|| format!("Failed to decode GIF: {}", path.display()))?;
            collect_animation(decoder, path)
        }
        ImageFormat::WebP => {
            let decoder = WebPDecoder::new(open_buffered(path)?)
                .with_context(|| format!("Failed to decode WebP: {}", path.display()))?;
            if decoder.has_animation() {
                collect_animation(decoder, path)
            } else {
                decode_still(path, format).map(FrameSet::Still)
            }
        }
        _ => decode_still(path, format).map(FrameSet::Still),
    }
}

fn collect_animation<'a, D: AnimationDecoder<'a>>(decoder: D, path: &Path) -> Result<FrameSet> {
    let frames = decoder
        .into_frames()
        .collect_frames()
        .with_context(|| format!("Failed to decode frames: {}", path.display()))?;

    if frames.is_empty() {
        anyhow::bail!("Image has no frames: {}", path.display());
    }

    Ok(FrameSet::Animated(frames))
}

fn decode_still(path: &Path, format: ImageFormat) -> Result<DynamicImage> {
    ImageReader::with_format(open_buffered(path)?, format)
        .decode()
        .with_context(|| {
            format!(
                "Failed to decode image with format {:?}: {}",
                format,
                path.display()
            )
        })
}
