use crate::core::{CropRegion, FragError, FragResult, FragmentId, GridSpec};
use crate::geometry::GridLayout;
use crate::image_loader::{FrameSet, SourceImage};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{imageops, DynamicImage, Frame, ImageFormat};
use std::io::Cursor;

/// エンコード済みの断片
#[derive(Debug, Clone)]
pub struct Fragment {
    id: FragmentId,
    name: String,
    region: CropRegion,
    frame_count: usize,
    bytes: Vec<u8>,
}

impl Fragment {
    pub fn id(&self) -> FragmentId {
        self.id
    }

    /// `{baseName}_{row}_{col}`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> CropRegion {
        self.region
    }

    /// 書き出したフレーム数
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// 同じ矩形で切り出したフレーム
enum CroppedFrames {
    Still(DynamicImage),
    Animated(Vec<Frame>),
}

/// 元画像をグリッドに沿って切り出し、断片ごとにエンコードする
pub struct Fragmenter<'a> {
    source: &'a SourceImage,
    layout: GridLayout,
}

impl<'a> Fragmenter<'a> {
    /// グリッドを検証して作成する。検証に失敗した場合は何も切り出さない
    pub fn new(source: &'a SourceImage, grid: GridSpec) -> FragResult<Self> {
        let layout = GridLayout::new(source.width(), source.height(), grid)?;
        Ok(Self { source, layout })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn fragment_name(&self, id: FragmentId) -> String {
        format!("{}_{}_{}", self.source.base_name(), id.row, id.col)
    }

    /// 全断片の名前（行優先）
    pub fn fragment_names(&self) -> Vec<String> {
        self.layout
            .cells()
            .map(|id| self.fragment_name(id))
            .collect()
    }

    /// 1セルを切り出してエンコードする
    pub fn render(&self, id: FragmentId) -> FragResult<Fragment> {
        let name = self.fragment_name(id);
        let region = self.layout.crop_region(id);
        let cropped = self.crop(region);

        let (bytes, frame_count) = match cropped {
            CroppedFrames::Animated(frames) if self.source.wants_animated_output() => {
                let frame_count = frames.len();
                (encode_animation(frames, &name)?, frame_count)
            }
            CroppedFrames::Animated(mut frames) => {
                // 先頭フレームのみ元の形式で書き出す
                let base = DynamicImage::ImageRgba8(frames.swap_remove(0).into_buffer());
                (encode_still(&base, self.source.format(), &name)?, 1)
            }
            CroppedFrames::Still(image) => {
                (encode_still(&image, self.source.format(), &name)?, 1)
            }
        };

        Ok(Fragment {
            id,
            name,
            region,
            frame_count,
            bytes,
        })
    }

    fn crop(&self, region: CropRegion) -> CroppedFrames {
        match self.source.frames() {
            FrameSet::Still(image) => CroppedFrames::Still(image.crop_imm(
                region.left,
                region.top,
                region.width(),
                region.height(),
            )),
            FrameSet::Animated(frames) => CroppedFrames::Animated(
                frames
                    .iter()
                    .map(|frame| {
                        let buffer = imageops::crop_imm(
                            frame.buffer(),
                            region.left,
                            region.top,
                            region.width(),
                            region.height(),
                        )
                        .to_image();
                        Frame::from_parts(buffer, 0, 0, frame.delay())
                    })
                    .collect(),
            ),
        }
    }
}

fn encode_still(image: &DynamicImage, format: ImageFormat, name: &str) -> FragResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, format)
        .map_err(|e| FragError::encode(name, e))?;
    Ok(cursor.into_inner())
}

fn encode_animation(frames: Vec<Frame>, name: &str) -> FragResult<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buffer);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| FragError::encode(name, e))?;
        encoder
            .encode_frames(frames)
            .map_err(|e| FragError::encode(name, e))?;
    }
    Ok(buffer)
}
