use crate::core::{CropRegion, FragError, FragResult, FragmentId, GridSpec};

/// 画像サイズに対してグリッド指定を検証し、正方形セルの一辺を返す
///
/// 行数は高さを、列数は幅を割り切り、かつセルが正方形でなければならない。
pub fn validate_grid(height: u32, width: u32, rows: u32, cols: u32) -> FragResult<u32> {
    if rows < 1 || cols < 1 {
        return Err(FragError::invalid_grid(
            "number of rows and columns must be positive integers",
        ));
    }

    if height % rows != 0 {
        return Err(FragError::invalid_grid(format!(
            "number of rows ({rows}) must divide the height of the image ({height})"
        )));
    }

    if width % cols != 0 {
        return Err(FragError::invalid_grid(format!(
            "number of columns ({cols}) must divide the width of the image ({width})"
        )));
    }

    let cell_height = height / rows;
    let cell_width = width / cols;
    if cell_height != cell_width {
        return Err(FragError::invalid_grid(format!(
            "size of the fragment must be square (got {cell_width}x{cell_height})"
        )));
    }

    Ok(cell_height)
}

/// 検証済みのグリッド配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    spec: GridSpec,
    cell_size: u32,
}

impl GridLayout {
    /// 画像サイズ (width, height) とグリッド指定から配置を作成
    pub fn new(width: u32, height: u32, spec: GridSpec) -> FragResult<Self> {
        let cell_size = validate_grid(height, width, spec.rows, spec.cols)?;
        Ok(Self { spec, cell_size })
    }

    pub fn rows(&self) -> u32 {
        self.spec.rows
    }

    pub fn cols(&self) -> u32 {
        self.spec.cols
    }

    /// セルの一辺（ピクセル）
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.spec.cell_count()
    }

    /// 全セルを行優先で列挙する
    pub fn cells(&self) -> impl Iterator<Item = FragmentId> {
        let cols = self.spec.cols;
        (0..self.spec.rows).flat_map(move |row| (0..cols).map(move |col| FragmentId::new(row, col)))
    }

    /// セルの切り出し矩形
    pub fn crop_region(&self, id: FragmentId) -> CropRegion {
        let size = self.cell_size;
        CropRegion {
            left: id.col * size,
            top: id.row * size,
            right: (id.col + 1) * size,
            bottom: (id.row + 1) * size,
        }
    }
}
