// グリッドと断片に関連するデータ型定義

use std::fmt;

/// グリッドの行数・列数（検証前の指定値）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
}

impl GridSpec {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// グリッドのセル数
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { rows: 4, cols: 4 }
    }
}

/// グリッド上のセル位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentId {
    pub row: u32,
    pub col: u32,
}

impl FragmentId {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.row, self.col)
    }
}

/// 切り出し矩形 (left, top, right, bottom)、right/bottom は含まない
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRegion {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// 点 (x, y) が矩形内に含まれるかどうか
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// 1断片のアップロード結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// HTTP 200 かつ `"ok": true`
    Published,
    /// `"ok": false`、または 200/429 以外のステータス
    Rejected { status: u16, body: String },
    /// リトライ上限までレート制限された
    RateLimited { attempts: u32, body: String },
    /// 接続自体に失敗した
    TransportFailed { message: String },
}

impl PublishOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Published)
    }
}

/// 断片をシンクへ渡した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepositOutcome {
    /// ディスクへ書き込んだ
    Written { path: std::path::PathBuf },
    /// リモートへアップロードを試みた
    Published(PublishOutcome),
    /// メモリ上に保持した
    Stored,
}

impl DepositOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            Self::Written { .. } | Self::Stored => true,
            Self::Published(outcome) => outcome.is_success(),
        }
    }
}
