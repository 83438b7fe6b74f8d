// コアレイヤー - エラー、データ型、出力先トレイト
// 他のレイヤーから参照される基本的な抽象化を提供

pub mod error;
pub mod traits;
pub mod types;

// 公開API
pub use error::{FragError, FragResult};
pub use traits::FragmentSink;
pub use types::{CropRegion, DepositOutcome, FragmentId, GridSpec, PublishOutcome};
