// 断片の出力先の実装群
// トークンの有無で DiskSink / PublishingSink を切り替え、テストでは MemorySink を使う

pub mod disk;
pub mod memory;
pub mod remote;

pub use crate::core::traits::{FragmentSink, MockFragmentSink};
pub use disk::DiskSink;
pub use memory::MemorySink;
pub use remote::PublishingSink;
