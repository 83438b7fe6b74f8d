pub mod remove;
pub mod slice;

pub use remove::*;
pub use slice::*;
