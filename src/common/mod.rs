pub mod bit_utils;
pub mod codec;
pub mod ec;
pub mod iter;
pub mod mask;
pub mod metadata;

pub use bit_utils::*;
pub use codec::*;
pub use ec::*;
pub use iter::*;
pub use mask::*;
pub use metadata::*;
