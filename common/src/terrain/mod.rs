pub mod block;

// Reexports
pub use self::block::{Block, BlockKind};
