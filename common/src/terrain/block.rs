use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref};

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockKind {
    Air = 0x00, // Air counts as a fluid
    Water = 0x01,
    // 0x02 <= x < 0x10 are reserved for other fluids. These are 2^n aligned to allow bitwise
    // checking of common conditions. For example, `is_fluid` is just `block_kind &
    // 0x0F == 0`.
    Rock = 0x10,
    // 0x11 <= x < 0x20 is reserved for future rocks
    Grass = 0x20,
    Earth = 0x30,
    Sand = 0x31,
    // 0x32 <= x < 0x40 is reserved for future earths/muds/gravels/sands/etc.
    Wood = 0x40,
    Leaves = 0x41,
    // 0x42 <= x < 0x50 is reserved for future tree parts
    Misc = 0xFE,
}

impl BlockKind {
    #[inline]
    pub const fn is_air(&self) -> bool { matches!(self, BlockKind::Air) }

    /// Determine whether the block kind is a gas or a liquid.
    #[inline]
    pub const fn is_fluid(&self) -> bool { *self as u8 & 0xF0 == 0x00 }

    #[inline]
    pub const fn is_liquid(&self) -> bool { self.is_fluid() && !self.is_air() }

    #[inline]
    pub const fn is_water(&self) -> bool { matches!(self, BlockKind::Water) }

    /// Determine whether the block is filled (i.e: fully solid). Right now,
    /// this is the opposite of being a fluid.
    #[inline]
    pub const fn is_filled(&self) -> bool { !self.is_fluid() }

    /// Wood and leaves, i.e. anything that belongs to a tree rather than to
    /// the ground it grows on.
    #[inline]
    pub const fn is_tree(&self) -> bool { *self as u8 & 0xF0 == 0x40 }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{:?}", self) }
}

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Block {
    kind: BlockKind,
}

impl Deref for Block {
    type Target = BlockKind;

    fn deref(&self) -> &Self::Target { &self.kind }
}

impl Block {
    #[inline]
    pub const fn new(kind: BlockKind) -> Self { Self { kind } }

    #[inline]
    pub const fn empty() -> Self { Self::new(BlockKind::Air) }

    #[inline]
    pub const fn water() -> Self { Self::new(BlockKind::Water) }

    #[inline]
    pub const fn kind(&self) -> BlockKind { self.kind }
}

impl Default for Block {
    fn default() -> Self { Self::empty() }
}

impl From<BlockKind> for Block {
    fn from(kind: BlockKind) -> Self { Self::new(kind) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fluid_classification() {
        assert!(BlockKind::Air.is_fluid());
        assert!(BlockKind::Water.is_fluid());
        assert!(!BlockKind::Air.is_liquid());
        assert!(BlockKind::Water.is_liquid());
        assert!(BlockKind::Rock.is_filled());
        assert!(BlockKind::Leaves.is_filled());
    }

    #[test]
    fn tree_classification() {
        assert!(BlockKind::Wood.is_tree());
        assert!(BlockKind::Leaves.is_tree());
        for kind in [
            BlockKind::Air,
            BlockKind::Water,
            BlockKind::Rock,
            BlockKind::Grass,
            BlockKind::Earth,
            BlockKind::Sand,
            BlockKind::Misc,
        ] {
            assert!(!kind.is_tree(), "{} should not count as a tree", kind);
        }
    }

    #[test]
    fn block_derefs_to_kind() {
        let block = Block::new(BlockKind::Sand);
        assert_eq!(block.kind(), BlockKind::Sand);
        assert!(block.is_filled());
        assert!(Block::empty().is_air());
        assert!(Block::water().is_water());
    }
}
