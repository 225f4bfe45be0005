use crate::{
    terrain::Block,
    vol::{ReadVol, VolError, WriteVol},
};
use vek::*;

/// A rectangular stack of voxel columns held in memory.
///
/// The volume covers the horizontal area `origin..origin + size` and the
/// altitudes `0..height`. Voxels are stored column-major so that scanning a
/// column top-down touches contiguous memory.
#[derive(Clone, Debug)]
pub struct ColumnVol {
    vox: Vec<Block>,
    origin: Vec2<i32>,
    size: Vec2<u32>,
    height: u32,
}

impl ColumnVol {
    /// Create a new volume with all voxels filled with duplicates of the
    /// provided block.
    pub fn filled(origin: Vec2<i32>, size: Vec2<u32>, height: u32, block: Block) -> Self {
        Self {
            vox: vec![block; size.product() as usize * height as usize],
            origin,
            size,
            height,
        }
    }

    /// An empty (all air) volume.
    pub fn empty(origin: Vec2<i32>, size: Vec2<u32>, height: u32) -> Self {
        Self::filled(origin, size, height, Block::empty())
    }

    pub fn origin(&self) -> Vec2<i32> { self.origin }

    pub fn size(&self) -> Vec2<u32> { self.size }

    /// Inclusive horizontal extent of the volume.
    pub fn area(&self) -> Aabr<i32> {
        Aabr {
            min: self.origin,
            max: self.origin + self.size.map(|e| e as i32) - 1,
        }
    }

    pub fn contains_wpos(&self, wpos: Vec2<i32>) -> bool {
        let rpos = wpos - self.origin;
        rpos.map2(self.size, |e, sz| e >= 0 && e < sz as i32)
            .reduce_and()
    }

    /// Replace the column at `wpos` with `block` from altitude `0` up to and
    /// including `top`, and air above it.
    pub fn set_column(&mut self, wpos: Vec2<i32>, top: i32, block: Block) -> Result<(), VolError> {
        for z in 0..self.height as i32 {
            self.set(wpos.with_z(z), if z <= top { block } else { Block::empty() })?;
        }
        Ok(())
    }

    #[inline(always)]
    fn idx_for(&self, pos: Vec3<i32>) -> Option<usize> {
        if self.contains_wpos(pos.xy()) && pos.z >= 0 && pos.z < self.height as i32 {
            let rpos = pos.xy() - self.origin;
            Some(
                (rpos.x as usize * self.size.y as usize + rpos.y as usize) * self.height as usize
                    + pos.z as usize,
            )
        } else {
            None
        }
    }
}

impl ReadVol for ColumnVol {
    #[inline(always)]
    fn get(&self, pos: Vec3<i32>) -> Result<Block, VolError> {
        self.idx_for(pos)
            .and_then(|idx| self.vox.get(idx))
            .copied()
            .ok_or(VolError::OutOfBounds(pos))
    }

    fn max_z(&self) -> i32 { self.height as i32 - 1 }
}

impl WriteVol for ColumnVol {
    #[inline(always)]
    fn set(&mut self, pos: Vec3<i32>, block: Block) -> Result<(), VolError> {
        self.idx_for(pos)
            .and_then(|idx| self.vox.get_mut(idx))
            .map(|old| *old = block)
            .ok_or(VolError::OutOfBounds(pos))
    }
}
