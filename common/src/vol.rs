use crate::terrain::Block;
use std::fmt;
use vek::*;

/// Ceiling of the reference world. Volumes with a different vertical extent
/// override [`ReadVol::max_z`].
pub const DEFAULT_MAX_Z: i32 = 255;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VolError {
    /// The position lies outside the volume.
    OutOfBounds(Vec3<i32>),
    /// The backing world could not answer the request.
    Unavailable(String),
}

impl fmt::Display for VolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(pos) => write!(f, "position {:?} is out of bounds", pos),
            Self::Unavailable(reason) => write!(f, "world unavailable: {}", reason),
        }
    }
}

impl std::error::Error for VolError {}

/// A volume that provides read access to its voxel data.
///
/// Reads are expected to be deterministic and to reflect every write issued
/// before them.
pub trait ReadVol {
    fn get(&self, pos: Vec3<i32>) -> Result<Block, VolError>;

    /// The highest altitude a voxel may occupy. The lowest is always `0`.
    fn max_z(&self) -> i32 { DEFAULT_MAX_Z }

    /// Find the topmost non-air voxel of the column at `wpos`, returning its
    /// altitude and the block found there.
    ///
    /// This is a linear scan from [`ReadVol::max_z`] downwards. A column with
    /// no solid voxel at all reports altitude `0`.
    fn highest_solid(&self, wpos: Vec2<i32>) -> Result<(i32, Block), VolError> {
        for z in (0..=self.max_z()).rev() {
            let block = self.get(wpos.with_z(z))?;
            if !block.is_air() {
                return Ok((z, block));
            }
        }
        Ok((0, self.get(wpos.with_z(0))?))
    }
}

/// A volume that provides write access to its voxel data.
pub trait WriteVol: ReadVol {
    /// Write the voxel at the provided position in the volume.
    fn set(&mut self, pos: Vec3<i32>, block: Block) -> Result<(), VolError>;
}

