use crate::Error;
use common::{
    terrain::{Block, BlockKind},
    vol::{ReadVol, WriteVol},
};
use tracing::debug;
use vek::*;

pub const WALL: BlockKind = BlockKind::Rock;
pub const WALL_HEIGHT: i32 = 4;
/// Spacing between the ground samples the wall altitude is averaged from.
const SAMPLE_STEP: usize = 10;
/// Wall altitude used when no sampled column has any ground at all.
const DEFAULT_WALL_ALT: i32 = 64;

/// Altitude the perimeter wall of `bounds` is built from: the mean ground
/// altitude sampled along the north (`min.y`) and east (`max.x`) edges.
pub fn wall_alt<V: ReadVol>(vol: &V, bounds: Aabr<i32>) -> Result<i32, Error> {
    let north = (bounds.min.x..=bounds.max.x)
        .step_by(SAMPLE_STEP)
        .map(|x| Vec2::new(x, bounds.min.y));
    let east = (bounds.min.y..=bounds.max.y)
        .step_by(SAMPLE_STEP)
        .map(|y| Vec2::new(bounds.max.x, y));

    let (mut sum, mut count) = (0, 0);
    for wpos in north.chain(east) {
        let (z, block) = vol.highest_solid(wpos)?;
        if !block.is_air() {
            sum += z;
            count += 1;
        }
    }

    Ok(if count > 0 {
        sum / count
    } else {
        DEFAULT_WALL_ALT
    })
}

/// Build a wall [`WALL_HEIGHT`] blocks high along the outline of `bounds`,
/// returning the altitude of its lowest course.
///
/// The wall sits at a single altitude all the way round and replaces
/// whatever it passes through.
pub fn build_wall<V: WriteVol>(vol: &mut V, bounds: Aabr<i32>) -> Result<i32, Error> {
    let alt = wall_alt(&*vol, bounds)?;
    let wall = Block::new(WALL);

    let edges_ns = (bounds.min.x..=bounds.max.x)
        .flat_map(|x| [Vec2::new(x, bounds.min.y), Vec2::new(x, bounds.max.y)]);
    let edges_we = (bounds.min.y..=bounds.max.y)
        .flat_map(|y| [Vec2::new(bounds.min.x, y), Vec2::new(bounds.max.x, y)]);

    for wpos in edges_ns.chain(edges_we) {
        for z in alt..alt + WALL_HEIGHT {
            vol.set(wpos.with_z(z), wall)?;
        }
    }

    debug!(?bounds, alt, "Built village wall");
    Ok(alt)
}
