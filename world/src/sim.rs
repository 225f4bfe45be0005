use crate::util::{attempt, CARDINALS};
use common::{
    terrain::{Block, BlockKind},
    vol::{ReadVol, VolError, WriteVol},
    volumes::ColumnVol,
};
use noise::{Fbm, MultiFractal, NoiseFn, Perlin, RidgedMulti};
use rand::prelude::*;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vek::*;

pub const WORLD_HEIGHT: u32 = 256;

const BASE_ALT: f64 = 64.0;
const HILL_AMP: f64 = 18.0;
const MOUNTAIN_AMP: f64 = 26.0;
const TOPSOIL_DEPTH: i32 = 3;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainOpts {
    pub world_seed: u32,
    /// Side length of the square world, centred on the origin.
    pub world_size: u32,
    pub sea_level: i32,
    /// Expected number of trees per column.
    pub tree_density: f32,
}

impl Default for TerrainOpts {
    fn default() -> Self {
        Self {
            world_seed: 5284,
            world_size: 384,
            sea_level: 58,
            tree_density: 0.004,
        }
    }
}

/// Generates a self-contained demo world: rolling hills with a few ridges,
/// lakes below sea level and scattered trees.
pub struct TerrainGen {
    opts: TerrainOpts,
    hill_nz: Fbm<Perlin>,
    ridge_nz: RidgedMulti<Perlin>,
}

impl TerrainGen {
    pub fn new(opts: TerrainOpts) -> Self {
        let seed = opts.world_seed;
        Self {
            hill_nz: Fbm::<Perlin>::new(seed)
                .set_octaves(5)
                .set_frequency(1.0 / 160.0),
            ridge_nz: RidgedMulti::<Perlin>::new(seed.wrapping_add(1))
                .set_octaves(3)
                .set_frequency(1.0 / 300.0),
            opts,
        }
    }

    pub fn opts(&self) -> &TerrainOpts { &self.opts }

    pub fn alt(&self, wpos: Vec2<i32>) -> i32 {
        let wposf = wpos.map(|e| e as f64);
        let hill = self.hill_nz.get(wposf.into_array());
        let ridge = self.ridge_nz.get(wposf.into_array()).max(0.0);
        (BASE_ALT + hill * HILL_AMP + ridge * MOUNTAIN_AMP)
            .round()
            .clamp(1.0, (WORLD_HEIGHT - 32) as f64) as i32
    }

    pub fn generate(&self) -> Result<ColumnVol, VolError> {
        let half = (self.opts.world_size / 2) as i32;
        let mut vol = ColumnVol::empty(
            Vec2::broadcast(-half),
            Vec2::broadcast(self.opts.world_size),
            WORLD_HEIGHT,
        );
        let area = vol.area();

        let mut water_cols = 0;
        for y in area.min.y..=area.max.y {
            for x in area.min.x..=area.max.x {
                let wpos = Vec2::new(x, y);
                let alt = self.alt(wpos);
                let surface = if alt <= self.opts.sea_level + 1 {
                    BlockKind::Sand
                } else {
                    BlockKind::Grass
                };

                vol.set_column(wpos, alt, Block::new(BlockKind::Rock))?;
                for z in (alt - TOPSOIL_DEPTH).max(0)..alt {
                    vol.set(wpos.with_z(z), Block::new(BlockKind::Earth))?;
                }
                vol.set(wpos.with_z(alt), Block::new(surface))?;
                if alt < self.opts.sea_level {
                    water_cols += 1;
                    for z in alt + 1..=self.opts.sea_level {
                        vol.set(wpos.with_z(z), Block::water())?;
                    }
                }
            }
        }

        let trees = self.plant_trees(&mut vol)?;
        info!(
            size = self.opts.world_size,
            water_cols, trees, "Generated demo terrain"
        );
        Ok(vol)
    }

    fn plant_trees(&self, vol: &mut ColumnVol) -> Result<usize, VolError> {
        let mut rng = ChaChaRng::seed_from_u64(self.opts.world_seed as u64);
        let area = vol.area();
        // Canopies need two columns of room on every side of the trunk
        if area.max.x - area.min.x < 4 || area.max.y - area.min.y < 4 {
            return Ok(0);
        }
        let target = (self.opts.world_size.pow(2) as f32 * self.opts.tree_density) as usize;

        let mut planted = 0;
        for _ in 0..target {
            // Trees only grow on grass, leaving a margin for the canopy
            let root = attempt(8, || {
                let wpos = Vec2::new(
                    rng.gen_range(area.min.x + 2..=area.max.x - 2),
                    rng.gen_range(area.min.y + 2..=area.max.y - 2),
                );
                match vol.highest_solid(wpos) {
                    Ok((z, block)) if block.kind() == BlockKind::Grass => Some(Ok(wpos.with_z(z))),
                    Ok(_) => None,
                    Err(e) => Some(Err(e)),
                }
            });
            let root = match root {
                Some(root) => root?,
                None => continue,
            };

            let trunk = rng.gen_range(4..=6);
            for z in 1..=trunk {
                vol.set(root + Vec3::unit_z() * z, Block::new(BlockKind::Wood))?;
            }
            let top = root + Vec3::unit_z() * trunk;
            for dir in CARDINALS {
                for r in 1..=2 {
                    vol.set(top + Vec3::from(dir * r), Block::new(BlockKind::Leaves))?;
                }
                vol.set(top + Vec3::from(dir) - Vec3::unit_z(), Block::new(BlockKind::Leaves))?;
            }
            vol.set(top + Vec3::unit_z(), Block::new(BlockKind::Leaves))?;
            planted += 1;
        }
        debug!(planted, target, "Planted trees");
        Ok(planted)
    }
}
