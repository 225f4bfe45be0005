use common::{
    terrain::{Block, BlockKind},
    vol::{ReadVol, VolError, WriteVol},
    volumes::ColumnVol,
};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use vek::*;

pub const WORLD_HEIGHT: u32 = 96;

pub fn setup(tracing: bool) {
    if tracing {
        let filter = EnvFilter::from_default_env()
            .add_directive("hamlet_world=trace".parse().unwrap())
            .add_directive("hamlet_world::site::sampler=debug".parse().unwrap());

        // Another test may have installed one already
        let _ = tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(Level::TRACE)
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}

/// A world of `size` x `size` columns centred on the origin, every column
/// topped by `top` at altitude `alt`.
pub fn flat_world(size: u32, alt: i32, top: BlockKind) -> ColumnVol {
    let half = (size / 2) as i32;
    let mut vol = ColumnVol::empty(Vec2::broadcast(-half), Vec2::broadcast(size), WORLD_HEIGHT);
    let area = vol.area();
    for y in area.min.y..=area.max.y {
        for x in area.min.x..=area.max.x {
            vol.set_column(Vec2::new(x, y), alt, Block::new(top)).unwrap();
        }
    }
    vol
}

/// A world whose columns are all rock up to `floor` with water above,
/// up to `sea_level`.
pub fn flooded_world(size: u32, floor: i32, sea_level: i32) -> ColumnVol {
    let mut vol = flat_world(size, floor, BlockKind::Rock);
    let area = vol.area();
    for y in area.min.y..=area.max.y {
        for x in area.min.x..=area.max.x {
            for z in floor + 1..=sea_level {
                vol.set(Vec3::new(x, y, z), Block::water()).unwrap();
            }
        }
    }
    vol
}

/// A world that cannot be reached.
pub struct OfflineVol;

impl ReadVol for OfflineVol {
    fn get(&self, _pos: Vec3<i32>) -> Result<Block, VolError> {
        Err(VolError::Unavailable("connection refused".to_string()))
    }
}

impl WriteVol for OfflineVol {
    fn set(&mut self, _pos: Vec3<i32>, _block: Block) -> Result<(), VolError> {
        Err(VolError::Unavailable("connection refused".to_string()))
    }
}
