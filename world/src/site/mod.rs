mod entrance;
mod plot;
mod sampler;
mod terraform;
mod wall;
mod waypoint;

pub use self::{
    entrance::select_entrance,
    plot::{aabr_cells, aabr_contains, aabr_within, Plot},
    sampler::{
        PlotSampler, Rejection, MAX_ATTEMPTS, MAX_PLOTS, MAX_SLOPE, MAX_WATER_COVERAGE, PLOT_SIZE,
    },
    terraform::{blend_factor, blend_height, border_distance, flatten_plot, terraform_plots, FILL},
    wall::{build_wall, wall_alt, WALL, WALL_HEIGHT},
    waypoint::{group_plots, place_waypoints, GROUP_SIZE},
};

use crate::Error;
use common::vol::WriteVol;
use rand::prelude::*;
use rand_chacha::ChaChaRng;
use tracing::info;
use vek::*;

/// Widest plot border a village may be configured with.
pub const MAX_PLOT_BORDER: u32 = 1024;
/// Largest village side length.
pub const MAX_VILLAGE_SIZE: u32 = 1 << 20;

/// Everything needed to lay out one village. Immutable for a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VillageConfig {
    pub center: Vec2<i32>,
    /// Side length of the square village area.
    pub size: u32,
    /// Width of the band around each plot that is blended into the terrain.
    pub plot_border: u32,
    pub seed: u32,
}

impl VillageConfig {
    /// Inclusive square area of the village.
    pub fn bounds(&self) -> Aabr<i32> {
        let half = (self.size / 2) as i32;
        Aabr {
            min: self.center - half,
            max: self.center + half,
        }
    }

    /// Plot border as a world distance, never wider than [`MAX_PLOT_BORDER`].
    pub fn border(&self) -> i32 { self.plot_border.min(MAX_PLOT_BORDER) as i32 }

    /// Check that the size and border can be laid out without overflowing
    /// world coordinates.
    pub fn validate(&self) -> Result<(), Error> {
        if !(1..=MAX_VILLAGE_SIZE).contains(&self.size) {
            return Err(Error::SizeOutOfRange {
                size: self.size,
                max: MAX_VILLAGE_SIZE,
            });
        }
        if self.plot_border > MAX_PLOT_BORDER {
            return Err(Error::BorderTooWide {
                border: self.plot_border,
                max: MAX_PLOT_BORDER,
            });
        }
        Ok(())
    }

    /// The fewest plots a successful layout may have.
    pub fn min_plots(&self) -> usize { (self.size as usize / 50).max(1) }
}

/// Minimum number of waypoints required for `plots` plots.
pub fn min_waypoints(plots: usize) -> usize { (plots / 5).max(1) }

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Village {
    pub plots: Vec<Plot>,
    pub waypoints: Vec<Vec3<i32>>,
    /// Base altitude of the perimeter wall.
    pub wall_alt: i32,
}

impl Village {
    /// Lay out a village: find plots, reshape the terrain around them, wall
    /// the village in and place waypoints between the plots.
    ///
    /// All randomness comes from a single stream seeded with
    /// `config.seed`, so the same world and config always give the same
    /// village.
    pub fn generate<V: WriteVol>(vol: &mut V, config: &VillageConfig) -> Result<Self, Error> {
        config.validate()?;
        let mut rng = ChaChaRng::seed_from_u64(config.seed as u64);

        info!(
            center = ?config.center,
            size = config.size,
            border = config.plot_border,
            "Finding suitable plots..."
        );
        let plots = PlotSampler::new(&*vol, config).find_plots(&mut rng)?;
        info!("Found {} plots", plots.len());

        info!("Terraforming land...");
        terraform_plots(vol, &plots, config.border())?;

        info!("Building village wall...");
        let wall_alt = build_wall(vol, config.bounds())?;

        info!("Placing waypoints...");
        let waypoints = place_waypoints(&*vol, &plots)?;
        info!("Placed {} waypoints", waypoints.len());

        Ok(Self {
            plots,
            waypoints,
            wall_alt,
        })
    }
}
