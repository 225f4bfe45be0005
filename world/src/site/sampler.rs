use super::{
    entrance::select_entrance,
    plot::{aabr_within, Plot},
    VillageConfig,
};
use crate::Error;
use common::vol::ReadVol;
use rand::prelude::*;
use std::ops::RangeInclusive;
use tracing::{debug, info, trace};
use vek::*;

/// Side lengths a plot may be drawn with.
pub const PLOT_SIZE: RangeInclusive<i32> = 14..=20;
pub const MAX_ATTEMPTS: usize = 1000;
/// Sampling stops early once this many plots have been accepted.
pub const MAX_PLOTS: usize = 100;
/// Largest fraction of a plot's surface that may be water.
pub const MAX_WATER_COVERAGE: f32 = 0.15;
/// Largest altitude difference across a plot's (tree-free) surface.
pub const MAX_SLOPE: i32 = 15;

/// Why a candidate plot was turned down.
#[derive(Clone, Debug, PartialEq)]
pub enum Rejection {
    /// The plot plus its border would reach outside the village.
    OutsideVillage,
    /// The plot overlaps an already accepted plot.
    Intersects,
    TooWet { coverage: f32 },
    TooSteep { delta: i32 },
}

/// Surface statistics of a plot's footprint.
struct Survey {
    cells: usize,
    water: usize,
    /// Altitude range of the surface, ignoring trees.
    alt_range: Option<(i32, i32)>,
}

impl Survey {
    fn water_coverage(&self) -> f32 { self.water as f32 / self.cells as f32 }

    fn slope(&self) -> i32 { self.alt_range.map_or(0, |(min, max)| max - min) }
}

/// Rejection-samples square plots inside a village, checking each candidate
/// against the terrain and against the plots accepted before it.
pub struct PlotSampler<'a, V> {
    vol: &'a V,
    config: &'a VillageConfig,
}

impl<'a, V: ReadVol> PlotSampler<'a, V> {
    pub fn new(vol: &'a V, config: &'a VillageConfig) -> Self { Self { vol, config } }

    pub fn find_plots(&self, rng: &mut impl Rng) -> Result<Vec<Plot>, Error> {
        self.config.validate()?;
        let bounds = self.config.bounds();
        let mut plots = Vec::new();
        let mut attempts = 0;

        while attempts < MAX_ATTEMPTS && plots.len() < MAX_PLOTS {
            attempts += 1;

            let size = rng.gen_range(PLOT_SIZE);
            let center = Vec2::new(
                rng.gen_range(bounds.min.x..=bounds.max.x),
                rng.gen_range(bounds.min.y..=bounds.max.y),
            );
            let origin = center - size / 2;
            let bound = origin + size - 1;

            let (alt, _) = self.vol.highest_solid(center)?;
            let mut candidate = Plot::new(origin, bound, center, alt);

            if let Some(rejection) = self.validate(&candidate, &plots)? {
                trace!(?origin, size, ?rejection, "Rejected plot");
                continue;
            }

            candidate.entrance = select_entrance(self.config.center, &candidate, rng);
            debug!(
                ?origin,
                size,
                alt,
                entrance = ?candidate.entrance,
                "Accepted plot"
            );
            plots.push(candidate);
        }

        let required = self.config.min_plots();
        info!(attempts, found = plots.len(), required, "Plot sampling finished");
        if plots.len() < required {
            return Err(Error::InsufficientPlots {
                required,
                found: plots.len(),
            });
        }

        Ok(plots)
    }

    pub fn is_valid_plot(&self, plot: &Plot, existing: &[Plot]) -> Result<bool, Error> {
        Ok(self.validate(plot, existing)?.is_none())
    }

    /// Check a candidate against every placement rule, returning the first
    /// one it breaks.
    ///
    /// The geometric rules run first so that candidates reaching outside the
    /// village never touch the terrain.
    pub fn validate(&self, plot: &Plot, existing: &[Plot]) -> Result<Option<Rejection>, Error> {
        if !aabr_within(
            plot.aabr_with_border(self.config.border()),
            self.config.bounds(),
        ) {
            return Ok(Some(Rejection::OutsideVillage));
        }
        if existing.iter().any(|other| plot.intersects(other)) {
            return Ok(Some(Rejection::Intersects));
        }

        let survey = self.survey(plot)?;
        let coverage = survey.water_coverage();
        if coverage > MAX_WATER_COVERAGE {
            return Ok(Some(Rejection::TooWet { coverage }));
        }
        let delta = survey.slope();
        if delta > MAX_SLOPE {
            return Ok(Some(Rejection::TooSteep { delta }));
        }

        Ok(None)
    }

    fn survey(&self, plot: &Plot) -> Result<Survey, Error> {
        let mut survey = Survey {
            cells: 0,
            water: 0,
            alt_range: None,
        };
        for wpos in plot.cells() {
            let (z, block) = self.vol.highest_solid(wpos)?;
            survey.cells += 1;
            if block.is_water() {
                survey.water += 1;
            }
            if !block.is_tree() {
                survey.alt_range = Some(match survey.alt_range {
                    Some((min, max)) => (min.min(z), max.max(z)),
                    None => (z, z),
                });
            }
        }
        Ok(survey)
    }
}
