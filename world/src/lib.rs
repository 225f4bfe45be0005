#![deny(unsafe_code)]

pub mod sim;
pub mod site;
pub mod util;

// Reexports
pub use crate::{
    sim::{TerrainGen, TerrainOpts},
    site::{Plot, Village, VillageConfig},
};

use common::vol::VolError;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// The village side length is zero or too large to lay out.
    SizeOutOfRange { size: u32, max: u32 },
    /// The plot border is wider than [`site::MAX_PLOT_BORDER`].
    BorderTooWide { border: u32, max: u32 },
    /// Sampling stopped before enough plots passed validation.
    InsufficientPlots { required: usize, found: usize },
    /// Too many plot groups had their centroid inside a plot.
    InsufficientWaypoints { required: usize, found: usize },
    /// The world could not be read from or written to.
    World(VolError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeOutOfRange { size, max } => {
                write!(f, "village size {} is outside 1..={}", size, max)
            },
            Self::BorderTooWide { border, max } => {
                write!(f, "plot border {} is wider than the maximum of {}", border, max)
            },
            Self::InsufficientPlots { required, found } => write!(
                f,
                "could not find minimum required plots ({} required, {} found)",
                required, found
            ),
            Self::InsufficientWaypoints { required, found } => write!(
                f,
                "could not find minimum required waypoints ({} required, {} found)",
                required, found
            ),
            Self::World(err) => write!(f, "world access failed: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::World(err) => Some(err),
            _ => None,
        }
    }
}

impl From<VolError> for Error {
    fn from(err: VolError) -> Self { Error::World(err) }
}
