use clap::Parser;
use std::path::PathBuf;
use vek::Vec2;
use world::site::{MAX_PLOT_BORDER, MAX_VILLAGE_SIZE};

#[derive(Parser, Clone, Debug)]
#[clap(name = "hamlet", about = "Lay out a village in a procedurally generated voxel world")]
pub struct Args {
    /// Centre of the village as `x,y`.
    ///
    /// Defaults to the centre of the generated world.
    #[clap(long, value_parser = parse_loc)]
    pub loc: Option<Vec2<i32>>,

    /// Side length of the square village area.
    #[clap(
        long,
        value_parser = clap::value_parser!(u32).range(1..=MAX_VILLAGE_SIZE as i64),
    )]
    pub village_size: Option<u32>,

    /// Width of the blended band around every plot.
    #[clap(long, value_parser = clap::value_parser!(u32).range(..=MAX_PLOT_BORDER as i64))]
    pub plot_border: Option<u32>,

    /// Village seed. Derived from the current time unless given or running
    /// with `--testmode`.
    #[clap(long)]
    pub seed: Option<u32>,

    /// Use the fixed seed from the settings file so runs are reproducible.
    #[clap(long)]
    pub testmode: bool,

    #[clap(long, default_value = "settings.ron")]
    pub settings: PathBuf,

    /// Also write logs to a daily rotated file in this directory.
    #[clap(long)]
    pub log_dir: Option<PathBuf>,
}

fn parse_loc(s: &str) -> Result<Vec2<i32>, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{}`", s))?;
    let coord = |c: &str| {
        c.trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid coordinate `{}`: {}", c, e))
    };
    Ok(Vec2::new(coord(x)?, coord(y)?))
}
