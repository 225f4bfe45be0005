#![deny(unsafe_code)]

mod cli;
mod settings;

use crate::{cli::Args, settings::Settings};
use clap::Parser;
use std::{
    error::Error,
    process,
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::{error, info};
use vek::*;
use world::{site::aabr_within, TerrainGen, Village, VillageConfig};

const LOG_FILE: &str = "hamlet.log";

/// Resolve the village to lay out from the command line and the settings
/// file, command line first.
fn village_config(
    args: &Args,
    settings: &Settings,
    world_center: Vec2<i32>,
    now_seed: u32,
) -> VillageConfig {
    let seed = match (args.seed, args.testmode) {
        (Some(seed), _) => seed,
        (None, true) => settings.village.seed,
        (None, false) => now_seed,
    };
    VillageConfig {
        center: args.loc.unwrap_or(world_center),
        size: args.village_size.unwrap_or(settings.village.size),
        plot_border: args.plot_border.unwrap_or(settings.village.plot_border),
        seed,
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or_default()
}

fn run(args: &Args, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let gen = TerrainGen::new(settings.terrain.clone());
    let mut vol = gen.generate()?;
    let world_area = vol.area();

    let config = village_config(args, settings, world_area.center(), time_seed());
    config.validate()?;
    if !aabr_within(config.bounds(), world_area) {
        return Err(format!(
            "village at {:?} with size {} does not fit in the world ({:?} to {:?})",
            config.center, config.size, world_area.min, world_area.max
        )
        .into());
    }

    info!(
        center = ?config.center,
        size = config.size,
        plot_border = config.plot_border,
        seed = config.seed,
        "Generating village"
    );
    let village = Village::generate(&mut vol, &config)?;

    for plot in &village.plots {
        info!(
            origin = ?plot.origin(),
            bound = ?plot.bound(),
            alt = plot.alt(),
            entrance = ?plot.entrance_wpos(),
            "Plot"
        );
    }
    for waypoint in &village.waypoints {
        info!(?waypoint, "Waypoint");
    }
    info!(
        plots = village.plots.len(),
        waypoints = village.waypoints.len(),
        wall_alt = village.wall_alt,
        "Village generation complete!"
    );
    Ok(())
}

fn main() {
    let args = Args::parse();

    let guards = common_frontend::init_stdout(args.log_dir.as_deref().map(|dir| (dir, LOG_FILE)));
    info!("Starting hamlet...");

    let settings = Settings::load(&args.settings);
    let result = run(&args, &settings);
    if let Err(e) = &result {
        error!("Error: {}", e);
    }

    // Flush the log writers before exiting
    drop(guards);
    if result.is_err() {
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::VillageSettings;

    fn settings() -> Settings {
        Settings {
            village: VillageSettings {
                size: 120,
                plot_border: 4,
                seed: 77,
            },
            ..Settings::default()
        }
    }

    #[test]
    fn settings_fill_in_missing_flags() {
        let args = Args::try_parse_from(["hamlet"]).unwrap();
        let config = village_config(&args, &settings(), Vec2::new(3, 4), 99);
        assert_eq!(config, VillageConfig {
            center: Vec2::new(3, 4),
            size: 120,
            plot_border: 4,
            seed: 99,
        });
    }

    #[test]
    fn flags_override_settings() {
        let args = Args::try_parse_from([
            "hamlet",
            "--loc",
            "10,20",
            "--village-size",
            "60",
            "--plot-border",
            "2",
            "--seed",
            "5",
            "--testmode",
        ])
        .unwrap();
        let config = village_config(&args, &settings(), Vec2::zero(), 99);
        assert_eq!(config, VillageConfig {
            center: Vec2::new(10, 20),
            size: 60,
            plot_border: 2,
            seed: 5,
        });
    }

    #[test]
    fn testmode_uses_fixed_seed() {
        let args = Args::try_parse_from(["hamlet", "--testmode"]).unwrap();
        assert_eq!(village_config(&args, &settings(), Vec2::zero(), 99).seed, 77);
    }

    #[test]
    fn settings_values_are_range_checked() {
        let args = Args::try_parse_from(["hamlet"]).unwrap();
        let mut settings = settings();
        settings.village.plot_border = u32::MAX;
        let config = village_config(&args, &settings, Vec2::zero(), 99);
        assert!(matches!(config.validate(), Err(world::Error::BorderTooWide { .. })));
    }
}
