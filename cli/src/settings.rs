use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use tracing::{error, warn};
use world::TerrainOpts;

const DEFAULT_VILLAGE_SEED: u32 = 1337;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VillageSettings {
    pub size: u32,
    pub plot_border: u32,
    /// Seed used in test mode.
    pub seed: u32,
}

impl Default for VillageSettings {
    fn default() -> Self {
        Self {
            size: 200,
            plot_border: 10,
            seed: DEFAULT_VILLAGE_SEED,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub terrain: TerrainOpts,
    pub village: VillageSettings,
}

impl Settings {
    /// Load the settings at `path`, falling back to the defaults if the file
    /// cannot be parsed. A missing file is created with the defaults.
    pub fn load(path: &Path) -> Self {
        if let Ok(file) = fs::File::open(path) {
            match ron::de::from_reader(file) {
                Ok(x) => x,
                Err(e) => {
                    warn!(?e, ?path, "Failed to parse setting file! Fallback to default.");
                    Self::default()
                },
            }
        } else {
            let default_settings = Self::default();

            if let Err(e) = default_settings.save_to_file(path) {
                error!(?e, ?path, "Failed to create default setting file!");
            }
            default_settings
        }
    }

    pub fn save_to_file(&self, path: &Path) -> io::Result<()> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(path, ron.as_bytes())
    }
}
