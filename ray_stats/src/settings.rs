use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::gate::CollectionGate;

pub const OUTPUT_FILE_ENV_VAR: &str = "VULKAN_SIM_RAY_STATS_FILE";
pub const DEFAULT_OUTPUT_FILE: &str = "ray_intersection_stats.csv";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsSettings {
    pub enabled: bool,
    pub output_path: Option<PathBuf>,
}

impl StatsSettings {
    /// Reads the enable flag and the optional output path override from the environment.
    pub fn from_env() -> Self {
        Self {
            enabled: CollectionGate::from_env().is_enabled(),
            output_path: std::env::var_os(OUTPUT_FILE_ENV_VAR).map(PathBuf::from),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|why| format!("Invalid stats settings: {}", why))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let file = std::fs::File::open(path)
            .map_err(|why| format!("Could not open '{}': {}", path.to_string_lossy(), why))?;
        serde_yaml::from_reader(file).map_err(|why| {
            format!(
                "Invalid stats settings in '{}': {}",
                path.to_string_lossy(),
                why
            )
        })
    }

    pub fn gate(&self) -> CollectionGate {
        CollectionGate::from(self.enabled)
    }

    /// Returns the override path if one was given, the default file name otherwise.
    pub fn resolved_output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
    }
}
