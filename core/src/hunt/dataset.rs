//! Mob location dataset
//!
//! A JSON file shipped next to the plugin listing, per territory, the spawn
//! points of hunt targets in map coordinates:
//!
//! ```text
//! { "version": 1,
//!   "data": [ { "territoryTypeId": 140,
//!               "mobs": [ { "bNpcNameId": 2953, "mobName": "Sabotender Bailarina",
//!                           "locations": [ { "x": 10.0, "y": 20.0 } ] } ] } ] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::coords::MapPoint;
use crate::error::DatasetError;

/// Oldest dataset layout this build understands
pub const MIN_DATASET_VERSION: u32 = 1;
/// Newest dataset layout this build understands
pub const MAX_DATASET_VERSION: u32 = 1;

pub const DATASET_DIR: &str = "Data";
pub const DATASET_FILE_NAME: &str = "MobLocations.json";

/// One hunt target and where it spawns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobEntry {
    #[serde(rename = "bNpcNameId")]
    pub bnpc_name_id: u32,
    /// Name used when the client has no localized name for the id
    #[serde(rename = "mobName", default)]
    pub mob_name: String,
    #[serde(default)]
    pub locations: Vec<MapPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerritoryMobs {
    #[serde(rename = "territoryTypeId")]
    pub territory_id: u16,
    #[serde(default)]
    pub mobs: Vec<MobEntry>,
}

/// File layout before validation
#[derive(Debug, Deserialize)]
struct RawMobLocationDataset {
    version: u32,
    #[serde(rename = "data", default)]
    territories: Vec<TerritoryMobs>,
}

/// Validated dataset. Deserializing checks the version and territory
/// uniqueness and builds the lookup index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawMobLocationDataset")]
pub struct MobLocationDataset {
    pub version: u32,
    #[serde(rename = "data")]
    territories: Vec<TerritoryMobs>,

    /// Territory id -> index into `territories`
    #[serde(skip)]
    index: HashMap<u16, usize>,
}

impl TryFrom<RawMobLocationDataset> for MobLocationDataset {
    type Error = DatasetError;

    fn try_from(raw: RawMobLocationDataset) -> Result<Self, Self::Error> {
        Self::new(raw.version, raw.territories)
    }
}

impl MobLocationDataset {
    /// Build and validate a dataset from already decoded parts
    pub fn new(version: u32, territories: Vec<TerritoryMobs>) -> Result<Self, DatasetError> {
        Self {
            version,
            territories,
            index: HashMap::new(),
        }
        .validated()
    }

    /// Check the version and territory uniqueness, and build the lookup index
    fn validated(mut self) -> Result<Self, DatasetError> {
        if !(MIN_DATASET_VERSION..=MAX_DATASET_VERSION).contains(&self.version) {
            return Err(DatasetError::UnsupportedVersion {
                found: self.version,
                min: MIN_DATASET_VERSION,
                max: MAX_DATASET_VERSION,
            });
        }

        self.index.clear();
        for (i, territory) in self.territories.iter().enumerate() {
            if self.index.insert(territory.territory_id, i).is_some() {
                return Err(DatasetError::DuplicateTerritory(territory.territory_id));
            }
        }
        Ok(self)
    }

    /// Read, parse and validate a dataset file
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let contents = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawMobLocationDataset =
            serde_json::from_str(&contents).map_err(|source| DatasetError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let dataset = Self::new(raw.version, raw.territories)?;

        tracing::info!(
            version = dataset.version,
            territories = dataset.territories.len(),
            "Loaded mob location data"
        );
        Ok(dataset)
    }

    pub fn territory(&self, territory_id: u16) -> Option<&TerritoryMobs> {
        self.index
            .get(&territory_id)
            .and_then(|&i| self.territories.get(i))
    }

    pub fn territories(&self) -> &[TerritoryMobs] {
        &self.territories
    }

    pub fn mob_count(&self) -> usize {
        self.territories.iter().map(|t| t.mobs.len()).sum()
    }

    pub fn location_count(&self) -> usize {
        self.territories
            .iter()
            .flat_map(|t| &t.mobs)
            .map(|m| m.locations.len())
            .sum()
    }
}

/// Find the dataset file for an install directory.
///
/// Looks in `<base>/Data/` first, then in the parent's `Data/` (development
/// builds run from a nested output directory).
pub fn locate_dataset(base_dir: &Path) -> Result<PathBuf, DatasetError> {
    let mut searched = Vec::with_capacity(2);

    let primary = base_dir.join(DATASET_DIR).join(DATASET_FILE_NAME);
    if primary.is_file() {
        return Ok(primary);
    }
    searched.push(primary);

    if let Some(parent) = base_dir.parent() {
        let fallback = parent.join(DATASET_DIR).join(DATASET_FILE_NAME);
        if fallback.is_file() {
            return Ok(fallback);
        }
        searched.push(fallback);
    }

    Err(DatasetError::NotFound { searched })
}

/// Locate and load the dataset, logging the outcome once.
///
/// A failure leaves the hunt overlay without data for the rest of the
/// process; it is not retried.
pub fn load_dataset(base_dir: &Path) -> Option<MobLocationDataset> {
    let path = match locate_dataset(base_dir) {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(error = %e, "Mob location data not found");
            return None;
        }
    };

    match MobLocationDataset::load(&path) {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load mob location data");
            None
        }
    }
}

/// Default install directory for data files
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("mapmark"))
}
