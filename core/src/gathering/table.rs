//! Static gathering point sheets
//!
//! Two lookups chained together: `GatheringPoint` row → `GatheringPointBase`
//! row → `GatheringType` id.

use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, EngineError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatheringPointTable {
    /// Gathering point id -> base point id
    points: HashMap<u32, u32>,
    /// Base point id -> gathering type id
    bases: HashMap<u32, u32>,
}

impl GatheringPointTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_point(&mut self, point_id: u32, base_id: u32) {
        self.points.insert(point_id, base_id);
    }

    pub fn insert_base(&mut self, base_id: u32, type_id: u32) {
        self.bases.insert(base_id, type_id);
    }

    pub fn base_of(&self, point_id: u32) -> Option<u32> {
        self.points.get(&point_id).copied()
    }

    pub fn type_of(&self, base_id: u32) -> Option<u32> {
        self.bases.get(&base_id).copied()
    }

    /// Resolve a gathering point id all the way to its gathering type id
    pub fn resolve_type(&self, point_id: u32) -> Result<u32, EngineError> {
        let base_id = self
            .base_of(point_id)
            .ok_or(EngineError::UnresolvableReference {
                table: "GatheringPoint",
                id: point_id,
            })?;
        self.type_of(base_id)
            .ok_or(EngineError::UnresolvableReference {
                table: "GatheringPointBase",
                id: base_id,
            })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Load an exported sheet pair from JSON
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let contents = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table: Self = serde_json::from_str(&contents).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            points = table.points.len(),
            bases = table.bases.len(),
            "Loaded gathering point table"
        );
        Ok(table)
    }
}
