//! Read-only view of the game client handed to the engine on each trigger.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::coords::{MapMetadata, WorldPosition};

/// Object table entry kinds the engine distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    GatheringPoint,
    BattleNpc,
    EventObject,
    #[default]
    Other,
}

/// An entry from the nearby object table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    #[serde(default)]
    pub kind: ObjectKind,
    /// Sheet row id; for gathering points this is the `GatheringPoint` row
    pub base_id: u32,
    #[serde(default)]
    pub is_targetable: bool,
    pub position: WorldPosition,
}

/// Everything the overlays read from the running client.
///
/// Implementations are expected to answer from a consistent snapshot for the
/// duration of one trigger. `None` means "not available right now" (loading
/// screen, logged out, sheet not loaded).
pub trait GameSnapshot {
    /// Class/job row id of the local player; `None` without a local player
    fn player_job(&self) -> Option<u32>;

    /// Territory the player is standing in
    fn territory_id(&self) -> Option<u16>;

    /// Territory shown in the map window, if the player browsed to another one
    fn selected_territory_id(&self) -> Option<u16> {
        None
    }

    /// Map the player is standing on
    fn map_id(&self) -> Option<u32>;

    /// Map shown in the map window, if the player browsed to another one
    fn selected_map_id(&self) -> Option<u32> {
        None
    }

    /// Title text of the map window
    fn map_title(&self) -> Option<&str>;

    /// Scale/offset row for a map id
    fn map_metadata(&self, map_id: u32) -> Option<MapMetadata>;

    /// Nearby objects
    fn objects(&self) -> &[GameObject];

    /// Localized singular name of a battle NPC
    fn bnpc_name(&self, bnpc_name_id: u32) -> Option<&str>;
}

/// Plain-data snapshot, deserializable from JSON.
///
/// Used by tooling to replay a captured client state, and by tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotData {
    pub player_job: Option<u32>,
    pub territory_id: Option<u16>,
    pub selected_territory_id: Option<u16>,
    pub map_id: Option<u32>,
    pub selected_map_id: Option<u32>,
    pub map_title: Option<String>,
    pub maps: HashMap<u32, MapMetadata>,
    pub objects: Vec<GameObject>,
    pub bnpc_names: HashMap<u32, String>,
}

impl GameSnapshot for SnapshotData {
    fn player_job(&self) -> Option<u32> {
        self.player_job
    }

    fn territory_id(&self) -> Option<u16> {
        self.territory_id
    }

    fn selected_territory_id(&self) -> Option<u16> {
        self.selected_territory_id
    }

    fn map_id(&self) -> Option<u32> {
        self.map_id
    }

    fn selected_map_id(&self) -> Option<u32> {
        self.selected_map_id
    }

    fn map_title(&self) -> Option<&str> {
        self.map_title.as_deref()
    }

    fn map_metadata(&self, map_id: u32) -> Option<MapMetadata> {
        self.maps.get(&map_id).copied()
    }

    fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    fn bnpc_name(&self, bnpc_name_id: u32) -> Option<&str> {
        self.bnpc_names.get(&bnpc_name_id).map(String::as_str)
    }
}
