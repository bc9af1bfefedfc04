use mapmark_types::IconId;
use serde::{Deserialize, Serialize};

use crate::coords::WorldPosition;

/// A marker as handed to the host's map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: WorldPosition,
    pub icon: IconId,
}

/// The host's map marker list.
///
/// The list is shared by everything drawing on the map: a reset clears
/// markers placed by anyone, not only by this engine.
pub trait MarkerSink {
    fn reset_markers(&mut self);
    fn add_marker(&mut self, position: WorldPosition, icon: IconId);
}

/// In-memory marker list that also counts resets
#[derive(Debug, Clone, Default)]
pub struct MarkerList {
    markers: Vec<Marker>,
    resets: usize,
}

impl MarkerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Number of times the list was cleared
    pub fn resets(&self) -> usize {
        self.resets
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl MarkerSink for MarkerList {
    fn reset_markers(&mut self) {
        self.markers.clear();
        self.resets += 1;
    }

    fn add_marker(&mut self, position: WorldPosition, icon: IconId) {
        self.markers.push(Marker { position, icon });
    }
}
