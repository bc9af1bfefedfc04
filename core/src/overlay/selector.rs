use mapmark_types::{IconId, RuleConfiguration};

use crate::coords::{self, MapMetadata, MapPoint, WorldPosition};
use crate::error::EngineError;
use crate::game::GameSnapshot;
use crate::sink::Marker;

/// Where a selected marker was found
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerAnchor {
    /// Live entity position
    World(WorldPosition),
    /// Map-pixel coordinate from static data
    Map(MapPoint),
}

/// A selector result before the transform pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMarker {
    pub anchor: MarkerAnchor,
    pub icon: IconId,
}

impl RawMarker {
    pub fn world(position: WorldPosition, icon: IconId) -> Self {
        Self {
            anchor: MarkerAnchor::World(position),
            icon,
        }
    }

    pub fn map(point: MapPoint, icon: IconId) -> Self {
        Self {
            anchor: MarkerAnchor::Map(point),
            icon,
        }
    }

    /// Take the anchor into map space, then back out to the world position
    /// the host expects.
    pub fn place(&self, meta: &MapMetadata) -> Result<Marker, EngineError> {
        let point = match self.anchor {
            MarkerAnchor::World(pos) => coords::world_to_map(pos.x, pos.z, meta)?,
            MarkerAnchor::Map(point) => point,
        };
        Ok(Marker {
            position: coords::map_to_world(point, meta)?,
            icon: self.icon,
        })
    }
}

/// What a selector decided for this cycle
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Leave the host's markers as they are
    Unchanged,
    /// Replace every marker with this set (possibly empty)
    Replace(Vec<RawMarker>),
}

/// Context resolved once per refresh and shared with the selector
pub struct RefreshContext<'a> {
    pub game: &'a dyn GameSnapshot,
    pub map_id: u32,
    /// Selected territory, falling back to the player's
    pub territory_id: Option<u16>,
    pub map: MapMetadata,
    /// Map window title, empty when the host has none
    pub title: &'a str,
}

/// Decides which markers an overlay shows
pub trait MarkerSelector {
    /// Short name used in log fields
    fn name(&self) -> &'static str;

    /// Whether the overlay is switched on in the configuration
    fn is_enabled(&self, config: &RuleConfiguration) -> bool;

    fn select(
        &self,
        ctx: &RefreshContext<'_>,
        config: &RuleConfiguration,
    ) -> Result<Selection, EngineError>;
}
