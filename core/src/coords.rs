//! World ⇄ map-pixel coordinate conversion
//!
//! Map space is what the player reads off the map window (roughly 1..42 for
//! a 100% map). World space is the game's 3-D position; only x and z are
//! used, and world z becomes map y.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Map coordinate of the world origin at any scale
pub const MAP_ORIGIN: f32 = 21.0;

/// World units per map unit at a 100% size factor
pub const WORLD_UNITS_PER_MAP_UNIT: f32 = 50.0;

/// Height assigned to positions converted back from map space
pub const GROUND_Y: f32 = 0.0;

/// A position in game world space. `y` is vertical.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPosition {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A position in map-pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f32,
    pub y: f32,
}

impl MapPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Per-map scale and offset, as stored in the game's map sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapMetadata {
    /// Zoom in percent; 100 is the normal field map scale
    pub size_factor: u16,
    pub offset_x: i16,
    pub offset_y: i16,
}

impl Default for MapMetadata {
    fn default() -> Self {
        Self {
            size_factor: 100,
            offset_x: 0,
            offset_y: 0,
        }
    }
}

impl MapMetadata {
    pub const fn new(size_factor: u16, offset_x: i16, offset_y: i16) -> Self {
        Self {
            size_factor,
            offset_x,
            offset_y,
        }
    }

    /// Size factor as a multiplier. Rejects zero so callers never divide by it.
    pub fn scale(&self) -> Result<f32, EngineError> {
        if self.size_factor == 0 {
            return Err(EngineError::InvalidMetadata {
                size_factor: self.size_factor,
            });
        }
        Ok(f32::from(self.size_factor) / 100.0)
    }
}

/// Convert a world (x, z) pair to map-pixel coordinates.
pub fn world_to_map(world_x: f32, world_z: f32, meta: &MapMetadata) -> Result<MapPoint, EngineError> {
    let scale = meta.scale()?;
    Ok(MapPoint {
        x: (world_x + f32::from(meta.offset_x)) * scale / WORLD_UNITS_PER_MAP_UNIT + MAP_ORIGIN,
        y: (world_z + f32::from(meta.offset_y)) * scale / WORLD_UNITS_PER_MAP_UNIT + MAP_ORIGIN,
    })
}

/// Convert a map-pixel coordinate back to world space, placed on the ground plane.
pub fn map_to_world(point: MapPoint, meta: &MapMetadata) -> Result<WorldPosition, EngineError> {
    let scale = meta.scale()?;
    Ok(WorldPosition {
        x: (point.x - MAP_ORIGIN) * WORLD_UNITS_PER_MAP_UNIT / scale - f32::from(meta.offset_x),
        y: GROUND_Y,
        z: (point.y - MAP_ORIGIN) * WORLD_UNITS_PER_MAP_UNIT / scale - f32::from(meta.offset_y),
    })
}

/// Pass a world position through map space and back.
///
/// This is the position the host's marker API receives. The height is
/// replaced by [`GROUND_Y`].
pub fn normalize(position: WorldPosition, meta: &MapMetadata) -> Result<WorldPosition, EngineError> {
    let point = world_to_map(position.x, position.z, meta)?;
    map_to_world(point, meta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        let tolerance = 1e-3 * b.abs().max(1.0);
        assert!((a - b).abs() <= tolerance, "{a} != {b}");
    }

    #[test]
    fn test_world_origin_maps_to_center_at_default_scale() {
        let point = world_to_map(0.0, 0.0, &MapMetadata::default()).unwrap();
        assert_eq!(point, MapPoint::new(21.0, 21.0));
    }

    #[test]
    fn test_z_axis_becomes_map_y() {
        let meta = MapMetadata::default();
        let point = world_to_map(0.0, 100.0, &meta).unwrap();
        assert_close(point.x, 21.0);
        assert_close(point.y, 23.0);
    }

    #[test]
    fn test_offsets_and_scale_applied() {
        // (100 + 50) * 2.0 / 50 + 21 = 27
        let meta = MapMetadata::new(200, 50, -50);
        let point = world_to_map(100.0, 100.0, &meta).unwrap();
        assert_close(point.x, 27.0);
        assert_close(point.y, 23.0);
    }

    #[test]
    fn test_map_to_world_sets_ground_height() {
        let meta = MapMetadata::new(200, 50, -50);
        let world = map_to_world(MapPoint::new(27.0, 23.0), &meta).unwrap();
        assert_close(world.x, 100.0);
        assert_close(world.z, 100.0);
        assert_eq!(world.y, GROUND_Y);
    }

    #[test]
    fn test_round_trip_across_metadata() {
        let metas = [
            MapMetadata::default(),
            MapMetadata::new(200, -120, 310),
            MapMetadata::new(400, 0, 0),
            MapMetadata::new(95, 1024, -768),
            MapMetadata::new(50, -300, 300),
        ];
        let positions = [
            WorldPosition::new(0.0, 0.0, 0.0),
            WorldPosition::new(-512.25, 40.0, 731.5),
            WorldPosition::new(1500.0, -3.0, -1499.75),
            WorldPosition::new(0.125, 0.0, -0.125),
        ];

        for meta in &metas {
            for pos in &positions {
                let back = normalize(*pos, meta).unwrap();
                assert_close(back.x, pos.x);
                assert_close(back.z, pos.z);
                assert_eq!(back.y, GROUND_Y);
            }
        }
    }

    #[test]
    fn test_zero_size_factor_rejected() {
        let meta = MapMetadata::new(0, 0, 0);
        assert_eq!(
            world_to_map(1.0, 1.0, &meta),
            Err(EngineError::InvalidMetadata { size_factor: 0 })
        );
        assert_eq!(
            map_to_world(MapPoint::new(21.0, 21.0), &meta),
            Err(EngineError::InvalidMetadata { size_factor: 0 })
        );
    }
}
