pub mod config;
pub mod coords;
pub mod engine;
pub mod error;
pub mod events;
pub mod game;
pub mod gathering;
pub mod hunt;
pub mod overlay;
pub mod sink;
pub mod throttle;
pub mod title;


// Re-exports for convenience
pub use coords::{MapMetadata, MapPoint, WorldPosition, map_to_world, world_to_map};
pub use engine::{MarkerEngine, OverlayKind};
pub use error::{DatasetError, EngineError};
pub use events::{EventRegistry, SubscriptionId, TriggerContext, ViewEvent, ViewEvents};
pub use game::{GameSnapshot, SnapshotData};
pub use overlay::{MarkerOverlay, OverlayState, RefreshOutcome};
pub use sink::{Marker, MarkerList, MarkerSink};
pub use throttle::{UPDATE_INTERVAL, UpdateThrottle};
pub use title::extract_sub_area;
