//! Game-side collaborator contracts and ids

mod jobs;
mod snapshot;

pub use jobs::{BOTANIST_JOB_ID, ClassJob, GatheringKind, MINER_JOB_ID, NodeDomain, ToolVariant};
pub use snapshot::{GameObject, GameSnapshot, ObjectKind, SnapshotData};
