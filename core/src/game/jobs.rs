use serde::{Deserialize, Serialize};

pub const MINER_JOB_ID: u32 = 16;
pub const BOTANIST_JOB_ID: u32 = 17;

/// The player's active class/job, as far as the overlays care
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassJob {
    Miner,
    Botanist,
    Other(u32),
}

impl ClassJob {
    pub fn from_id(id: u32) -> Self {
        match id {
            MINER_JOB_ID => Self::Miner,
            BOTANIST_JOB_ID => Self::Botanist,
            other => Self::Other(other),
        }
    }

    /// Which kind of gathering node this job can work, if any
    pub fn gathering_domain(&self) -> Option<NodeDomain> {
        match self {
            Self::Miner => Some(NodeDomain::Mining),
            Self::Botanist => Some(NodeDomain::Botany),
            Self::Other(_) => None,
        }
    }
}

/// Mining nodes belong to Miner, botany nodes to Botanist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeDomain {
    Mining,
    Botany,
}

/// Which of the job's two tools the node needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolVariant {
    /// Pickaxe / hatchet
    Primary,
    /// Sledgehammer / sickle
    Secondary,
}

/// Classification of a `GatheringType` sheet row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GatheringKind {
    pub domain: NodeDomain,
    pub tool: ToolVariant,
}

impl GatheringKind {
    /// Map a gathering type id to its node kind.
    ///
    /// 0 mining, 1 quarrying, 2 logging, 3 harvesting. Anything else
    /// (fishing, spearfishing) has no map node and yields `None`.
    pub fn from_type_id(type_id: u32) -> Option<Self> {
        let (domain, tool) = match type_id {
            0 => (NodeDomain::Mining, ToolVariant::Primary),
            1 => (NodeDomain::Mining, ToolVariant::Secondary),
            2 => (NodeDomain::Botany, ToolVariant::Primary),
            3 => (NodeDomain::Botany, ToolVariant::Secondary),
            _ => return None,
        };
        Some(Self { domain, tool })
    }
}
