//! Shared configuration types for mapmark.
//!
//! Kept free of engine logic so settings editors and tooling can depend on
//! it without pulling in the overlay engine.

pub mod config;

pub use config::{
    CONFIG_VERSION, DEFAULT_BOTANY_PRIMARY_ICON, DEFAULT_BOTANY_SECONDARY_ICON, DEFAULT_HUNT_ICON,
    DEFAULT_MINING_PRIMARY_ICON, DEFAULT_MINING_SECONDARY_ICON, GatherIcons, GatherMapConfig,
    IconId, MobHuntConfig, RuleConfiguration,
};
