//! Rule configuration shared by the engine and its tooling.
//!
//! Every section carries `#[serde(default)]` so a config file written by an
//! older build (or hand-edited with missing keys) still loads with sane values.

use serde::{Deserialize, Serialize};

/// Identifier of a map marker glyph.
pub type IconId = u32;

/// Current configuration schema version.
///
/// Version 5 moved the gathering icons to the mining/quarrying and
/// logging/harvesting glyphs. Older files get their icons reset on load.
pub const CONFIG_VERSION: u32 = 5;

pub const DEFAULT_HUNT_ICON: IconId = 60434;
pub const DEFAULT_MINING_PRIMARY_ICON: IconId = 60438;
pub const DEFAULT_MINING_SECONDARY_ICON: IconId = 60437;
pub const DEFAULT_BOTANY_PRIMARY_ICON: IconId = 60433;
pub const DEFAULT_BOTANY_SECONDARY_ICON: IconId = 60432;

fn default_true() -> bool {
    true
}

/// Top-level user configuration for both map overlays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfiguration {
    /// Schema version, see [`CONFIG_VERSION`]
    pub version: u32,
    pub gather_map: GatherMapConfig,
    pub mob_hunt: MobHuntConfig,
}

impl Default for RuleConfiguration {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            gather_map: GatherMapConfig::default(),
            mob_hunt: MobHuntConfig::default(),
        }
    }
}

impl RuleConfiguration {
    /// Bring an older configuration up to [`CONFIG_VERSION`].
    ///
    /// Returns `true` if anything changed and the file should be saved again.
    pub fn migrate(&mut self) -> bool {
        if self.version >= CONFIG_VERSION {
            return false;
        }
        self.gather_map.icons.reset();
        self.version = CONFIG_VERSION;
        true
    }
}

/// Gathering node overlay settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatherMapConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub icons: GatherIcons,
}

impl Default for GatherMapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            icons: GatherIcons::default(),
        }
    }
}

/// Marker icons for the four gathering node variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatherIcons {
    /// Mining (pickaxe) nodes
    pub mining_primary: IconId,
    /// Quarrying (sledgehammer) nodes
    pub mining_secondary: IconId,
    /// Logging (hatchet) nodes
    pub botany_primary: IconId,
    /// Harvesting (sickle) nodes
    pub botany_secondary: IconId,
}

impl Default for GatherIcons {
    fn default() -> Self {
        Self {
            mining_primary: DEFAULT_MINING_PRIMARY_ICON,
            mining_secondary: DEFAULT_MINING_SECONDARY_ICON,
            botany_primary: DEFAULT_BOTANY_PRIMARY_ICON,
            botany_secondary: DEFAULT_BOTANY_SECONDARY_ICON,
        }
    }
}

impl GatherIcons {
    /// Restore the default glyphs
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Hunt target overlay settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MobHuntConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub marker_icon_id: IconId,
}

impl Default for MobHuntConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            marker_icon_id: DEFAULT_HUNT_ICON,
        }
    }
}

impl MobHuntConfig {
    pub fn reset_icon(&mut self) {
        self.marker_icon_id = DEFAULT_HUNT_ICON;
    }
}
