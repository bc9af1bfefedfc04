//! Gathering node overlay
//!
//! Marks every targetable mining or botany node near the player, with one of
//! four icons depending on the tool the node needs. Only Miner and Botanist
//! see anything, and each only sees nodes of its own domain.

mod table;

use std::sync::Arc;

use mapmark_types::{GatherIcons, IconId, RuleConfiguration};

pub use table::GatheringPointTable;

use crate::error::EngineError;
use crate::game::{ClassJob, GatheringKind, NodeDomain, ObjectKind, ToolVariant};
use crate::overlay::{MarkerSelector, RawMarker, RefreshContext, Selection};
use crate::title::extract_sub_area;

/// Configured icon for a node kind
pub fn icon_for(icons: &GatherIcons, kind: GatheringKind) -> IconId {
    match (kind.domain, kind.tool) {
        (NodeDomain::Mining, ToolVariant::Primary) => icons.mining_primary,
        (NodeDomain::Mining, ToolVariant::Secondary) => icons.mining_secondary,
        (NodeDomain::Botany, ToolVariant::Primary) => icons.botany_primary,
        (NodeDomain::Botany, ToolVariant::Secondary) => icons.botany_secondary,
    }
}

#[derive(Debug, Clone, Default)]
pub struct GatherSelector {
    table: Option<Arc<GatheringPointTable>>,
}

impl GatherSelector {
    /// `None` when the gathering sheets could not be loaded; the overlay then
    /// never emits.
    pub fn new(table: Option<Arc<GatheringPointTable>>) -> Self {
        Self { table }
    }
}

impl MarkerSelector for GatherSelector {
    fn name(&self) -> &'static str {
        "gather_map"
    }

    fn is_enabled(&self, config: &RuleConfiguration) -> bool {
        config.gather_map.enabled
    }

    fn select(
        &self,
        ctx: &RefreshContext<'_>,
        config: &RuleConfiguration,
    ) -> Result<Selection, EngineError> {
        let table = self
            .table
            .as_deref()
            .ok_or(EngineError::MissingContext("gathering point sheets"))?;
        let job = ctx
            .game
            .player_job()
            .ok_or(EngineError::MissingContext("local player"))?;

        // Node data inside named pocket areas does not line up with the map.
        // The marker list is shared, so a suppressed refresh leaves it alone.
        if extract_sub_area(ctx.title).is_some() {
            return Ok(Selection::Unchanged);
        }

        let Some(domain) = ClassJob::from_id(job).gathering_domain() else {
            return Ok(Selection::Unchanged);
        };

        let icons = &config.gather_map.icons;
        let mut markers = Vec::new();

        for obj in ctx.game.objects() {
            if obj.kind != ObjectKind::GatheringPoint || !obj.is_targetable {
                continue;
            }

            let type_id = match table.resolve_type(obj.base_id) {
                Ok(type_id) => type_id,
                Err(e) => {
                    tracing::trace!(error = %e, "Skipping gathering point");
                    continue;
                }
            };

            let Some(kind) = GatheringKind::from_type_id(type_id) else {
                continue;
            };
            if kind.domain != domain {
                continue;
            }

            markers.push(RawMarker::world(obj.position, icon_for(icons, kind)));
        }

        Ok(Selection::Replace(markers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{MapMetadata, WorldPosition};
    use crate::game::{BOTANIST_JOB_ID, GameObject, GameSnapshot, MINER_JOB_ID, SnapshotData};

    fn node(base_id: u32, x: f32) -> GameObject {
        GameObject {
            kind: ObjectKind::GatheringPoint,
            base_id,
            is_targetable: true,
            position: WorldPosition::new(x, 10.0, -x),
        }
    }

    /// Points 100..=103 resolve to gathering types 0..=3
    fn table() -> Arc<GatheringPointTable> {
        let mut table = GatheringPointTable::new();
        for type_id in 0..4 {
            table.insert_point(100 + type_id, 200 + type_id);
            table.insert_base(200 + type_id, type_id);
        }
        Arc::new(table)
    }

    fn snapshot(job: u32, title: &str, objects: Vec<GameObject>) -> SnapshotData {
        SnapshotData {
            player_job: Some(job),
            map_id: Some(1),
            map_title: Some(title.to_string()),
            objects,
            ..Default::default()
        }
    }

    fn select(game: &SnapshotData) -> Result<Selection, EngineError> {
        let ctx = RefreshContext {
            game,
            map_id: 1,
            territory_id: None,
            map: MapMetadata::default(),
            title: game.map_title().unwrap_or_default(),
        };
        GatherSelector::new(Some(table())).select(&ctx, &RuleConfiguration::default())
    }

    fn four_nodes() -> Vec<GameObject> {
        vec![node(100, 1.0), node(101, 2.0), node(102, 3.0), node(103, 4.0)]
    }

    #[test]
    fn test_miner_sees_only_mining_nodes() {
        let game = snapshot(MINER_JOB_ID, "Western Thanalan", four_nodes());
        let icons = GatherIcons::default();

        let Selection::Replace(markers) = select(&game).unwrap() else {
            panic!("expected replacement");
        };
        assert_eq!(
            markers,
            vec![
                RawMarker::world(WorldPosition::new(1.0, 10.0, -1.0), icons.mining_primary),
                RawMarker::world(WorldPosition::new(2.0, 10.0, -2.0), icons.mining_secondary),
            ]
        );
    }

    #[test]
    fn test_botanist_sees_only_botany_nodes() {
        let game = snapshot(BOTANIST_JOB_ID, "Central Shroud", four_nodes());
        let icons = GatherIcons::default();

        let Selection::Replace(markers) = select(&game).unwrap() else {
            panic!("expected replacement");
        };
        let got: Vec<IconId> = markers.iter().map(|m| m.icon).collect();
        assert_eq!(got, vec![icons.botany_primary, icons.botany_secondary]);
    }

    #[test]
    fn test_other_job_leaves_markers_alone() {
        let game = snapshot(1, "Western Thanalan", four_nodes());
        assert_eq!(select(&game).unwrap(), Selection::Unchanged);
    }

    #[test]
    fn test_sub_area_title_suppresses_everything() {
        let game = snapshot(MINER_JOB_ID, "Northern Thanalan (The Footfalls)", four_nodes());
        assert_eq!(select(&game).unwrap(), Selection::Unchanged);

        let game = snapshot(MINER_JOB_ID, "北方ザナラーン（モードゥナ）", four_nodes());
        assert_eq!(select(&game).unwrap(), Selection::Unchanged);
    }

    #[test]
    fn test_untargetable_wrong_kind_and_unknown_nodes_skipped() {
        let mut hidden = node(100, 1.0);
        hidden.is_targetable = false;
        let mut npc = node(100, 2.0);
        npc.kind = ObjectKind::BattleNpc;
        let unknown = node(555, 3.0);
        let valid = node(100, 4.0);

        let game = snapshot(MINER_JOB_ID, "", vec![hidden, npc, unknown, valid]);
        let Selection::Replace(markers) = select(&game).unwrap() else {
            panic!("expected replacement");
        };
        assert_eq!(markers.len(), 1);
        assert_eq!(
            markers[0].anchor,
            crate::overlay::MarkerAnchor::World(WorldPosition::new(4.0, 10.0, -4.0))
        );
    }

    #[test]
    fn test_missing_player_or_table_is_missing_context() {
        let mut game = snapshot(MINER_JOB_ID, "", four_nodes());
        game.player_job = None;
        assert_eq!(
            select(&game),
            Err(EngineError::MissingContext("local player"))
        );

        let game = snapshot(MINER_JOB_ID, "", four_nodes());
        let ctx = RefreshContext {
            game: &game,
            map_id: 1,
            territory_id: None,
            map: MapMetadata::default(),
            title: "",
        };
        assert_eq!(
            GatherSelector::new(None).select(&ctx, &RuleConfiguration::default()),
            Err(EngineError::MissingContext("gathering point sheets"))
        );
    }

    #[test]
    fn test_configured_icons_are_used() {
        let game = snapshot(MINER_JOB_ID, "", vec![node(101, 1.0)]);
        let mut config = RuleConfiguration::default();
        config.gather_map.icons.mining_secondary = 4242;

        let ctx = RefreshContext {
            game: &game,
            map_id: 1,
            territory_id: None,
            map: MapMetadata::default(),
            title: "",
        };
        let Selection::Replace(markers) =
            GatherSelector::new(Some(table())).select(&ctx, &config).unwrap()
        else {
            panic!("expected replacement");
        };
        assert_eq!(markers[0].icon, 4242);
    }
}
