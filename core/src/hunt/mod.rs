//! Hunt target overlay
//!
//! When the map window is opened from a hunt bill, its title carries the
//! target's name in parentheses. The overlay looks that name up in the mob
//! location dataset for the shown territory and marks every known spawn
//! point.

mod dataset;

use std::sync::Arc;

use mapmark_types::RuleConfiguration;

pub use dataset::{
    DATASET_DIR, DATASET_FILE_NAME, MAX_DATASET_VERSION, MIN_DATASET_VERSION, MobEntry,
    MobLocationDataset, TerritoryMobs, default_data_dir, load_dataset, locate_dataset,
};

use crate::error::EngineError;
use crate::overlay::{MarkerSelector, RawMarker, RefreshContext, Selection};
use crate::title::extract_sub_area;

/// Whether a dataset entry is the mob named by `label`.
///
/// A non-empty localized name matches when it contains the label, ignoring
/// case (this covers exact equality too). Localized names often carry
/// qualifiers the title leaves out. Without a localized name, the entry's
/// fallback name must equal the label, ignoring case.
pub fn mob_matches(label: &str, localized: Option<&str>, fallback: &str) -> bool {
    let label = label.to_lowercase();
    match localized.filter(|name| !name.is_empty()) {
        Some(name) => name.to_lowercase().contains(&label),
        None => !fallback.is_empty() && fallback.to_lowercase() == label,
    }
}

#[derive(Debug, Clone, Default)]
pub struct HuntSelector {
    dataset: Option<Arc<MobLocationDataset>>,
}

impl HuntSelector {
    /// `None` when the dataset failed to load; the overlay then never emits.
    pub fn new(dataset: Option<Arc<MobLocationDataset>>) -> Self {
        Self { dataset }
    }
}

impl MarkerSelector for HuntSelector {
    fn name(&self) -> &'static str {
        "mob_hunt"
    }

    fn is_enabled(&self, config: &RuleConfiguration) -> bool {
        config.mob_hunt.enabled
    }

    fn select(
        &self,
        ctx: &RefreshContext<'_>,
        config: &RuleConfiguration,
    ) -> Result<Selection, EngineError> {
        let dataset = self
            .dataset
            .as_deref()
            .ok_or(EngineError::DatasetUnavailable)?;
        let territory_id = ctx
            .territory_id
            .ok_or(EngineError::MissingContext("territory"))?;

        let Some(territory) = dataset.territory(territory_id) else {
            return Ok(Selection::Unchanged);
        };

        let label = match extract_sub_area(ctx.title) {
            Some(label) if !label.is_empty() => label,
            _ => return Ok(Selection::Unchanged),
        };

        let icon = config.mob_hunt.marker_icon_id;
        let markers: Vec<RawMarker> = territory
            .mobs
            .iter()
            .filter(|mob| mob_matches(label, ctx.game.bnpc_name(mob.bnpc_name_id), &mob.mob_name))
            .flat_map(|mob| mob.locations.iter().map(move |&p| RawMarker::map(p, icon)))
            .collect();

        tracing::trace!(label, territory_id, count = markers.len(), "Hunt markers selected");
        Ok(Selection::Replace(markers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{MapMetadata, MapPoint};
    use crate::game::{GameSnapshot, SnapshotData};

    const TERRITORY: u16 = 140;

    fn dataset() -> Arc<MobLocationDataset> {
        let mobs = vec![
            MobEntry {
                bnpc_name_id: 1,
                mob_name: "Forename".to_string(),
                locations: vec![MapPoint::new(10.0, 20.0)],
            },
            MobEntry {
                bnpc_name_id: 2,
                mob_name: "Sabotender".to_string(),
                locations: vec![MapPoint::new(5.0, 5.0), MapPoint::new(6.0, 6.0)],
            },
            MobEntry {
                bnpc_name_id: 3,
                mob_name: "Sabotender Emperatriz".to_string(),
                locations: vec![MapPoint::new(30.0, 30.0)],
            },
        ];
        let territories = vec![TerritoryMobs {
            territory_id: TERRITORY,
            mobs,
        }];
        Arc::new(MobLocationDataset::new(1, territories).unwrap())
    }

    fn game(title: &str) -> SnapshotData {
        let mut game = SnapshotData {
            territory_id: Some(TERRITORY),
            map_id: Some(20),
            map_title: Some(title.to_string()),
            ..Default::default()
        };
        game.bnpc_names.insert(1, "Forename the Bold".to_string());
        game
    }

    fn select_with(game: &SnapshotData, territory_id: Option<u16>) -> Result<Selection, EngineError> {
        let ctx = RefreshContext {
            game,
            map_id: 20,
            territory_id,
            map: MapMetadata::default(),
            title: game.map_title().unwrap_or_default(),
        };
        HuntSelector::new(Some(dataset())).select(&ctx, &RuleConfiguration::default())
    }

    fn select(game: &SnapshotData) -> Result<Selection, EngineError> {
        select_with(game, Some(TERRITORY))
    }

    #[test]
    fn test_substring_of_localized_name_matches() {
        let selection = select(&game("Western Thanalan (Forename)")).unwrap();
        assert_eq!(
            selection,
            Selection::Replace(vec![RawMarker::map(
                MapPoint::new(10.0, 20.0),
                mapmark_types::DEFAULT_HUNT_ICON
            )])
        );
    }

    #[test]
    fn test_unrelated_label_yields_no_markers() {
        assert_eq!(
            select(&game("Western Thanalan (Unrelated)")).unwrap(),
            Selection::Replace(vec![])
        );
    }

    #[test]
    fn test_fallback_name_requires_exact_match() {
        // Ids 2 and 3 have no localized name
        let Selection::Replace(markers) = select(&game("Zone (sabotender)")).unwrap() else {
            panic!("expected replacement");
        };
        assert_eq!(markers.len(), 2);

        let Selection::Replace(markers) = select(&game("Zone (Sabotender Emperatriz)")).unwrap()
        else {
            panic!("expected replacement");
        };
        assert_eq!(markers, vec![RawMarker::map(MapPoint::new(30.0, 30.0), 60434)]);
    }

    #[test]
    fn test_localized_name_shadows_fallback() {
        // Fallback "Forename" would match exactly, but the localized name wins
        let mut game = game("Zone (Forename)");
        game.bnpc_names.insert(1, "Someone Else".to_string());
        assert_eq!(select(&game).unwrap(), Selection::Replace(vec![]));
    }

    #[test]
    fn test_empty_localized_name_uses_fallback() {
        let mut game = game("Zone (forename)");
        game.bnpc_names.insert(1, String::new());
        let Selection::Replace(markers) = select(&game).unwrap() else {
            panic!("expected replacement");
        };
        assert_eq!(markers.len(), 1);
    }

    #[test]
    fn test_full_width_label() {
        let mut game = game("西ザナラーン（フォアネーム）");
        game.bnpc_names.insert(1, "フォアネーム・ザ・ボールド".to_string());
        let Selection::Replace(markers) = select(&game).unwrap() else {
            panic!("expected replacement");
        };
        assert_eq!(markers.len(), 1);
    }

    #[test]
    fn test_no_label_or_unknown_territory_is_unchanged() {
        assert_eq!(select(&game("Western Thanalan")).unwrap(), Selection::Unchanged);
        assert_eq!(select(&game("Western Thanalan ( )")).unwrap(), Selection::Unchanged);
        assert_eq!(
            select_with(&game("Zone (Forename)"), Some(999)).unwrap(),
            Selection::Unchanged
        );
    }

    #[test]
    fn test_missing_territory_or_dataset() {
        assert_eq!(
            select_with(&game("Zone (Forename)"), None),
            Err(EngineError::MissingContext("territory"))
        );

        let game = game("Zone (Forename)");
        let ctx = RefreshContext {
            game: &game,
            map_id: 20,
            territory_id: Some(TERRITORY),
            map: MapMetadata::default(),
            title: "Zone (Forename)",
        };
        assert_eq!(
            HuntSelector::new(None).select(&ctx, &RuleConfiguration::default()),
            Err(EngineError::DatasetUnavailable)
        );
    }

    #[test]
    fn test_mob_matches_rules() {
        assert!(mob_matches("Forename", Some("Forename the Bold"), ""));
        assert!(mob_matches("FORENAME THE BOLD", Some("Forename the Bold"), ""));
        assert!(!mob_matches("Forename the Bold", Some("Forename"), ""));
        assert!(mob_matches("forename", None, "Forename"));
        assert!(!mob_matches("Fore", None, "Forename"));
        assert!(!mob_matches("anything", None, ""));
    }
}
