//! Refresh orchestration shared by every map overlay
//!
//! ```text
//!   view event ──► gating ──► context ──► selector ──► transform ──► sink
//!                  │ enabled?   map id      raw markers  map space    reset
//!                  │ throttle   metadata                 → world      + add
//!                  ▼
//!               no-op / one-shot reset
//! ```
//!
//! A refresh either replaces the host's markers completely or leaves them
//! untouched. All fallible work finishes before the first sink call.

mod selector;

use std::time::Duration;

pub use selector::{MarkerAnchor, MarkerSelector, RawMarker, RefreshContext, Selection};

use crate::error::EngineError;
use crate::events::{TriggerContext, ViewEvent};
use crate::game::GameSnapshot;
use crate::sink::{Marker, MarkerSink};
use crate::throttle::UpdateThrottle;

/// Enablement memory of an overlay, driving the one-shot reset on disable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    Active,
    /// Disabled on this trigger after having been active; markers get cleared once
    JustDisabled,
    #[default]
    Inactive,
}

impl OverlayState {
    /// Next state given the configuration seen on this trigger
    pub fn advance(self, enabled: bool) -> Self {
        match (self, enabled) {
            (_, true) => Self::Active,
            (Self::Active, false) => Self::JustDisabled,
            (Self::JustDisabled | Self::Inactive, false) => Self::Inactive,
        }
    }
}

/// What a trigger did
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Overlay is off; nothing touched
    Disabled,
    /// Overlay was just switched off; markers cleared
    Reset,
    /// Too soon after the previous refresh
    Throttled,
    /// Context or data missing, or metadata invalid; nothing emitted
    Aborted(EngineError),
    /// Selector chose to leave markers as they are
    Unchanged,
    /// Markers replaced with this many entries
    Emitted(usize),
}

/// One map overlay: a selector plus its own throttle and enablement state
#[derive(Debug)]
pub struct MarkerOverlay<S> {
    selector: S,
    throttle: UpdateThrottle,
    state: OverlayState,
}

impl<S: MarkerSelector> MarkerOverlay<S> {
    pub fn new(selector: S) -> Self {
        Self {
            selector,
            throttle: UpdateThrottle::default(),
            state: OverlayState::default(),
        }
    }

    pub fn with_interval(selector: S, interval: Duration) -> Self {
        Self {
            selector,
            throttle: UpdateThrottle::new(interval),
            state: OverlayState::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.selector.name()
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn throttle(&self) -> &UpdateThrottle {
        &self.throttle
    }

    /// Re-evaluate the overlay for a map view event.
    pub fn handle_trigger(
        &mut self,
        event: ViewEvent,
        ctx: &TriggerContext<'_>,
        sink: &mut dyn MarkerSink,
    ) -> RefreshOutcome {
        let overlay = self.selector.name();

        self.state = self.state.advance(self.selector.is_enabled(ctx.config));
        match self.state {
            OverlayState::Inactive => return RefreshOutcome::Disabled,
            OverlayState::JustDisabled => {
                sink.reset_markers();
                tracing::debug!(overlay, "Overlay disabled, markers reset");
                return RefreshOutcome::Reset;
            }
            OverlayState::Active => {}
        }

        if !self.throttle.should_run(ctx.now) {
            return RefreshOutcome::Throttled;
        }

        let refresh = match resolve_context(ctx.game) {
            Ok(refresh) => refresh,
            Err(e) => {
                tracing::trace!(overlay, ?event, error = %e, "Refresh skipped");
                return RefreshOutcome::Aborted(e);
            }
        };

        let selection = match self.selector.select(&refresh, ctx.config) {
            Ok(selection) => selection,
            Err(e) => {
                tracing::trace!(overlay, ?event, error = %e, "Refresh skipped");
                return RefreshOutcome::Aborted(e);
            }
        };
        self.throttle.record_run(ctx.now);

        let raw = match selection {
            Selection::Unchanged => return RefreshOutcome::Unchanged,
            Selection::Replace(raw) => raw,
        };

        let markers = match raw
            .iter()
            .map(|m| m.place(&refresh.map))
            .collect::<Result<Vec<Marker>, _>>()
        {
            Ok(markers) => markers,
            Err(e) => {
                tracing::warn!(overlay, map_id = refresh.map_id, error = %e, "Rejected map metadata");
                return RefreshOutcome::Aborted(e);
            }
        };

        sink.reset_markers();
        for marker in &markers {
            sink.add_marker(marker.position, marker.icon);
        }
        tracing::debug!(overlay, ?event, count = markers.len(), "Markers refreshed");

        RefreshOutcome::Emitted(markers.len())
    }
}

/// Resolve the map and territory shown in the map window.
///
/// A map or territory the player browsed to wins over the one they stand in.
/// Unknown maps fall back to default metadata.
fn resolve_context(game: &dyn GameSnapshot) -> Result<RefreshContext<'_>, EngineError> {
    let map_id = game
        .selected_map_id()
        .filter(|&id| id > 0)
        .or(game.map_id())
        .ok_or(EngineError::MissingContext("map"))?;

    let territory_id = game
        .selected_territory_id()
        .filter(|&id| id > 0)
        .or(game.territory_id());

    Ok(RefreshContext {
        game,
        map_id,
        territory_id,
        map: game.map_metadata(map_id).unwrap_or_default(),
        title: game.map_title().unwrap_or_default(),
    })
}
