//! Host-facing facade owning both map overlays
//!
//! The gathering and hunt overlays are independent: each has its own throttle
//! and enablement state. They do share the host's marker list, so whichever
//! refreshed last owns what is shown.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::events::{AREA_MAP_SURFACE, MAP_VIEW_EVENTS, SubscriptionId, TriggerContext, ViewEvent, ViewEvents};
use crate::gathering::{GatherSelector, GatheringPointTable};
use crate::hunt::{HuntSelector, MobLocationDataset};
use crate::overlay::{MarkerOverlay, OverlayState, RefreshOutcome};
use crate::sink::MarkerSink;
use crate::throttle::UPDATE_INTERVAL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    GatherMap,
    MobHunt,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 2] = [OverlayKind::GatherMap, OverlayKind::MobHunt];
}

#[derive(Debug)]
pub struct MarkerEngine {
    gather: MarkerOverlay<GatherSelector>,
    hunt: MarkerOverlay<HuntSelector>,
    subscriptions: Vec<(SubscriptionId, OverlayKind)>,
}

impl MarkerEngine {
    /// Create the engine from the static data the host loaded at startup.
    /// Either source may be missing; its overlay then stays silent.
    pub fn new(
        gathering_points: Option<Arc<GatheringPointTable>>,
        mob_locations: Option<Arc<MobLocationDataset>>,
    ) -> Self {
        Self::with_interval(gathering_points, mob_locations, UPDATE_INTERVAL)
    }

    pub fn with_interval(
        gathering_points: Option<Arc<GatheringPointTable>>,
        mob_locations: Option<Arc<MobLocationDataset>>,
        interval: Duration,
    ) -> Self {
        Self {
            gather: MarkerOverlay::with_interval(GatherSelector::new(gathering_points), interval),
            hunt: MarkerOverlay::with_interval(HuntSelector::new(mob_locations), interval),
            subscriptions: Vec::new(),
        }
    }

    /// Subscribe both overlays to the map view. Does nothing if already attached.
    pub fn attach(&mut self, events: &mut dyn ViewEvents) {
        if self.is_attached() {
            return;
        }
        for kind in OverlayKind::ALL {
            let id = events.subscribe(AREA_MAP_SURFACE, &MAP_VIEW_EVENTS);
            self.subscriptions.push((id, kind));
        }
        tracing::info!("Map marker overlays attached");
    }

    /// Drop every subscription handed out by `attach`
    pub fn detach(&mut self, events: &mut dyn ViewEvents) {
        for (id, kind) in self.subscriptions.drain(..) {
            if !events.unsubscribe(id) {
                tracing::warn!(?kind, id = id.raw(), "Subscription was already gone");
            }
        }
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Which overlay a subscription handle belongs to
    pub fn overlay_for(&self, id: SubscriptionId) -> Option<OverlayKind> {
        self.subscriptions
            .iter()
            .find(|(sub, _)| *sub == id)
            .map(|&(_, kind)| kind)
    }

    /// Host callback for a subscribed event. `None` for unknown handles.
    pub fn on_view_event(
        &mut self,
        id: SubscriptionId,
        event: ViewEvent,
        ctx: &TriggerContext<'_>,
        sink: &mut dyn MarkerSink,
    ) -> Option<RefreshOutcome> {
        let kind = self.overlay_for(id)?;
        Some(self.trigger(kind, event, ctx, sink))
    }

    /// Run one overlay's refresh directly
    pub fn trigger(
        &mut self,
        kind: OverlayKind,
        event: ViewEvent,
        ctx: &TriggerContext<'_>,
        sink: &mut dyn MarkerSink,
    ) -> RefreshOutcome {
        match kind {
            OverlayKind::GatherMap => self.gather.handle_trigger(event, ctx, sink),
            OverlayKind::MobHunt => self.hunt.handle_trigger(event, ctx, sink),
        }
    }

    pub fn state(&self, kind: OverlayKind) -> OverlayState {
        match kind {
            OverlayKind::GatherMap => self.gather.state(),
            OverlayKind::MobHunt => self.hunt.state(),
        }
    }
}
