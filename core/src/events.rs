//! Map view lifecycle events and subscriptions
//!
//! The host owns event delivery. The engine asks it for a subscription per
//! overlay and gets back a handle; when an event fires the host calls the
//! engine with that handle and a [`TriggerContext`].

use std::time::Instant;

use hashbrown::HashMap;
use mapmark_types::RuleConfiguration;

use crate::game::GameSnapshot;

/// UI surface the overlays listen on
pub const AREA_MAP_SURFACE: &str = "AreaMap";

/// Lifecycle points of a UI surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewEvent {
    /// Surface was opened
    PostSetup,
    /// Surface content was rebuilt (map changed)
    PostRefresh,
    /// Per-frame update while open
    PostUpdate,
}

/// Events the map overlays react to
pub const MAP_VIEW_EVENTS: [ViewEvent; 3] = [
    ViewEvent::PostSetup,
    ViewEvent::PostRefresh,
    ViewEvent::PostUpdate,
];

/// Handle returned by [`ViewEvents::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Event subscription capability provided by the host
pub trait ViewEvents {
    fn subscribe(&mut self, surface: &str, events: &[ViewEvent]) -> SubscriptionId;

    /// Returns `false` if the handle was unknown
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// Everything a trigger handler reads, captured at the moment of the event
pub struct TriggerContext<'a> {
    pub now: Instant,
    pub game: &'a dyn GameSnapshot,
    /// Read fresh on every trigger; the engine never caches it
    pub config: &'a RuleConfiguration,
}

impl<'a> TriggerContext<'a> {
    pub fn new(now: Instant, game: &'a dyn GameSnapshot, config: &'a RuleConfiguration) -> Self {
        Self { now, game, config }
    }
}

#[derive(Debug, Clone)]
struct Subscription {
    surface: String,
    events: Vec<ViewEvent>,
}

/// In-process subscription table.
///
/// Hosts that have no event system of their own can keep one of these and
/// ask it which handles to notify.
#[derive(Debug, Default)]
pub struct EventRegistry {
    next_id: u64,
    subscriptions: HashMap<SubscriptionId, Subscription>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles interested in `event` on `surface`, in subscription order
    pub fn subscribers(&self, surface: &str, event: ViewEvent) -> Vec<SubscriptionId> {
        let mut ids: Vec<SubscriptionId> = self
            .subscriptions
            .iter()
            .filter(|(_, sub)| sub.surface == surface && sub.events.contains(&event))
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable_by_key(SubscriptionId::raw);
        ids
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl ViewEvents for EventRegistry {
    fn subscribe(&mut self, surface: &str, events: &[ViewEvent]) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.insert(
            id,
            Subscription {
                surface: surface.to_string(),
                events: events.to_vec(),
            },
        );
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_and_route() {
        let mut registry = EventRegistry::new();
        let map = registry.subscribe(AREA_MAP_SURFACE, &MAP_VIEW_EVENTS);
        let setup_only = registry.subscribe(AREA_MAP_SURFACE, &[ViewEvent::PostSetup]);
        let other = registry.subscribe("Inventory", &MAP_VIEW_EVENTS);

        assert_ne!(map, setup_only);
        assert_eq!(
            registry.subscribers(AREA_MAP_SURFACE, ViewEvent::PostSetup),
            vec![map, setup_only]
        );
        assert_eq!(
            registry.subscribers(AREA_MAP_SURFACE, ViewEvent::PostUpdate),
            vec![map]
        );
        assert_eq!(registry.subscribers("Inventory", ViewEvent::PostRefresh), vec![other]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut registry = EventRegistry::new();
        let id = registry.subscribe(AREA_MAP_SURFACE, &MAP_VIEW_EVENTS);

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        assert!(registry.is_empty());
        assert!(registry.subscribers(AREA_MAP_SURFACE, ViewEvent::PostUpdate).is_empty());
    }
}
