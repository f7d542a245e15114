//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

use fight_core::{HitEvent, MatchEvent};

use super::types::StateEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Round, phase, transition and status changes
    Match,
    /// Landed hits
    Combat,
    /// Snapshots and sequencer reports
    State,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Match, Topic::Combat, Topic::State];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Match(MatchEvent),
    Combat(HitEvent),
    State(StateEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Match(_) => Topic::Match,
            Event::Combat(_) => Topic::Combat,
            Event::State(_) => Topic::State,
        }
    }

    /// Serializes the event as a single JSON line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<MatchEvent> for Event {
    /// Hits are routed to [`Topic::Combat`]; everything else the match
    /// reports goes to [`Topic::Match`].
    fn from(event: MatchEvent) -> Self {
        match event {
            MatchEvent::Hit(hit) => Event::Combat(hit),
            other => Event::Match(other),
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
pub struct EventBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<Event>>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();

        Self {
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        // Events are best-effort: skip rather than block the worker.
        match self.channels.try_read() {
            Ok(channels) => {
                if let Some(tx) = channels.get(&topic)
                    && tx.send(event).is_err()
                {
                    tracing::trace!("No subscribers for topic {:?}", topic);
                }
            }
            Err(_) => {
                tracing::debug!("Failed to acquire event bus lock for topic {:?}", topic);
            }
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub async fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        let channels = self.channels.read().await;
        match channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            None => {
                drop(channels);
                self.channels
                    .write()
                    .await
                    .entry(topic)
                    .or_insert_with(|| broadcast::channel(100).0)
                    .subscribe()
            }
        }
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub async fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        let mut receivers = HashMap::with_capacity(topics.len());
        for &topic in topics {
            receivers.insert(topic, self.subscribe(topic).await);
        }
        receivers
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fight_core::{AttackKind, Side, Tick};

    fn hit() -> HitEvent {
        HitEvent {
            attacker: Side::Player,
            target: Side::Opponent,
            kind: AttackKind::Normal,
            damage: 10,
            target_health: 90,
            knockback: 40,
            at: Tick(600),
        }
    }

    #[tokio::test]
    async fn hits_are_routed_to_combat() {
        let bus = EventBus::new();
        let mut combat = bus.subscribe(Topic::Combat).await;
        let mut flow = bus.subscribe(Topic::Match).await;

        bus.publish(Event::from(MatchEvent::Hit(hit())));

        assert_eq!(combat.recv().await.unwrap(), Event::Combat(hit()));
        assert!(flow.try_recv().is_err());
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::with_capacity(4);
        bus.publish(Event::Match(MatchEvent::DefeatChoicesOffered {
            phase: 2,
            can_go_back: true,
        }));
    }

    #[test]
    fn events_serialize_as_json() {
        let json = Event::from(MatchEvent::Hit(hit())).to_json().unwrap();
        assert!(json.contains("\"Combat\""));
        assert!(json.contains("\"target_health\":90"));
    }
}
