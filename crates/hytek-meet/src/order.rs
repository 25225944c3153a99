//! Running order and session splitting.
//!
//! An [`Order`] is built from a list of [`OrderDirective`]s. Each event
//! directive takes the next sequence number in the current session; a
//! break marks the previous event; a new-session directive moves on to the
//! next session.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use hytek_hyv::HyvEvent;
use hytek_model::Stroke;

use crate::meet::Event;

/// One step of a running order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderDirective {
    /// Next individual event.
    Event { stroke: Stroke, distance: u32 },
    /// Next relay event.
    Relay { stroke: Stroke, distance: u32 },
    /// Break after the previous event.
    Break,
    /// Following events belong to the next session.
    NewSession,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Key {
    stroke: Stroke,
    distance: u32,
    relay: bool,
}

impl Key {
    fn of(event: &HyvEvent) -> Self {
        Self {
            stroke: event.stroke,
            distance: event.distance,
            relay: event.is_relay(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    sequence: u32,
    session: u32,
    break_after: bool,
}

/// Event running order.
#[derive(Debug, Clone)]
pub struct Order {
    slots: HashMap<Key, Slot>,
    sessions: u32,
}

/// An empty order: one session, no events listed.
impl Default for Order {
    fn default() -> Self {
        Self::new([])
    }
}

impl Order {
    /// Build an order from directives, starting in session 1.
    pub fn new(directives: impl IntoIterator<Item = OrderDirective>) -> Self {
        let mut slots: HashMap<Key, Slot> = HashMap::new();
        let mut sequence = 0;
        let mut session = 1;
        let mut last = None;

        for directive in directives {
            let (stroke, distance, relay) = match directive {
                OrderDirective::Event { stroke, distance } => (stroke, distance, false),
                OrderDirective::Relay { stroke, distance } => (stroke, distance, true),
                OrderDirective::Break => {
                    match last.and_then(|key| slots.get_mut(&key)) {
                        Some(slot) => slot.break_after = true,
                        None => tracing::warn!("break before any event ignored"),
                    }
                    continue;
                }
                OrderDirective::NewSession => {
                    session += 1;
                    continue;
                }
            };
            sequence += 1;
            let key = Key {
                stroke,
                distance,
                relay,
            };
            slots.insert(
                key,
                Slot {
                    sequence,
                    session,
                    break_after: false,
                },
            );
            last = Some(key);
        }

        Self {
            slots,
            sessions: session,
        }
    }

    /// The fifteen-event, three-session order used for age group time
    /// trials.
    pub fn standard() -> Self {
        use OrderDirective::{Break, NewSession};

        let event = |stroke, distance| OrderDirective::Event { stroke, distance };
        Self::new([
            event(Stroke::Freestyle, 100),
            event(Stroke::Breaststroke, 50),
            Break,
            event(Stroke::Backstroke, 50),
            event(Stroke::Butterfly, 100),
            Break,
            event(Stroke::Freestyle, 400),
            NewSession,
            event(Stroke::Breaststroke, 100),
            event(Stroke::Freestyle, 50),
            Break,
            event(Stroke::Butterfly, 50),
            event(Stroke::Breaststroke, 200),
            event(Stroke::Backstroke, 100),
            Break,
            event(Stroke::Medley, 200),
            event(Stroke::Medley, 100),
            NewSession,
            event(Stroke::Backstroke, 200),
            Break,
            event(Stroke::Freestyle, 200),
            Break,
            event(Stroke::Medley, 400),
        ])
    }

    /// Sequence number of an event; 0 when the order does not list it.
    pub fn sequence(&self, event: &HyvEvent) -> u32 {
        self.slots.get(&Key::of(event)).map_or(0, |slot| slot.sequence)
    }

    /// Session of an event, when the order lists it.
    pub fn session(&self, event: &HyvEvent) -> Option<u32> {
        self.slots.get(&Key::of(event)).map(|slot| slot.session)
    }

    /// Whether a break follows the event.
    pub fn break_after(&self, event: &HyvEvent) -> bool {
        self.slots
            .get(&Key::of(event))
            .is_some_and(|slot| slot.break_after)
    }

    /// Number of sessions the directives reached.
    pub fn session_count(&self) -> u32 {
        self.sessions
    }

    /// Stable sort into running order. Unlisted events come first.
    pub fn sort(&self, events: &mut [Event]) {
        events.sort_by_key(|event| self.sequence(&event.definition));
    }

    /// Group events with entries by session, each group in running order.
    ///
    /// Unlisted events are placed in the first session.
    pub fn split_by_session<'e>(&self, events: &'e [Event]) -> Vec<Vec<&'e Event>> {
        let mut sessions: Vec<Vec<&Event>> = vec![Vec::new(); self.sessions.max(1) as usize];
        for event in events.iter().filter(|event| !event.is_empty()) {
            let session = self.session(&event.definition).unwrap_or_else(|| {
                tracing::warn!(event = %event.number(), "event missing from running order");
                1
            });
            sessions[session as usize - 1].push(event);
        }
        for session in &mut sessions {
            session.sort_by_key(|event| self.sequence(&event.definition));
        }
        sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meet::Entry;
    use hytek_hy3::EntryRef;
    use hytek_model::{EventType, Time};

    fn event(number: &str, stroke: Stroke, distance: u32, entries: usize) -> Event {
        let mut definition = HyvEvent::new(number, stroke, distance);
        definition.event_type = Some(EventType::Individual);
        let mut event = Event::new(definition);
        event.entries = (0..entries)
            .map(|i| Entry {
                at: EntryRef {
                    team: 0,
                    swimmer: i,
                    entry: 0,
                },
                swimmer_id: String::new(),
                seed_time: Time::ZERO,
                age: 10,
            })
            .collect();
        event
    }

    fn numbers(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.number().to_string()).collect()
    }

    #[test]
    fn test_standard_table() {
        let order = Order::standard();
        assert_eq!(order.session_count(), 3);

        let free100 = HyvEvent::new("1", Stroke::Freestyle, 100);
        let breast50 = HyvEvent::new("2", Stroke::Breaststroke, 50);
        let im400 = HyvEvent::new("3", Stroke::Medley, 400);
        assert_eq!(order.sequence(&free100), 1);
        assert!(!order.break_after(&free100));
        assert!(order.break_after(&breast50));
        assert_eq!(order.sequence(&im400), 15);
        assert_eq!(order.session(&im400), Some(3));
    }

    #[test]
    fn test_relays_are_keyed_separately() {
        let order = Order::new([
            OrderDirective::Event {
                stroke: Stroke::Freestyle,
                distance: 200,
            },
            OrderDirective::Relay {
                stroke: Stroke::Freestyle,
                distance: 200,
            },
        ]);
        let mut relay = HyvEvent::new("9", Stroke::Freestyle, 200);
        relay.event_type = Some(EventType::Relay);
        assert_eq!(order.sequence(&relay), 2);
        assert_eq!(order.sequence(&HyvEvent::new("8", Stroke::Freestyle, 200)), 1);
    }

    #[test]
    fn test_sort_puts_unlisted_first() {
        let order = Order::standard();
        let mut events = vec![
            event("a", Stroke::Medley, 400, 1),
            event("b", Stroke::Freestyle, 100, 1),
            event("c", Stroke::Freestyle, 1500, 1),
        ];
        order.sort(&mut events);
        let sorted: Vec<&str> = events.iter().map(Event::number).collect();
        assert_eq!(sorted, ["c", "b", "a"]);
    }

    #[test]
    fn test_split_by_session() {
        let order = Order::new([
            OrderDirective::Event {
                stroke: Stroke::Freestyle,
                distance: 50,
            },
            OrderDirective::Event {
                stroke: Stroke::Backstroke,
                distance: 50,
            },
            OrderDirective::Break,
            OrderDirective::Event {
                stroke: Stroke::Butterfly,
                distance: 50,
            },
            OrderDirective::NewSession,
            OrderDirective::Event {
                stroke: Stroke::Medley,
                distance: 100,
            },
        ]);
        let events = vec![
            event("4", Stroke::Medley, 100, 2),
            event("3", Stroke::Butterfly, 50, 1),
            event("2", Stroke::Backstroke, 50, 0),
            event("1", Stroke::Freestyle, 50, 3),
        ];

        let sessions = order.split_by_session(&events);
        assert_eq!(sessions.len(), 2);
        assert_eq!(numbers(&sessions[0]), ["1", "3"]);
        assert_eq!(numbers(&sessions[1]), ["4"]);
    }

    #[test]
    fn test_empty_order_puts_everything_in_one_session() {
        let order = Order::default();
        assert_eq!(order.session_count(), 1);

        let events = vec![
            event("b", Stroke::Freestyle, 100, 1),
            event("a", Stroke::Backstroke, 50, 2),
        ];
        let sessions = order.split_by_session(&events);
        assert_eq!(sessions.len(), 1);
        assert_eq!(numbers(&sessions[0]), ["b", "a"]);
    }

    #[test]
    fn test_directives_from_json() {
        let json = r#"[
            {"kind": "event", "stroke": "Freestyle", "distance": 50},
            {"kind": "break"},
            {"kind": "new_session"},
            {"kind": "relay", "stroke": "Medley", "distance": 200}
        ]"#;
        let directives: Vec<OrderDirective> = serde_json::from_str(json).unwrap();
        let order = Order::new(directives);
        assert_eq!(order.session_count(), 2);
        assert!(order.break_after(&HyvEvent::new("1", Stroke::Freestyle, 50)));
    }
}
