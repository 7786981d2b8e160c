use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, Colour};

/// Which command produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    GameInitialized,
    CardPlayed,
    CardDrawn,
    TurnAdvanced,
    RoundStarted,
    RoundEnded,
    MatchEnded,
}

/// Notification sent after every state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub round_over: bool,
    pub game_over: bool,
    pub current_player: PlayerId,
    pub top_card: Option<Card>,
    pub forced_colour: Option<Colour>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// Fan-out of events to every live subscriber.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: HashMap<SubscriptionId, Sender<GameEvent>>,
}

impl EventBus {
    pub fn subscribe(&mut self) -> (SubscriptionId, Receiver<GameEvent>) {
        let (sender, receiver) = mpsc::channel();
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, sender);
        debug!("subscriber {} registered", id.0);
        (id, receiver)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.remove(&id).is_some();
        if removed {
            debug!("subscriber {} unregistered", id.0);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Sends `event` to every subscriber, dropping those whose receiver is gone.
    pub fn publish(&mut self, event: &GameEvent) {
        self.subscribers.retain(|id, sender| match sender.send(event.clone()) {
            Ok(()) => true,
            Err(_) => {
                warn!("subscriber {} disconnected, removing", id.0);
                false
            }
        });
    }
}
