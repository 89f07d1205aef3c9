use std::vec::IntoIter;

use spatial_storage_shared::{PlayerId, StoredStack};

use crate::{CloseReason, CommandRejection, ContainerKind, SessionKey};

/// Everything the server did during the last calls that the embedding game
/// needs to act on
pub struct Events {
    opened: Vec<(SessionKey, PlayerId, ContainerKind)>,
    closed: Vec<(SessionKey, PlayerId, CloseReason)>,
    delivered: Vec<(PlayerId, StoredStack)>,
    rejected: Vec<(SessionKey, PlayerId, CommandRejection)>,
    empty: bool,
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            opened: Vec::new(),
            closed: Vec::new(),
            delivered: Vec::new(),
            rejected: Vec::new(),
            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: Event>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: Event>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

    pub(crate) fn push_opened(&mut self, key: SessionKey, player: PlayerId, kind: ContainerKind) {
        self.opened.push((key, player, kind));
        self.empty = false;
    }

    pub(crate) fn push_closed(&mut self, key: SessionKey, player: PlayerId, reason: CloseReason) {
        self.closed.push((key, player, reason));
        self.empty = false;
    }

    pub(crate) fn push_delivered(&mut self, player: PlayerId, stack: StoredStack) {
        if stack.is_empty() {
            return;
        }
        self.delivered.push((player, stack));
        self.empty = false;
    }

    pub(crate) fn push_rejected(
        &mut self,
        key: SessionKey,
        player: PlayerId,
        rejection: CommandRejection,
    ) {
        self.rejected.push((key, player, rejection));
        self.empty = false;
    }
}

// Event Trait
pub trait Event {
    type Iter;

    fn iter(events: &mut Events) -> Self::Iter;

    fn has(events: &Events) -> bool;
}

// Session Opened Event
pub struct SessionOpenedEvent;
impl Event for SessionOpenedEvent {
    type Iter = IntoIter<(SessionKey, PlayerId, ContainerKind)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = std::mem::take(&mut events.opened);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.opened.is_empty()
    }
}

// Session Closed Event
pub struct SessionClosedEvent;
impl Event for SessionClosedEvent {
    type Iter = IntoIter<(SessionKey, PlayerId, CloseReason)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = std::mem::take(&mut events.closed);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.closed.is_empty()
    }
}

// Deliver Event
/// Items handed to a player: extracted stacks, craft outputs and insert
/// leftovers
pub struct DeliverEvent;
impl Event for DeliverEvent {
    type Iter = IntoIter<(PlayerId, StoredStack)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = std::mem::take(&mut events.delivered);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.delivered.is_empty()
    }
}

// Command Rejected Event
pub struct CommandRejectedEvent;
impl Event for CommandRejectedEvent {
    type Iter = IntoIter<(SessionKey, PlayerId, CommandRejection)>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = std::mem::take(&mut events.rejected);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.rejected.is_empty()
    }
}
