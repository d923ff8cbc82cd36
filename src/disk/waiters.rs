// Tue Jan 13 2026 - Alex

use parking_lot::Condvar;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Vacant,
    Waiting,
    Granted,
}

#[derive(Debug)]
struct Slot {
    state: SlotState,
    signal: Arc<Condvar>,
}

impl Slot {
    fn vacant() -> Self {
        Self {
            state: SlotState::Vacant,
            signal: Arc::new(Condvar::new()),
        }
    }
}

/// Wake handles for requesters suspended in the scan queues.
///
/// Slots are recycled through a free list, and each keeps its condition
/// variable across reuse. The arena lives inside the scheduler's mutex, so
/// every condition variable here is only ever waited on with that mutex.
#[derive(Debug, Default)]
pub struct WaiterArena {
    slots: Vec<Slot>,
    free: Vec<usize>,
    waiting: usize,
}

impl WaiterArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> Ticket {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::vacant());
                self.slots.len() - 1
            }
        };

        self.slots[index].state = SlotState::Waiting;
        self.waiting += 1;

        Ticket(index)
    }

    pub fn signal(&self, ticket: Ticket) -> Option<Arc<Condvar>> {
        self.slots.get(ticket.0).map(|slot| Arc::clone(&slot.signal))
    }

    /// Marks the waiter as admitted and wakes it. Returns `false` when the
    /// ticket does not name a waiting slot.
    pub fn grant(&mut self, ticket: Ticket) -> bool {
        match self.slots.get_mut(ticket.0) {
            Some(slot) if slot.state == SlotState::Waiting => {
                slot.state = SlotState::Granted;
                self.waiting -= 1;
                slot.signal.notify_one();
                true
            }
            _ => false,
        }
    }

    pub fn is_granted(&self, ticket: Ticket) -> bool {
        self.slots
            .get(ticket.0)
            .map(|slot| slot.state == SlotState::Granted)
            .unwrap_or(false)
    }

    pub fn retire(&mut self, ticket: Ticket) {
        if let Some(slot) = self.slots.get_mut(ticket.0) {
            if slot.state == SlotState::Vacant {
                return;
            }
            if slot.state == SlotState::Waiting {
                self.waiting -= 1;
            }
            slot.state = SlotState::Vacant;
            self.free.push(ticket.0);
        }
    }

    pub fn waiting(&self) -> usize {
        self.waiting
    }
}
