// Tue Jan 13 2026 - Alex

use super::cylinder::{Cylinder, Direction, Position, RequesterId, MAX_CYLINDER};
use super::error::{DiskError, DiskResult};
use super::queue::{CylinderQueue, Waiter};
use super::rendezvous::Handoff;
use super::transfer::{Transfer, TransferArgs, TransferResult};
use super::waiters::{Ticket, WaiterArena};
use crate::config::Config;
use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Immediate,
    Queued { ticket: Ticket, direction: Direction },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Granted {
        cylinder: Cylinder,
        requester: RequesterId,
        swapped: bool,
    },
    Idle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub immediate: u64,
    pub queued: u64,
    pub grants: u64,
    pub swaps: u64,
    pub idled: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulerSnapshot {
    pub position: Position,
    pub current: Vec<Cylinder>,
    pub next: Vec<Cylinder>,
    pub waiting: usize,
}

#[derive(Debug, Default)]
pub struct ScanState {
    position: Position,
    current: CylinderQueue,
    next: CylinderQueue,
    waiters: WaiterArena,
    stats: ScanStats,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    pub fn waiters(&self) -> &WaiterArena {
        &self.waiters
    }

    pub fn waiters_mut(&mut self) -> &mut WaiterArena {
        &mut self.waiters
    }

    pub fn queue(&self, direction: Direction) -> &CylinderQueue {
        match direction {
            Direction::Current => &self.current,
            Direction::Next => &self.next,
        }
    }

    fn queue_mut(&mut self, direction: Direction) -> &mut CylinderQueue {
        match direction {
            Direction::Current => &mut self.current,
            Direction::Next => &mut self.next,
        }
    }

    /// Admission test. A request equal to the busy position is routed to
    /// `Current` like any other `cylinder >= position` request.
    pub fn enqueue(&mut self, cylinder: Cylinder, requester: RequesterId) -> Admission {
        match self.position {
            Position::Unstarted | Position::Idle => {
                self.position = Position::At(cylinder);
                self.stats.immediate += 1;
                Admission::Immediate
            }
            Position::At(head) => {
                let direction = if cylinder >= head {
                    Direction::Current
                } else {
                    Direction::Next
                };
                let ticket = self.waiters.register();
                self.queue_mut(direction).insert(cylinder, Waiter { requester, ticket });
                self.stats.queued += 1;
                Admission::Queued { ticket, direction }
            }
        }
    }

    pub fn advance(&mut self) -> Advance {
        self.select(false)
    }

    fn select(&mut self, swapped: bool) -> Advance {
        if let Some((cylinder, waiter)) = self.current.remove_min() {
            self.position = Position::At(cylinder);
            self.waiters.grant(waiter.ticket);
            self.stats.grants += 1;
            Advance::Granted {
                cylinder,
                requester: waiter.requester,
                swapped,
            }
        } else if !self.next.is_empty() && !swapped {
            std::mem::swap(&mut self.current, &mut self.next);
            self.stats.swaps += 1;
            self.select(true)
        } else {
            self.position = Position::Idle;
            self.stats.idled += 1;
            Advance::Idle
        }
    }

    pub fn snapshot(&self) -> SchedulerSnapshot {
        SchedulerSnapshot {
            position: self.position,
            current: self.current.cylinders(),
            next: self.next.cylinders(),
            waiting: self.waiters.waiting(),
        }
    }
}

/// Everything guarded by the coordinator's lock. The rendezvous handoff
/// lives here too so that driver and requesters share one lock domain.
#[derive(Debug, Default)]
pub struct SchedulerState {
    pub scan: ScanState,
    pub handoff: Handoff,
}

#[derive(Debug)]
pub struct ScanCoordinator {
    state: Mutex<SchedulerState>,
    max_cylinder: u16,
}

impl Default for ScanCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanCoordinator {
    pub fn new() -> Self {
        Self::with_max_cylinder(MAX_CYLINDER)
    }

    pub fn with_max_cylinder(max_cylinder: u16) -> Self {
        Self {
            state: Mutex::new(SchedulerState::default()),
            max_cylinder,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_max_cylinder(config.max_cylinder)
    }

    pub fn validate(&self, cylinder: i64, requester: RequesterId) -> DiskResult<Cylinder> {
        Cylinder::checked(cylinder, self.max_cylinder).ok_or_else(|| {
            log::warn!("Rejected cylinder {} from requester {}", cylinder, requester);
            DiskError::InvalidCylinder {
                cylinder,
                requester,
                max: self.max_cylinder,
            }
        })
    }

    /// Blocks until the head is positioned on `cylinder` for this caller.
    /// Every successful call must be paired with one [`ScanCoordinator::release`].
    pub fn acquire(&self, cylinder: i64, requester: RequesterId) -> DiskResult<Cylinder> {
        let cylinder = self.validate(cylinder, requester)?;
        let mut state = self.state.lock();
        self.admit(&mut state, cylinder, requester);
        Ok(cylinder)
    }

    pub fn release(&self) -> Position {
        let mut state = self.state.lock();
        self.release_locked(&mut state)
    }

    pub fn current_position(&self) -> Position {
        self.state.lock().scan.position()
    }

    pub fn snapshot(&self) -> SchedulerSnapshot {
        self.state.lock().scan.snapshot()
    }

    pub fn stats(&self) -> ScanStats {
        self.state.lock().scan.stats()
    }

    /// Admission, transfer and release in one call. The scheduling lock is
    /// dropped for the duration of `station.perform` and retaken before the
    /// head moves on.
    pub fn do_io<T: Transfer + ?Sized>(
        &self,
        station: &T,
        cylinder: i64,
        args: TransferArgs,
    ) -> DiskResult<TransferResult> {
        let requester = args.requester;
        let cylinder = self.validate(cylinder, requester)?;

        let mut state = self.state.lock();
        self.admit(&mut state, cylinder, requester);

        let result = MutexGuard::unlocked(&mut state, || station.perform(&args, cylinder));

        self.release_locked(&mut state);
        Ok(result)
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, SchedulerState> {
        self.state.lock()
    }

    pub(crate) fn admit(
        &self,
        state: &mut MutexGuard<'_, SchedulerState>,
        cylinder: Cylinder,
        requester: RequesterId,
    ) {
        match state.scan.enqueue(cylinder, requester) {
            Admission::Immediate => {
                log::debug!("Requester {} took the free head at cylinder {}", requester, cylinder);
            }
            Admission::Queued { ticket, direction } => {
                log::debug!(
                    "Requester {} queued for cylinder {} in the {} scan (head at {})",
                    requester,
                    cylinder,
                    direction,
                    state.scan.position()
                );
                self.wait_for_grant(state, ticket);
                log::debug!("Requester {} admitted at cylinder {}", requester, cylinder);
            }
        }
    }

    fn wait_for_grant(&self, state: &mut MutexGuard<'_, SchedulerState>, ticket: Ticket) {
        let signal = state.scan.waiters().signal(ticket);
        if let Some(signal) = signal {
            while !state.scan.waiters().is_granted(ticket) {
                log::trace!("Waiting on ticket {:?}", ticket);
                signal.wait(state);
            }
        }
        state.scan.waiters_mut().retire(ticket);
    }

    pub(crate) fn release_locked(&self, state: &mut MutexGuard<'_, SchedulerState>) -> Position {
        if state.scan.position().is_free() {
            log::warn!("Release called while the head is {}", state.scan.position());
        }

        match state.scan.advance() {
            Advance::Granted {
                cylinder,
                requester,
                swapped,
            } => {
                if swapped {
                    log::debug!("Scan exhausted; jumping back to cylinder {}", cylinder);
                }
                log::debug!("Head moved to cylinder {} for requester {}", cylinder, requester);
            }
            Advance::Idle => log::debug!("No pending requests; head idle"),
        }

        state.scan.position()
    }
}
