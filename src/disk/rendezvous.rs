// Wed Jan 15 2026 - Alex

use super::coordinator::{Advance, ScanCoordinator, SchedulerState};
use super::cylinder::Cylinder;
use super::error::DiskResult;
use super::transfer::{TransferArgs, TransferResult};
use parking_lot::{Condvar, MutexGuard};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub cylinder: Cylinder,
    pub args: TransferArgs,
}

/// Single-slot argument and result buffers shared by requesters and the
/// driver. Guarded by the coordinator's lock.
#[derive(Debug, Default)]
pub struct Handoff {
    args: Option<ServiceRequest>,
    result: Option<TransferResult>,
    claimed: bool,
    completed: u64,
}

impl Handoff {
    pub fn args_ready(&self) -> bool {
        self.args.is_some()
    }

    pub fn result_ready(&self) -> bool {
        self.result.is_some()
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }
}

/// Two-phase handshake between requester threads and one driver thread.
///
/// Requesters are admitted through the coordinator exactly as with
/// [`ScanCoordinator::acquire`], but the head is advanced by the driver in
/// [`DriverRendezvous::get_next_request`] instead of by the requester. Only
/// one transfer is in flight at a time and the driver never selects a new
/// request before the previous result has been picked up.
#[derive(Debug)]
pub struct DriverRendezvous {
    coordinator: Arc<ScanCoordinator>,
    args_stored: Condvar,
    args_retrieved: Condvar,
    results_stored: Condvar,
    results_retrieved: Condvar,
}

impl DriverRendezvous {
    pub fn new(coordinator: Arc<ScanCoordinator>) -> Self {
        Self {
            coordinator,
            args_stored: Condvar::new(),
            args_retrieved: Condvar::new(),
            results_stored: Condvar::new(),
            results_retrieved: Condvar::new(),
        }
    }

    pub fn coordinator(&self) -> &Arc<ScanCoordinator> {
        &self.coordinator
    }

    /// Requester side: wait for the head, hand the arguments to the driver and
    /// block until its result comes back.
    pub fn use_disk(&self, cylinder: i64, args: TransferArgs) -> DiskResult<TransferResult> {
        let requester = args.requester;
        let cylinder = self.coordinator.validate(cylinder, requester)?;

        let mut state = self.coordinator.lock();
        self.coordinator.admit(&mut state, cylinder, requester);
        state.handoff.claimed = true;

        self.deposit_locked(&mut state, ServiceRequest { cylinder, args });

        let result = loop {
            if let Some(result) = state.handoff.result.take() {
                break result;
            }
            self.results_stored.wait(&mut state);
        };
        self.results_retrieved.notify_one();
        log::debug!("Requester {} received its result", requester);

        Ok(result)
    }

    /// Driver side: move the head if nobody holds it, then wait for the
    /// owner's arguments.
    pub fn get_next_request(&self) -> ServiceRequest {
        let mut state = self.coordinator.lock();

        if !state.handoff.claimed {
            match state.scan.advance() {
                Advance::Granted {
                    cylinder,
                    requester,
                    swapped,
                } => {
                    if swapped {
                        log::debug!("[driver] Scan exhausted; reversing to cylinder {}", cylinder);
                    }
                    log::debug!("[driver] Selected requester {} at cylinder {}", requester, cylinder);
                    state.handoff.claimed = true;
                }
                Advance::Idle => log::debug!("[driver] No requests pending; head idle"),
            }
        }

        let request = loop {
            if let Some(request) = state.handoff.args.take() {
                break request;
            }
            self.args_stored.wait(&mut state);
        };
        self.args_retrieved.notify_one();

        log::debug!(
            "[driver] Received arguments from requester {} for cylinder {}",
            request.args.requester,
            request.cylinder
        );
        request
    }

    /// Driver side: publish the result and block until the requester has taken it.
    pub fn finished_transfer(&self, result: TransferResult) {
        let mut state = self.coordinator.lock();

        while state.handoff.result.is_some() {
            self.results_retrieved.wait(&mut state);
        }
        state.handoff.result = Some(result);
        self.results_stored.notify_one();

        while state.handoff.result.is_some() {
            self.results_retrieved.wait(&mut state);
        }
        state.handoff.claimed = false;
        state.handoff.completed += 1;
        log::debug!("[driver] Requester confirmed receipt of the result");
    }

    pub fn completed(&self) -> u64 {
        self.coordinator.lock().handoff.completed()
    }

    pub fn args_ready(&self) -> bool {
        self.coordinator.lock().handoff.args_ready()
    }

    pub fn result_ready(&self) -> bool {
        self.coordinator.lock().handoff.result_ready()
    }

    fn deposit_locked(&self, state: &mut MutexGuard<'_, SchedulerState>, request: ServiceRequest) {
        // Never overwrite an unconsumed deposit.
        while state.handoff.args.is_some() {
            self.args_retrieved.wait(state);
        }
        log::debug!(
            "Requester {} sending arguments for cylinder {}",
            request.args.requester,
            request.cylinder
        );
        state.handoff.args = Some(request);
        self.args_stored.notify_one();
    }
}
