// Tue Jan 13 2026 - Alex

use super::cylinder::{Cylinder, RequesterId};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferArgs {
    pub requester: RequesterId,
    pub payload: String,
}

impl TransferArgs {
    pub fn new(requester: RequesterId, payload: impl Into<String>) -> Self {
        Self {
            requester,
            payload: payload.into(),
        }
    }

    pub fn for_requester(requester: RequesterId) -> Self {
        Self::new(requester, format!("data from requester {}", requester.as_u32()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub success: bool,
    pub message: String,
}

impl TransferResult {
    pub fn completed(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

pub trait Transfer: Send + Sync {
    fn perform(&self, args: &TransferArgs, cylinder: Cylinder) -> TransferResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTime {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl ServiceTime {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: max_ms.max(min_ms),
        }
    }

    pub fn instant() -> Self {
        Self::new(0, 0)
    }

    fn sample(&self, rng: &mut StdRng) -> Duration {
        if self.max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rng.random_range(self.min_ms..=self.max_ms))
    }
}

impl Default for ServiceTime {
    fn default() -> Self {
        Self::new(300, 500)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransferRecord {
    pub requester: RequesterId,
    pub cylinder: Cylinder,
}

#[derive(Debug)]
struct Console {
    rng: StdRng,
    history: Vec<TransferRecord>,
}

/// Nested monitor performing simulated transfers.
///
/// Its lock only serializes logging and the transfer history; it carries no
/// scheduling state and is never held while the scheduler's lock is.
#[derive(Debug)]
pub struct TransferStation {
    console: Mutex<Console>,
    service_time: ServiceTime,
}

impl TransferStation {
    pub fn new(service_time: ServiceTime) -> Self {
        Self::with_rng(service_time, StdRng::from_os_rng())
    }

    pub fn seeded(service_time: ServiceTime, seed: u64) -> Self {
        Self::with_rng(service_time, StdRng::seed_from_u64(seed))
    }

    fn with_rng(service_time: ServiceTime, rng: StdRng) -> Self {
        Self {
            console: Mutex::new(Console {
                rng,
                history: Vec::new(),
            }),
            service_time,
        }
    }

    pub fn history(&self) -> Vec<TransferRecord> {
        self.console.lock().history.clone()
    }

    pub fn served(&self) -> usize {
        self.console.lock().history.len()
    }
}

impl Default for TransferStation {
    fn default() -> Self {
        Self::new(ServiceTime::default())
    }
}

impl Transfer for TransferStation {
    fn perform(&self, args: &TransferArgs, cylinder: Cylinder) -> TransferResult {
        let delay = {
            let mut console = self.console.lock();
            console.history.push(TransferRecord {
                requester: args.requester,
                cylinder,
            });
            log::info!("Requester {} reading from cylinder {}", args.requester, cylinder);
            self.service_time.sample(&mut console.rng)
        };

        if !delay.is_zero() {
            thread::sleep(delay);
        }

        {
            let _console = self.console.lock();
            log::info!(
                "Requester {} finished on cylinder {} after {}ms",
                args.requester,
                cylinder,
                delay.as_millis()
            );
        }

        TransferResult::completed(format!(
            "Transferred {} bytes at cylinder {}",
            args.payload.len(),
            cylinder
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::coordinator::tests::wait_until;
    use crate::disk::coordinator::ScanCoordinator;
    use crate::disk::cylinder::{Position, MAX_CYLINDER};
    use std::sync::mpsc;
    use std::sync::Arc;

    fn cyl(value: i64) -> Cylinder {
        Cylinder::checked(value, MAX_CYLINDER).unwrap()
    }

    /// Parks inside the transfer until the test lets it go.
    struct GatedTransfer {
        entered: Mutex<Option<mpsc::Sender<Cylinder>>>,
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl Transfer for GatedTransfer {
        fn perform(&self, args: &TransferArgs, cylinder: Cylinder) -> TransferResult {
            if let Some(tx) = self.entered.lock().as_ref() {
                tx.send(cylinder).unwrap();
            }
            self.gate.lock().recv().unwrap();
            TransferResult::completed(format!("{} done", args.requester))
        }
    }

    #[test]
    fn test_station_records_history() {
        let station = TransferStation::seeded(ServiceTime::instant(), 1);
        let args = TransferArgs::for_requester(RequesterId::new(4));

        let result = station.perform(&args, cyl(12));
        assert!(result.success);
        assert!(result.message.contains("cylinder 12"));
        assert_eq!(station.served(), 1);
        assert_eq!(
            station.history(),
            vec![TransferRecord {
                requester: RequesterId::new(4),
                cylinder: cyl(12)
            }]
        );
    }

    #[test]
    fn test_service_time_sampling_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let time = ServiceTime::new(5, 9);
        for _ in 0..50 {
            let sample = time.sample(&mut rng).as_millis() as u64;
            assert!((5..=9).contains(&sample));
        }
        assert_eq!(ServiceTime::new(9, 5), time);
        assert_eq!(ServiceTime::instant().sample(&mut rng), Duration::ZERO);
    }

    #[test]
    fn test_do_io_serves_in_scan_order() {
        let coordinator = Arc::new(ScanCoordinator::new());
        let station = Arc::new(TransferStation::seeded(ServiceTime::instant(), 3));

        // Hold the head so every request below queues up first.
        coordinator.acquire(60, RequesterId::new(0)).unwrap();

        let handles: Vec<_> = [(1, 90), (2, 20), (3, 75), (4, 5)]
            .into_iter()
            .map(|(n, value)| {
                let coordinator = Arc::clone(&coordinator);
                let station = Arc::clone(&station);
                std::thread::spawn(move || {
                    let args = TransferArgs::for_requester(RequesterId::new(n));
                    coordinator.do_io(station.as_ref(), value, args).unwrap()
                })
            })
            .collect();

        wait_until(&coordinator, |s| s.waiting == 4);
        coordinator.release();

        for handle in handles {
            assert!(handle.join().unwrap().success);
        }

        let order: Vec<u16> = station.history().iter().map(|r| r.cylinder.value()).collect();
        assert_eq!(order, vec![75, 90, 5, 20]);
        assert_eq!(coordinator.current_position(), Position::Idle);
    }

    #[test]
    fn test_do_io_rejects_before_touching_station() {
        let coordinator = ScanCoordinator::new();
        let station = TransferStation::seeded(ServiceTime::instant(), 3);
        let args = TransferArgs::for_requester(RequesterId::new(9));

        assert!(coordinator.do_io(&station, 420, args).is_err());
        assert_eq!(station.served(), 0);
        assert_eq!(coordinator.current_position(), Position::Unstarted);
    }

    #[test]
    fn test_open_call_releases_scheduler_lock() {
        let coordinator = Arc::new(ScanCoordinator::new());
        let (entered_tx, entered_rx) = mpsc::channel();
        let (gate_tx, gate_rx) = mpsc::channel();
        let transfer = Arc::new(GatedTransfer {
            entered: Mutex::new(Some(entered_tx)),
            gate: Mutex::new(gate_rx),
        });

        let owner = {
            let coordinator = Arc::clone(&coordinator);
            let transfer = Arc::clone(&transfer);
            std::thread::spawn(move || {
                let args = TransferArgs::for_requester(RequesterId::new(1));
                coordinator.do_io(transfer.as_ref(), 40, args).unwrap()
            })
        };

        assert_eq!(entered_rx.recv().unwrap(), cyl(40));

        // The owner is parked inside the transfer; admission must still work.
        let queued = {
            let coordinator = Arc::clone(&coordinator);
            std::thread::spawn(move || {
                coordinator.acquire(10, RequesterId::new(2)).unwrap();
                let position = coordinator.current_position();
                coordinator.release();
                position
            })
        };
        wait_until(&coordinator, |s| s.waiting == 1 && s.next.len() == 1);
        assert_eq!(coordinator.current_position(), Position::At(cyl(40)));

        gate_tx.send(()).unwrap();
        assert!(owner.join().unwrap().success);
        assert_eq!(queued.join().unwrap(), Position::At(cyl(10)));
        assert_eq!(coordinator.current_position(), Position::Idle);
    }
}
