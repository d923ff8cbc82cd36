// Wed Jan 15 2026 - Alex

use super::driver::DiskDriver;
use super::report::{Rejection, SimulationReport};
use super::request::{plan, preset, DiskRequest};
use crate::config::{Config, Variant};
use crate::disk::{
    Cylinder, DiskError, DiskResult, DriverRendezvous, ScanCoordinator, Transfer, TransferArgs,
    TransferStation,
};
use crate::utils::logging::ScopedTimer;
use indicatif::ProgressBar;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Spawns one thread per request against a fresh scheduling domain and
/// waits for all of them.
pub struct SimulationRunner {
    config: Config,
    progress: Option<ProgressBar>,
}

/// How a requester reaches the disk.
enum Protocol {
    Direct,
    Nested,
    Driver(Arc<DriverRendezvous>),
}

struct Shared {
    coordinator: Arc<ScanCoordinator>,
    station: Arc<TransferStation>,
    protocol: Protocol,
    rejected: Mutex<Vec<Rejection>>,
    progress: Option<ProgressBar>,
}

impl SimulationRunner {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn requests(&self) -> Vec<i64> {
        if self.config.requests.is_empty() {
            preset(self.config.variant)
        } else {
            self.config.requests.clone()
        }
    }

    pub fn run(&self) -> anyhow::Result<SimulationReport> {
        self.config.validate().map_err(|e| anyhow::anyhow!(e))?;
        let _timer = ScopedTimer::new("simulation");
        let started = Instant::now();

        let requests = self.requests();
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let planned = plan(&requests, self.config.arrival_max_ms, &mut rng);

        let coordinator = Arc::new(ScanCoordinator::from_config(&self.config));
        let station = Arc::new(match self.config.seed {
            Some(seed) => TransferStation::seeded(self.config.service_time(), seed.wrapping_add(1)),
            None => TransferStation::new(self.config.service_time()),
        });

        let (protocol, mut driver) = match self.config.variant {
            Variant::Driver => {
                let valid = requests
                    .iter()
                    .filter(|c| Cylinder::checked(**c, self.config.max_cylinder).is_some())
                    .count();
                let rendezvous = Arc::new(DriverRendezvous::new(Arc::clone(&coordinator)));
                let transfer: Arc<dyn Transfer> = station.clone();
                let mut driver = DiskDriver::new(Arc::clone(&rendezvous), transfer, valid);
                driver.start()?;
                (Protocol::Driver(rendezvous), Some(driver))
            }
            Variant::Nested => (Protocol::Nested, None),
            Variant::Simple => (Protocol::Direct, None),
        };

        let shared = Arc::new(Shared {
            coordinator: Arc::clone(&coordinator),
            station: Arc::clone(&station),
            protocol,
            rejected: Mutex::new(Vec::new()),
            progress: self.progress.clone(),
        });

        log::info!(
            "Starting {} simulation with {} requests",
            self.config.variant,
            planned.len()
        );

        let mut handles = Vec::with_capacity(planned.len());
        for request in planned {
            let shared = Arc::clone(&shared);
            let handle = thread::Builder::new()
                .name(format!("requester-{}", request.requester.as_u32()))
                .spawn(move || run_requester(&shared, request))?;
            handles.push(handle);
        }

        for handle in handles {
            handle
                .join()
                .map_err(|_| anyhow::anyhow!("requester thread panicked"))?;
        }

        if let Some(driver) = driver.as_mut() {
            driver.join()?;
        }

        if let Some(progress) = &self.progress {
            progress.finish_with_message("all requests completed");
        }

        let mut rejected = shared.rejected.lock().clone();
        rejected.sort_by_key(|r| r.requester.as_u32());

        Ok(SimulationReport {
            variant: self.config.variant,
            requested: requests.len(),
            served: station.history(),
            rejected,
            stats: coordinator.stats(),
            final_position: coordinator.current_position(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }
}

fn run_requester(shared: &Shared, request: DiskRequest) {
    if !request.arrival.is_zero() {
        thread::sleep(request.arrival);
    }

    let requester = request.requester;
    log::info!("Requester {} requesting cylinder {}", requester, request.cylinder);

    let args = TransferArgs::for_requester(requester);
    let outcome: DiskResult<()> = match &shared.protocol {
        Protocol::Direct => shared.coordinator.acquire(request.cylinder, requester).map(|cylinder| {
            shared.station.perform(&args, cylinder);
            shared.coordinator.release();
        }),
        Protocol::Nested => shared
            .coordinator
            .do_io(shared.station.as_ref(), request.cylinder, args)
            .map(|_| ()),
        Protocol::Driver(rendezvous) => rendezvous.use_disk(request.cylinder, args).map(|_| ()),
    };

    match outcome {
        Ok(()) => log::info!("Requester {} finished with cylinder {}", requester, request.cylinder),
        Err(err @ DiskError::InvalidCylinder { .. }) => {
            log::warn!("Requester {} denied: {}", requester, err);
            shared.rejected.lock().push(Rejection {
                requester,
                cylinder: err.cylinder(),
                reason: err.to_string(),
            });
        }
    }

    if let Some(progress) = &shared.progress {
        progress.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::Position;
    use crate::sim::request::{DRIVER_PRESET, NESTED_PRESET, SIMPLE_PRESET};

    fn run(config: Config) -> SimulationReport {
        SimulationRunner::new(config.instant().with_seed(7)).run().unwrap()
    }

    fn sorted(mut values: Vec<u16>) -> Vec<u16> {
        values.sort_unstable();
        values
    }

    #[test]
    fn test_simple_variant_serves_everything() {
        let report = run(Config::new().with_variant(Variant::Simple));

        assert!(report.is_complete());
        assert!(report.rejected.is_empty());
        let expected: Vec<u16> = SIMPLE_PRESET.iter().map(|c| *c as u16).collect();
        assert_eq!(sorted(report.service_order()), sorted(expected));
        assert_eq!(report.final_position, Position::Idle);
    }

    #[test]
    fn test_nested_variant_rejects_out_of_range() {
        let report = run(Config::new().with_variant(Variant::Nested));

        assert!(report.is_complete());
        assert_eq!(report.requested, NESTED_PRESET.len());
        let rejected: Vec<i64> = report.rejected.iter().map(|r| r.cylinder).collect();
        assert_eq!(sorted_i64(rejected), vec![200, 420, 9999]);
        assert_eq!(report.served.len(), NESTED_PRESET.len() - 3);
    }

    #[test]
    fn test_driver_variant_serves_everything() {
        let report = run(Config::new().with_variant(Variant::Driver));

        assert!(report.is_complete());
        assert_eq!(report.served.len(), DRIVER_PRESET.len());
        assert_eq!(report.stats.immediate + report.stats.grants, DRIVER_PRESET.len() as u64);
    }

    #[test]
    fn test_driver_variant_with_invalid_requests() {
        let report = run(
            Config::new()
                .with_variant(Variant::Driver)
                .with_requests(vec![10, -1, 150, 300, 10]),
        );

        assert!(report.is_complete());
        assert_eq!(report.served.len(), 3);
        assert_eq!(report.rejected.len(), 2);
    }

    #[test]
    fn test_simple_variant_releases_after_each_transfer() {
        let report = run(
            Config::new()
                .with_variant(Variant::Simple)
                .with_requests(vec![120, 30, 120]),
        );

        assert!(report.is_complete());
        assert_eq!(report.served.len(), 3);
        assert_eq!(report.stats.immediate + report.stats.grants, 3);
        assert_eq!(report.final_position, Position::Idle);
    }

    #[test]
    fn test_custom_max_cylinder() {
        let report = run(Config::new().with_max_cylinder(99).with_requests(vec![10, 99, 100]));

        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].cylinder, 100);
    }

    fn sorted_i64(mut values: Vec<i64>) -> Vec<i64> {
        values.sort_unstable();
        values
    }
}
