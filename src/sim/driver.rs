// Wed Jan 15 2026 - Alex

use crate::disk::{DriverRendezvous, Transfer};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Dedicated thread performing every transfer handed over through a
/// [`DriverRendezvous`]. Serves a fixed number of requests and exits.
pub struct DiskDriver {
    rendezvous: Arc<DriverRendezvous>,
    transfer: Arc<dyn Transfer>,
    total_requests: usize,
    handle: Option<JoinHandle<usize>>,
}

impl DiskDriver {
    pub fn new(rendezvous: Arc<DriverRendezvous>, transfer: Arc<dyn Transfer>, total_requests: usize) -> Self {
        Self {
            rendezvous,
            transfer,
            total_requests,
            handle: None,
        }
    }

    pub fn start(&mut self) -> io::Result<()> {
        let rendezvous = self.rendezvous.clone();
        let transfer = self.transfer.clone();
        let total = self.total_requests;

        let handle = thread::Builder::new()
            .name("disk-driver".to_string())
            .spawn(move || DiskDriver::run_loop(rendezvous, transfer, total))?;

        self.handle = Some(handle);
        Ok(())
    }

    pub fn join(&mut self) -> anyhow::Result<usize> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| anyhow::anyhow!("disk driver thread panicked")),
            None => Ok(0),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    fn run_loop(rendezvous: Arc<DriverRendezvous>, transfer: Arc<dyn Transfer>, total: usize) -> usize {
        log::debug!("[driver] Started; serving {} requests", total);

        for served in 0..total {
            let request = rendezvous.get_next_request();
            log::debug!(
                "[driver] Servicing requester {} at cylinder {}",
                request.args.requester,
                request.cylinder
            );

            let result = transfer.perform(&request.args, request.cylinder);
            rendezvous.finished_transfer(result);

            log::trace!("[driver] {} of {} done", served + 1, total);
        }

        log::debug!("[driver] All {} requests served; exiting", total);
        total
    }
}
