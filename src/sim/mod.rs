// Wed Jan 15 2026 - Alex

pub mod driver;
pub mod report;
pub mod request;
pub mod runner;

pub use driver::DiskDriver;
pub use report::{Rejection, SimulationReport};
pub use request::{parse_requests, preset, DiskRequest};
pub use runner::SimulationRunner;
