// Tue Jan 13 2026 - Alex

pub mod cli;
pub mod config;
pub mod disk;
pub mod sim;
pub mod utils;

pub use config::{Config, Variant};
pub use disk::{
    DiskError, DriverRendezvous, Position, RequesterId, ScanCoordinator, TransferArgs, TransferResult,
    TransferStation, MAX_CYLINDER,
};
pub use sim::{SimulationReport, SimulationRunner};
