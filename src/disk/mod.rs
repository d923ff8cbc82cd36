// Tue Jan 13 2026 - Alex

pub mod coordinator;
pub mod cylinder;
pub mod error;
pub mod queue;
pub mod rendezvous;
pub mod transfer;
pub mod waiters;

pub use coordinator::{ScanCoordinator, ScanStats, SchedulerSnapshot};
pub use cylinder::{Cylinder, Direction, Position, RequesterId, MAX_CYLINDER};
pub use error::{DiskError, DiskResult};
pub use queue::CylinderQueue;
pub use rendezvous::{DriverRendezvous, ServiceRequest};
pub use transfer::{ServiceTime, Transfer, TransferArgs, TransferRecord, TransferResult, TransferStation};
pub use waiters::{Ticket, WaiterArena};
