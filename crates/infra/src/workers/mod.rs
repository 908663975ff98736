//! Background workers.

pub mod scan_router;

pub use scan_router::{ScanRouter, WorkerHandle};
