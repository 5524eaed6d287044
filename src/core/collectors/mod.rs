//! Inventory collectors and their registry.
//!
//! Each collector module owns one data source (a procfs file, a sysfs
//! tree, or an external report command), exposes a typed output struct,
//! and registers itself under a stable name via
//! [`register_collector!`](crate::register_collector).

pub mod avg;
pub mod cpu;
pub mod error;
pub mod filesys;
pub mod pci;
pub mod ram;
pub mod registry;
pub mod system;
pub mod traits;
pub mod types;
pub mod uptime;
pub mod xdisplay;

pub use avg::{LoadAverage, LoadAverageCollector};
pub use cpu::{CpuCollector, CpuTopology};
pub use error::CollectorError;
pub use filesys::{FilesystemCollector, MountUsage};
pub use pci::PciCollector;
pub use ram::MemoryCollector;
pub use registry::{CollectorRegistry, Collectors, DynCollector};
pub use system::{SystemCollector, SystemIdentity};
pub use traits::DataProducer;
pub use types::CollectorResult;
pub use uptime::{UptimeCollector, UptimeInfo};
pub use xdisplay::XDisplayCollector;
