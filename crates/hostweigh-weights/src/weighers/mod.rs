//! Built-in weighers.

pub mod io_ops;
pub mod metrics;
pub mod ram;

pub use io_ops::IoOpsWeigher;
pub use metrics::{MetricsWeigher, parse_setting};
pub use ram::RamWeigher;
