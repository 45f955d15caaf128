//! hostweigh-core — host snapshots and weigher configuration.
//!
//! The weighing pipeline consumes these types read-only. Nothing here
//! scores hosts; see `hostweigh-weights` for that.
//!
//! # Components
//!
//! - **`types`** — `HostState` and `HostMetric`, the per-host snapshot
//! - **`convert`** — Conversion from raw compute-node records
//! - **`config`** — `weigh.toml` parsing (`WeighConfig`)

pub mod config;
pub mod convert;
pub mod types;

pub use config::{IoOpsConfig, MetricsConfig, RamConfig, WeighConfig};
pub use convert::{ComputeNodeRecord, MetricRecord, ServiceRecord, compute_node_to_host_state, compute_nodes_to_host_states};
pub use types::*;
