//! Snapshot types for candidate hosts.
//!
//! A `HostState` is gathered by the host manager before filtering and is
//! treated as immutable for the duration of a weighing pass.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a compute host (the service host name).
pub type HostId = String;

/// Stats key carrying the number of in-flight I/O operations.
pub const IO_WORKLOAD_STAT: &str = "io_workload";

/// A single named metric reported by a compute node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostMetric {
    pub value: f64,
    /// Monitor that produced the value (e.g. "libvirt.driver").
    #[serde(default)]
    pub source: Option<String>,
}

impl HostMetric {
    pub fn new(value: f64) -> Self {
        Self { value, source: None }
    }
}

/// Resource snapshot of one compute host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostState {
    pub host: HostId,
    pub nodename: String,
    /// Free memory in MiB. Can be negative when the host is overcommitted.
    pub free_ram_mb: i64,
    /// Opaque operational statistics, values as reported (strings).
    #[serde(default)]
    pub stats: Option<HashMap<String, String>>,
    /// Named metrics, keyed by metric name.
    #[serde(default)]
    pub metrics: Option<HashMap<String, HostMetric>>,
}

impl HostState {
    pub fn new(host: &str, nodename: &str, free_ram_mb: i64) -> Self {
        Self {
            host: host.to_string(),
            nodename: nodename.to_string(),
            free_ram_mb,
            stats: None,
            metrics: None,
        }
    }

    /// Number of in-flight I/O operations.
    ///
    /// Read from the `io_workload` stat. Missing stats or a value that
    /// does not parse as an integer count as zero.
    pub fn num_io_ops(&self) -> u64 {
        self.stats
            .as_ref()
            .and_then(|s| s.get(IO_WORKLOAD_STAT))
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(0)
    }

    /// Look up a named metric value.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.as_ref()?.get(name).map(|m| m.value)
    }

    pub fn with_stat(mut self, key: &str, value: &str) -> Self {
        self.stats
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_metric(mut self, name: &str, value: f64) -> Self {
        self.metrics
            .get_or_insert_with(HashMap::new)
            .insert(name.to_string(), HostMetric::new(value));
        self
    }
}
