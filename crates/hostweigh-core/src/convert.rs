//! Conversion from compute-node records to host snapshots.
//!
//! Compute nodes report their state as a flat record: `stats` is a
//! JSON-encoded string map and `metrics` a JSON-encoded list of items.
//! This module decodes those into a [`HostState`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{HostMetric, HostState};

/// Service the compute node runs under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRecord {
    pub host: String,
    #[serde(default)]
    pub disabled: bool,
}

/// One entry of the JSON-encoded metrics list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricRecord {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub source: Option<String>,
}

/// Raw record as reported by a compute node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComputeNodeRecord {
    pub id: u64,
    #[serde(default)]
    pub service: Option<ServiceRecord>,
    #[serde(default)]
    pub hypervisor_hostname: Option<String>,
    #[serde(default)]
    pub memory_mb: i64,
    #[serde(default)]
    pub free_ram_mb: i64,
    /// JSON object of string values, e.g. `{"io_workload": "2"}`.
    #[serde(default)]
    pub stats: Option<String>,
    /// JSON array of [`MetricRecord`].
    #[serde(default)]
    pub metrics: Option<String>,
}

/// Convert a [`ComputeNodeRecord`] to a [`HostState`].
///
/// Returns `None` for records with no service, since there is no host
/// to place on. Undecodable `stats` or `metrics` are dropped with a
/// warning; the host is still returned.
pub fn compute_node_to_host_state(record: &ComputeNodeRecord) -> Option<HostState> {
    let Some(service) = &record.service else {
        warn!(compute_id = record.id, "no service for compute node, skipping");
        return None;
    };

    let nodename = record
        .hypervisor_hostname
        .clone()
        .unwrap_or_else(|| service.host.clone());

    Some(HostState {
        host: service.host.clone(),
        nodename,
        free_ram_mb: record.free_ram_mb,
        stats: record.stats.as_deref().and_then(|raw| decode_stats(record.id, raw)),
        metrics: record.metrics.as_deref().and_then(|raw| decode_metrics(record.id, raw)),
    })
}

/// Convert a batch of records, preserving order and skipping broken ones.
pub fn compute_nodes_to_host_states(records: &[ComputeNodeRecord]) -> Vec<HostState> {
    records.iter().filter_map(compute_node_to_host_state).collect()
}

fn decode_stats(compute_id: u64, raw: &str) -> Option<HashMap<String, String>> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(compute_id, error = %e, "undecodable stats, ignoring");
            return None;
        }
    };
    let serde_json::Value::Object(map) = value else {
        warn!(compute_id, "stats is not an object, ignoring");
        return None;
    };

    // Stats values are reported as strings but older nodes send numbers.
    let stats = map
        .into_iter()
        .map(|(k, v)| {
            let v = match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (k, v)
        })
        .collect();
    Some(stats)
}

fn decode_metrics(compute_id: u64, raw: &str) -> Option<HashMap<String, HostMetric>> {
    match serde_json::from_str::<Vec<MetricRecord>>(raw) {
        Ok(items) => Some(
            items
                .into_iter()
                .map(|m| {
                    (
                        m.name,
                        HostMetric {
                            value: m.value,
                            source: m.source,
                        },
                    )
                })
                .collect(),
        ),
        Err(e) => {
            warn!(compute_id, error = %e, "undecodable metrics, ignoring");
            None
        }
    }
}
