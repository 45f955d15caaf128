//! The weigher abstraction and the per-host score accumulator.

use std::collections::HashMap;
use std::fmt;

use hostweigh_core::HostState;
use serde::{Deserialize, Serialize};

use crate::error::WeighResult;
use crate::normalize::normalize;

/// Request-scoped properties passed through to every weigher.
///
/// The built-in weighers ignore them; custom weighers can read request
/// hints (e.g. a preferred host) from here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeighProperties {
    values: HashMap<String, serde_json::Value>,
}

impl WeighProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<serde_json::Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn with(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.insert(key, value);
        self
    }
}

/// A host paired with its accumulated weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeighedHost<'a> {
    pub obj: &'a HostState,
    pub weight: f64,
}

/// Serializable `{weight, host}` view of a [`WeighedHost`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeighedHostView {
    pub weight: f64,
    pub host: String,
}

impl<'a> WeighedHost<'a> {
    pub fn new(obj: &'a HostState, weight: f64) -> Self {
        Self { obj, weight }
    }

    pub fn host(&self) -> &str {
        &self.obj.host
    }

    pub fn to_dict(&self) -> WeighedHostView {
        WeighedHostView {
            weight: self.weight,
            host: self.obj.host.clone(),
        }
    }
}

impl fmt::Display for WeighedHost<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeighedHost [host: {}, weight: {}]", self.obj.host, self.weight)
    }
}

/// One scoring criterion.
///
/// Implementors provide [`raw_score`](Weigher::raw_score); the default
/// [`weigh_all`](Weigher::weigh_all) normalizes over the whole candidate
/// set and accumulates `normalized * multiplier` into each host.
pub trait Weigher: Send + Sync {
    /// Class name, e.g. `"RAMWeigher"`.
    fn name(&self) -> &'static str;

    /// Unscaled measurement for one host. Must not mutate the host.
    fn raw_score(&self, host: &HostState, props: &WeighProperties) -> WeighResult<f64>;

    /// Signed scale factor. Zero disables the weigher.
    fn multiplier(&self) -> f64 {
        1.0
    }

    /// Fixed normalization bounds. `None` derives the bound from the data.
    fn weigh_range(&self, _hosts: &[WeighedHost<'_>]) -> (Option<f64>, Option<f64>) {
        (None, None)
    }

    /// Score every host and add the scaled, normalized score to its weight.
    ///
    /// Fails without touching any weight if a raw score fails. Order of
    /// `hosts` is left as is.
    fn weigh_all(&self, hosts: &mut [WeighedHost<'_>], props: &WeighProperties) -> WeighResult<()> {
        let raw = hosts
            .iter()
            .map(|h| self.raw_score(h.obj, props))
            .collect::<WeighResult<Vec<f64>>>()?;

        let (min, max) = self.weigh_range(hosts);
        let multiplier = self.multiplier();

        for (host, score) in hosts.iter_mut().zip(normalize(&raw, min, max)) {
            host.weight += score * multiplier;
        }
        Ok(())
    }
}
