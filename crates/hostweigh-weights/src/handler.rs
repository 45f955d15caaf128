//! Weight handler — runs a full weighing pass.
//!
//! Builds fresh weigher instances for every pass, so passes never share
//! mutable state and can run concurrently on separate host lists.

use hostweigh_core::{HostState, WeighConfig};
use tracing::debug;

use crate::error::WeighResult;
use crate::registry::{WeigherClass, WeigherRegistry};
use crate::weigher::{WeighProperties, WeighedHost, Weigher};

/// Resolves weigher names and ranks hosts with them.
#[derive(Debug, Clone)]
pub struct WeightHandler {
    registry: WeigherRegistry,
    config: WeighConfig,
}

impl WeightHandler {
    pub fn new(registry: WeigherRegistry, config: WeighConfig) -> Self {
        Self { registry, config }
    }

    /// Handler over the built-in weighers.
    pub fn with_builtin(config: WeighConfig) -> Self {
        Self::new(WeigherRegistry::builtin(), config)
    }

    pub fn registry(&self) -> &WeigherRegistry {
        &self.registry
    }

    pub fn config(&self) -> &WeighConfig {
        &self.config
    }

    /// Resolve weigher names against the registry.
    pub fn get_matching_classes<S: AsRef<str>>(&self, names: &[S]) -> WeighResult<Vec<WeigherClass>> {
        self.registry.resolve(names)
    }

    /// Resolve the weighers named in the configuration.
    pub fn configured_classes(&self) -> WeighResult<Vec<WeigherClass>> {
        self.registry.resolve(&self.config.weighers)
    }

    /// Weigh `hosts` with every class in `classes` and sort best first.
    ///
    /// Each host's weight is the sum over weighers of
    /// `normalized_score * multiplier`. Ties keep their input order. With
    /// fewer than two hosts no weigher runs and every weight is `0.0`.
    /// The first weigher error aborts the pass; no partial ranking is
    /// returned.
    pub fn weigh_all<'a>(
        &self,
        classes: &[WeigherClass],
        hosts: &'a [HostState],
        props: &WeighProperties,
    ) -> WeighResult<Vec<WeighedHost<'a>>> {
        let mut weighed: Vec<WeighedHost<'a>> =
            hosts.iter().map(|h| WeighedHost::new(h, 0.0)).collect();

        if weighed.len() <= 1 {
            return Ok(weighed);
        }

        let weighers: Vec<Box<dyn Weigher>> =
            classes.iter().map(|c| c.instantiate(&self.config)).collect();

        for weigher in &weighers {
            debug!(
                weigher = weigher.name(),
                multiplier = weigher.multiplier(),
                hosts = weighed.len(),
                "running weigher"
            );
            weigher.weigh_all(&mut weighed, props)?;
        }

        // Stable: equal weights keep candidate order.
        weighed.sort_by(|a, b| b.weight.total_cmp(&a.weight));

        for w in &weighed {
            debug!(host = %w.obj.host, weight = w.weight, "weighed host");
        }

        Ok(weighed)
    }

    /// Weigh `hosts` with the configured weighers.
    pub fn rank<'a>(
        &self,
        hosts: &'a [HostState],
        props: &WeighProperties,
    ) -> WeighResult<Vec<WeighedHost<'a>>> {
        let classes = self.configured_classes()?;
        self.weigh_all(&classes, hosts, props)
    }
}
