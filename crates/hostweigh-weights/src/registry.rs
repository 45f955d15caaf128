//! Weigher class registry.
//!
//! Maps weigher names to factories. Populated once at start-up with the
//! built-in weighers plus whatever custom weighers the embedder registers;
//! resolving a name list happens at configuration time so an unknown
//! name fails before any pass runs.

use hostweigh_core::WeighConfig;
use tracing::debug;

use crate::error::{WeighError, WeighResult};
use crate::weigher::Weigher;
use crate::weighers::{IoOpsWeigher, MetricsWeigher, RamWeigher};

/// Name that expands to every registered weigher.
pub const ALL_WEIGHERS: &str = "all";

/// Builds a fresh weigher instance from the pass configuration.
pub type WeigherFactory = fn(&WeighConfig) -> Box<dyn Weigher>;

/// A registered weigher: its names and how to build it.
#[derive(Debug, Clone, Copy)]
pub struct WeigherClass {
    /// Class name, e.g. `"RAMWeigher"`.
    pub name: &'static str,
    /// Additional names accepted by [`WeigherRegistry::resolve`].
    pub aliases: &'static [&'static str],
    pub build: WeigherFactory,
}

impl WeigherClass {
    pub const fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        build: WeigherFactory,
    ) -> Self {
        Self { name, aliases, build }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| *a == name)
    }

    pub fn instantiate(&self, config: &WeighConfig) -> Box<dyn Weigher> {
        (self.build)(config)
    }
}

/// Ordered set of known weigher classes.
#[derive(Debug, Clone, Default)]
pub struct WeigherRegistry {
    classes: Vec<WeigherClass>,
}

impl WeigherRegistry {
    /// A registry with no weighers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the RAM, metrics, and I/O ops weighers.
    pub fn builtin() -> Self {
        Self {
            classes: vec![
                WeigherClass::new(RamWeigher::NAME, &["ram"], RamWeigher::from_config),
                WeigherClass::new(MetricsWeigher::NAME, &["metrics"], MetricsWeigher::from_config),
                WeigherClass::new(IoOpsWeigher::NAME, &["io_ops"], IoOpsWeigher::from_config),
            ],
        }
    }

    /// Add a weigher class. Fails if any of its names is already taken.
    pub fn register(&mut self, class: WeigherClass) -> WeighResult<()> {
        let taken = std::iter::once(class.name)
            .chain(class.aliases.iter().copied())
            .find(|n| *n == ALL_WEIGHERS || self.get(n).is_some());
        if let Some(name) = taken {
            return Err(WeighError::DuplicateWeigher(name.to_string()));
        }

        debug!(weigher = class.name, "registered weigher");
        self.classes.push(class);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<WeigherClass> {
        self.classes.iter().find(|c| c.matches(name)).copied()
    }

    /// Every registered class, in registration order.
    pub fn all_available(&self) -> Vec<WeigherClass> {
        self.classes.clone()
    }

    /// Resolve names to classes.
    ///
    /// `"all"` expands to every registered class. Each class appears once,
    /// at the position of its first mention. Any unknown name fails the
    /// whole resolution.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> WeighResult<Vec<WeigherClass>> {
        let mut resolved: Vec<WeigherClass> = Vec::new();

        for name in names {
            let name = name.as_ref().trim();
            let found = if name == ALL_WEIGHERS {
                self.all_available()
            } else {
                vec![self.get(name).ok_or_else(|| WeighError::UnknownWeigher(name.to_string()))?]
            };

            for class in found {
                if !resolved.iter().any(|c| c.name == class.name) {
                    resolved.push(class);
                }
            }
        }

        Ok(resolved)
    }
}
