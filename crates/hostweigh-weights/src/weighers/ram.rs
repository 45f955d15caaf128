//! Free-memory weigher.

use hostweigh_core::{HostState, WeighConfig};

use crate::error::WeighResult;
use crate::weigher::{WeighProperties, Weigher};

/// Scores hosts by free RAM.
///
/// With a positive multiplier hosts with more free memory win (spread);
/// a negative multiplier fills the fullest hosts first (stack).
#[derive(Debug, Clone)]
pub struct RamWeigher {
    multiplier: f64,
}

impl RamWeigher {
    pub const NAME: &'static str = "RAMWeigher";

    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }

    pub fn from_config(config: &WeighConfig) -> Box<dyn Weigher> {
        Box::new(Self::new(config.ram.weight_multiplier))
    }
}

impl Weigher for RamWeigher {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn raw_score(&self, host: &HostState, _props: &WeighProperties) -> WeighResult<f64> {
        Ok(host.free_ram_mb as f64)
    }

    fn multiplier(&self) -> f64 {
        self.multiplier
    }
}
