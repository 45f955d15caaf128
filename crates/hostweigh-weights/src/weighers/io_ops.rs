//! In-flight I/O operations weigher.

use hostweigh_core::{HostState, WeighConfig};

use crate::error::WeighResult;
use crate::weigher::{WeighProperties, Weigher};

/// Scores hosts by their number of in-flight I/O operations.
///
/// The default multiplier is negative, so idle hosts rank first.
#[derive(Debug, Clone)]
pub struct IoOpsWeigher {
    multiplier: f64,
}

impl IoOpsWeigher {
    pub const NAME: &'static str = "IoOpsWeigher";

    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }

    pub fn from_config(config: &WeighConfig) -> Box<dyn Weigher> {
        Box::new(Self::new(config.io_ops.weight_multiplier))
    }
}

impl Weigher for IoOpsWeigher {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn raw_score(&self, host: &HostState, _props: &WeighProperties) -> WeighResult<f64> {
        Ok(host.num_io_ops() as f64)
    }

    fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weighers::tests_common::weigh;
    use hostweigh_core::IO_WORKLOAD_STAT;

    fn host(name: &str, io_ops: &str) -> HostState {
        HostState::new(name, name, 1024).with_stat(IO_WORKLOAD_STAT, io_ops)
    }

    #[test]
    fn idle_host_scores_highest_by_default() {
        let hosts = vec![host("host1", "1"), host("host2", "2"), host("host3", "0"), host("host4", "4")];
        let weights = weigh(IoOpsWeigher::from_config(&WeighConfig::default()).as_ref(), &hosts);

        assert_eq!(weights[2], 0.0);
        assert_eq!(weights[3], -1.0);
        assert!(weights.iter().all(|w| *w <= weights[2]));
    }

    #[test]
    fn zero_multiplier_disables() {
        let hosts = vec![host("host1", "1"), host("host2", "9")];
        let weights = weigh(&IoOpsWeigher::new(0.0), &hosts);
        assert_eq!(weights, vec![0.0, 0.0]);
    }

    #[test]
    fn missing_stats_count_as_idle() {
        let hosts = vec![HostState::new("bare", "bare", 0), host("busy", "3"), host("odd", "n/a")];
        let weights = weigh(&IoOpsWeigher::new(1.0), &hosts);
        assert_eq!(weights, vec![0.0, 1.0, 0.0]);
    }
}
