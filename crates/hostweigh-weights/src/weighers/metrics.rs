//! Metrics weigher.
//!
//! Combines operator-chosen host metrics into one raw score:
//!
//! ```text
//! raw = Σ metric[name] * ratio   for (name, ratio) in weight_setting
//! ```
//!
//! `weight_setting` is an ordered list of `name=ratio` strings. Entries
//! that do not parse are dropped with a warning rather than rejected, so
//! older config files keep loading.

use hostweigh_core::{HostState, MetricsConfig, WeighConfig};
use tracing::warn;

use crate::error::{WeighError, WeighResult};
use crate::weigher::{WeighProperties, Weigher};

/// Parse `name=ratio` entries into `(name, ratio)` pairs.
///
/// Splits on the first `=`. An entry is dropped when it has no `=`, when
/// the trimmed name is empty, or when the ratio is not a float. Order
/// and repeated names are kept.
pub fn parse_setting<S: AsRef<str>>(entries: &[S]) -> Vec<(String, f64)> {
    let mut setting = Vec::with_capacity(entries.len());

    for entry in entries {
        let entry = entry.as_ref();
        let parsed = entry.split_once('=').and_then(|(name, ratio)| {
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let ratio = ratio.trim().parse::<f64>().ok()?;
            Some((name.to_string(), ratio))
        });

        match parsed {
            Some(pair) => setting.push(pair),
            None => warn!(entry, "ignoring invalid metrics.weight_setting entry"),
        }
    }

    setting
}

/// Scores hosts by a weighted sum of named metrics.
#[derive(Debug, Clone)]
pub struct MetricsWeigher {
    setting: Vec<(String, f64)>,
    multiplier: f64,
    required: bool,
    weight_of_unavailable: Option<f64>,
}

impl MetricsWeigher {
    pub const NAME: &'static str = "MetricsWeigher";

    pub fn new(config: &MetricsConfig) -> Self {
        Self {
            setting: parse_setting(&config.weight_setting),
            multiplier: config.weight_multiplier,
            required: config.required,
            weight_of_unavailable: config.weight_of_unavailable,
        }
    }

    pub fn from_config(config: &WeighConfig) -> Box<dyn Weigher> {
        Box::new(Self::new(&config.metrics))
    }

    /// Parsed `(name, ratio)` pairs, in configuration order.
    pub fn setting(&self) -> &[(String, f64)] {
        &self.setting
    }
}

impl Weigher for MetricsWeigher {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn raw_score(&self, host: &HostState, _props: &WeighProperties) -> WeighResult<f64> {
        let mut value = 0.0;

        for (name, ratio) in &self.setting {
            match host.metric(name) {
                Some(metric) => value += metric * ratio,
                None if self.required => {
                    return Err(WeighError::MetricNotFound {
                        host: host.host.clone(),
                        node: host.nodename.clone(),
                        name: name.clone(),
                    });
                }
                None => {
                    // A zero product means this metric cannot move the
                    // host, so its absence is not penalized.
                    if let Some(unavailable) = self.weight_of_unavailable {
                        if ratio * self.multiplier != 0.0 {
                            return Ok(unavailable);
                        }
                    }
                }
            }
        }

        Ok(value)
    }

    fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weighers::tests_common::weigh;

    fn config(setting: &[&str]) -> MetricsConfig {
        MetricsConfig {
            weight_setting: setting.iter().map(|s| s.to_string()).collect(),
            ..MetricsConfig::default()
        }
    }

    fn host(name: &str, metrics: &[(&str, f64)]) -> HostState {
        metrics
            .iter()
            .fold(HostState::new(name, name, 1024), |h, (k, v)| h.with_metric(k, *v))
    }

    #[test]
    fn test_parse_setting() {
        assert_eq!(parse_setting(&["foo=1"]), vec![("foo".to_string(), 1.0)]);
        assert_eq!(
            parse_setting(&["foo=1", "bar=-2.1"]),
            vec![("foo".to_string(), 1.0), ("bar".to_string(), -2.1)]
        );
        assert_eq!(parse_setting(&["foo=a1", "bar=-2.1"]), vec![("bar".to_string(), -2.1)]);
        assert_eq!(parse_setting(&["foo", "bar=-2.1"]), vec![("bar".to_string(), -2.1)]);
        assert_eq!(parse_setting(&["=5", "bar=-2.1"]), vec![("bar".to_string(), -2.1)]);
    }

    #[test]
    fn parse_setting_trims_and_keeps_repeats() {
        assert_eq!(
            parse_setting(&[" foo = 0.5 ", "foo=2", "bar = 2.0t", "  =1", "baz="]),
            vec![("foo".to_string(), 0.5), ("foo".to_string(), 2.0)]
        );
    }

    #[test]
    fn parse_setting_splits_on_first_equals() {
        assert!(parse_setting(&["foo=1=2"]).is_empty());
    }

    #[test]
    fn setting_parsed_at_construction() {
        let weigher = MetricsWeigher::new(&config(&["foo=1", "bar"]));
        assert_eq!(weigher.setting(), &[("foo".to_string(), 1.0)]);
    }

    #[test]
    fn raw_score_is_weighted_sum() {
        let weigher = MetricsWeigher::new(&config(&["foo=0.5", "bar=-2"]));
        let h = host("host1", &[("foo", 10.0), ("bar", 1.0)]);
        assert_eq!(weigher.raw_score(&h, &WeighProperties::new()).unwrap(), 3.0);
    }

    #[test]
    fn empty_setting_scores_zero() {
        let weigher = MetricsWeigher::new(&config(&[]));
        let hosts = vec![host("host1", &[]), host("host2", &[("foo", 1.0)])];
        assert_eq!(weigh(&weigher, &hosts), vec![0.0, 0.0]);
    }

    #[test]
    fn missing_required_metric_fails() {
        let weigher = MetricsWeigher::new(&config(&["foo=1", "zot=2"]));
        let h = host("host1", &[("foo", 1.0)]);

        let err = weigher.raw_score(&h, &WeighProperties::new()).unwrap_err();
        match err {
            WeighError::MetricNotFound { host, node, name } => {
                assert_eq!(host, "host1");
                assert_eq!(node, "host1");
                assert_eq!(name, "zot");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn host_without_metrics_map_fails_when_required() {
        let weigher = MetricsWeigher::new(&config(&["foo=1"]));
        let h = HostState::new("bare", "bare", 0);
        assert!(weigher.raw_score(&h, &WeighProperties::new()).is_err());
    }

    #[test]
    fn missing_optional_metric_contributes_zero() {
        let mut cfg = config(&["foo=1", "zot=2"]);
        cfg.required = false;
        let weigher = MetricsWeigher::new(&cfg);

        let h = host("host1", &[("foo", 3.0)]);
        assert_eq!(weigher.raw_score(&h, &WeighProperties::new()).unwrap(), 3.0);

        let bare = HostState::new("bare", "bare", 0);
        assert_eq!(weigher.raw_score(&bare, &WeighProperties::new()).unwrap(), 0.0);
    }

    #[test]
    fn weight_of_unavailable_replaces_score() {
        let mut cfg = config(&["foo=1", "zot=2"]);
        cfg.required = false;
        cfg.weight_of_unavailable = Some(-10000.0);
        let weigher = MetricsWeigher::new(&cfg);

        let h = host("host1", &[("foo", 3.0)]);
        assert_eq!(weigher.raw_score(&h, &WeighProperties::new()).unwrap(), -10000.0);
    }

    #[test]
    fn weight_of_unavailable_ignored_for_zero_ratio() {
        let mut cfg = config(&["foo=1", "zot=0"]);
        cfg.required = false;
        cfg.weight_of_unavailable = Some(-10000.0);
        let weigher = MetricsWeigher::new(&cfg);

        let h = host("host1", &[("foo", 3.0)]);
        assert_eq!(weigher.raw_score(&h, &WeighProperties::new()).unwrap(), 3.0);
    }

    #[test]
    fn negative_ratio_inverts_ranking() {
        let weigher = MetricsWeigher::new(&config(&["foo=-1"]));
        let hosts = vec![
            host("host1", &[("foo", 512.0)]),
            host("host2", &[("foo", 1024.0)]),
            host("host3", &[("foo", 3072.0)]),
            host("host4", &[("foo", 8192.0)]),
        ];
        let weights = weigh(&weigher, &hosts);
        assert_eq!(weights[0], 1.0);
        assert_eq!(weights[3], 0.0);
    }
}
