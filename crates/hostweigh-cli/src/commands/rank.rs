use std::path::Path;

use anyhow::Context;
use hostweigh_core::{ComputeNodeRecord, HostState, WeighConfig, compute_nodes_to_host_states};
use hostweigh_weights::{WeighProperties, WeighedHost, WeighedHostView, WeightHandler};
use tracing::info;

pub fn rank(hosts_path: &Path, config_path: Option<&Path>, format: &str) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => WeighConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WeighConfig::default(),
    };
    let hosts = load_hosts(hosts_path)?;
    info!(hosts = hosts.len(), weighers = ?config.weighers, "weighing hosts");

    let handler = WeightHandler::with_builtin(config);
    let weighed = handler.rank(&hosts, &WeighProperties::new())?;

    println!("{}", render(&weighed, format)?);
    Ok(())
}

fn load_hosts(path: &Path) -> anyhow::Result<Vec<HostState>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading hosts {}", path.display()))?;
    let records: Vec<ComputeNodeRecord> = serde_json::from_str(&content)
        .with_context(|| format!("parsing hosts {}", path.display()))?;
    Ok(compute_nodes_to_host_states(&records))
}

fn render(weighed: &[WeighedHost<'_>], format: &str) -> anyhow::Result<String> {
    match format {
        "json" => {
            let views: Vec<WeighedHostView> = weighed.iter().map(|w| w.to_dict()).collect();
            Ok(serde_json::to_string_pretty(&views)?)
        }
        _ => {
            let mut out = format!("{:<4} {:<24} {:>10}", "RANK", "HOST", "WEIGHT");
            for (i, w) in weighed.iter().enumerate() {
                out.push_str(&format!("\n{:<4} {:<24} {:>10.4}", i + 1, w.host(), w.weight));
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HOSTS_JSON: &str = r#"[
        {"id": 1, "service": {"host": "host1"}, "free_ram_mb": 512, "stats": "{\"io_workload\": \"1\"}",
         "metrics": "[{\"name\": \"foo\", \"value\": 512}]"},
        {"id": 2, "service": {"host": "host2"}, "free_ram_mb": 8192, "stats": "{\"io_workload\": \"0\"}"},
        {"id": 5, "service": null, "free_ram_mb": 1024}
    ]"#;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_hosts_and_skips_broken_records() {
        let file = write_temp(HOSTS_JSON);
        let hosts = load_hosts(file.path()).unwrap();

        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0].host, "host1");
        assert_eq!(hosts[0].metric("foo"), Some(512.0));
        assert_eq!(hosts[1].num_io_ops(), 0);
    }

    #[test]
    fn renders_json_views() {
        let hosts = vec![HostState::new("host2", "n2", 0), HostState::new("host1", "n1", 0)];
        let weighed = vec![WeighedHost::new(&hosts[0], 2.0), WeighedHost::new(&hosts[1], 0.0)];

        let out = render(&weighed, "json").unwrap();
        let views: Vec<WeighedHostView> = serde_json::from_str(&out).unwrap();
        assert_eq!(views[0].host, "host2");
        assert_eq!(views[0].weight, 2.0);
        assert_eq!(views[1].host, "host1");
    }

    #[test]
    fn renders_text_table() {
        let hosts = vec![HostState::new("host2", "n2", 0)];
        let weighed = vec![WeighedHost::new(&hosts[0], 1.5)];

        let out = render(&weighed, "text").unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[0].starts_with("RANK"));
        assert!(lines[1].contains("host2"));
        assert!(lines[1].ends_with("1.5000"));
    }

    #[test]
    fn rank_end_to_end() {
        let hosts = write_temp(HOSTS_JSON);
        let config = write_temp("weighers = [\"ram\", \"io_ops\"]\n");
        rank(hosts.path(), Some(config.path()), "json").unwrap();
    }

    #[test]
    fn rank_fails_on_missing_required_metric() {
        let hosts = write_temp(HOSTS_JSON);
        let config = write_temp("weighers = [\"metrics\"]\n[metrics]\nweight_setting = [\"foo=1\"]\n");

        let err = rank(hosts.path(), Some(config.path()), "text").unwrap_err();
        assert!(err.to_string().contains("metric foo not found"));
    }
}
