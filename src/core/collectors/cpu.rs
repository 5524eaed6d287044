use serde::{Deserialize, Serialize};

use super::{error::CollectorError, traits::DataProducer, types::CollectorResult};
use crate::core::parse::{record_group, FlatRecord};
use crate::register_collector;

/// The per-core field label whose occurrence count gives the number of
/// logical cores in the cpuinfo report. Matched against the raw text, tabs
/// included, before any normalization.
pub const CORE_SENTINEL: &str = "processor\t:";

const CPUINFO_PATH: &str = "/proc/cpuinfo";
const CPUS_DIR: &str = "/sys/devices/system/cpu";

/// CPU topology snapshot: one generic record per logical core, plus
/// optional per-core maximum frequencies when the kernel exposes
/// frequency scaling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuTopology {
    /// Number of logical cores (sentinel occurrence count).
    pub core_count: usize,
    /// One record per core, index matching the kernel's core index. The
    /// field set varies by architecture, so records stay generic.
    pub cores: Vec<FlatRecord>,
    /// Maximum frequency per core in megahertz; `None` when the cpufreq
    /// directory is absent (no frequency-scaling support).
    pub max_frequency_mhz: Option<Vec<f64>>,
}

/// Collector for `/proc/cpuinfo` and the cpufreq sysfs tree.
#[derive(Debug, Clone, Default)]
pub struct CpuCollector;

impl CpuCollector {
    pub fn new() -> Self {
        CpuCollector
    }
}

/// Frequency scaling is advertised by the presence of cpu0's cpufreq
/// directory; the per-core maximum is the raw sysfs value over 1024.
#[cfg(target_os = "linux")]
async fn read_max_frequencies(core_count: usize) -> CollectorResult<Option<Vec<f64>>> {
    let cpufreq_probe = format!("{}/cpu0/cpufreq", CPUS_DIR);
    if tokio::fs::metadata(&cpufreq_probe).await.is_err() {
        return Ok(None);
    }

    let mut frequencies = Vec::with_capacity(core_count);
    for core in 0..core_count {
        let path = format!("{}/cpu{}/cpufreq/cpuinfo_max_freq", CPUS_DIR, core);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| CollectorError::FileRead {
                path: path.clone(),
                source,
            })?;
        let khz = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| CollectorError::ParseError {
                metric: "cpuinfo_max_freq".to_string(),
                location: path,
                reason: format!("invalid value: {}", raw.trim()),
            })?;
        frequencies.push(khz / 1024.0);
    }
    Ok(Some(frequencies))
}

#[cfg(target_os = "linux")]
#[async_trait::async_trait]
impl DataProducer for CpuCollector {
    type Output = CpuTopology;

    async fn produce(&self) -> CollectorResult<Self::Output> {
        let content = tokio::fs::read_to_string(CPUINFO_PATH)
            .await
            .map_err(|source| CollectorError::FileRead {
                path: CPUINFO_PATH.to_string(),
                source,
            })?;

        let core_count = content.matches(CORE_SENTINEL).count();
        let cores = record_group::group(&content, core_count);
        let max_frequency_mhz = read_max_frequencies(core_count).await?;

        Ok(CpuTopology {
            core_count,
            cores,
            max_frequency_mhz,
        })
    }
}

#[cfg(not(target_os = "linux"))]
#[async_trait::async_trait]
impl DataProducer for CpuCollector {
    type Output = CpuTopology;

    async fn produce(&self) -> CollectorResult<Self::Output> {
        Err(CollectorError::Unsupported(
            "cpu collector requires /proc/cpuinfo".to_string(),
        ))
    }
}

register_collector!(CpuCollector, "cpu");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse::Value;

    const SAMPLE: &str = "\
processor\t: 0
vendor_id\t: GenuineIntel
model name\t: Example CPU @ 2.40GHz
cpu mhz\t\t: 2400.000

processor\t: 1
vendor_id\t: GenuineIntel
model name\t: Example CPU @ 2.40GHz
cpu mhz\t\t: 2400.000
";

    #[test]
    fn sentinel_count_matches_core_records() {
        let count = SAMPLE.matches(CORE_SENTINEL).count();
        assert_eq!(count, 2);

        let cores = record_group::group(SAMPLE, count);
        assert_eq!(cores.len(), 2);
        assert_eq!(cores[0]["processor"], Value::Integer(0));
        assert_eq!(cores[1]["processor"], Value::Integer(1));
    }

    #[test]
    fn core_index_matches_source_index() {
        let cores = record_group::group(SAMPLE, 2);
        for (index, core) in cores.iter().enumerate() {
            assert_eq!(core["processor"], Value::Integer(index as i64));
        }
    }

    #[test]
    fn topology_serializes() {
        let topology = CpuTopology {
            core_count: 1,
            cores: record_group::group("processor\t: 0\n", 1),
            max_frequency_mhz: Some(vec![3417.96875]),
        };

        let json = serde_json::to_value(&topology).unwrap();
        assert_eq!(json["core_count"], 1);
        assert_eq!(json["cores"][0]["processor"], 0);
        assert_eq!(json["max_frequency_mhz"][0], 3417.96875);
    }

    #[test]
    fn absent_cpufreq_serializes_as_null() {
        let topology = CpuTopology {
            core_count: 0,
            cores: Vec::new(),
            max_frequency_mhz: None,
        };
        let json = serde_json::to_value(&topology).unwrap();
        assert!(json["max_frequency_mhz"].is_null());
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn produces_at_least_one_core_on_linux() {
        let topology = CpuCollector::new().produce().await.unwrap();

        assert!(topology.core_count >= 1);
        assert_eq!(topology.cores.len(), topology.core_count);
        assert!(topology.cores[0].contains_key("processor"));
    }
}
