use serde::{Deserialize, Serialize};

use super::{error::CollectorError, traits::DataProducer, types::CollectorResult};
use crate::register_collector;

/// Load averages over the kernel's three sampling windows, plus the
/// scheduler's runnable/total process counts from the same report line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadAverage {
    pub one_minute: f64,
    pub five_minutes: f64,
    pub fifteen_minutes: f64,
    /// Currently runnable entities (the numerator of the fourth field).
    pub running_processes: u32,
    /// Total scheduling entities (the denominator of the fourth field).
    pub total_processes: u32,
}

/// Collector for `/proc/loadavg`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LoadAverageCollector;

impl LoadAverageCollector {
    pub fn new() -> Self {
        LoadAverageCollector
    }
}

#[cfg(target_os = "linux")]
fn parse_load(fields: &[&str], idx: usize) -> CollectorResult<f64> {
    fields[idx]
        .parse::<f64>()
        .map_err(|_| CollectorError::ParseError {
            metric: format!("load field {}", idx),
            location: "/proc/loadavg".to_string(),
            reason: format!("invalid value: {}", fields[idx]),
        })
}

#[cfg(target_os = "linux")]
#[async_trait::async_trait]
impl DataProducer for LoadAverageCollector {
    type Output = LoadAverage;

    /// Format: `1.23 1.45 1.67 1/234 12345`. The three leading floats are
    /// the load averages; the slash field carries process counts.
    async fn produce(&self) -> CollectorResult<Self::Output> {
        let content = tokio::fs::read_to_string("/proc/loadavg")
            .await
            .map_err(|source| CollectorError::FileRead {
                path: "/proc/loadavg".to_string(),
                source,
            })?;

        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(CollectorError::InvalidFormat {
                location: "/proc/loadavg".to_string(),
                reason: format!("expected at least 4 fields, got {}", fields.len()),
            });
        }

        let (running_processes, total_processes) = fields[3]
            .split_once('/')
            .and_then(|(run, total)| {
                Some((run.parse::<u32>().ok()?, total.parse::<u32>().ok()?))
            })
            .ok_or_else(|| CollectorError::InvalidFormat {
                location: "/proc/loadavg".to_string(),
                reason: "process field must be 'running/total'".to_string(),
            })?;

        Ok(LoadAverage {
            one_minute: parse_load(&fields, 0)?,
            five_minutes: parse_load(&fields, 1)?,
            fifteen_minutes: parse_load(&fields, 2)?,
            running_processes,
            total_processes,
        })
    }
}

#[cfg(not(target_os = "linux"))]
#[async_trait::async_trait]
impl DataProducer for LoadAverageCollector {
    type Output = LoadAverage;

    async fn produce(&self) -> CollectorResult<Self::Output> {
        Err(CollectorError::Unsupported(
            "load average collector requires /proc/loadavg".to_string(),
        ))
    }
}

register_collector!(LoadAverageCollector, "load_average");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_average_serializes() {
        let load = LoadAverage {
            one_minute: 2.34,
            five_minutes: 1.87,
            fifteen_minutes: 1.45,
            running_processes: 3,
            total_processes: 412,
        };

        let json = serde_json::to_value(&load).unwrap();
        assert_eq!(json["one_minute"], 2.34);
        assert_eq!(json["total_processes"], 412);
    }

    #[test]
    fn load_average_round_trips() {
        let json = r#"{
            "one_minute": 0.5,
            "five_minutes": 0.4,
            "fifteen_minutes": 0.3,
            "running_processes": 1,
            "total_processes": 200
        }"#;

        let load: LoadAverage = serde_json::from_str(json).unwrap();
        assert_eq!(load.one_minute, 0.5);
        assert_eq!(load.running_processes, 1);
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn produces_non_negative_loads_on_linux() {
        let load = LoadAverageCollector::new().produce().await.unwrap();
        assert!(load.one_minute >= 0.0);
        assert!(load.total_processes > 0);
    }
}
