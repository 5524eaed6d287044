use serde::{Deserialize, Serialize};

use super::{error::CollectorError, traits::DataProducer, types::CollectorResult};
use crate::register_collector;

/// How long the system has been up, from `/proc/uptime`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UptimeInfo {
    /// Seconds since boot, with fractional part.
    pub uptime_seconds: f64,
    /// Idle seconds accumulated across all CPUs. Zero when the second
    /// field is missing from a truncated report.
    pub idle_seconds: f64,
    /// Unix timestamp of boot, derived as now minus uptime.
    pub boot_time_seconds: i64,
}

/// Collector for system uptime.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UptimeCollector;

impl UptimeCollector {
    pub fn new() -> Self {
        UptimeCollector
    }
}

#[cfg(target_os = "linux")]
#[async_trait::async_trait]
impl DataProducer for UptimeCollector {
    type Output = UptimeInfo;

    /// `/proc/uptime` holds two whitespace-separated floats: uptime and
    /// aggregate idle time. Only the first is required; a report missing
    /// the idle field still produces a result.
    async fn produce(&self) -> CollectorResult<Self::Output> {
        let content = tokio::fs::read_to_string("/proc/uptime")
            .await
            .map_err(|source| CollectorError::FileRead {
                path: "/proc/uptime".to_string(),
                source,
            })?;

        let mut fields = content.split_whitespace();

        let first = fields.next().ok_or_else(|| CollectorError::InvalidFormat {
            location: "/proc/uptime".to_string(),
            reason: "expected at least 1 field".to_string(),
        })?;
        let uptime_seconds = first
            .parse::<f64>()
            .map_err(|_| CollectorError::ParseError {
                metric: "uptime_seconds".to_string(),
                location: "/proc/uptime".to_string(),
                reason: format!("invalid value: {}", first),
            })?;

        let idle_seconds = fields
            .next()
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0);

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|_| CollectorError::SystemCall {
                syscall: "clock_gettime".to_string(),
                reason: "system clock before Unix epoch".to_string(),
            })?
            .as_secs() as i64;

        Ok(UptimeInfo {
            uptime_seconds,
            idle_seconds,
            boot_time_seconds: now - uptime_seconds as i64,
        })
    }
}

#[cfg(not(target_os = "linux"))]
#[async_trait::async_trait]
impl DataProducer for UptimeCollector {
    type Output = UptimeInfo;

    async fn produce(&self) -> CollectorResult<Self::Output> {
        Err(CollectorError::Unsupported(
            "uptime collector requires /proc/uptime".to_string(),
        ))
    }
}

register_collector!(UptimeCollector, "uptime");
