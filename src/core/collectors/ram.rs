use super::{error::CollectorError, traits::DataProducer, types::CollectorResult};
use crate::core::parse::{kv_block, FlatRecord};
use crate::register_collector;

/// Collector for `/proc/meminfo`.
///
/// The full report is kept as a generic record instead of a fixed struct:
/// meminfo's field set varies with kernel version and configuration, and
/// downstream profiling tools want whatever the kernel offers. All sizes
/// are kilobyte integers with the unit token already stripped.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollector;

impl MemoryCollector {
    pub fn new() -> Self {
        MemoryCollector
    }
}

#[cfg(target_os = "linux")]
#[async_trait::async_trait]
impl DataProducer for MemoryCollector {
    type Output = FlatRecord;

    /// A colon-less line anywhere in the report is a format error for the
    /// whole memory source; meminfo is homogeneous and a partial record
    /// would be misleading.
    async fn produce(&self) -> CollectorResult<Self::Output> {
        let content = tokio::fs::read_to_string("/proc/meminfo")
            .await
            .map_err(|source| CollectorError::FileRead {
                path: "/proc/meminfo".to_string(),
                source,
            })?;

        kv_block::parse(&content).map_err(|e| CollectorError::from_parse("/proc/meminfo", e))
    }
}

#[cfg(not(target_os = "linux"))]
#[async_trait::async_trait]
impl DataProducer for MemoryCollector {
    type Output = FlatRecord;

    async fn produce(&self) -> CollectorResult<Self::Output> {
        Err(CollectorError::Unsupported(
            "memory collector requires /proc/meminfo".to_string(),
        ))
    }
}

register_collector!(MemoryCollector, "memory");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse::Value;

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn produces_core_meminfo_fields_on_linux() {
        let record = MemoryCollector::new().produce().await.unwrap();

        let total = record["memtotal"].as_integer().unwrap();
        let free = record["memfree"].as_integer().unwrap();
        assert!(total > 0);
        assert!(free <= total);
    }

    #[test]
    fn record_serializes_as_flat_mapping() {
        let mut record = FlatRecord::new();
        record.insert("memtotal".into(), Value::Integer(16384));
        record.insert("memfree".into(), Value::Integer(8192));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["memtotal"], 16384);
        assert_eq!(json["memfree"], 8192);
    }
}
