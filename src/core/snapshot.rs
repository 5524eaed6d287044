//! One-shot inventory snapshot.
//!
//! The `Snapshot` runner takes the configured collector names, runs each
//! one concurrently against the live system, and assembles their outputs
//! into a single JSON object keyed by collector name. A failing collector
//! is logged and left out of the report; it never aborts the snapshot.

use std::sync::Arc;

use tracing::{debug, error};

use super::collectors::registry::Collectors;
use crate::config::inventory::InventoryConfig;

/// Result of one snapshot run: the assembled report plus the names of
/// collectors that failed, in the order they were configured.
pub struct SnapshotOutcome {
    pub report: serde_json::Map<String, serde_json::Value>,
    pub failed: Vec<String>,
}

impl SnapshotOutcome {
    /// True when every enabled collector failed and the report is empty.
    pub fn is_total_failure(&self) -> bool {
        self.report.is_empty() && !self.failed.is_empty()
    }
}

/// Runner that produces one inventory snapshot and returns.
pub struct Snapshot {
    config: Arc<InventoryConfig>,
}

impl Snapshot {
    pub fn new(config: Arc<InventoryConfig>) -> Self {
        Self { config }
    }

    /// Collects from every enabled collector concurrently.
    ///
    /// Collector tasks are spawned in configuration order and their
    /// results inserted in that same order, so the report layout is
    /// stable across runs regardless of which source answers first.
    pub async fn collect(&self) -> SnapshotOutcome {
        let tasks: Vec<_> = self
            .config
            .collectors
            .enabled
            .iter()
            .cloned()
            .map(|name| {
                tokio::spawn(async move {
                    let collector = match Collectors::get(&name) {
                        Ok(c) => c,
                        Err(e) => {
                            error!("Collector '{}' not found: {}", name, e);
                            return (name, None);
                        }
                    };

                    match collector.produce_dyn().await {
                        Ok(data) => {
                            debug!("Collected data from '{}'", name);
                            match serde_json::to_value(&*data) {
                                Ok(value) => (name, Some(value)),
                                Err(e) => {
                                    error!("Failed to serialize '{}' output: {}", name, e);
                                    (name, None)
                                }
                            }
                        }
                        Err(e) => {
                            error!("Failed to collect from '{}': {}", name, e);
                            (name, None)
                        }
                    }
                })
            })
            .collect();

        let mut report = serde_json::Map::new();
        let mut failed = Vec::new();
        for task in tasks {
            match task.await {
                Ok((name, Some(value))) => {
                    report.insert(name, value);
                }
                Ok((name, None)) => failed.push(name),
                Err(e) => error!("Collector task panicked: {}", e),
            }
        }

        SnapshotOutcome { report, failed }
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use tracing_test::traced_test;

    use super::*;
    use crate::config::inventory::{CollectorsConfig, InventoryConfig};
    use crate::core::collectors::{
        error::CollectorError, traits::DataProducer, types::CollectorResult,
    };
    use crate::register_collector;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct DummyOutput {
        value: u32,
    }

    #[derive(Debug, Clone, Default, Serialize)]
    struct DummyCollector;

    #[async_trait::async_trait]
    impl DataProducer for DummyCollector {
        type Output = DummyOutput;

        async fn produce(&self) -> CollectorResult<Self::Output> {
            Ok(DummyOutput { value: 42 })
        }
    }

    #[derive(Debug, Clone, Default, Serialize)]
    struct BrokenCollector;

    #[async_trait::async_trait]
    impl DataProducer for BrokenCollector {
        type Output = DummyOutput;

        async fn produce(&self) -> CollectorResult<Self::Output> {
            Err(CollectorError::InvalidFormat {
                location: "/proc/broken".to_string(),
                reason: "always fails".to_string(),
            })
        }
    }

    register_collector!(DummyCollector, "dummy");
    register_collector!(BrokenCollector, "broken");

    fn config_for(names: &[&str]) -> Arc<InventoryConfig> {
        Arc::new(InventoryConfig {
            collectors: CollectorsConfig {
                enabled: names.iter().map(|n| n.to_string()).collect(),
            },
            ..Default::default()
        })
    }

    #[tokio::test]
    #[traced_test]
    async fn snapshot_assembles_report_by_name() {
        let snapshot = Snapshot::new(config_for(&["dummy"]));

        let outcome = snapshot.collect().await;

        assert!(outcome.failed.is_empty());
        assert_eq!(outcome.report["dummy"]["value"], 42);
    }

    #[tokio::test]
    #[traced_test]
    async fn failing_collector_is_logged_and_skipped() {
        let snapshot = Snapshot::new(config_for(&["broken", "dummy"]));

        let outcome = snapshot.collect().await;

        assert_eq!(outcome.failed, vec!["broken".to_string()]);
        assert!(!outcome.report.contains_key("broken"));
        assert_eq!(outcome.report["dummy"]["value"], 42);
        assert!(logs_contain("Failed to collect from 'broken'"));
    }

    #[tokio::test]
    #[traced_test]
    async fn unknown_collector_is_a_failure_not_a_panic() {
        let snapshot = Snapshot::new(config_for(&["no_such_collector_123"]));

        let outcome = snapshot.collect().await;

        assert!(outcome.is_total_failure());
        assert!(logs_contain("Collector 'no_such_collector_123' not found"));
    }

    #[tokio::test]
    #[traced_test]
    async fn all_failed_is_total_failure() {
        let snapshot = Snapshot::new(config_for(&["broken"]));

        let outcome = snapshot.collect().await;

        assert!(outcome.is_total_failure());
    }
}
