use tokio::process::Command;

use super::{error::CollectorError, traits::DataProducer, types::CollectorResult};
use crate::core::parse::{nested_report, NestedReport};
use crate::register_collector;

const XDPYINFO_COMMAND: &str = "xdpyinfo";

/// Collector for the X display server report.
///
/// Runs `xdpyinfo` and parses the indentation-structured report into
/// display-wide fields plus one sub-record per screen. No X server (or no
/// DISPLAY in the environment) surfaces as a command error, which the
/// snapshot runner logs and skips.
#[derive(Debug, Clone, Default)]
pub struct XDisplayCollector;

impl XDisplayCollector {
    pub fn new() -> Self {
        XDisplayCollector
    }
}

#[cfg(target_os = "linux")]
#[async_trait::async_trait]
impl DataProducer for XDisplayCollector {
    type Output = NestedReport;

    async fn produce(&self) -> CollectorResult<Self::Output> {
        let output = Command::new(XDPYINFO_COMMAND)
            .output()
            .await
            .map_err(|source| CollectorError::CommandExecution {
                command: XDPYINFO_COMMAND.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CollectorError::CommandExecution {
                command: XDPYINFO_COMMAND.to_string(),
                source: std::io::Error::other(format!(
                    "exit status {}: {}",
                    output.status,
                    stderr.trim()
                )),
            });
        }

        let report = String::from_utf8_lossy(&output.stdout);
        Ok(nested_report::parse(&report))
    }
}

#[cfg(not(target_os = "linux"))]
#[async_trait::async_trait]
impl DataProducer for XDisplayCollector {
    type Output = NestedReport;

    async fn produce(&self) -> CollectorResult<Self::Output> {
        Err(CollectorError::Unsupported(
            "x display collector requires the xdpyinfo utility".to_string(),
        ))
    }
}

register_collector!(XDisplayCollector, "xdisplay");
