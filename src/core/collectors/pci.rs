use tokio::process::Command;

use super::{error::CollectorError, traits::DataProducer, types::CollectorResult};
use crate::core::parse::{line_report, DeviceReportLine};
use crate::register_collector;

const LSPCI_COMMAND: &str = "lspci";

/// Collector for the PCI device listing.
///
/// Runs `lspci` and parses its one-device-per-line report. Lines that do
/// not match the expected shape are dropped rather than failing the whole
/// listing; an unrunnable or failing command is an error.
#[derive(Debug, Clone, Default)]
pub struct PciCollector;

impl PciCollector {
    pub fn new() -> Self {
        PciCollector
    }
}

#[cfg(target_os = "linux")]
#[async_trait::async_trait]
impl DataProducer for PciCollector {
    type Output = Vec<DeviceReportLine>;

    async fn produce(&self) -> CollectorResult<Self::Output> {
        let output = Command::new(LSPCI_COMMAND)
            .output()
            .await
            .map_err(|source| CollectorError::CommandExecution {
                command: LSPCI_COMMAND.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CollectorError::CommandExecution {
                command: LSPCI_COMMAND.to_string(),
                source: std::io::Error::other(format!(
                    "exit status {}: {}",
                    output.status,
                    stderr.trim()
                )),
            });
        }

        let report = String::from_utf8_lossy(&output.stdout);
        Ok(line_report::parse(&report))
    }
}

#[cfg(not(target_os = "linux"))]
#[async_trait::async_trait]
impl DataProducer for PciCollector {
    type Output = Vec<DeviceReportLine>;

    async fn produce(&self) -> CollectorResult<Self::Output> {
        Err(CollectorError::Unsupported(
            "pci collector requires the lspci utility".to_string(),
        ))
    }
}

register_collector!(PciCollector, "pci");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_list_serializes() {
        let devices = line_report::parse(
            "00:00.0 Host bridge: Intel Corporation Device 9b61 (rev 0c)\n",
        );

        let json = serde_json::to_value(&devices).unwrap();
        assert_eq!(json[0]["id"], "00:00.0");
        assert_eq!(json[0]["type"], "Host bridge");
        assert_eq!(json[0]["rev"], "0c");
    }

    #[test]
    fn malformed_lines_do_not_fail_the_listing() {
        let report = "\
00:02.0 VGA compatible controller: Intel Corporation UHD Graphics (rev 02)
garbage line without structure
00:14.0 USB controller: Intel Corporation Controller (rev 11)
";
        let devices = line_report::parse(report);
        assert_eq!(devices.len(), 2);
    }
}
