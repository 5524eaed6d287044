use serde::{Deserialize, Serialize};

use super::{error::CollectorError, traits::DataProducer, types::CollectorResult};
use crate::register_collector;

/// Static identity of the running kernel and host.
///
/// Everything here is fixed between boots, so this collector is the
/// "static" end of the inventory: one read per snapshot, no deltas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemIdentity {
    /// Machine architecture the binary was compiled for (e.g. "x86_64").
    pub architecture: String,
    /// Kernel type, e.g. "Linux".
    pub os_type: String,
    /// Host name as the kernel reports it.
    pub hostname: String,
    /// Kernel release, e.g. "6.8.0-45-generic".
    pub kernel_release: String,
    /// Full kernel version banner including build date.
    pub kernel_version: String,
}

/// Collector for kernel/OS identity from `/proc/sys/kernel`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SystemCollector;

impl SystemCollector {
    pub fn new() -> Self {
        SystemCollector
    }
}

#[cfg(target_os = "linux")]
async fn read_kernel_field(name: &str) -> CollectorResult<String> {
    let path = format!("/proc/sys/kernel/{}", name);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| CollectorError::FileRead { path, source })?;
    Ok(content.trim().to_string())
}

#[cfg(target_os = "linux")]
#[async_trait::async_trait]
impl DataProducer for SystemCollector {
    type Output = SystemIdentity;

    async fn produce(&self) -> CollectorResult<Self::Output> {
        Ok(SystemIdentity {
            architecture: std::env::consts::ARCH.to_string(),
            os_type: read_kernel_field("ostype").await?,
            hostname: read_kernel_field("hostname").await?,
            kernel_release: read_kernel_field("osrelease").await?,
            kernel_version: read_kernel_field("version").await?,
        })
    }
}

#[cfg(not(target_os = "linux"))]
#[async_trait::async_trait]
impl DataProducer for SystemCollector {
    type Output = SystemIdentity;

    async fn produce(&self) -> CollectorResult<Self::Output> {
        Err(CollectorError::Unsupported(
            "system identity collector requires a Linux kernel".to_string(),
        ))
    }
}

register_collector!(SystemCollector, "system");

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SystemIdentity {
        SystemIdentity {
            architecture: "x86_64".into(),
            os_type: "Linux".into(),
            hostname: "build-07".into(),
            kernel_release: "6.8.0-45-generic".into(),
            kernel_version: "#45-Ubuntu SMP Fri Aug 30 12:02:04 UTC 2024".into(),
        }
    }

    #[test]
    fn identity_serializes_all_fields() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["architecture"], "x86_64");
        assert_eq!(json["os_type"], "Linux");
        assert_eq!(json["hostname"], "build-07");
        assert_eq!(json["kernel_release"], "6.8.0-45-generic");
    }

    #[test]
    fn identity_round_trips() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: SystemIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hostname, "build-07");
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn produces_identity_on_linux() {
        let identity = SystemCollector::new().produce().await.unwrap();

        assert_eq!(identity.os_type, "Linux");
        assert!(!identity.hostname.is_empty());
        assert!(!identity.kernel_release.is_empty());
    }
}
