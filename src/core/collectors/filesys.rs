use serde::{Deserialize, Serialize};

use super::{error::CollectorError, traits::DataProducer, types::CollectorResult};
use crate::register_collector;

const MTAB_PATH: &str = "/etc/mtab";
const MOUNTS_PATH: &str = "/proc/mounts";

/// Usage of one mounted block-device filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MountUsage {
    /// Device node, e.g. "/dev/nvme0n1p2".
    pub device: String,
    /// Mount point the statistics were queried for.
    pub mount_point: String,
    /// Fundamental block size reported by statvfs.
    pub block_size: u64,
    /// Total capacity in bytes (block size times total blocks).
    pub total_bytes: u64,
    /// Free capacity in bytes (block size times free blocks).
    pub free_bytes: u64,
}

/// Collector for mounted-filesystem usage.
///
/// Reads the mount table, keeps rows whose device field contains `/dev/`
/// (real block devices rather than pseudo-filesystems), and queries
/// statvfs for each mount point. The table is read per call; no handle
/// survives between snapshots.
#[derive(Debug, Clone, Default)]
pub struct FilesystemCollector;

impl FilesystemCollector {
    pub fn new() -> Self {
        FilesystemCollector
    }
}

/// statvfs(3) for one mount point. Kept separate so the mount-table walk
/// stays readable; failures carry the syscall name for the snapshot log.
#[cfg(target_os = "linux")]
fn statvfs(mount_point: &str) -> CollectorResult<libc::statvfs> {
    let c_path =
        std::ffi::CString::new(mount_point.as_bytes()).map_err(|_| CollectorError::SystemCall {
            syscall: "statvfs".to_string(),
            reason: format!("mount point contains NUL: {}", mount_point),
        })?;

    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if result != 0 {
        return Err(CollectorError::SystemCall {
            syscall: "statvfs".to_string(),
            reason: format!(
                "{}: {}",
                mount_point,
                std::io::Error::last_os_error()
            ),
        });
    }
    Ok(stat)
}

#[cfg(target_os = "linux")]
#[async_trait::async_trait]
impl DataProducer for FilesystemCollector {
    type Output = Vec<MountUsage>;

    async fn produce(&self) -> CollectorResult<Self::Output> {
        // /etc/mtab is a symlink to /proc/self/mounts on current systems;
        // fall back to /proc/mounts where the link is missing.
        let content = match tokio::fs::read_to_string(MTAB_PATH).await {
            Ok(content) => content,
            Err(_) => tokio::fs::read_to_string(MOUNTS_PATH).await.map_err(|source| {
                CollectorError::FileRead {
                    path: MOUNTS_PATH.to_string(),
                    source,
                }
            })?,
        };

        let mut mounts = Vec::new();
        for line in content.lines() {
            let mut fields = line.split_whitespace();
            let (device, mount_point) = match (fields.next(), fields.next()) {
                (Some(device), Some(mount_point)) => (device, mount_point),
                _ => continue,
            };
            if !device.contains("/dev/") {
                continue;
            }

            // A single unreadable mount point (stale NFS, tight
            // permissions) should not hide the rest of the table.
            let stat = match statvfs(mount_point) {
                Ok(stat) => stat,
                Err(e) => {
                    tracing::trace!("skipping {}: {}", mount_point, e);
                    continue;
                }
            };

            let block_size = stat.f_frsize as u64;
            mounts.push(MountUsage {
                device: device.to_string(),
                mount_point: mount_point.to_string(),
                block_size,
                total_bytes: (stat.f_blocks as u64).wrapping_mul(block_size),
                free_bytes: (stat.f_bfree as u64).wrapping_mul(block_size),
            });
        }

        Ok(mounts)
    }
}

#[cfg(not(target_os = "linux"))]
#[async_trait::async_trait]
impl DataProducer for FilesystemCollector {
    type Output = Vec<MountUsage>;

    async fn produce(&self) -> CollectorResult<Self::Output> {
        Err(CollectorError::Unsupported(
            "filesystem collector requires a Linux mount table".to_string(),
        ))
    }
}

register_collector!(FilesystemCollector, "filesystem");
