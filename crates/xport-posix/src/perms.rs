//! 权限设置（chmod）。
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use xport_core::state::ItemOutcome;

/// 将 `path` 的权限位设置为 `mode`。
///
/// 异常处理：
/// - 文件不存在或无权修改时返回错误
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    std::fs::set_permissions(path, Permissions::from_mode(mode))
        .with_context(|| format!("设置权限失败: {} ({:o})", path.display(), mode))
}

/// 对清单中存在的文件逐个设置权限。
///
/// 返回值：
/// - 每个已存在文件一条 [`ItemOutcome`]；不存在的文件直接跳过，不产生记录
///
/// 说明：
/// - 单个文件失败只记录日志，不影响其余文件
pub fn normalize(paths: &[PathBuf], mode: u32) -> Vec<ItemOutcome> {
    let mut outcomes = Vec::new();
    for path in paths {
        if !path.exists() {
            debug!("二进制不存在，跳过: {}", path.display());
            continue;
        }
        let target = ItemOutcome::path(path);
        match set_mode(path, mode) {
            Ok(()) => {
                debug!("已设置可执行权限: {}", path.display());
                outcomes.push(ItemOutcome::ok(target));
            }
            Err(e) => {
                warn!("设置可执行权限失败（继续）: {e:#}");
                outcomes.push(ItemOutcome::failed(target, format!("{e:#}")));
            }
        }
    }
    outcomes
}
