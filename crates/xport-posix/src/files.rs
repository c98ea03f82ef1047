//! 文本配置文件写盘。
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};
use xport_core::state::ItemOutcome;

/// 以截断方式写入文本文件（覆盖原有内容）。
///
/// 异常处理：
/// - 父目录不存在、无权限、磁盘满等返回错误
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("写入文件失败: {}", path.display()))
}

/// 依次写入多个文本文件，单个失败只记录日志。
pub fn emit_all(files: &[(&Path, String)]) -> Vec<ItemOutcome> {
    files
        .iter()
        .map(|(path, content)| {
            let target = ItemOutcome::path(path);
            match write_text(path, content) {
                Ok(()) => {
                    debug!("已写入: {}", path.display());
                    ItemOutcome::ok(target)
                }
                Err(e) => {
                    warn!("写入配置文件失败（继续）: {e:#}");
                    ItemOutcome::failed(target, format!("{e:#}"))
                }
            }
        })
        .collect()
}
