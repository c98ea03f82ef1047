//! 多命令二进制的符号链接农场。
//!
//! 实现策略：
//! - `bin/<命令名>` 一律指向同目录下的多命令二进制（相对链接，前缀目录整体搬迁后仍有效）
//! - 已存在的文件/链接先删除再创建，重复执行结果一致
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, warn};
use xport_core::state::ItemOutcome;

/// 在 `bin_dir` 下为每个命令创建指向 `multicall` 的相对符号链接。
///
/// 参数：
/// - `bin_dir`：链接所在目录
/// - `multicall`：多命令二进制文件名（同时作为链接目标）
/// - `commands`：命令名列表
///
/// 返回值：
/// - `Ok(outcomes)`：每个命令一条结果；单个命令失败不影响其余命令
///
/// 异常处理：
/// - 多命令二进制不存在时直接返回错误，且不创建任何链接
pub fn build_farm(bin_dir: &Path, multicall: &str, commands: &[&str]) -> Result<Vec<ItemOutcome>> {
    let binary = bin_dir.join(multicall);
    if !binary.exists() {
        return Err(anyhow!("多命令二进制不存在: {}", binary.display()));
    }

    let mut outcomes = Vec::with_capacity(commands.len());
    for name in commands {
        match relink(bin_dir, multicall, name) {
            Ok(()) => {
                debug!("已创建符号链接: {name} -> {multicall}");
                outcomes.push(ItemOutcome::ok(*name));
            }
            Err(e) => {
                warn!("创建符号链接失败（继续）: {e:#}");
                outcomes.push(ItemOutcome::failed(*name, format!("{e:#}")));
            }
        }
    }
    Ok(outcomes)
}

/// 删除 `bin_dir/name` 上已有的条目，再创建 `name -> target` 链接。
fn relink(bin_dir: &Path, target: &str, name: &str) -> Result<()> {
    let link = bin_dir.join(name);
    // 悬空链接 exists() 为 false，因此用 symlink_metadata 判断占位
    if std::fs::symlink_metadata(&link).is_ok() {
        let _ = std::fs::remove_file(&link);
    }
    std::os::unix::fs::symlink(target, &link)
        .with_context(|| format!("创建符号链接失败: {} -> {}", link.display(), target))
}
