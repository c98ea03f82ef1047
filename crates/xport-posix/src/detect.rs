//! 安装状态检测（只读，不修改文件系统）。
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

use std::path::PathBuf;

use tracing::debug;
use xport_core::layout::Layout;

/// 判断关键文件是否全部存在。
///
/// 返回值：
/// - `true`：全部存在（不检查内容、大小与权限）
/// - `false`：遇到第一个缺失的文件即返回
pub fn is_installed(layout: &Layout) -> bool {
    all_exist(&layout.key_files())
}

fn all_exist(paths: &[PathBuf]) -> bool {
    for path in paths {
        if !path.exists() {
            debug!("关键文件缺失: {}", path.display());
            return false;
        }
    }
    debug!("关键文件齐全，视为已安装");
    true
}
