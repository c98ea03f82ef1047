//! 逐级创建目录。
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

use std::fs::DirBuilder;
use std::io::ErrorKind;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

/// 确保 `path` 的每一级都是目录，从根向下创建缺失的部分。
///
/// 参数：
/// - `path`：目标目录（绝对路径）
/// - `mode`：新建目录使用的权限位（受进程 umask 影响）
///
/// 异常处理：
/// - 目录已存在视为成功
/// - 同名路径已存在但不是目录时返回错误
/// - 其余创建失败（权限不足、磁盘满等）返回错误
pub fn create_dir_recursive(path: &Path, mode: u32) -> Result<()> {
    let mut components: Vec<PathBuf> = path.ancestors().map(Path::to_path_buf).collect();
    components.reverse();

    for dir in components {
        if dir.as_os_str().is_empty() || dir.parent().is_none() {
            continue;
        }
        if dir.is_dir() {
            continue;
        }
        match DirBuilder::new().mode(mode).create(&dir) {
            Ok(()) => debug!("创建目录: {}", dir.display()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if !dir.is_dir() {
                    return Err(anyhow!("路径已存在但不是目录: {}", dir.display()));
                }
            }
            Err(e) => {
                return Err(e).with_context(|| format!("创建目录失败: {}", dir.display()));
            }
        }
    }
    Ok(())
}
