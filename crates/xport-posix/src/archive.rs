//! 资源包落地与解压。
//!
//! 流程：
//! 1) 将资源包字节流复制到临时 zip 文件（[`copy_to_scratch`]）
//! 2) 调用外部解压程序（默认 `unzip`）解压到目标目录（[`extract_zip`]）
//! 3) 临时文件由 [`ScratchFile`] 在离开作用域时删除，无论成功与否
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use crate::dirs;

/// 临时文件守卫：drop 时尽力删除文件（删除失败忽略）。
#[derive(Debug)]
pub struct ScratchFile(PathBuf);

impl ScratchFile {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if std::fs::remove_file(&self.0).is_ok() {
            debug!("已删除临时文件: {}", self.0.display());
        }
    }
}

/// 将 `reader` 的全部内容写入 `dest`。
///
/// 参数：
/// - `reader`：资源包字节流
/// - `dest`：临时文件路径（父目录不存在时以 0755 创建）
///
/// 返回值：
/// - 指向已写入文件的 [`ScratchFile`] 守卫
///
/// 异常处理：
/// - 创建目录、创建文件、读写失败返回错误；已写入的部分文件会被删除
pub fn copy_to_scratch(mut reader: impl Read, dest: &Path) -> Result<ScratchFile> {
    if let Some(parent) = dest.parent() {
        dirs::create_dir_recursive(parent, 0o755)?;
    }
    let guard = ScratchFile(dest.to_path_buf());
    let mut file =
        File::create(dest).with_context(|| format!("创建临时文件失败: {}", dest.display()))?;
    let bytes = std::io::copy(&mut reader, &mut file)
        .with_context(|| format!("写入临时文件失败: {}", dest.display()))?;
    debug!("已复制资源包 {bytes} 字节到 {}", dest.display());
    Ok(guard)
}

/// 调用外部解压程序将 `archive` 解压到 `dest`（保留相对路径，覆盖同名文件）。
///
/// 参数：
/// - `unzip`：解压程序（名称或路径）
/// - `archive`：zip 文件
/// - `dest`：目标目录（不存在时以 0755 创建）
///
/// 异常处理：
/// - 解压程序无法启动返回错误
/// - 退出码非 0 返回错误，并附带 stdout/stderr 便于排障
pub fn extract_zip(unzip: &str, archive: &Path, dest: &Path) -> Result<()> {
    info!("解压资源包: {} -> {}", archive.display(), dest.display());
    dirs::create_dir_recursive(dest, 0o755)?;

    let out = Command::new(unzip)
        .arg("-qq")
        .arg("-o")
        .arg(archive)
        .arg("-d")
        .arg(dest)
        .output()
        .with_context(|| format!("启动解压程序失败: {unzip}"))?;
    if out.status.success() {
        return Ok(());
    }
    let code = out.status.code().unwrap_or(-1);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    Err(anyhow!(
        "解压程序退出码异常: {} ({})\n{}\n{}",
        archive.display(),
        code,
        stdout.trim(),
        stderr.trim()
    ))
}
