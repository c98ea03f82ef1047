//! bootstrap 安装流程的致命错误。
//!
//! 说明：
//! - 这里只列出会中止整个安装的错误；单个二进制 chmod 失败、单个符号链接失败、
//!   配置文件写入失败属于“降级”级别，以 [`crate::state::ItemOutcome`] 记录而非报错
//! - 对外接口最终只暴露布尔结果，错误细节仅通过日志呈现
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

use std::path::PathBuf;

use thiserror::Error;

use crate::arch::Arch;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("数据根目录必须是绝对路径: {}", .0.display())]
    Layout(PathBuf),
    #[error("不支持的架构: {0}")]
    UnsupportedArch(Arch),
    #[error("资源目录不可用: {}", .0.display())]
    AssetUnavailable(PathBuf),
    #[error("创建目录失败: {}: {reason}", .path.display())]
    Scaffold { path: PathBuf, reason: String },
    #[error("复制资源包失败: {name}: {reason}")]
    AssetCopy { name: String, reason: String },
    #[error("解压资源包失败: {}: {reason}", .archive.display())]
    Extract { archive: PathBuf, reason: String },
    #[error("多命令二进制不存在: {}", .0.display())]
    MulticallMissing(PathBuf),
    #[error("创建符号链接失败: {0}")]
    SymlinkFarm(String),
}
