//! POSIX 文件系统能力封装（目录、权限、符号链接、资源包解压、配置写盘）。
//!
//! 目标：
//! - 将 bootstrap 用到的系统调用集中封装，上层安装流程只负责编排
//! - 统一错误处理风格：致命操作返回 `anyhow::Result`，逐项“尽力而为”的操作返回
//!   [`xport_core::state::ItemOutcome`] 列表，不中断后续条目
//!
//! 限制：
//! - 仅支持 Unix 文件系统与权限模型
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

pub mod archive;
pub mod detect;
pub mod dirs;
pub mod files;
pub mod perms;
pub mod symlink;
