//! XPort 终端 bootstrap 核心库（与具体文件系统操作无关）。
//!
//! 功能：
//! - 定义 CPU/ABI 架构标识与探测
//! - 定义安装目录布局（[`layout::Layout`]），所有路径由同一个数据根目录派生
//! - 定义二进制清单、符号链接清单与“已安装”判定所用的关键文件
//! - 渲染 shell profile 与 SSH 客户端配置文本
//! - 定义致命错误类型与安装状态落盘模型（bootstrap-state.json）
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

pub mod arch;
pub mod config_files;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod state;

/// bootstrap 组件版本号（用于诊断输出与状态文件）。
pub const BOOTSTRAP_VERSION: &str = "1.0.0";
