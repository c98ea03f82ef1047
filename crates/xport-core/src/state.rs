//! 安装状态落盘模型（bootstrap-state.json）与逐项结果记录。
//!
//! 目的：
//! - 记录每个阶段中逐项操作（chmod、符号链接、配置文件）的成功/失败原因，便于排障
//! - 安装走到 DONE 后落盘一份，供诊断输出展示最近一次安装时间
//!
//! 注意：
//! - 状态文件不参与“已安装”判定，判定仍只依赖关键文件是否存在
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

use std::path::Path;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::arch::Arch;

/// payload 落地方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// 从资源包复制 zip 并解压。
    Archive,
    /// 文件已由外部流程放置到前缀目录下。
    PreExtracted,
}

/// 单项操作结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOutcome {
    /// 操作对象（路径或命令名）。
    pub target: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// 失败原因（成功或跳过时为空）。
    pub reason: Option<String>,
}

impl ItemOutcome {
    pub fn ok(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ok: true,
            reason: None,
        }
    }

    pub fn failed(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ok: false,
            reason: Some(reason.into()),
        }
    }

    pub fn path(path: &Path) -> String {
        path.display().to_string()
    }
}

/// 单个阶段的逐项结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub stage: String,
    #[serde(default)]
    pub items: Vec<ItemOutcome>,
}

impl StepReport {
    pub fn new(stage: impl Into<String>, items: Vec<ItemOutcome>) -> Self {
        Self {
            stage: stage.into(),
            items,
        }
    }

    /// 失败条目数量。
    pub fn failures(&self) -> usize {
        self.items.iter().filter(|i| !i.ok).count()
    }
}

/// 安装状态（序列化为 JSON 写入 `<prefix>/var/bootstrap-state.json`）。
///
/// 字段说明：
/// - `state_id`：本次安装的随机 ID
/// - `version`：bootstrap 组件版本
/// - `arch`：安装时探测到的架构
/// - `prefix`：前缀目录
/// - `installed_at`：完成时间（UTC，RFC 3339）
/// - `payload`：payload 落地方式
/// - `steps`：各阶段的逐项结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallState {
    pub state_id: Uuid,
    pub version: String,
    pub arch: Arch,
    pub prefix: String,
    #[serde(with = "time::serde::rfc3339")]
    pub installed_at: OffsetDateTime,
    pub payload: PayloadKind,
    #[serde(default)]
    pub steps: Vec<StepReport>,
}

impl InstallState {
    /// 创建一份新的安装状态，`installed_at` 取当前 UTC 时间。
    pub fn new(arch: Arch, prefix: &Path, payload: PayloadKind, steps: Vec<StepReport>) -> Self {
        Self {
            state_id: Uuid::new_v4(),
            version: crate::BOOTSTRAP_VERSION.to_string(),
            arch,
            prefix: prefix.display().to_string(),
            installed_at: OffsetDateTime::now_utc(),
            payload,
            steps,
        }
    }

    /// 安装时间的 RFC 3339 文本；格式化失败时返回 `None`。
    pub fn installed_at_rfc3339(&self) -> Option<String> {
        self.installed_at
            .format(&time::format_description::well_known::Rfc3339)
            .ok()
    }
}
