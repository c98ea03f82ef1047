//! bootstrap 安装状态机。
//!
//! 阶段（依次执行，前一阶段是后一阶段的前提）：
//! 1) CHECK_INSTALLED：关键文件齐全则直接返回成功
//! 2) PROBE_ARCH：架构未识别则中止
//! 3) SCAFFOLD_DIRS：创建目录树并收紧 `.ssh`/`var/empty` 权限，失败中止
//! 4) MATERIALIZE_PAYLOAD：解压资源包或接受预解压文件，失败中止
//! 5) NORMALIZE_PERMISSIONS：逐个设置可执行权限，单项失败记录后继续
//! 6) BUILD_SYMLINK_FARM：多命令二进制缺失则中止，单项失败记录后继续
//! 7) EMIT_CONFIG：写入 profile 与 ssh_config，单项失败记录后继续
//! 8) DONE：落盘状态文件（失败仅记录日志）
//!
//! 注意：
//! - 没有回滚；中途失败会保留已完成阶段留下的文件，下次运行从 CHECK_INSTALLED 重新开始
//! - 不做并发保护，同一数据目录不应被多个进程同时安装
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

use std::fmt;

use tracing::{error, info, warn};
use xport_core::arch::Arch;
use xport_core::config_files::{render_profile, render_ssh_config};
use xport_core::error::BootstrapError;
use xport_core::layout::Layout;
use xport_core::manifest::{
    DIR_MODE, EMPTY_DIR_MODE, EXECUTABLE_MODE, MULTICALL_BINARY, SSH_DIR_MODE, SYMLINK_COMMANDS,
};
use xport_core::state::{InstallState, StepReport};
use xport_core::BOOTSTRAP_VERSION;
use xport_posix::{detect, dirs, files, perms, symlink};

use crate::payload::Payload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CheckInstalled,
    ProbeArch,
    ScaffoldDirs,
    MaterializePayload,
    NormalizePermissions,
    BuildSymlinkFarm,
    EmitConfig,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::CheckInstalled => "CHECK_INSTALLED",
            Stage::ProbeArch => "PROBE_ARCH",
            Stage::ScaffoldDirs => "SCAFFOLD_DIRS",
            Stage::MaterializePayload => "MATERIALIZE_PAYLOAD",
            Stage::NormalizePermissions => "NORMALIZE_PERMISSIONS",
            Stage::BuildSymlinkFarm => "BUILD_SYMLINK_FARM",
            Stage::EmitConfig => "EMIT_CONFIG",
            Stage::Done => "DONE",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 安装结果（成功路径）。
#[derive(Debug)]
pub enum Outcome {
    /// 快速路径：关键文件已存在，未做任何修改。
    AlreadyInstalled,
    /// 完整执行到 DONE。
    Installed(InstallState),
}

/// 安装器：持有布局、架构与 payload 落地方式，按阶段顺序执行。
pub struct Installer<'a> {
    layout: &'a Layout,
    arch: Arch,
    payload: &'a dyn Payload,
}

impl<'a> Installer<'a> {
    pub fn new(layout: &'a Layout, arch: Arch, payload: &'a dyn Payload) -> Self {
        Self {
            layout,
            arch,
            payload,
        }
    }

    /// 对外安装入口：仅返回是否成功，失败原因写入日志。
    pub fn install(&self) -> bool {
        match self.run() {
            Ok(Outcome::AlreadyInstalled) => true,
            Ok(Outcome::Installed(state)) => {
                let degraded: usize = state.steps.iter().map(StepReport::failures).sum();
                if degraded > 0 {
                    warn!(
                        "安装完成，但有 {degraded} 项降级失败，详见 {}",
                        self.layout.state_file().display()
                    );
                }
                true
            }
            Err(e) => {
                error!("bootstrap 安装失败: {e}");
                false
            }
        }
    }

    /// 执行完整状态机。
    ///
    /// 异常处理：
    /// - 返回的错误均为致命错误；降级错误记录在 [`InstallState::steps`] 中
    pub fn run(&self) -> Result<Outcome, BootstrapError> {
        info!("开始安装 XPort bootstrap (版本 {BOOTSTRAP_VERSION})");

        info!("[{}] 检查关键文件", Stage::CheckInstalled);
        if detect::is_installed(self.layout) {
            info!("bootstrap 已安装，跳过");
            return Ok(Outcome::AlreadyInstalled);
        }

        info!("[{}] 目标架构: {}", Stage::ProbeArch, self.arch);
        if !self.arch.is_supported() {
            return Err(BootstrapError::UnsupportedArch(self.arch));
        }
        self.payload.check_available()?;

        info!("[{}] 创建目录结构", Stage::ScaffoldDirs);
        scaffold(self.layout)?;

        info!("[{}] 落地 payload ({:?})", Stage::MaterializePayload, self.payload.kind());
        self.payload.materialize(self.layout, self.arch)?;

        let mut steps = Vec::new();

        info!("[{}] 设置二进制权限", Stage::NormalizePermissions);
        let items = perms::normalize(&self.layout.binary_paths(), EXECUTABLE_MODE);
        steps.push(report(Stage::NormalizePermissions, items));

        info!("[{}] 创建符号链接", Stage::BuildSymlinkFarm);
        let multicall = self.layout.multicall_binary();
        let items = symlink::build_farm(&self.layout.bin_dir(), MULTICALL_BINARY, SYMLINK_COMMANDS)
            .map_err(|e| {
                if multicall.exists() {
                    BootstrapError::SymlinkFarm(format!("{e:#}"))
                } else {
                    BootstrapError::MulticallMissing(multicall.clone())
                }
            })?;
        steps.push(report(Stage::BuildSymlinkFarm, items));

        info!("[{}] 写入配置文件", Stage::EmitConfig);
        let profile = self.layout.profile_path();
        let ssh_config = self.layout.ssh_config_path();
        let items = files::emit_all(&[
            (profile.as_path(), render_profile(self.layout)),
            (ssh_config.as_path(), render_ssh_config(self.layout)),
        ]);
        steps.push(report(Stage::EmitConfig, items));

        let state = InstallState::new(self.arch, &self.layout.prefix(), self.payload.kind(), steps);
        persist_state(self.layout, &state);
        info!("[{}] XPort bootstrap 安装完成", Stage::Done);
        Ok(Outcome::Installed(state))
    }
}

/// 创建目录树，并为 SSH 目录与共享空目录设置固定权限。
///
/// 异常处理：
/// - 任一目录创建或权限设置失败即返回 [`BootstrapError::Scaffold`]
fn scaffold(layout: &Layout) -> Result<(), BootstrapError> {
    let fail = |path: &std::path::Path, e: anyhow::Error| BootstrapError::Scaffold {
        path: path.to_path_buf(),
        reason: format!("{e:#}"),
    };
    for dir in layout.scaffold_dirs() {
        dirs::create_dir_recursive(&dir, DIR_MODE).map_err(|e| fail(dir.as_path(), e))?;
    }
    // ssh 客户端拒绝使用组/其他用户可访问的密钥目录
    for (dir, mode) in [
        (layout.ssh_home_dir(), SSH_DIR_MODE),
        (layout.var_empty_dir(), EMPTY_DIR_MODE),
    ] {
        perms::set_mode(&dir, mode).map_err(|e| fail(dir.as_path(), e))?;
    }
    Ok(())
}

fn report(stage: Stage, items: Vec<xport_core::state::ItemOutcome>) -> StepReport {
    let report = StepReport::new(stage.as_str(), items);
    let failures = report.failures();
    if failures > 0 {
        warn!("[{stage}] {failures} 项失败（已忽略）");
    }
    report
}

/// 将安装状态写入 `<prefix>/var/bootstrap-state.json`，失败仅记录日志。
fn persist_state(layout: &Layout, state: &InstallState) {
    let path = layout.state_file();
    let written = serde_json::to_string_pretty(state)
        .map_err(anyhow::Error::from)
        .and_then(|json| files::write_text(&path, &json));
    if let Err(e) = written {
        warn!("写入状态文件失败（继续）: {e:#}");
    }
}

/// 读取上次安装的状态文件；不存在或解析失败时返回 `None`。
pub fn load_state(layout: &Layout) -> Option<InstallState> {
    let bytes = std::fs::read(layout.state_file()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// 生成诊断信息（版本、架构、是否已安装、前缀目录）。
pub fn diagnostic_report(layout: &Layout, arch: Arch) -> String {
    let installed = detect::is_installed(layout);
    let mut out = format!(
        "XPort Bootstrap {BOOTSTRAP_VERSION}\nArchitecture: {arch}\nInstalled: {}\nPrefix: {}",
        if installed { "Yes" } else { "No" },
        layout.prefix().display()
    );
    if let Some(ts) = load_state(layout).and_then(|s| s.installed_at_rfc3339()) {
        out.push_str(&format!("\nLast install: {ts}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::PreExtracted;

    fn temp_layout(prefix: &str) -> (Layout, std::path::PathBuf) {
        let root = std::env::temp_dir().join(format!("{prefix}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        (Layout::new(&root).unwrap(), root)
    }

    #[test]
    fn unknown_arch_aborts_before_scaffolding() {
        let (layout, root) = temp_layout("xport-pipeline-unknown");
        let payload = PreExtracted;
        let installer = Installer::new(&layout, Arch::Unknown, &payload);

        assert!(matches!(
            installer.run(),
            Err(BootstrapError::UnsupportedArch(Arch::Unknown))
        ));
        assert!(!installer.install());
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 0);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_multicall_is_fatal_after_scaffolding() {
        let (layout, root) = temp_layout("xport-pipeline-nobusybox");
        let payload = PreExtracted;
        let installer = Installer::new(&layout, Arch::X86_64, &payload);

        let err = installer.run().unwrap_err();
        assert!(matches!(err, BootstrapError::MulticallMissing(_)));
        assert!(layout.bin_dir().is_dir());
        assert_eq!(std::fs::read_dir(layout.bin_dir()).unwrap().count(), 0);
        assert!(!layout.profile_path().exists());
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn config_write_failure_is_degraded_not_fatal() {
        let (layout, root) = temp_layout("xport-pipeline-degraded");
        std::fs::create_dir_all(layout.bin_dir()).unwrap();
        std::fs::write(layout.multicall_binary(), b"#!/bin/true\n").unwrap();
        // 目录占住 ssh_config 的位置，写入必然失败
        std::fs::create_dir_all(layout.ssh_config_path().join("keep")).unwrap();
        let payload = PreExtracted;
        let installer = Installer::new(&layout, Arch::X86_64, &payload);

        let state = match installer.run() {
            Ok(Outcome::Installed(state)) => state,
            other => panic!("expected a completed install, got {other:?}"),
        };
        let emit = state
            .steps
            .iter()
            .find(|s| s.stage == Stage::EmitConfig.as_str())
            .unwrap();
        assert_eq!(emit.failures(), 1);
        assert!(!emit.items[1].ok);
        assert!(emit.items[1].reason.is_some());
        assert_eq!(state.steps.iter().map(StepReport::failures).sum::<usize>(), 1);
        assert!(layout.profile_path().is_file());
        assert!(layout.state_file().is_file());

        assert!(installer.install());
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn diagnostic_report_lists_four_fields() {
        let (layout, root) = temp_layout("xport-pipeline-info");
        let report = diagnostic_report(&layout, Arch::Arm64);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], format!("XPort Bootstrap {BOOTSTRAP_VERSION}"));
        assert_eq!(lines[1], "Architecture: arm64-v8a");
        assert_eq!(lines[2], "Installed: No");
        assert_eq!(lines[3], format!("Prefix: {}", layout.prefix().display()));
        assert_eq!(lines.len(), 4);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn stage_names_follow_pipeline_order() {
        assert_eq!(Stage::CheckInstalled.to_string(), "CHECK_INSTALLED");
        assert_eq!(Stage::Done.as_str(), "DONE");
    }
}
