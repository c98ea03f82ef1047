//! 安装目录布局约定（前缀目录/主目录/临时目录）。
//!
//! 目标：
//! - 将全部落盘路径集中在一个配置对象里，由进程启动时构造一次并向下传递
//! - 所有路径都由同一个数据根目录派生，测试可将其指向临时目录
//!
//! 默认布局（数据根目录为 `/data/data/com.xport.terminal/files`）：
//! - 前缀目录：`<root>/usr`
//! - 主目录：`<root>/home`
//! - 临时目录：`<root>/tmp`
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

use std::path::PathBuf;

use crate::error::BootstrapError;
use crate::manifest;

/// 默认数据根目录（应用私有存储）。
pub const DEFAULT_DATA_DIR: &str = "/data/data/com.xport.terminal/files";

/// 覆盖数据根目录的环境变量名。
pub const DATA_DIR_ENV: &str = "XPORT_DATA_DIR";

/// 安装目录布局。
///
/// 约束：
/// - `root` 必须是绝对路径，因此派生出的所有路径也都是绝对路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// 以指定数据根目录构造布局。
    ///
    /// 异常处理：
    /// - `root` 不是绝对路径时返回 [`BootstrapError::Layout`]
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, BootstrapError> {
        let root = root.into();
        if !root.is_absolute() {
            return Err(BootstrapError::Layout(root));
        }
        Ok(Self { root })
    }

    /// 读取 `XPORT_DATA_DIR` 构造布局；未设置时使用 [`DEFAULT_DATA_DIR`]。
    pub fn from_env() -> Result<Self, BootstrapError> {
        match std::env::var_os(DATA_DIR_ENV) {
            Some(v) if !v.is_empty() => Self::new(PathBuf::from(v)),
            _ => Self::new(DEFAULT_DATA_DIR),
        }
    }

    /// 前缀目录（类 `/usr` 层级的根）。
    pub fn prefix(&self) -> PathBuf {
        self.root.join("usr")
    }

    pub fn home(&self) -> PathBuf {
        self.root.join("home")
    }

    pub fn tmp(&self) -> PathBuf {
        self.root.join("tmp")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.prefix().join("bin")
    }

    /// 用户 SSH 目录 `<home>/.ssh`（权限必须为 0700）。
    pub fn ssh_home_dir(&self) -> PathBuf {
        self.home().join(".ssh")
    }

    /// sshd 风格的空目录 `<prefix>/var/empty`（权限 0755）。
    pub fn var_empty_dir(&self) -> PathBuf {
        self.prefix().join("var").join("empty")
    }

    pub fn profile_path(&self) -> PathBuf {
        self.prefix().join("etc").join("profile")
    }

    pub fn ssh_config_path(&self) -> PathBuf {
        self.prefix().join("etc").join("ssh").join("ssh_config")
    }

    /// 多命令二进制（busybox）的完整路径。
    pub fn multicall_binary(&self) -> PathBuf {
        self.bin_dir().join(manifest::MULTICALL_BINARY)
    }

    /// 资源包解压前落地的临时文件。
    pub fn scratch_archive(&self) -> PathBuf {
        self.tmp().join("bootstrap.zip")
    }

    /// 安装状态文件（仅用于诊断，不参与“已安装”判定）。
    pub fn state_file(&self) -> PathBuf {
        self.prefix().join("var").join("bootstrap-state.json")
    }

    /// 需要创建的目录列表（按创建顺序）。
    pub fn scaffold_dirs(&self) -> Vec<PathBuf> {
        let prefix = self.prefix();
        let mut dirs = vec![prefix.clone()];
        dirs.extend(manifest::PREFIX_SUBDIRS.iter().map(|d| prefix.join(d)));
        dirs.push(self.home());
        dirs.push(self.ssh_home_dir());
        dirs.push(self.tmp());
        dirs
    }

    /// 二进制清单中各条目的完整路径。
    pub fn binary_paths(&self) -> Vec<PathBuf> {
        let bin = self.bin_dir();
        manifest::BINARIES.iter().map(|b| bin.join(b)).collect()
    }

    /// “已安装”判定所依赖的关键文件。
    pub fn key_files(&self) -> Vec<PathBuf> {
        let prefix = self.prefix();
        manifest::KEY_FILES.iter().map(|f| prefix.join(f)).collect()
    }
}
