//! payload 落地（资源包解压 / 外部预解压）。
//!
//! 说明：
//! - 两种落地方式实现同一个 [`Payload`] 接口，由命令行 `--mode` 选择，安装流程只有一条
//! - 资源访问通过 [`AssetSource`] 抽象，默认实现为本地资源目录 [`AssetDir`]
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use xport_core::arch::Arch;
use xport_core::error::BootstrapError;
use xport_core::layout::Layout;
use xport_core::state::PayloadKind;
use xport_posix::archive;

/// 打包资源的读取句柄。
pub trait AssetSource {
    /// 句柄是否可用（例如资源目录是否存在）。
    fn is_available(&self) -> bool;
    /// 用于日志与错误信息的描述。
    fn location(&self) -> PathBuf;
    /// 打开指定名称的资源。
    fn open(&self, name: &str) -> Result<Box<dyn Read>>;
}

/// 以本地目录作为资源来源。
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl AssetSource for AssetDir {
    fn is_available(&self) -> bool {
        self.root.is_dir()
    }

    fn location(&self) -> PathBuf {
        self.root.clone()
    }

    fn open(&self, name: &str) -> Result<Box<dyn Read>> {
        let path = self.root.join(name);
        let file = File::open(&path).with_context(|| format!("打开资源失败: {}", path.display()))?;
        Ok(Box::new(file))
    }
}

/// payload 落地步骤。
pub trait Payload {
    fn kind(&self) -> PayloadKind;

    /// 在创建任何目录之前检查资源是否可用。
    fn check_available(&self) -> Result<(), BootstrapError> {
        Ok(())
    }

    /// 将 payload 放置到前缀目录下。
    fn materialize(&self, layout: &Layout, arch: Arch) -> Result<(), BootstrapError>;
}

/// 从资源中取出 `xport-bootstrap-<arch>.zip` 并解压到前缀目录。
pub struct ArchivePayload<A> {
    assets: A,
    unzip: String,
}

impl<A: AssetSource> ArchivePayload<A> {
    pub fn new(assets: A, unzip: impl Into<String>) -> Self {
        Self {
            assets,
            unzip: unzip.into(),
        }
    }
}

impl<A: AssetSource> Payload for ArchivePayload<A> {
    fn kind(&self) -> PayloadKind {
        PayloadKind::Archive
    }

    fn check_available(&self) -> Result<(), BootstrapError> {
        if self.assets.is_available() {
            Ok(())
        } else {
            Err(BootstrapError::AssetUnavailable(self.assets.location()))
        }
    }

    fn materialize(&self, layout: &Layout, arch: Arch) -> Result<(), BootstrapError> {
        let name = arch.asset_name();
        let scratch = layout.scratch_archive();
        let copy_failed = |e: anyhow::Error| BootstrapError::AssetCopy {
            name: name.clone(),
            reason: format!("{e:#}"),
        };

        let reader = self.assets.open(&name).map_err(copy_failed)?;
        let guard = archive::copy_to_scratch(reader, &scratch).map_err(copy_failed)?;

        archive::extract_zip(&self.unzip, guard.path(), &layout.prefix()).map_err(|e| {
            BootstrapError::Extract {
                archive: guard.path().to_path_buf(),
                reason: format!("{e:#}"),
            }
        })?;
        info!("资源包解压完成: {name}");
        Ok(())
    }
}

/// 文件已由外部流程放到前缀目录下，无需任何操作。
#[derive(Debug, Clone, Copy, Default)]
pub struct PreExtracted;

impl Payload for PreExtracted {
    fn kind(&self) -> PayloadKind {
        PayloadKind::PreExtracted
    }

    fn materialize(&self, layout: &Layout, _arch: Arch) -> Result<(), BootstrapError> {
        info!("使用预解压文件: {}", layout.prefix().display());
        Ok(())
    }
}
