//! XPort 终端 bootstrap 安装程序。
//!
//! 职责：
//! - 首次运行时将随包的 busybox/ssh/ssh-keygen 等预编译工具落地到应用私有前缀目录
//! - 创建目录结构、设置权限、建立 busybox 命令符号链接、写入 profile 与 ssh_config
//! - 提供“是否已安装”查询与诊断信息输出
//!
//! 配置：
//! - `XPORT_DATA_DIR`：数据根目录（默认 `/data/data/com.xport.terminal/files`）
//! - `XPORT_TEST_ARCH`：覆盖架构探测结果（仅用于测试）
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

mod payload;
mod pipeline;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use xport_core::arch::Arch;
use xport_core::layout::Layout;
use xport_posix::detect;

use crate::payload::{ArchivePayload, AssetDir, Payload, PreExtracted};
use crate::pipeline::Installer;

/// 命令行参数。
#[derive(Debug, Parser)]
#[command(name = "xport-bootstrapper", version)]
struct Cli {
    #[arg(long, default_value_t = false)]
    silent: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// 安装（幂等：关键文件齐全时直接返回成功）。
    Install(InstallArgs),
    /// 输出是否已安装（不做任何修改）。
    Status,
    /// 输出诊断信息（版本、架构、安装状态、前缀目录）。
    Info,
}

#[derive(Debug, Args)]
struct InstallArgs {
    /// payload 落地方式。
    #[arg(long, value_enum, default_value = "archive")]
    mode: PayloadMode,

    /// 资源目录（包含 `xport-bootstrap-<arch>.zip`）。
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// 外部解压程序。
    #[arg(long, default_value = "unzip")]
    unzip: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PayloadMode {
    /// 从资源目录复制 zip 并解压。
    Archive,
    /// 文件已放置在前缀目录下。
    PreExtracted,
}

/// 程序入口：初始化日志、构造布局并分发子命令。
///
/// 异常处理：
/// - 数据根目录非法或安装失败时返回 `Err`，进程以非 0 退出
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let layout = Layout::from_env()?;
    let arch = probe_arch();
    match &cli.command {
        Commands::Install(args) => install(&cli, args, &layout, arch),
        Commands::Status => {
            println!("installed = {}", detect::is_installed(&layout));
            Ok(())
        }
        Commands::Info => {
            println!("{}", pipeline::diagnostic_report(&layout, arch));
            Ok(())
        }
    }
}

/// 架构探测；设置了 `XPORT_TEST_ARCH` 时以其为准（无法识别的值视为 unknown）。
fn probe_arch() -> Arch {
    match std::env::var("XPORT_TEST_ARCH") {
        Ok(v) => v.parse().unwrap_or(Arch::Unknown),
        Err(_) => Arch::current(),
    }
}

/// 按 `--mode` 选择 payload 落地方式并执行安装。
fn install(cli: &Cli, args: &InstallArgs, layout: &Layout, arch: Arch) -> Result<()> {
    let payload: Box<dyn Payload> = match args.mode {
        PayloadMode::Archive => Box::new(ArchivePayload::new(
            AssetDir::new(args.assets.clone()),
            args.unzip.clone(),
        )),
        PayloadMode::PreExtracted => Box::new(PreExtracted),
    };

    let installer = Installer::new(layout, arch, payload.as_ref());
    if !installer.install() {
        return Err(anyhow!("bootstrap 安装失败"));
    }
    if !cli.silent {
        info!("提示：在终端中执行 `. {}` 加载环境", layout.profile_path().display());
    }
    Ok(())
}
