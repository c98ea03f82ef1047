//! CPU/ABI 架构探测。
//!
//! 说明：
//! - 架构在编译期确定（`cfg!(target_arch)`），运行期不做任何 IO
//! - 标识符沿用 Android ABI 命名，同时用于拼接 payload 资源文件名
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 运行平台的 CPU/ABI 组合。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arch {
    /// 64 位 ARM（`arm64-v8a`）。
    #[serde(rename = "arm64-v8a")]
    Arm64,
    /// 32 位 ARM（`armeabi-v7a`）。
    #[serde(rename = "armeabi-v7a")]
    Arm,
    /// 64 位 x86（`x86_64`）。
    #[serde(rename = "x86_64")]
    X86_64,
    /// 32 位 x86（`x86`）。
    #[serde(rename = "x86")]
    X86,
    /// 未识别的架构；安装流程遇到该值会直接中止。
    #[serde(rename = "unknown")]
    Unknown,
}

impl Arch {
    /// 返回当前编译目标对应的架构。
    ///
    /// 返回值：
    /// - 受支持的四种架构之一；其余目标返回 [`Arch::Unknown`]
    pub fn current() -> Self {
        if cfg!(target_arch = "aarch64") {
            Arch::Arm64
        } else if cfg!(target_arch = "arm") {
            Arch::Arm
        } else if cfg!(target_arch = "x86_64") {
            Arch::X86_64
        } else if cfg!(target_arch = "x86") {
            Arch::X86
        } else {
            Arch::Unknown
        }
    }

    /// 稳定的字符串标识（Android ABI 名称）。
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Arm64 => "arm64-v8a",
            Arch::Arm => "armeabi-v7a",
            Arch::X86_64 => "x86_64",
            Arch::X86 => "x86",
            Arch::Unknown => "unknown",
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, Arch::Unknown)
    }

    /// 该架构对应的 payload 资源文件名，例如 `xport-bootstrap-arm64-v8a.zip`。
    pub fn asset_name(self) -> String {
        format!("xport-bootstrap-{}.zip", self.as_str())
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知的架构标识字符串。
#[derive(Debug, thiserror::Error)]
#[error("未知的架构标识: {0}")]
pub struct ParseArchError(String);

impl FromStr for Arch {
    type Err = ParseArchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arm64-v8a" => Ok(Arch::Arm64),
            "armeabi-v7a" => Ok(Arch::Arm),
            "x86_64" => Ok(Arch::X86_64),
            "x86" => Ok(Arch::X86),
            "unknown" => Ok(Arch::Unknown),
            other => Err(ParseArchError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_matches_compile_target() {
        let arch = Arch::current();
        if cfg!(target_arch = "x86_64") {
            assert_eq!(arch, Arch::X86_64);
        } else if cfg!(target_arch = "aarch64") {
            assert_eq!(arch, Arch::Arm64);
        }
    }

    #[test]
    fn unknown_is_the_only_unsupported_value() {
        for arch in [Arch::Arm64, Arch::Arm, Arch::X86_64, Arch::X86] {
            assert!(arch.is_supported(), "{arch} should be supported");
            assert_eq!(arch.as_str().parse::<Arch>().unwrap(), arch);
        }
        assert!(!Arch::Unknown.is_supported());
        assert!("mips".parse::<Arch>().is_err());
    }

    #[test]
    fn asset_name_uses_abi_identifier() {
        assert_eq!(Arch::Arm64.asset_name(), "xport-bootstrap-arm64-v8a.zip");
        assert_eq!(Arch::X86.asset_name(), "xport-bootstrap-x86.zip");
    }

    #[test]
    fn serde_uses_abi_identifier() {
        let json = serde_json::to_string(&Arch::Arm).unwrap();
        assert_eq!(json, r#""armeabi-v7a""#);
    }
}
