//! 静态清单：目录、二进制、符号链接与关键文件。
//!
//! 约定：
//! - 本模块只定义数据，不执行任何 IO
//! - 路径均为相对前缀目录（或 `bin/`）的相对路径，由 [`crate::layout::Layout`] 拼接为绝对路径
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

/// 多命令二进制的文件名（符号链接的目标）。
pub const MULTICALL_BINARY: &str = "busybox";

/// 前缀目录下需要创建的子目录（按创建顺序）。
pub const PREFIX_SUBDIRS: &[&str] = &[
    "bin",
    "lib",
    "etc",
    "etc/ssh",
    "usr",
    "usr/share",
    "var",
    "var/run",
    "var/empty",
];

/// `bin/` 下需要设置为可执行的二进制。
///
/// 该列表是各构建配置的并集，缺失的条目会被跳过。
pub const BINARIES: &[&str] = &[MULTICALL_BINARY, "ssh", "ssh-keygen", "sh", "ash"];

/// 需要在 `bin/` 下链接到多命令二进制的命令名。
pub const SYMLINK_COMMANDS: &[&str] = &[
    "sh", "ash", "ls", "cat", "cp", "mv", "rm", "mkdir", "chmod", "chown", "touch", "echo", "pwd",
    "test", "[", "which", "whoami", "id", "groups", "tar", "gzip", "gunzip", "unzip", "wget",
    "grep", "find", "sort", "head", "tail", "cut", "sed", "awk", "wc", "uniq", "basename",
    "dirname", "env", "printenv", "date", "sleep", "kill", "ps", "mount", "umount", "clear",
    "reset", "tty", "stty", "stat", "readlink", "realpath",
];

/// 关键文件（相对前缀目录）：全部存在即视为已安装。
pub const KEY_FILES: &[&str] = &["bin/busybox", "bin/ssh", "bin/ssh-keygen", "etc/profile"];

/// 可执行文件权限：rwxr-xr-x。
pub const EXECUTABLE_MODE: u32 = 0o755;

/// 普通目录权限。
pub const DIR_MODE: u32 = 0o755;

/// SSH 主目录权限：仅属主可访问。
pub const SSH_DIR_MODE: u32 = 0o700;

/// 共享空目录权限。
pub const EMPTY_DIR_MODE: u32 = 0o755;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_files_reference_the_multicall_binary() {
        assert!(KEY_FILES.contains(&"bin/busybox"));
        assert_eq!(BINARIES[0], MULTICALL_BINARY);
    }

    #[test]
    fn symlink_commands_are_unique_and_never_the_binary_itself() {
        let mut seen = std::collections::HashSet::new();
        for cmd in SYMLINK_COMMANDS {
            assert!(seen.insert(cmd), "duplicate command {cmd}");
            assert_ne!(*cmd, MULTICALL_BINARY);
            assert!(!cmd.contains('/'));
        }
    }
}
