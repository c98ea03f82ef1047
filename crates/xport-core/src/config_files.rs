//! 静态配置文件内容：shell profile 与 SSH 客户端配置。
//!
//! 说明：
//! - 只负责渲染文本，写盘由调用方完成（每次安装无条件覆盖）
//! - SSH 配置的指令名与取值由随包的 ssh 客户端解析，属于对外契约
//!
//! 作者：XPort 终端项目组
//! 创建时间：2026-10-18
//! 修改时间：2026-10-18

use std::fmt::Write as _;

use crate::layout::Layout;

pub const DEFAULT_TERM: &str = "xterm-256color";
pub const DEFAULT_LANG: &str = "en_US.UTF-8";

/// 渲染 `<prefix>/etc/profile`。
///
/// 输出内容：
/// - 导出 `PATH`（前缀 `bin` 置于最前）、`HOME`、`TMPDIR`、`SHELL`、`TERM`、`PREFIX`、`LANG`、`LC_ALL`
/// - 最后切换到主目录
pub fn render_profile(layout: &Layout) -> String {
    let prefix = layout.prefix();
    let exports = [
        ("PATH", format!("{}:$PATH", layout.bin_dir().display())),
        ("HOME", layout.home().display().to_string()),
        ("TMPDIR", layout.tmp().display().to_string()),
        ("SHELL", layout.bin_dir().join("sh").display().to_string()),
        ("TERM", DEFAULT_TERM.to_string()),
        ("PREFIX", prefix.display().to_string()),
        ("LANG", DEFAULT_LANG.to_string()),
        ("LC_ALL", DEFAULT_LANG.to_string()),
    ];

    let mut out = String::from("# XPort minimal shell profile\n");
    for (name, value) in exports {
        let _ = writeln!(out, "export {name}=\"{value}\"");
    }
    out.push_str("\n# Change to home directory\n");
    out.push_str("cd \"$HOME\"\n");
    out
}

/// 渲染 `<prefix>/etc/ssh/ssh_config`（作用于所有主机）。
///
/// known_hosts 与两个身份文件（RSA、Ed25519）均指向 `<home>/.ssh` 下的绝对路径。
pub fn render_ssh_config(layout: &Layout) -> String {
    let ssh_dir = layout.ssh_home_dir();
    let directives = [
        ("Port", "22".to_string()),
        ("Protocol", "2".to_string()),
        ("ServerAliveInterval", "30".to_string()),
        ("ServerAliveCountMax", "3".to_string()),
        ("TCPKeepAlive", "yes".to_string()),
        ("Compression", "yes".to_string()),
        ("PubkeyAuthentication", "yes".to_string()),
        ("PasswordAuthentication", "yes".to_string()),
        ("HostbasedAuthentication", "no".to_string()),
        ("GSSAPIAuthentication", "no".to_string()),
        (
            "UserKnownHostsFile",
            ssh_dir.join("known_hosts").display().to_string(),
        ),
        ("IdentityFile", ssh_dir.join("id_rsa").display().to_string()),
        ("IdentityFile", ssh_dir.join("id_ed25519").display().to_string()),
    ];

    let mut out = String::from("# XPort SSH client configuration\nHost *\n");
    for (name, value) in directives {
        let _ = writeln!(out, "    {name} {value}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::new("/data/data/com.xport.terminal/files").unwrap()
    }

    #[test]
    fn profile_exports_full_environment() {
        let profile = render_profile(&layout());
        for var in [
            "PATH", "HOME", "TMPDIR", "SHELL", "TERM", "PREFIX", "LANG", "LC_ALL",
        ] {
            assert!(
                profile.contains(&format!("export {var}=")),
                "missing {var} in:\n{profile}"
            );
        }
        assert!(profile
            .contains("export PATH=\"/data/data/com.xport.terminal/files/usr/bin:$PATH\""));
        assert!(profile.contains("export HOME=\"/data/data/com.xport.terminal/files/home\""));
        assert!(profile.ends_with("cd \"$HOME\"\n"));
    }

    #[test]
    fn ssh_config_applies_to_all_hosts() {
        let cfg = render_ssh_config(&layout());
        let lines: Vec<&str> = cfg.lines().map(str::trim).collect();
        assert!(lines.contains(&"Host *"));
        assert!(lines.contains(&"Port 22"));
        assert!(lines.contains(&"Protocol 2"));
        assert!(lines.contains(&"ServerAliveInterval 30"));
        assert!(lines.contains(&"ServerAliveCountMax 3"));
        assert!(lines.contains(&"GSSAPIAuthentication no"));
        assert!(lines
            .contains(&"IdentityFile /data/data/com.xport.terminal/files/home/.ssh/id_ed25519"));
        assert_eq!(
            lines.iter().filter(|l| l.starts_with("IdentityFile ")).count(),
            2
        );
    }
}
