use std::path::PathBuf;

use uuid::Uuid;
use xport_core::layout::Layout;
use xport_posix::{archive, detect, files};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{prefix}-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn scratch_file_is_removed_when_guard_drops() {
    let root = unique_temp_dir("xport-posix-scratch");
    let _cleanup = CleanupDir(root.clone());
    let dest = root.join("tmp").join("bootstrap.zip");

    let guard = archive::copy_to_scratch(&b"PK\x03\x04payload"[..], &dest).expect("copy");
    assert_eq!(guard.path(), dest.as_path());
    assert_eq!(std::fs::read(&dest).expect("read"), b"PK\x03\x04payload");

    drop(guard);
    assert!(!dest.exists());
    assert!(root.join("tmp").is_dir());
}

#[test]
fn extract_rejects_malformed_archive() {
    let root = unique_temp_dir("xport-posix-badzip");
    let _cleanup = CleanupDir(root.clone());
    let zip = root.join("bootstrap.zip");
    std::fs::write(&zip, b"definitely not a zip file").expect("write");

    // 无论 unzip 是否存在（不存在时启动失败），都必须返回错误
    let res = archive::extract_zip("unzip", &zip, &root.join("usr"));
    assert!(res.is_err());
}

#[test]
fn extract_reports_missing_decoder() {
    let root = unique_temp_dir("xport-posix-nodecoder");
    let _cleanup = CleanupDir(root.clone());
    let zip = root.join("bootstrap.zip");
    std::fs::write(&zip, b"PK").expect("write");

    let err = archive::extract_zip("xport-no-such-unzip", &zip, &root.join("usr"))
        .expect_err("spawn must fail");
    assert!(format!("{err:#}").contains("xport-no-such-unzip"));
}

#[test]
fn emit_all_continues_after_a_failed_file() {
    let root = unique_temp_dir("xport-posix-emit");
    let _cleanup = CleanupDir(root.clone());
    let good = root.join("profile");
    let bad = root.join("missing-dir").join("ssh_config");

    let outcomes = files::emit_all(&[
        (bad.as_path(), "Host *\n".to_string()),
        (good.as_path(), "export HOME=\"/x\"\n".to_string()),
    ]);

    assert!(!outcomes[0].ok);
    assert!(outcomes[1].ok);
    assert_eq!(
        std::fs::read_to_string(&good).expect("read"),
        "export HOME=\"/x\"\n"
    );
}

#[test]
fn is_installed_requires_every_key_file() {
    let root = unique_temp_dir("xport-posix-detect");
    let _cleanup = CleanupDir(root.clone());
    let layout = Layout::new(&root).expect("layout");
    assert!(!detect::is_installed(&layout));

    let keys = layout.key_files();
    for key in &keys[..keys.len() - 1] {
        std::fs::create_dir_all(key.parent().expect("parent")).expect("mkdir");
        std::fs::write(key, b"").expect("write key file");
    }
    assert!(!detect::is_installed(&layout));

    let last = keys.last().expect("non-empty");
    std::fs::create_dir_all(last.parent().expect("parent")).expect("mkdir");
    std::fs::write(last, b"").expect("write key file");
    assert!(detect::is_installed(&layout));
}

struct CleanupDir(PathBuf);

impl Drop for CleanupDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}
