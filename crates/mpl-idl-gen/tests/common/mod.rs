#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A scratch repository with the mpl-project-name layout and a program
/// manifest that pins `shank = "0.4.2"`.
pub fn scratch_repo() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let program_dir = dir.path().join("programs").join("mpl-project-name");
    fs::create_dir_all(program_dir.join("src")).unwrap();
    fs::write(
        program_dir.join("Cargo.toml"),
        r#"[package]
name = "mpl-project-name-program"
version = "0.1.0"

[lib]
name = "mpl_project_name_program"
crate-type = ["cdylib", "lib"]

[dependencies]
shank = "0.4.2"
"#,
    )
    .unwrap();
    fs::write(program_dir.join("src").join("lib.rs"), "").unwrap();
    dir
}

/// Every file below `root`, relative to it.
pub fn files_under(root: &Path) -> Vec<PathBuf> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<PathBuf>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_path_buf());
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

/// Install an executable shell script as `<repo>/.crates/bin/shank`.
#[cfg(unix)]
pub fn install_fake_shank(repo: &Path, script: &str) -> PathBuf {
    let binary = repo.join(".crates").join("bin").join("shank");
    write_script(&binary, script);
    binary
}

/// A fake shank that reports `version` and writes a minimal IDL to
/// `<out-dir>/<out-filename>`.
pub fn working_shank(version: &str) -> String {
    format!(
        r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "shank-cli {version}"
  exit 0
fi
out_dir=""
out_file=""
while [ $# -gt 0 ]; do
  case "$1" in
    --out-dir) out_dir="$2"; shift 2 ;;
    --out-filename) out_file="$2"; shift 2 ;;
    *) shift ;;
  esac
done
printf '{{"version":"0.1.0","name":"mpl_project_name_program","instructions":[{{"name":"create"}}],"accounts":[],"types":[],"errors":[],"metadata":{{"origin":"shank"}}}}' > "$out_dir/$out_file"
"#
    )
}

/// A fake shank that reports version 0.4.2 and fails every IDL run.
pub const FAILING_SHANK: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "shank-cli 0.4.2"
  exit 0
fi
echo "error: could not parse crate at the given root" >&2
exit 3
"#;

/// A fake cargo that logs its arguments to `$FAKE_CARGO_LOG` and "installs"
/// by copying `$FAKE_SHANK_SOURCE` to `<--root>/bin/shank`.
pub const INSTALLING_CARGO: &str = r#"#!/bin/sh
echo "$@" > "$FAKE_CARGO_LOG"
root=""
while [ $# -gt 0 ]; do
  case "$1" in
    --root) root="$2"; shift 2 ;;
    *) shift ;;
  esac
done
cp "$FAKE_SHANK_SOURCE" "$root/bin/shank"
"#;

/// Write an executable script at `path`.
#[cfg(unix)]
pub fn write_script(path: &Path, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, script).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// The `idl-gen` binary pointed at `repo`, isolated from the caller's
/// environment.
pub fn idl_gen(repo: &Path) -> std::process::Command {
    let mut command = std::process::Command::new(env!("CARGO_BIN_EXE_idl-gen"));
    command
        .arg("--repo-root")
        .arg(repo)
        .env_remove("MPL_IDL_CONFIG")
        .env_remove("MPL_IDL_REPO_ROOT")
        .env("RUST_LOG", "debug");
    command
}
