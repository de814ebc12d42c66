#![cfg(unix)]

use std::fs;

mod common;

#[test]
fn outdated_binary_is_reinstalled_before_generating() {
    let repo = common::scratch_repo();
    common::install_fake_shank(repo.path(), &common::working_shank("0.1.0"));

    let tools = repo.path().join("tools");
    let cargo = tools.join("cargo");
    let cargo_log = repo.path().join("cargo.log");
    let fresh_shank = tools.join("shank-0.4.2");
    common::write_script(&cargo, common::INSTALLING_CARGO);
    common::write_script(&fresh_shank, &common::working_shank("0.4.2"));

    let output = common::idl_gen(repo.path())
        .env("CARGO", &cargo)
        .env("FAKE_CARGO_LOG", &cargo_log)
        .env("FAKE_SHANK_SOURCE", &fresh_shank)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let install_root = repo.path().join(".crates");
    assert_eq!(
        fs::read_to_string(&cargo_log).unwrap().trim(),
        format!(
            "install shank-cli --version ^0.4.2 --root {} --force --locked",
            install_root.display()
        )
    );
    assert_eq!(
        fs::read_to_string(install_root.join("bin").join("shank")).unwrap(),
        common::working_shank("0.4.2")
    );
    assert!(repo.path().join("idls").join("mpl_project_name.json").exists());
}
