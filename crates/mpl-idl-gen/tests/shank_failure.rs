#![cfg(unix)]

use assert_matches::assert_matches;
use mpl_idl_gen::{GenerationConfig, GeneratorError, Invoker, ShankGenerator};

mod common;

#[test]
fn failing_shank_surfaces_generation_failed() {
    common::init_logger();
    let repo = common::scratch_repo();
    common::install_fake_shank(repo.path(), common::FAILING_SHANK);

    let config = GenerationConfig::for_repo_root(repo.path());
    let idl_path = config.idl_path();
    let err = Invoker::new(config, ShankGenerator::new()).run().unwrap_err();

    assert_matches!(
        err.generator_error(),
        GeneratorError::ToolFailed { status, stderr, .. }
            if status.code() == Some(3) && stderr.contains("could not parse crate")
    );
    assert!(!idl_path.exists());
}
