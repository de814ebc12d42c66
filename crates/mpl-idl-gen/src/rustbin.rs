//! Keeps the generator binary in the install directory in step with the
//! library version the program depends on.
//!
//! The program pins e.g. `shank = "0.4.2"` in its manifest. The matching
//! `shank-cli` is installed with `cargo install --root <install dir>` and
//! reinstalled whenever the installed version no longer satisfies that
//! requirement.

use std::{
    env,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info, warn};
use semver::{Version, VersionReq};

use crate::{
    config::{GenerationConfig, Generator},
    error::{GeneratorError, GeneratorResult},
    paths,
};

/// A library dependency's version requirement, as declared and as parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibRequirement {
    /// Requirement text from the manifest.
    pub declared: String,
    /// Parsed requirement.
    pub req: VersionReq,
}

/// Find the version requirement for `lib` in the manifest of the crate at
/// `program_dir`.
///
/// Handles `lib = "1.2"`, `lib = { version = "1.2", .. }` and
/// `lib = { workspace = true }` (also spelled `lib.workspace = true`), the
/// latter resolved through the enclosing workspace's dependency table.
///
/// # Errors
///
/// Fails when a manifest is unreadable or malformed, or does not declare
/// `lib` with a valid version requirement.
pub fn lib_requirement(program_dir: &Path, lib: &str) -> GeneratorResult<LibRequirement> {
    let manifest_path = program_dir.join("Cargo.toml");
    let manifest = read_manifest(&manifest_path)?;

    let missing = || GeneratorError::MissingDependency {
        lib: lib.to_string(),
        manifest: manifest_path.clone(),
    };

    let entry = manifest
        .get("dependencies")
        .and_then(|deps| deps.get(lib))
        .ok_or_else(missing)?;

    let declared = if is_workspace_inherited(entry) {
        let workspace_manifest = paths::find_workspace_root(program_dir)
            .map_err(|_| missing())?
            .join("Cargo.toml");
        let workspace = read_manifest(&workspace_manifest)?;
        workspace
            .get("workspace")
            .and_then(|ws| ws.get("dependencies"))
            .and_then(|deps| deps.get(lib))
            .and_then(declared_version)
            .ok_or_else(|| GeneratorError::MissingDependency {
                lib: lib.to_string(),
                manifest: workspace_manifest.clone(),
            })?
    } else {
        declared_version(entry).ok_or_else(missing)?
    };

    let req = VersionReq::parse(&declared).map_err(|source| {
        GeneratorError::InvalidRequirement {
            lib: lib.to_string(),
            requirement: declared.clone(),
            source,
        }
    })?;

    Ok(LibRequirement { declared, req })
}

fn read_manifest(path: &Path) -> GeneratorResult<toml::Table> {
    let content = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
    content
        .parse::<toml::Table>()
        .map_err(|source| GeneratorError::Manifest {
            path: path.to_path_buf(),
            source,
        })
}

fn declared_version(entry: &toml::Value) -> Option<String> {
    match entry {
        toml::Value::String(version) => Some(version.clone()),
        toml::Value::Table(table) => table
            .get("version")
            .and_then(toml::Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn is_workspace_inherited(entry: &toml::Value) -> bool {
    entry
        .get("workspace")
        .and_then(toml::Value::as_bool)
        .unwrap_or(false)
}

/// Parse the output of `<binary> --version`, e.g. `shank-cli 0.4.2`.
pub fn parse_version_output(output: &str) -> Option<Version> {
    output
        .lines()
        .next()?
        .split_whitespace()
        .last()
        .and_then(|token| Version::parse(token.trim_start_matches('v')).ok())
}

/// Whether the installed binary has to be (re)installed.
pub fn needs_install(installed: Option<&Version>, req: &VersionReq) -> bool {
    installed.is_none_or(|version| !req.matches(version))
}

/// Version of the binary at `binary`, or `None` when it is missing or does
/// not report a parsable version.
pub fn installed_version(binary: &Path) -> Option<Version> {
    if !binary.exists() {
        debug!("{} is not installed", binary.display());
        return None;
    }

    let output = match Command::new(binary).arg("--version").output() {
        Ok(output) => output,
        Err(err) => {
            warn!("Failed to query {} --version: {}", binary.display(), err);
            return None;
        }
    };

    if !output.status.success() {
        warn!(
            "{} --version exited with {}: {}",
            binary.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = parse_version_output(&stdout);
    if version.is_none() {
        warn!(
            "Unrecognized version output from {}: {}",
            binary.display(),
            stdout.trim()
        );
    }
    version
}

/// Make sure the generator binary satisfying the program's library
/// requirement is installed, and return its path.
///
/// # Errors
///
/// Fails when the requirement cannot be determined or `cargo install` fails.
pub fn ensure_binary(config: &GenerationConfig) -> GeneratorResult<PathBuf> {
    let generator = config.generator();
    let requirement = lib_requirement(config.program_dir(), generator.library_name())?;
    let binary = config.binary_path();

    let installed = installed_version(&binary);
    if !needs_install(installed.as_ref(), &requirement.req) {
        if let Some(version) = &installed {
            debug!(
                "{} {} satisfies {}",
                generator.binary_crate(),
                version,
                requirement.declared
            );
        }
        return Ok(binary);
    }

    match &installed {
        Some(version) => info!(
            "Installed {} {} does not satisfy {}, reinstalling",
            generator.binary_crate(),
            version,
            requirement.declared
        ),
        None => info!(
            "Installing {} {} into {}",
            generator.binary_crate(),
            requirement.declared,
            config.binary_install_dir().display()
        ),
    }
    install(generator, &requirement, config.binary_install_dir())?;
    Ok(binary)
}

/// Arguments for `cargo install` of the generator binary into `root`.
///
/// The requirement is passed in its canonical form: cargo rejects a bare
/// partial version such as `0.4` but accepts `^0.4`.
pub fn install_args(
    generator: Generator,
    requirement: &LibRequirement,
    root: &Path,
) -> Vec<OsString> {
    vec![
        "install".into(),
        generator.binary_crate().into(),
        "--version".into(),
        requirement.req.to_string().into(),
        "--root".into(),
        root.as_os_str().to_owned(),
        "--force".into(),
        "--locked".into(),
    ]
}

/// The cargo executable: `$CARGO` when set (as it is under cargo itself),
/// `cargo` from `PATH` otherwise.
fn cargo_binary() -> PathBuf {
    env::var_os("CARGO").map_or_else(|| PathBuf::from("cargo"), PathBuf::from)
}

fn install(
    generator: Generator,
    requirement: &LibRequirement,
    root: &Path,
) -> GeneratorResult<()> {
    let cargo = cargo_binary();
    let args = install_args(generator, requirement, root);
    debug!("Running {} {:?}", cargo.display(), args);
    let status = Command::new(&cargo)
        .args(&args)
        .status()
        .map_err(|source| GeneratorError::Spawn {
            program: cargo,
            source,
        })?;

    if !status.success() {
        return Err(GeneratorError::InstallFailed {
            krate: generator.binary_crate().to_string(),
            requirement: requirement.req.to_string(),
            status,
        });
    }
    Ok(())
}
