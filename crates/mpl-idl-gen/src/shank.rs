//! The shank backend: provisions the `shank` binary and runs `shank idl`.

use std::{fs, io, path::Path, process::Command};

use log::{debug, info};

use crate::{
    config::GenerationConfig,
    error::{GeneratorError, GeneratorResult},
    idl,
    invoker::IdlGenerator,
    rustbin,
};

/// Generates IDLs by shelling out to the `shank` CLI.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShankGenerator {
    skip_install: bool,
}

impl ShankGenerator {
    /// A generator that installs `shank-cli` on demand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use whatever binary is in the install directory without checking its
    /// version against the program's `shank` dependency.
    pub fn skip_install(mut self, skip_install: bool) -> Self {
        self.skip_install = skip_install;
        self
    }
}

impl IdlGenerator for ShankGenerator {
    fn generate(&self, config: &GenerationConfig) -> GeneratorResult<()> {
        let binary = if self.skip_install {
            config.binary_path()
        } else {
            rustbin::ensure_binary(config)?
        };

        let idl_dir = config.idl_dir();
        fs::create_dir_all(idl_dir).map_err(|e| GeneratorError::io(idl_dir, e))?;

        let idl_path = config.idl_path();
        if config.remove_existing_idl() {
            remove_if_exists(&idl_path)?;
        }

        info!(
            "Generating IDL for {} into {}",
            config.program_name(),
            idl_path.display()
        );

        let mut command = Command::new(&binary);
        command
            .arg("idl")
            .arg("--out-dir")
            .arg(idl_dir)
            .arg("--crate-root")
            .arg(config.program_dir())
            .arg("--out-filename")
            .arg(format!("{}.json", config.idl_name()))
            .arg("--program-id")
            .arg(config.program_id());
        debug!("Running {:?}", command);

        let output = command.output().map_err(|source| GeneratorError::Spawn {
            program: binary.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(GeneratorError::ToolFailed {
                program: binary,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("shank stdout:\n{}", stdout.trim_end());
        }

        idl::finalize(&idl_path, config.program_id())?;
        info!("IDL written to: {}", idl_path.display());
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> GeneratorResult<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed existing IDL {}", path.display());
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(GeneratorError::io(path, err)),
    }
}
