//! The immutable generation config handed to a generator.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{paths, settings::GenerationSettings};

/// Backend tool that extracts the IDL from the program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generator {
    /// `shank`, for native (non-Anchor) Solana programs.
    #[default]
    Shank,
}

impl Generator {
    /// Name of the executable.
    pub fn binary_name(self) -> &'static str {
        match self {
            Self::Shank => "shank",
        }
    }

    /// Crate that provides the executable.
    pub fn binary_crate(self) -> &'static str {
        match self {
            Self::Shank => "shank-cli",
        }
    }

    /// Library the program depends on; its version pins the executable.
    pub fn library_name(self) -> &'static str {
        match self {
            Self::Shank => "shank",
        }
    }
}

/// Everything a generator needs for one run, with all paths resolved.
///
/// Built once, never mutated, and consumed by a single invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerationConfig {
    generator: Generator,
    program_name: String,
    program_id: String,
    idl_dir: PathBuf,
    idl_name: String,
    binary_install_dir: PathBuf,
    program_dir: PathBuf,
    remove_existing_idl: bool,
}

impl GenerationConfig {
    /// The fixed configuration for the mpl-project-name program under `repo_root`.
    pub fn for_repo_root(repo_root: &Path) -> Self {
        Self::from_settings(repo_root, GenerationSettings::default())
    }

    /// Build a config from settings, resolving relative paths against `repo_root`.
    pub fn from_settings(repo_root: &Path, settings: GenerationSettings) -> Self {
        Self {
            generator: settings.generator,
            program_name: settings.program_name,
            program_id: settings.program_id,
            idl_dir: paths::resolve(repo_root, &settings.idl_dir),
            idl_name: settings.idl_name,
            binary_install_dir: paths::resolve(repo_root, &settings.binary_install_dir),
            program_dir: paths::resolve(repo_root, &settings.program_dir),
            remove_existing_idl: settings.remove_existing_idl,
        }
    }

    /// Backend tool.
    pub fn generator(&self) -> Generator {
        self.generator
    }

    /// Library name of the program.
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// Expected program address, exactly as configured.
    pub fn program_id(&self) -> &str {
        &self.program_id
    }

    /// Directory the IDL is written to.
    pub fn idl_dir(&self) -> &Path {
        &self.idl_dir
    }

    /// Base file name of the IDL.
    pub fn idl_name(&self) -> &str {
        &self.idl_name
    }

    /// `cargo install --root` for the generator binary.
    pub fn binary_install_dir(&self) -> &Path {
        &self.binary_install_dir
    }

    /// Crate root of the program.
    pub fn program_dir(&self) -> &Path {
        &self.program_dir
    }

    /// Whether a previous IDL is deleted before generating.
    pub fn remove_existing_idl(&self) -> bool {
        self.remove_existing_idl
    }

    /// Full path of the IDL file.
    pub fn idl_path(&self) -> PathBuf {
        self.idl_dir.join(format!("{}.json", self.idl_name))
    }

    /// Where `cargo install --root` places the generator executable.
    pub fn binary_path(&self) -> PathBuf {
        self.binary_install_dir
            .join("bin")
            .join(self.generator.binary_name())
    }
}
