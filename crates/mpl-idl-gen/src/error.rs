//! Error types for IDL generation.

use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// The single failure the invoker surfaces.
///
/// Whatever went wrong inside the generator is kept as the error source, so
/// the diagnostic reaches the process exit unchanged.
#[derive(Debug, Error)]
#[error("IDL generation failed")]
pub struct GenerationFailed {
    #[source]
    source: GeneratorError,
}

impl GenerationFailed {
    /// The generator error that caused the failure.
    pub fn generator_error(&self) -> &GeneratorError {
        &self.source
    }
}

impl From<GeneratorError> for GenerationFailed {
    fn from(source: GeneratorError) -> Self {
        Self { source }
    }
}

/// Errors raised by an IDL generator backend.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Filesystem operation on a path failed.
    #[error("I/O error on {}", path.display())]
    Io {
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The program manifest is not valid TOML.
    #[error("failed to parse manifest {}", path.display())]
    Manifest {
        /// Manifest path.
        path: PathBuf,
        /// TOML parse error.
        #[source]
        source: toml::de::Error,
    },

    /// The program manifest does not declare the generator library.
    #[error("{} does not depend on `{lib}`", manifest.display())]
    MissingDependency {
        /// Library that was looked up.
        lib: String,
        /// Manifest that lacks it.
        manifest: PathBuf,
    },

    /// The declared library version is not a semver requirement.
    #[error("invalid version requirement `{requirement}` for `{lib}`")]
    InvalidRequirement {
        /// Library the requirement belongs to.
        lib: String,
        /// Requirement text as declared.
        requirement: String,
        /// semver parse error.
        #[source]
        source: semver::Error,
    },

    /// A child process could not be started.
    #[error("failed to run {}", program.display())]
    Spawn {
        /// Executable that failed to start.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A child process exited unsuccessfully.
    #[error("{} exited with {status}: {stderr}", program.display())]
    ToolFailed {
        /// Executable that failed.
        program: PathBuf,
        /// Its exit status.
        status: ExitStatus,
        /// Its captured stderr, trimmed.
        stderr: String,
    },

    /// Installing the generator binary failed.
    #[error("cargo install {krate}@{requirement} exited with {status}")]
    InstallFailed {
        /// Crate being installed.
        krate: String,
        /// Version requirement passed to cargo.
        requirement: String,
        /// cargo's exit status.
        status: ExitStatus,
    },

    /// The generator exited cleanly but emitted no IDL.
    #[error("generator did not write {}", path.display())]
    MissingIdl {
        /// Expected IDL path.
        path: PathBuf,
    },

    /// The emitted IDL is not a JSON object.
    #[error("invalid IDL in {}: {reason}", path.display())]
    InvalidIdl {
        /// IDL path.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },
}

impl GeneratorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for generator backends.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Errors raised while loading generation settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings {}", path.display())]
    Read {
        /// Settings path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The settings file is not valid TOML or has unknown keys.
    #[error("failed to parse settings {}", path.display())]
    Parse {
        /// Settings path.
        path: PathBuf,
        /// TOML parse error.
        #[source]
        source: toml::de::Error,
    },

    /// No enclosing cargo workspace was found.
    #[error("could not find workspace root (Cargo.toml with [workspace]) above {}", start.display())]
    WorkspaceRootNotFound {
        /// Directory the search started from.
        start: PathBuf,
    },

    /// A relative path could not be made absolute.
    #[error("failed to read the current directory")]
    CurrentDir {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
