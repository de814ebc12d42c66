//! IDL generation for the mpl-project-name program.
//!
//! This crate builds the fixed [`GenerationConfig`] for the program (program
//! name and ID, `idls/` output directory, `.crates/` binary install directory,
//! `programs/mpl-project-name` crate root) and delegates the actual IDL
//! extraction to the external `shank` CLI.
//!
//! ```rust,no_run
//! // Generate idls/mpl_project_name.json for the repository this crate lives in.
//! mpl_idl_gen::run()?;
//! # Ok::<(), mpl_idl_gen::GenerationFailed>(())
//! ```

pub mod config;
pub mod error;
pub mod idl;
pub mod invoker;
pub mod paths;
pub mod rustbin;
pub mod settings;
pub mod shank;

pub use config::{GenerationConfig, Generator};
pub use error::{GenerationFailed, GeneratorError, SettingsError};
pub use invoker::{IdlGenerator, Invoker};
pub use settings::GenerationSettings;
pub use shank::ShankGenerator;

/// Generate the program's IDL with the fixed configuration.
///
/// The repository root is the workspace this crate was built in.
///
/// # Errors
///
/// Returns [`GenerationFailed`] when shank cannot be installed, fails, or
/// emits no usable IDL.
pub fn run() -> Result<(), GenerationFailed> {
    let config = GenerationConfig::for_repo_root(&paths::default_repo_root());
    Invoker::new(config, ShankGenerator::new()).run()
}
