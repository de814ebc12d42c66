//! User-facing generation settings.
//!
//! Settings are the serializable form of a [`GenerationConfig`]: every field
//! has a default matching the mpl-project-name layout, and paths may be
//! relative to the repository root. They are read from an optional TOML file
//! such as `configs/shank.toml`:
//!
//! ```toml
//! generator = "shank"
//! program_name = "mpl_project_name_program"
//! program_id = "MyProgram1111111111111111111111111111111111"
//! idl_dir = "idls"
//! idl_name = "mpl_project_name"
//! binary_install_dir = ".crates"
//! program_dir = "programs/mpl-project-name"
//! ```
//!
//! [`GenerationConfig`]: crate::config::GenerationConfig

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{config::Generator, error::SettingsError};

/// Settings file looked up under the repository root when none is given.
pub const DEFAULT_SETTINGS_PATH: &str = "configs/shank.toml";

/// Serializable generation settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationSettings {
    /// Backend tool.
    pub generator: Generator,
    /// Library name of the program.
    pub program_name: String,
    /// Expected program address.
    pub program_id: String,
    /// IDL output directory.
    pub idl_dir: PathBuf,
    /// Base file name of the IDL.
    pub idl_name: String,
    /// Install root of the generator binary.
    pub binary_install_dir: PathBuf,
    /// Crate root of the program.
    pub program_dir: PathBuf,
    /// Delete a previous IDL before generating.
    pub remove_existing_idl: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            generator: Generator::Shank,
            program_name: mpl_project_name_ids::PROGRAM_NAME.to_string(),
            program_id: mpl_project_name_ids::PROGRAM_ID.to_string(),
            idl_dir: PathBuf::from("idls"),
            idl_name: mpl_project_name_ids::IDL_NAME.to_string(),
            binary_install_dir: PathBuf::from(".crates"),
            program_dir: Path::new("programs").join(mpl_project_name_ids::PROGRAM_DIR_NAME),
            remove_existing_idl: true,
        }
    }
}

impl GenerationSettings {
    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Fails on invalid TOML, unknown keys or an unknown generator.
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read settings from `path`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded settings from {}", path.display());
        Self::from_toml(path, &content)
    }

    /// Read settings from `path` if it exists, otherwise use the defaults.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!("Loaded settings from {}", path.display());
                Self::from_toml(path, &content)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = GenerationSettings::from_toml(Path::new("s.toml"), "").unwrap();
        assert_eq!(settings, GenerationSettings::default());
    }

    #[test]
    fn overrides_apply_field_by_field() {
        let settings = GenerationSettings::from_toml(
            Path::new("s.toml"),
            r#"
                program_id = "Other11111111111111111111111111111111111111"
                idl_dir = "/abs/idls"
                remove_existing_idl = false
            "#,
        )
        .unwrap();

        assert_eq!(settings.program_id, "Other11111111111111111111111111111111111111");
        assert_eq!(settings.idl_dir, Path::new("/abs/idls"));
        assert!(!settings.remove_existing_idl);
        assert_eq!(settings.idl_name, "mpl_project_name");
        assert_eq!(settings.generator, Generator::Shank);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = GenerationSettings::from_toml(Path::new("s.toml"), "idl_hook = \"x\"")
            .unwrap_err();
        assert_matches!(err, SettingsError::Parse { .. });
    }

    #[test]
    fn unknown_generator_is_rejected() {
        let err = GenerationSettings::from_toml(Path::new("s.toml"), "generator = \"anchor\"")
            .unwrap_err();
        assert_matches!(err, SettingsError::Parse { .. });
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = GenerationSettings::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, GenerationSettings::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GenerationSettings::load(&dir.path().join("nope.toml")).unwrap_err();
        assert_matches!(err, SettingsError::Read { .. });
    }

    #[test]
    fn shipped_settings_match_defaults() {
        let path = crate::paths::default_repo_root().join(DEFAULT_SETTINGS_PATH);
        assert_eq!(GenerationSettings::load(&path).unwrap(), GenerationSettings::default());
    }
}
