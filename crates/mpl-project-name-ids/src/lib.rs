//! Single source of truth for the mpl-project-name program identity.
//!
//! This crate defines the program ID and the names derived from it as
//! `&'static str` constants, so the IDL tooling and any client crate agree on
//! them at compile time.
//!
//! # Usage
//!
//! ```rust
//! assert_eq!(mpl_project_name_ids::IDL_FILE_NAME, "mpl_project_name.json");
//! ```

#![cfg_attr(not(test), no_std)]

// =============================================================================
// Program identity
// =============================================================================

/// Expected deployment address of the mpl-project-name program.
///
/// Placeholder until the program keypair is generated; the IDL tooling passes
/// it through verbatim.
pub const PROGRAM_ID: &str = "MyProgram1111111111111111111111111111111111";

/// Library name of the program crate, as it appears in the emitted IDL.
pub const PROGRAM_NAME: &str = "mpl_project_name_program";

// =============================================================================
// Layout
// =============================================================================

/// Directory of the program crate under `programs/`.
pub const PROGRAM_DIR_NAME: &str = "mpl-project-name";

/// Base file name of the generated IDL (without extension).
pub const IDL_NAME: &str = "mpl_project_name";

/// File name of the generated IDL.
pub const IDL_FILE_NAME: &str = "mpl_project_name.json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idl_file_name_matches_idl_name() {
        assert_eq!(IDL_FILE_NAME.strip_suffix(".json"), Some(IDL_NAME));
    }

    #[test]
    fn program_id_is_address_sized() {
        assert_eq!(PROGRAM_ID.len(), 43);
        assert!(PROGRAM_ID.bytes().all(|b| b.is_ascii_alphanumeric()));
    }
}
